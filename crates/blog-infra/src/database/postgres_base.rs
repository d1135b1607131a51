use std::marker::PhantomData;

use sea_orm::{DbConn, DbErr, EntityTrait, SqlErr};

use blog_core::error::RepoError;

/// Generic PostgreSQL repository over a single SeaORM entity.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Translate a SeaORM error into the repository error space.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            return RepoError::Constraint(format!("Entity already exists: {msg}"));
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            return RepoError::Constraint(format!("Referenced entity missing: {msg}"));
        }
        _ => {}
    }

    match err {
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}
