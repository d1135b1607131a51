//! PostgreSQL repository implementations.

use async_trait::async_trait;
use futures::StreamExt;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Comment, NewComment, NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, PostStream};
use blog_core::specification::{DeleteSpecification, PostFilter, UpdateSpecification};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity, PostStatus};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// `LIKE` pattern matching `text` anywhere, with wildcards in `text` escaped.
fn contains_pattern(text: &str) -> LikeExpr {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

/// Render a post filter into a SeaORM condition.
pub(crate) fn condition(filter: &PostFilter) -> Condition {
    match filter {
        PostFilter::Any => Condition::all(),
        PostFilter::TitleContains(text) => {
            Condition::all().add(post::Column::Title.like(contains_pattern(text)))
        }
        PostFilter::Keyword(text) => Condition::any()
            .add(post::Column::Title.like(contains_pattern(text)))
            .add(post::Column::Content.like(contains_pattern(text))),
        PostFilter::StatusIs(status) => {
            Condition::all().add(post::Column::Status.eq(PostStatus::from(*status)))
        }
        PostFilter::All(filters) => filters
            .iter()
            .fold(Condition::all(), |cond, f| cond.add(condition(f))),
    }
}

async fn insert_posts<C>(db: &C, posts: Vec<NewPost>) -> Result<Vec<Post>, DbErr>
where
    C: ConnectionTrait,
{
    let mut saved = Vec::with_capacity(posts.len());
    for new_post in posts {
        tracing::debug!(title = %new_post.title, "Persisting post");
        let model = post::ActiveModel::from(new_post).insert(db).await?;
        saved.push(model.into());
    }
    Ok(saved)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find().all(&self.db).await.map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn stream_all<'a>(&'a self) -> Result<PostStream<'a>, RepoError> {
        let rows = PostEntity::find()
            .stream(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .map(|row| row.map(Post::from).map_err(map_db_err))
            .boxed())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, post: NewPost) -> Result<Post, RepoError> {
        tracing::debug!(title = %post.title, "Persisting post");

        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn save_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let saved = insert_posts(&txn, posts).await.map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(saved)
    }

    async fn update(&self, post: Post) -> Result<Option<Post>, RepoError> {
        let post_id = post.id;
        match post::ActiveModel::from(post).update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => {
                tracing::debug!(post_id = %post_id, "No post to update");
                Ok(None)
            }
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        tracing::debug!(post_id = %id, "Removing post");

        // Comments go with the post through the foreign key cascade.
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(deleted = result.rows_affected, "Removed all posts");
        Ok(result.rows_affected)
    }

    async fn find_all_matching(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(condition(filter))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update_all(&self, spec: &UpdateSpecification) -> Result<u64, RepoError> {
        let status = PostStatus::from(spec.set_status);
        let result = PostEntity::update_many()
            .col_expr(post::Column::Status, Expr::value(status.to_value()))
            .filter(condition(&spec.filter))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(updated = result.rows_affected, status = %spec.set_status, "Bulk post update");
        Ok(result.rows_affected)
    }

    async fn delete_all_matching(&self, spec: &DeleteSpecification) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .filter(condition(&spec.filter))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(deleted = result.rows_affected, "Bulk post delete");
        Ok(result.rows_affected)
    }

    async fn replace_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let deleted = PostEntity::delete_many()
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        tracing::debug!(deleted = deleted.rows_affected, "Removed all posts");

        let saved = insert_posts(&txn, posts).await.map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(saved)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn save(&self, comment: NewComment) -> Result<Comment, RepoError> {
        tracing::debug!(post_id = %comment.post_id, "Persisting comment");

        let model = comment::ActiveModel::from(comment)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }
}
