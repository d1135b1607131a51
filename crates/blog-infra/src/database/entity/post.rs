//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{NewPost, Post, Status};

/// Stored form of [`Status`], kept as plain text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PostStatus {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "PENDING_MODERATED")]
    PendingModerated,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub status: PostStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Status> for PostStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Draft => PostStatus::Draft,
            Status::PendingModerated => PostStatus::PendingModerated,
            Status::Rejected => PostStatus::Rejected,
        }
    }
}

impl From<PostStatus> for Status {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => Status::Draft,
            PostStatus::PendingModerated => Status::PendingModerated,
            PostStatus::Rejected => Status::Rejected,
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            status: model.status.into(),
            created_at: model.created_at.into(),
        }
    }
}

/// A new post gets its id and creation time here, exactly once.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            title: Set(post.title),
            content: Set(post.content),
            status: Set(post.status.into()),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

/// Changes to an existing post. `created_at` stays untouched.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: sea_orm::Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            status: Set(post.status.into()),
            created_at: sea_orm::NotSet,
        }
    }
}
