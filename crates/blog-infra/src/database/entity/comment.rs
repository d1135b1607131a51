//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{Comment, NewComment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub post_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Comment.
impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            content: model.content,
            created_at: model.created_at.into(),
        }
    }
}

impl From<NewComment> for ActiveModel {
    fn from(comment: NewComment) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            content: Set(comment.content),
            created_at: Set(chrono::Utc::now().into()),
            post_id: Set(comment.post_id),
        }
    }
}
