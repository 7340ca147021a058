//! Review photo database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ReviewPhoto;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "review_photos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub review_id: i32,
    pub file_path: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<Json>,
    pub sort_order: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::review::Entity",
        from = "Column::ReviewId",
        to = "super::review::Column::Id",
        on_delete = "Cascade"
    )]
    Review,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ReviewPhoto {
    fn from(model: Model) -> Self {
        ReviewPhoto {
            id: model.id,
            review_id: model.review_id,
            file_path: model.file_path,
            metadata: model.metadata,
            sort_order: model.sort_order,
            created_at: model.created_at,
        }
    }
}
