use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: String,

    /// Unique together with `user_id`, see `idx_favorites_user_imdb`.
    pub imdb_id: String,

    pub title: String,

    pub year: String,

    pub poster: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub movie_data_json: String,

    /// RFC 3339, UTC
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
