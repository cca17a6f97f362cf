use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Append-only audit record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `None` for anonymous events such as a failed login
    pub user_id: Option<i32>,
    pub action: String,
    pub details: String,
    pub timestamp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
