use crate::entities::{categories, prelude::*, products};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<categories::Model>> {
        Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list categories")
    }

    pub async fn get(&self, id: i32) -> Result<Option<categories::Model>> {
        Categories::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query category")
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Categories::find_by_id(id)
            .count(&self.conn)
            .await
            .context("Failed to check category existence")?;
        Ok(count > 0)
    }

    /// Exact, case-sensitive name lookup.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<categories::Model>> {
        Categories::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query category by name")
    }

    pub async fn create(&self, name: &str) -> Result<categories::Model> {
        let active = categories::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert category")
    }

    /// Returns `None` when the category does not exist.
    pub async fn rename(&self, id: i32, name: &str) -> Result<Option<categories::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: categories::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update category")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Categories::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete category")?;
        Ok(result.rows_affected > 0)
    }

    pub async fn product_count(&self, id: i32) -> Result<u64> {
        Products::find()
            .filter(products::Column::CategoryId.eq(id))
            .count(&self.conn)
            .await
            .context("Failed to count products in category")
    }

    pub async fn count(&self) -> Result<u64> {
        Categories::find()
            .count(&self.conn)
            .await
            .context("Failed to count categories")
    }
}
