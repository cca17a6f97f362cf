use crate::entities::{categories, prelude::*, products};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

/// Product joined with its category name for display.
#[derive(Debug, Clone)]
pub struct ProductWithCategory {
    pub product: products::Model,
    pub category_name: Option<String>,
}

/// Writable product fields.
pub struct ProductInput {
    pub name: String,
    pub brand: String,
    pub category_id: i32,
    pub image_url: Option<String>,
}

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<ProductWithCategory>> {
        let rows = Products::find()
            .find_also_related(Categories)
            .order_by_asc(products::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list products")?;

        Ok(rows.into_iter().map(join_category).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<ProductWithCategory>> {
        let row = Products::find_by_id(id)
            .find_also_related(Categories)
            .one(&self.conn)
            .await
            .context("Failed to query product")?;

        Ok(row.map(join_category))
    }

    pub async fn get_model(&self, id: i32) -> Result<Option<products::Model>> {
        Products::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query product")
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Products::find_by_id(id)
            .count(&self.conn)
            .await
            .context("Failed to check product existence")?;
        Ok(count > 0)
    }

    pub async fn create(&self, input: ProductInput) -> Result<products::Model> {
        let active = products::ActiveModel {
            name: Set(input.name),
            brand: Set(input.brand),
            category_id: Set(input.category_id),
            image_url: Set(input.image_url),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert product")
    }

    pub async fn update(&self, existing: products::Model, input: ProductInput) -> Result<products::Model> {
        let mut active: products::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.brand = Set(input.brand);
        active.category_id = Set(input.category_id);
        active.image_url = Set(input.image_url);

        active
            .update(&self.conn)
            .await
            .context("Failed to update product")
    }

    /// Reviews of the product go with it (cascading foreign key).
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Products::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete product")?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Products::find()
            .count(&self.conn)
            .await
            .context("Failed to count products")
    }
}

fn join_category((product, category): (products::Model, Option<categories::Model>)) -> ProductWithCategory {
    ProductWithCategory {
        product,
        category_name: category.map(|c| c.name),
    }
}
