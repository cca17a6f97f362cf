//! Domain service for the catalog: categories and the products filed under them.

use thiserror::Error;

use crate::db::ProductWithCategory;
use crate::domain::Identity;
use crate::entities::{categories, products};

/// Errors specific to catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Category name already exist.")]
    DuplicateName,

    #[error("Invalid categoryId - category does not exist.")]
    InvalidCategory,

    #[error("Category still has {0} product(s).")]
    CategoryInUse(u64),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Writable product fields as received from a client.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub category_id: i32,
    pub image_url: Option<String>,
}

/// Domain service trait for categories and products.
///
/// Mutations take the acting administrator for audit attribution. Role
/// checks happen at the HTTP boundary.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<categories::Model>, CatalogError>;

    async fn get_category(&self, id: i32) -> Result<categories::Model, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] when the exact name is taken.
    async fn create_category(
        &self,
        actor: &Identity,
        name: &str,
    ) -> Result<categories::Model, CatalogError>;

    async fn update_category(
        &self,
        actor: &Identity,
        id: i32,
        name: &str,
    ) -> Result<(), CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryInUse`] while products still reference it.
    async fn delete_category(&self, actor: &Identity, id: i32) -> Result<(), CatalogError>;

    async fn list_products(&self) -> Result<Vec<ProductWithCategory>, CatalogError>;

    async fn get_product(&self, id: i32) -> Result<ProductWithCategory, CatalogError>;

    async fn create_product(
        &self,
        actor: &Identity,
        draft: ProductDraft,
    ) -> Result<products::Model, CatalogError>;

    /// The category reference is re-checked only when it changes.
    async fn update_product(
        &self,
        actor: &Identity,
        id: i32,
        draft: ProductDraft,
    ) -> Result<(), CatalogError>;

    /// Removes the product and, through the foreign key, its reviews.
    async fn delete_product(&self, actor: &Identity, id: i32) -> Result<(), CatalogError>;
}
