//! `SeaORM` implementation of the `CatalogService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::db::{ProductInput, ProductWithCategory, Store};
use crate::domain::Identity;
use crate::entities::{categories, products};
use crate::services::catalog_service::{CatalogError, CatalogService, ProductDraft};
use crate::services::input;
use crate::services::logs::{AuditAction, LogService};

pub struct SeaOrmCatalogService {
    store: Store,
    audit: Arc<LogService>,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store, audit: Arc<LogService>) -> Self {
        Self { store, audit }
    }

    fn category_name(name: &str) -> Result<String, CatalogError> {
        input::required_text("Name", name, input::MAX_NAME_LEN).map_err(CatalogError::Validation)
    }

    fn product_input(draft: ProductDraft) -> Result<ProductInput, CatalogError> {
        let name = input::required_text("Name", &draft.name, input::MAX_NAME_LEN)
            .map_err(CatalogError::Validation)?;
        let brand = input::required_text("Brand", &draft.brand, input::MAX_NAME_LEN)
            .map_err(CatalogError::Validation)?;
        let image_url =
            input::optional_url(draft.image_url.as_deref()).map_err(CatalogError::Validation)?;

        Ok(ProductInput {
            name,
            brand,
            category_id: draft.category_id,
            image_url,
        })
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_categories(&self) -> Result<Vec<categories::Model>, CatalogError> {
        Ok(self.store.list_categories().await?)
    }

    async fn get_category(&self, id: i32) -> Result<categories::Model, CatalogError> {
        self.store
            .get_category(id)
            .await?
            .ok_or(CatalogError::NotFound("Category"))
    }

    async fn create_category(
        &self,
        actor: &Identity,
        name: &str,
    ) -> Result<categories::Model, CatalogError> {
        let name = Self::category_name(name)?;

        if self.store.find_category_by_name(&name).await?.is_some() {
            return Err(CatalogError::DuplicateName);
        }

        let category = self.store.create_category(&name).await?;
        info!(category_id = category.id, name = %category.name, "Created category");

        self.audit
            .record(
                Some(actor.user_id),
                AuditAction::CreateCategory,
                &format!("CategoryId={}", category.id),
            )
            .await;

        Ok(category)
    }

    async fn update_category(
        &self,
        actor: &Identity,
        id: i32,
        name: &str,
    ) -> Result<(), CatalogError> {
        let name = Self::category_name(name)?;

        if !self.store.category_exists(id).await? {
            return Err(CatalogError::NotFound("Category"));
        }

        let taken = self.store.find_category_by_name(&name).await?;
        if taken.is_some_and(|other| other.id != id) {
            return Err(CatalogError::DuplicateName);
        }

        self.store
            .rename_category(id, &name)
            .await?
            .ok_or(CatalogError::NotFound("Category"))?;

        self.audit
            .record(
                Some(actor.user_id),
                AuditAction::UpdateCategory,
                &format!("CategoryId={id}"),
            )
            .await;

        Ok(())
    }

    async fn delete_category(&self, actor: &Identity, id: i32) -> Result<(), CatalogError> {
        if !self.store.category_exists(id).await? {
            return Err(CatalogError::NotFound("Category"));
        }

        let dependents = self.store.category_product_count(id).await?;
        if dependents > 0 {
            return Err(CatalogError::CategoryInUse(dependents));
        }

        if !self.store.delete_category(id).await? {
            return Err(CatalogError::NotFound("Category"));
        }
        info!(category_id = id, "Deleted category");

        self.audit
            .record(
                Some(actor.user_id),
                AuditAction::DeleteCategory,
                &format!("CategoryId={id}"),
            )
            .await;

        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<ProductWithCategory>, CatalogError> {
        Ok(self.store.list_products().await?)
    }

    async fn get_product(&self, id: i32) -> Result<ProductWithCategory, CatalogError> {
        self.store
            .get_product(id)
            .await?
            .ok_or(CatalogError::NotFound("Product"))
    }

    async fn create_product(
        &self,
        actor: &Identity,
        draft: ProductDraft,
    ) -> Result<products::Model, CatalogError> {
        let input = Self::product_input(draft)?;

        if !self.store.category_exists(input.category_id).await? {
            return Err(CatalogError::InvalidCategory);
        }

        let product = self.store.create_product(input).await?;
        info!(product_id = product.id, "Created product");

        self.audit
            .record(
                Some(actor.user_id),
                AuditAction::CreateProduct,
                &format!("ProductId={}", product.id),
            )
            .await;

        Ok(product)
    }

    async fn update_product(
        &self,
        actor: &Identity,
        id: i32,
        draft: ProductDraft,
    ) -> Result<(), CatalogError> {
        let input = Self::product_input(draft)?;

        let existing = self
            .store
            .get_product_model(id)
            .await?
            .ok_or(CatalogError::NotFound("Product"))?;

        if input.category_id != existing.category_id
            && !self.store.category_exists(input.category_id).await?
        {
            return Err(CatalogError::InvalidCategory);
        }

        self.store.update_product(existing, input).await?;

        self.audit
            .record(
                Some(actor.user_id),
                AuditAction::UpdateProduct,
                &format!("ProductId={id}"),
            )
            .await;

        Ok(())
    }

    async fn delete_product(&self, actor: &Identity, id: i32) -> Result<(), CatalogError> {
        if !self.store.delete_product(id).await? {
            return Err(CatalogError::NotFound("Product"));
        }
        info!(product_id = id, "Deleted product");

        self.audit
            .record(
                Some(actor.user_id),
                AuditAction::DeleteProduct,
                &format!("ProductId={id}"),
            )
            .await;

        Ok(())
    }
}
