use crate::config::SecurityConfig;
use crate::domain::{ReviewStatus, Role};
use crate::entities::{categories, logs, products, reviews};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use crate::entities::logs::Model as AuditLogEntry;
pub use repositories::product::{ProductInput, ProductWithCategory};
pub use repositories::review::{NewReview, OwnReviewRow};
pub use repositories::user::{NewUser, User};

/// Typed access to the five record collections. Cheap to clone: it only
/// holds the pooled connection handle.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    fn logs_repo(&self) -> repositories::logs::LogRepository {
        repositories::logs::LogRepository::new(self.conn.clone())
    }

    // Users

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        self.user_repo().email_exists(email).await
    }

    pub async fn has_admin(&self) -> Result<bool> {
        self.user_repo().has_admin().await
    }

    pub async fn create_user(&self, new_user: NewUser<'_>, config: &SecurityConfig) -> Result<User> {
        self.user_repo().create(new_user, config).await
    }

    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Option<User>> {
        self.user_repo()
            .verify_credentials(email, password, config)
            .await
    }

    pub async fn set_user_role(&self, id: i32, role: Role) -> Result<User> {
        self.user_repo().set_role(id, role).await
    }

    pub async fn user_count(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    // Categories

    pub async fn list_categories(&self) -> Result<Vec<categories::Model>> {
        self.category_repo().list().await
    }

    pub async fn get_category(&self, id: i32) -> Result<Option<categories::Model>> {
        self.category_repo().get(id).await
    }

    pub async fn category_exists(&self, id: i32) -> Result<bool> {
        self.category_repo().exists(id).await
    }

    pub async fn find_category_by_name(&self, name: &str) -> Result<Option<categories::Model>> {
        self.category_repo().find_by_name(name).await
    }

    pub async fn create_category(&self, name: &str) -> Result<categories::Model> {
        self.category_repo().create(name).await
    }

    pub async fn rename_category(&self, id: i32, name: &str) -> Result<Option<categories::Model>> {
        self.category_repo().rename(id, name).await
    }

    pub async fn delete_category(&self, id: i32) -> Result<bool> {
        self.category_repo().delete(id).await
    }

    pub async fn category_product_count(&self, id: i32) -> Result<u64> {
        self.category_repo().product_count(id).await
    }

    pub async fn category_count(&self) -> Result<u64> {
        self.category_repo().count().await
    }

    // Products

    pub async fn list_products(&self) -> Result<Vec<ProductWithCategory>> {
        self.product_repo().list().await
    }

    pub async fn get_product(&self, id: i32) -> Result<Option<ProductWithCategory>> {
        self.product_repo().get(id).await
    }

    pub async fn get_product_model(&self, id: i32) -> Result<Option<products::Model>> {
        self.product_repo().get_model(id).await
    }

    pub async fn product_exists(&self, id: i32) -> Result<bool> {
        self.product_repo().exists(id).await
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<products::Model> {
        self.product_repo().create(input).await
    }

    pub async fn update_product(
        &self,
        existing: products::Model,
        input: ProductInput,
    ) -> Result<products::Model> {
        self.product_repo().update(existing, input).await
    }

    pub async fn delete_product(&self, id: i32) -> Result<bool> {
        self.product_repo().delete(id).await
    }

    pub async fn product_count(&self) -> Result<u64> {
        self.product_repo().count().await
    }

    // Reviews

    pub async fn create_review(&self, new_review: NewReview) -> Result<reviews::Model> {
        self.review_repo().create(new_review).await
    }

    pub async fn get_review(&self, id: i32) -> Result<Option<reviews::Model>> {
        self.review_repo().get(id).await
    }

    pub async fn get_owned_review(&self, id: i32, user_id: i32) -> Result<Option<reviews::Model>> {
        self.review_repo().get_owned(id, user_id).await
    }

    pub async fn set_review_status(
        &self,
        review: reviews::Model,
        status: ReviewStatus,
    ) -> Result<reviews::Model> {
        self.review_repo().set_status(review, status).await
    }

    pub async fn delete_review(&self, id: i32) -> Result<bool> {
        self.review_repo().delete(id).await
    }

    pub async fn list_approved_reviews(&self, product_id: i32) -> Result<Vec<reviews::Model>> {
        self.review_repo().list_approved_for_product(product_id).await
    }

    pub async fn list_pending_reviews(&self) -> Result<Vec<reviews::Model>> {
        self.review_repo().list_pending().await
    }

    pub async fn list_reviews_for_user(&self, user_id: i32) -> Result<Vec<OwnReviewRow>> {
        self.review_repo().list_for_user(user_id).await
    }

    pub async fn review_count(&self) -> Result<u64> {
        self.review_repo().count().await
    }

    pub async fn review_count_by_status(&self, status: ReviewStatus) -> Result<u64> {
        self.review_repo().count_by_status(status).await
    }

    // Audit log

    pub async fn add_log(&self, user_id: Option<i32>, action: &str, details: &str) -> Result<()> {
        self.logs_repo().add(user_id, action, details).await
    }

    pub async fn latest_logs(&self, limit: u64) -> Result<Vec<logs::Model>> {
        self.logs_repo().latest(limit).await
    }
}
