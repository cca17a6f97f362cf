use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CatalogService, LogService, ReportService, ReviewService, SeaOrmAuthService,
    SeaOrmCatalogService, SeaOrmReportService, SeaOrmReviewService, TokenService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tokens: Arc<TokenService>,

    pub auth_service: Arc<dyn AuthService>,

    pub catalog_service: Arc<dyn CatalogService>,

    pub review_service: Arc<dyn ReviewService>,

    pub report_service: Arc<dyn ReportService>,
}

impl SharedState {
    /// Connects the store (running migrations) and wires the services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services over an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let tokens = Arc::new(TokenService::new(&config.auth));
        let log_service = Arc::new(LogService::new(store.clone()));

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            tokens.clone(),
            log_service.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService + Send + Sync + 'static>;

        let catalog_service = Arc::new(SeaOrmCatalogService::new(
            store.clone(),
            log_service.clone(),
        )) as Arc<dyn CatalogService + Send + Sync + 'static>;

        let review_service = Arc::new(SeaOrmReviewService::new(
            store.clone(),
            log_service.clone(),
        )) as Arc<dyn ReviewService + Send + Sync + 'static>;

        let report_service = Arc::new(SeaOrmReportService::new(store.clone()))
            as Arc<dyn ReportService + Send + Sync + 'static>;

        Self {
            config: Arc::new(config),
            store,
            tokens,
            auth_service,
            catalog_service,
            review_service,
            report_service,
        }
    }
}
