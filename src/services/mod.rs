pub mod identity;
pub mod input;
pub mod logs;
pub mod token;

pub use identity::{IdentityError, resolve_identity};
pub use logs::{AuditAction, LogService};
pub use token::{Claims, IssuedToken, TokenError, TokenService};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AdminProvisioning, AuthError, AuthService, LoginResult, RegisterRequest};
pub use auth_service_impl::SeaOrmAuthService;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService, ProductDraft};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod review_service;
pub mod review_service_impl;
pub use review_service::{ReviewDraft, ReviewError, ReviewService};
pub use review_service_impl::SeaOrmReviewService;

pub mod report_service;
pub mod report_service_impl;
pub use report_service::{ReportError, ReportService, ReportSummary, ReviewCounts};
pub use report_service_impl::SeaOrmReportService;
