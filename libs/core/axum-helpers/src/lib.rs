//! # Axum Helpers
//!
//! Shared HTTP plumbing for the store services.
//!
//! - **[`auth`]**: stateless JWT minting, verification and the [`CurrentUser`] extractor
//! - **[`server`]**: router assembly with API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the JSON [`ErrorResponse`] body
//! - **[`extractors`]**: [`UuidPath`], [`ValidatedJson`]
//! - **[`audit`]**: audit events on the `audit` tracing target

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    CurrentUser, JwtAuth, JwtClaims, JwtConfig, SELLER_OR_ADMIN, optional_jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};

pub use audit::{AuditAction, AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
