//! # Axum Helpers
//!
//! Shared HTTP plumbing for the product services.
//!
//! - **[`errors`]**: `AppError` and the JSON error envelope
//! - **[`extractors`]**: integer path ids, plain and validated JSON bodies
//! - **[`server`]**: router assembly, health checks, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, JsonBody, ValidatedJson};
pub use server::{
    HealthCheckFuture, ShutdownCoordinator, create_production_app, create_router, health_router,
    run_health_checks,
};
