// src/handlers/mod.rs

use crate::error::AppError;

pub mod quiz;
pub mod topic;

/// Catch-all for unknown routes.
pub async fn fallback() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
