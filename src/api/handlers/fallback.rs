//! Handler for unmatched routes.

use crate::error::AppError;

/// Answers every path without a registered route.
///
/// # Response
///
/// `404 Not Found` with `{"error": "Route not found"}`.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}
