mod generators;
mod health;
mod network;
mod transform;

pub use generators::{generate_uuid, server_time};
pub use health::health_check;
pub use network::{client_info, echo};
pub use transform::{decode_jwt, format_json, hash_text};

use crate::error::AppError;

/// Fallback for unmatched paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for a matched path hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
