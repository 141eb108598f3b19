//! Request/response DTOs.

pub mod request;
pub mod response;

use glojourn_core::error::AppError;
use validator::Validate;

/// Run `validator` derives on a request body, mapping failures into a
/// field-level validation error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
