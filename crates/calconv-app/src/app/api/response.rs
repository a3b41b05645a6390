use salvo::{Response, writing::Json};
use serde::Serialize;

use crate::error::AppError;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Writes `error` as a JSON `{"error": ...}` body with its status code.
///
/// Server-side failures are logged at error level with their source; client
/// errors at warn.
pub fn write_error(res: &mut Response, error: &AppError) {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(error = %error, source = ?std::error::Error::source(error), "Request failed");
    } else {
        tracing::warn!(status = %status, error = %error, "Rejected request");
    }

    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: error.to_string(),
    }));
}
