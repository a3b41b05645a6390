mod batch;
mod upload;

#[cfg(test)]
mod batch_tests;
#[cfg(test)]
mod upload_tests;

use salvo::http::header::CONTENT_LENGTH;
use salvo::{Request, Router};

use super::{BASE64_ROUTE_COMPONENT, CONVERT_ROUTE_COMPONENT};
use crate::error::{AppError, AppResult};

/// Room left for multipart boundaries and part headers on top of the file
/// size limit.
const FORM_OVERHEAD_BYTES: u64 = 16 * 1024;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CONVERT_ROUTE_COMPONENT)
        .post(upload::convert_upload)
        .push(Router::with_path(BASE64_ROUTE_COMPONENT).post(batch::convert_batch))
}

/// ## Summary
/// Rejects a request whose declared `Content-Length` exceeds `limit` before
/// any of the body is read.
///
/// ## Errors
/// Returns `AppError::PayloadTooLarge` if the declared length is over the limit.
fn check_content_length(req: &Request, limit: u64) -> AppResult<()> {
    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match declared {
        Some(len) if len > limit => {
            tracing::debug!(content_length = len, limit, "Declared body exceeds limit");
            Err(AppError::PayloadTooLarge { limit })
        }
        _ => Ok(()),
    }
}
