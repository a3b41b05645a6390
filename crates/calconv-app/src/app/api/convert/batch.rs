use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use calconv_rfc::rfc::ical::{ParseOptions, convert_bytes};
use salvo::{Depot, Request, Response, handler, writing::Json};
use serde::Deserialize;

use super::check_content_length;
use crate::app::api::response::write_error;
use crate::config::{get_config_from_depot, parse_options};
use crate::error::{AppError, AppResult};

/// ## Summary
/// Batch conversion request payload
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    /// Base64-encoded iCalendar documents.
    pub calendars: Vec<String>,
}

/// ## Summary
/// POST /convert/base64 - Converts a batch of base64-encoded calendars.
///
/// Responds with one JSON document per entry, in input order. The first
/// entry that fails rejects the whole batch.
///
/// ## Errors
/// Returns HTTP 400 if the body is not `{"calendars": [string, ...]}`
/// Returns HTTP 400 if the batch holds more than `limits.max_batch_items` entries
/// Returns HTTP 400 naming the first entry that is not base64 or not valid iCalendar
/// Returns HTTP 413 if the declared body size exceeds `limits.max_upload_bytes`
#[handler]
#[tracing::instrument(skip(req, depot, res), fields(path = %req.uri().path()))]
pub async fn convert_batch(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::info!("Got new batch conversion request");

    match handle_batch(req, depot).await {
        Ok(documents) => {
            tracing::debug!(documents = documents.len(), "Batch converted");
            res.render(Json(documents));
        }
        Err(e) => write_error(res, &e),
    }
}

async fn handle_batch(req: &mut Request, depot: &Depot) -> AppResult<Vec<serde_json::Value>> {
    let settings = get_config_from_depot(depot)?;
    let limit = settings.limits.max_upload_bytes;
    check_content_length(req, limit)?;

    let batch: BatchRequest = req
        .parse_json_with_max_size(settings.limits.max_upload_bytes_usize())
        .await
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let max_items = usize::try_from(settings.limits.max_batch_items).unwrap_or(usize::MAX);
    if batch.calendars.len() > max_items {
        return Err(AppError::InvalidRequest(format!(
            "at most {max_items} calendars are accepted per request, got {}",
            batch.calendars.len()
        )));
    }

    convert_all(&batch.calendars, &parse_options(&settings))
}

/// ## Summary
/// Decodes and converts every entry, stopping at the first failure.
///
/// ## Errors
/// Returns `AppError::InvalidBase64` or `AppError::InvalidBatchItem` for the
/// first entry that cannot be decoded or converted.
fn convert_all(
    calendars: &[String],
    options: &ParseOptions,
) -> AppResult<Vec<serde_json::Value>> {
    calendars
        .iter()
        .enumerate()
        .map(|(index, encoded)| {
            let bytes = STANDARD
                .decode(encoded.trim())
                .map_err(|source| AppError::InvalidBase64 { index, source })?;
            convert_bytes(&bytes, options)
                .map_err(|source| AppError::InvalidBatchItem { index, source })
        })
        .collect()
}
