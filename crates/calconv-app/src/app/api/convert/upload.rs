use std::path::Path;

use calconv_core::constants::{CALENDAR_MEDIA_TYPE, UPLOAD_FIELD};
use calconv_rfc::rfc::ical::{ParseOptions, convert_bytes};
use salvo::http::form::FilePart;
use salvo::http::mime::Mime;
use salvo::{Depot, Request, Response, handler, writing::Json};

use super::{FORM_OVERHEAD_BYTES, check_content_length};
use crate::app::api::response::write_error;
use crate::config::{get_config_from_depot, parse_options};
use crate::error::{AppError, AppResult};

/// ## Summary
/// POST /convert - Converts an uploaded `.ics` file to JSON.
///
/// Expects `multipart/form-data` with the calendar in the `file` part, sent
/// as `text/calendar`. The stored upload is removed once the request is done,
/// whatever the outcome.
///
/// ## Errors
/// Returns HTTP 400 if the file is missing, not `text/calendar`, or not valid iCalendar
/// Returns HTTP 413 if the upload exceeds `limits.max_upload_bytes`
/// Returns HTTP 500 if the stored upload cannot be read
#[handler]
#[tracing::instrument(skip(req, depot, res), fields(path = %req.uri().path()))]
pub async fn convert_upload(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::info!("Got new conversion request");

    match handle_upload(req, depot).await {
        Ok(document) => {
            tracing::debug!(document = %document, "Conversion result");
            res.render(Json(document));
        }
        Err(e) => write_error(res, &e),
    }
}

async fn handle_upload(req: &mut Request, depot: &Depot) -> AppResult<serde_json::Value> {
    let settings = get_config_from_depot(depot)?;
    let limit = settings.limits.max_upload_bytes;
    let body_limit = limit.saturating_add(FORM_OVERHEAD_BYTES);

    check_content_length(req, body_limit)?;
    req.set_secure_max_size(usize::try_from(body_limit).unwrap_or(usize::MAX));

    let form = req.form_data().await.map_err(|e| {
        tracing::debug!(error = %e, "Request is not a readable multipart form");
        AppError::InvalidUpload
    })?;
    let Some(file) = form.files.get(UPLOAD_FIELD) else {
        tracing::debug!(field = UPLOAD_FIELD, "No file part in upload");
        return Err(AppError::InvalidUpload);
    };

    convert_stored(&StoredUpload::from(file), limit, &parse_options(&settings)).await
}

/// The parts of a stored multipart file the conversion looks at.
#[derive(Debug)]
pub(super) struct StoredUpload<'a> {
    pub path: &'a Path,
    pub content_type: Option<Mime>,
    pub size: u64,
}

impl<'a> From<&'a FilePart> for StoredUpload<'a> {
    fn from(file: &'a FilePart) -> Self {
        Self {
            path: file.path(),
            content_type: file.content_type(),
            size: file.size(),
        }
    }
}

/// ## Summary
/// Converts a stored upload, then removes it whatever the outcome.
///
/// ## Errors
/// Returns the validation, read or conversion error of [`convert_file`].
pub(super) async fn convert_stored(
    upload: &StoredUpload<'_>,
    limit: u64,
    options: &ParseOptions,
) -> AppResult<serde_json::Value> {
    let outcome = convert_file(upload, limit, options).await;
    remove_upload(upload.path).await;

    outcome
}

async fn convert_file(
    upload: &StoredUpload<'_>,
    limit: u64,
    options: &ParseOptions,
) -> AppResult<serde_json::Value> {
    let is_calendar = upload
        .content_type
        .as_ref()
        .is_some_and(|mime| mime.essence_str() == CALENDAR_MEDIA_TYPE);
    if !is_calendar {
        tracing::debug!(content_type = ?upload.content_type, "Upload is not text/calendar");
        return Err(AppError::InvalidUpload);
    }

    if upload.size > limit {
        return Err(AppError::PayloadTooLarge { limit });
    }

    let bytes = tokio::fs::read(upload.path)
        .await
        .map_err(AppError::UploadRead)?;

    tracing::debug!(bytes = bytes.len(), "Converting uploaded file");

    Ok(convert_bytes(&bytes, options)?)
}

/// ## Summary
/// Deletes a stored upload. Failures are logged and otherwise ignored.
pub(super) async fn remove_upload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::trace!(path = %path.display(), "Removed uploaded file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "Error deleting uploaded file");
        }
    }
}
