use salvo::http::StatusCode;
use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    /// The multipart request carried no `file` part, or the part is not
    /// `text/calendar`.
    #[error("Please upload a valid .ics file")]
    InvalidUpload,

    #[error("Request body is invalid: {0}")]
    InvalidRequest(String),

    #[error("Payload exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("calendars[{index}]: invalid base64: {source}")]
    InvalidBase64 {
        index: usize,
        source: base64::DecodeError,
    },

    #[error("calendars[{index}]: {source}")]
    InvalidBatchItem {
        index: usize,
        source: calconv_rfc::error::RfcError,
    },

    #[error("Error reading the uploaded file")]
    UploadRead(#[source] std::io::Error),

    #[error(transparent)]
    RfcError(#[from] calconv_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] calconv_core::error::CoreError),
}

impl AppError {
    /// ## Summary
    /// Maps the error to the HTTP status returned to the client.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUpload
            | Self::InvalidRequest(_)
            | Self::InvalidBase64 { .. }
            | Self::InvalidBatchItem { .. }
            | Self::RfcError(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UploadRead(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
