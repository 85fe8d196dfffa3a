//! Pipeline and HTTP error types.

use axum::extract::multipart::MultipartError;
use axum::http::header::{CONTENT_TYPE, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use zipsheet_io_xlsx::{RecordParseError, XlsxEncodeError};
use zipsheet_io_zip::ExtractEntryError;

/// Response header carrying the failure classification.
pub const C_HEADER_ERROR_KIND: &str = "x-error-kind";

/// Failure of one conversion pass.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Archive(#[from] ExtractEntryError),
    #[error(transparent)]
    Records(#[from] RecordParseError),
    #[error(transparent)]
    Encode(#[from] XlsxEncodeError),
}

impl ConvertError {
    /// Stable machine-readable label of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Archive(err) => err.kind(),
            Self::Records(_) => "record_parse",
            Self::Encode(_) => "encoding",
        }
    }
}

/// Request-level failure rendered as a plain-text response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing multipart file field {0:?}")]
    MissingUpload(String),
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("Conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingUpload(_) => "missing_upload",
            Self::Multipart(_) => "multipart",
            Self::Convert(err) => err.kind(),
            Self::Task(_) => "internal",
        }
    }

    /// Pipeline failures are 500; malformed requests are 4xx.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingUpload(_) => StatusCode::BAD_REQUEST,
            Self::Multipart(err) => err.status(),
            Self::Convert(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let c_kind = self.kind();
        log::error!("[HTTP] {} {c_kind}: {self}", status.as_u16());

        (
            status,
            [
                (CONTENT_TYPE, "text/plain; charset=utf-8"),
                (HeaderName::from_static(C_HEADER_ERROR_KIND), c_kind),
            ],
            format!("Error processing the ZIP file ({c_kind}): {self}"),
        )
            .into_response()
    }
}
