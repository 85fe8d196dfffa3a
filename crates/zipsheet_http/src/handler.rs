//! HTTP handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use zipsheet_io_xlsx::C_CONTENT_TYPE_XLSX;

use crate::conf::SpecServerConfig;
use crate::error::AppError;
use crate::pipeline::convert_archive_to_xlsx;

const C_HTML_UPLOAD: &str = include_str!("../assets/upload.html");

/// Shared per-router state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub cfg: Arc<SpecServerConfig>,
}

/// `GET /`: static upload form.
pub async fn index() -> Html<&'static str> {
    Html(C_HTML_UPLOAD)
}

/// `POST /upload`: convert the uploaded archive and return it as an attachment.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let v_archive = read_upload_field(&mut multipart, &state.cfg.name_field_upload).await?;
    log::info!("[HTTP] upload received: {} bytes", v_archive.len());

    let cfg = Arc::clone(&state.cfg);
    let v_xlsx = tokio::task::spawn_blocking(move || {
        convert_archive_to_xlsx(&v_archive, &cfg.convert_options)
    })
    .await??;

    Ok(build_xlsx_response(v_xlsx, &state.cfg.name_file_download))
}

async fn read_upload_field(multipart: &mut Multipart, name_field: &str) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(name_field) {
            return Ok(field.bytes().await?);
        }
    }
    Err(AppError::MissingUpload(name_field.to_string()))
}

fn build_xlsx_response(v_xlsx: Vec<u8>, name_file: &str) -> Response {
    (
        [
            (CONTENT_TYPE, C_CONTENT_TYPE_XLSX.to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename={name_file}")),
        ],
        v_xlsx,
    )
        .into_response()
}
