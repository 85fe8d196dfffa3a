//! `zipsheet_http` v1:
//! HTTP surface for the ZIP-to-XLSX conversion.
//!
//! Module layout:
//! - `conf`     : server defaults and CLI overlay
//! - `error`    : pipeline/HTTP error types
//! - `pipeline` : extract, parse, convert, encode
//! - `handler`  : route handlers
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

pub mod conf;
pub mod error;
pub mod handler;
pub mod pipeline;
#[cfg(test)]
pub(crate) mod test_utils;

pub use conf::{Cli, SpecServerConfig};
pub use error::{AppError, ConvertError};
pub use handler::AppState;
pub use pipeline::{SpecConvertOptions, convert_archive_to_xlsx};

/// Assemble routes, body limit and shared state.
pub fn build_router(cfg: SpecServerConfig) -> Router {
    let n_size_body_max = cfg.size_body_max;
    let state = AppState { cfg: Arc::new(cfg) };

    Router::new()
        .route("/", get(handler::index))
        .route("/upload", post(handler::upload))
        .layer(DefaultBodyLimit::max(n_size_body_max))
        .with_state(state)
}
