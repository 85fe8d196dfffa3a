//! `zipsheet_io_zip` v1:
//! Rust-side ZIP entry extraction kernel.
//!
//! Module layout:
//! - `conf`    : constants and default presets
//! - `spec`    : options/errors
//! - `extract` : forward-only entry scan with central-directory fallback
pub mod conf;
pub mod extract;
pub mod spec;

pub use conf::{C_NAME_ENTRY_DEFAULT, N_SIZE_ENTRY_MAX_DEFAULT};
pub use extract::{
    extract_entry_from_bytes, extract_entry_from_central_directory, extract_entry_from_stream,
};
pub use spec::{ExtractEntryError, SpecExtractOptions};
