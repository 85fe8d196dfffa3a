//! Extraction options and top-level error types.

use std::fmt;

use crate::conf::{C_NAME_ENTRY_DEFAULT, N_SIZE_ENTRY_MAX_DEFAULT};

////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Input options for entry extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExtractOptions {
    /// Exact stored path of the entry to extract.
    pub name_entry: String,
    /// Maximum decompressed entry size; `None` disables the guard.
    pub size_entry_max: Option<u64>,
}

impl Default for SpecExtractOptions {
    fn default() -> Self {
        Self {
            name_entry: C_NAME_ENTRY_DEFAULT.to_string(),
            size_entry_max: Some(N_SIZE_ENTRY_MAX_DEFAULT),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failure of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractEntryError {
    /// Input is not a readable ZIP container, or reading it failed midway.
    ArchiveDecode(String),
    /// Archive is well-formed but holds no entry with the requested name.
    EntryNotFound {
        /// Requested entry name.
        name_entry: String,
    },
    /// Target entry decompresses past the configured size guard.
    EntryTooLarge {
        /// Requested entry name.
        name_entry: String,
        /// Configured limit in bytes.
        size_entry_max: u64,
    },
}

impl ExtractEntryError {
    /// Stable machine-readable label of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArchiveDecode(_) => "archive_decode",
            Self::EntryNotFound { .. } => "entry_not_found",
            Self::EntryTooLarge { .. } => "entry_too_large",
        }
    }
}

impl fmt::Display for ExtractEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArchiveDecode(msg) => write!(f, "Failed to decode ZIP archive: {msg}"),
            Self::EntryNotFound { name_entry } => {
                write!(f, "ZIP archive has no entry named {name_entry:?}")
            }
            Self::EntryTooLarge {
                name_entry,
                size_entry_max,
            } => write!(
                f,
                "ZIP entry {name_entry:?} exceeds the size limit of {size_entry_max} bytes"
            ),
        }
    }
}

impl std::error::Error for ExtractEntryError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
