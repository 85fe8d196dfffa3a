//! Server configuration defaults and command-line overlay.

use clap::Parser;
use zipsheet_io_xlsx::C_SHEET_NAME_DEFAULT;
use zipsheet_io_zip::{C_NAME_ENTRY_DEFAULT, SpecExtractOptions};

use crate::pipeline::SpecConvertOptions;

pub const C_HOST_DEFAULT: &str = "0.0.0.0";
pub const N_PORT_DEFAULT: u16 = 3000;
/// Request body limit in MiB.
pub const N_SIZE_BODY_MAX_MB_DEFAULT: usize = 64;
/// Multipart field carrying the ZIP upload.
pub const C_NAME_FIELD_UPLOAD_DEFAULT: &str = "zipfile";
pub const C_NAME_FILE_DOWNLOAD_DEFAULT: &str = "students.xlsx";

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct SpecServerConfig {
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub size_body_max: usize,
    /// Multipart field name read by `POST /upload`.
    pub name_field_upload: String,
    /// Filename announced in `Content-Disposition`.
    pub name_file_download: String,
    /// Pipeline options.
    pub convert_options: SpecConvertOptions,
}

impl Default for SpecServerConfig {
    fn default() -> Self {
        Self {
            host: C_HOST_DEFAULT.to_string(),
            port: N_PORT_DEFAULT,
            size_body_max: N_SIZE_BODY_MAX_MB_DEFAULT * 1024 * 1024,
            name_field_upload: C_NAME_FIELD_UPLOAD_DEFAULT.to_string(),
            name_file_download: C_NAME_FILE_DOWNLOAD_DEFAULT.to_string(),
            convert_options: SpecConvertOptions::default(),
        }
    }
}

impl SpecServerConfig {
    /// `host:port` listen address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Convert uploaded ZIP archives holding a JSON record array into XLSX downloads.
#[derive(Debug, Parser)]
#[command(name = "zipsheet", version)]
pub struct Cli {
    /// Listen host.
    #[arg(long, env = "ZIPSHEET_HOST", default_value = C_HOST_DEFAULT)]
    pub host: String,
    /// Listen port.
    #[arg(long, env = "ZIPSHEET_PORT", default_value_t = N_PORT_DEFAULT)]
    pub port: u16,
    /// Maximum upload size in MiB.
    #[arg(long, env = "ZIPSHEET_BODY_LIMIT_MB", default_value_t = N_SIZE_BODY_MAX_MB_DEFAULT)]
    pub body_limit_mb: usize,
    /// Archive entry to convert.
    #[arg(long, env = "ZIPSHEET_ENTRY", default_value = C_NAME_ENTRY_DEFAULT)]
    pub entry: String,
    /// Output sheet name.
    #[arg(long, env = "ZIPSHEET_SHEET_NAME", default_value = C_SHEET_NAME_DEFAULT)]
    pub sheet_name: String,
    /// Output download filename.
    #[arg(long, env = "ZIPSHEET_DOWNLOAD_NAME", default_value = C_NAME_FILE_DOWNLOAD_DEFAULT)]
    pub download_name: String,
}

impl Cli {
    /// Overlay parsed flags onto [`SpecServerConfig::default`].
    pub fn into_config(self) -> SpecServerConfig {
        let cfg_default = SpecServerConfig::default();
        SpecServerConfig {
            host: self.host,
            port: self.port,
            size_body_max: self.body_limit_mb.saturating_mul(1024 * 1024),
            name_file_download: self.download_name,
            convert_options: SpecConvertOptions {
                extract_options: SpecExtractOptions {
                    name_entry: self.entry,
                    ..cfg_default.convert_options.extract_options.clone()
                },
                sheet_name: self.sheet_name,
                ..cfg_default.convert_options.clone()
            },
            ..cfg_default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_server_defaults() {
        let cfg = Cli::parse_from(["zipsheet"]).into_config();
        let cfg_default = SpecServerConfig::default();

        assert_eq!(cfg.addr(), "0.0.0.0:3000");
        assert_eq!(cfg.size_body_max, cfg_default.size_body_max);
        assert_eq!(cfg.name_field_upload, "zipfile");
        assert_eq!(cfg.name_file_download, "students.xlsx");
        assert_eq!(cfg.convert_options, cfg_default.convert_options);
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cfg = Cli::parse_from([
            "zipsheet",
            "--port",
            "8080",
            "--entry",
            "roster.json",
            "--sheet-name",
            "Roster",
            "--body-limit-mb",
            "2",
        ])
        .into_config();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.size_body_max, 2 * 1024 * 1024);
        assert_eq!(cfg.convert_options.extract_options.name_entry, "roster.json");
        assert_eq!(cfg.convert_options.sheet_name, "Roster");
    }
}
