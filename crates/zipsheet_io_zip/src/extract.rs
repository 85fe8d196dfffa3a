//! Forward-only ZIP entry scan.
//!
//! The scan walks local file headers in stream order and stops at the first
//! entry whose stored path equals the requested name. Every other entry is
//! skipped without buffering its content. Archives whose local headers defer
//! sizes to a trailing data descriptor cannot be walked forward-only; for those
//! the whole-buffer entry point falls back to the central directory.

use std::io::{Cursor, Read};

use zip::ZipArchive;
use zip::read::read_zipfile_from_stream;
use zip::result::ZipError;

use crate::conf::V_SIG_END_OF_CENTRAL_DIR;
use crate::spec::{ExtractEntryError, SpecExtractOptions};

enum EnumScanFailure {
    /// Layout the forward-only reader cannot handle.
    Unsupported(String),
    Fatal(ExtractEntryError),
}

/// Extract the requested entry from a fully received upload.
///
/// Returns [`ExtractEntryError::EntryNotFound`] for a valid archive without the
/// entry (including an archive with no entries at all).
pub fn extract_entry_from_bytes(
    v_archive: &[u8],
    options: &SpecExtractOptions,
) -> Result<Vec<u8>, ExtractEntryError> {
    if v_archive.is_empty() {
        return Err(ExtractEntryError::ArchiveDecode(
            "input is empty".to_string(),
        ));
    }
    if v_archive.starts_with(&V_SIG_END_OF_CENTRAL_DIR) {
        log::debug!("ZIP archive has no entries");
        return Err(derive_entry_not_found(options));
    }

    let mut reader = Cursor::new(v_archive);
    match scan_local_entries(&mut reader, options) {
        Ok(Some(v_bytes)) => Ok(v_bytes),
        Ok(None) => Err(derive_entry_not_found(options)),
        Err(EnumScanFailure::Unsupported(msg)) => {
            log::info!("Forward-only ZIP scan unsupported ({msg}); reading central directory");
            extract_entry_from_central_directory(v_archive, options)
        }
        Err(EnumScanFailure::Fatal(err)) => Err(err),
    }
}

/// Scan `reader` entry by entry for the requested name.
///
/// Returns `Ok(None)` once the central directory is reached without a match.
/// The entry bytes are returned only after the entry has been read to its end.
pub fn extract_entry_from_stream<R: Read>(
    reader: &mut R,
    options: &SpecExtractOptions,
) -> Result<Option<Vec<u8>>, ExtractEntryError> {
    scan_local_entries(reader, options).map_err(|failure| match failure {
        EnumScanFailure::Unsupported(msg) => ExtractEntryError::ArchiveDecode(msg),
        EnumScanFailure::Fatal(err) => err,
    })
}

/// Look the requested entry up through the central directory.
pub fn extract_entry_from_central_directory(
    v_archive: &[u8],
    options: &SpecExtractOptions,
) -> Result<Vec<u8>, ExtractEntryError> {
    let mut archive = ZipArchive::new(Cursor::new(v_archive))
        .map_err(|err| ExtractEntryError::ArchiveDecode(err.to_string()))?;

    let mut entry = match archive.by_name(&options.name_entry) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(derive_entry_not_found(options)),
        Err(err) => return Err(ExtractEntryError::ArchiveDecode(err.to_string())),
    };
    if entry.is_dir() {
        return Err(derive_entry_not_found(options));
    }

    read_entry_bytes(&mut entry, options)
}

fn scan_local_entries<R: Read>(
    reader: &mut R,
    options: &SpecExtractOptions,
) -> Result<Option<Vec<u8>>, EnumScanFailure> {
    let mut n_entries_skipped = 0usize;
    loop {
        let mut entry = match read_zipfile_from_stream(reader) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                log::debug!(
                    "Reached central directory after skipping {n_entries_skipped} entries"
                );
                return Ok(None);
            }
            Err(ZipError::UnsupportedArchive(msg)) => {
                return Err(EnumScanFailure::Unsupported(msg.to_string()));
            }
            Err(err) => {
                return Err(EnumScanFailure::Fatal(ExtractEntryError::ArchiveDecode(
                    err.to_string(),
                )));
            }
        };

        if entry.is_dir() || entry.name() != options.name_entry {
            // Dropping a streamed entry skips its remaining compressed bytes.
            drop(entry);
            n_entries_skipped += 1;
            continue;
        }

        let v_bytes = read_entry_bytes(&mut entry, options).map_err(EnumScanFailure::Fatal)?;
        return Ok(Some(v_bytes));
    }
}

fn read_entry_bytes<E: Read>(
    entry: &mut E,
    options: &SpecExtractOptions,
) -> Result<Vec<u8>, ExtractEntryError> {
    let mut v_bytes = Vec::new();
    let derive_read_error = |err: std::io::Error| {
        ExtractEntryError::ArchiveDecode(format!(
            "Failed to read entry {:?}: {err}",
            options.name_entry
        ))
    };

    match options.size_entry_max {
        None => {
            entry.read_to_end(&mut v_bytes).map_err(derive_read_error)?;
        }
        Some(n_size_max) => {
            entry
                .by_ref()
                .take(n_size_max.saturating_add(1))
                .read_to_end(&mut v_bytes)
                .map_err(derive_read_error)?;
            if v_bytes.len() as u64 > n_size_max {
                return Err(ExtractEntryError::EntryTooLarge {
                    name_entry: options.name_entry.clone(),
                    size_entry_max: n_size_max,
                });
            }
        }
    }

    Ok(v_bytes)
}

fn derive_entry_not_found(options: &SpecExtractOptions) -> ExtractEntryError {
    ExtractEntryError::EntryNotFound {
        name_entry: options.name_entry.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Once;

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use super::*;

    static INIT: Once = Once::new();

    // Two stored entries (`notes.txt`, `students.json`) written to a
    // non-seekable sink: general-purpose flag bit 3 set, sizes and CRC only in
    // the trailing data descriptors and the central directory.
    const V_ARCHIVE_DATA_DESCRIPTOR: [u8; 263] = [
        0x50, 0x4b, 0x03, 0x04, 0x14, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x21, 0x58, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x6e, 0x6f, 0x74, 0x65, 0x73, 0x2e,
        0x74, 0x78, 0x74, 0x73, 0x6b, 0x69, 0x70, 0x50, 0x4b, 0x07, 0x08, 0x7d,
        0x55, 0x76, 0xf8, 0x04, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x50,
        0x4b, 0x03, 0x04, 0x14, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x21,
        0x58, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x0d, 0x00, 0x00, 0x00, 0x73, 0x74, 0x75, 0x64, 0x65, 0x6e, 0x74,
        0x73, 0x2e, 0x6a, 0x73, 0x6f, 0x6e, 0x5b, 0x7b, 0x22, 0x61, 0x22, 0x3a,
        0x31, 0x7d, 0x5d, 0x50, 0x4b, 0x07, 0x08, 0x7d, 0x73, 0xcb, 0xf2, 0x09,
        0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x50, 0x4b, 0x01, 0x02, 0x14,
        0x03, 0x14, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x21, 0x58, 0x7d,
        0x55, 0x76, 0xf8, 0x04, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x09,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80,
        0x01, 0x00, 0x00, 0x00, 0x00, 0x6e, 0x6f, 0x74, 0x65, 0x73, 0x2e, 0x74,
        0x78, 0x74, 0x50, 0x4b, 0x01, 0x02, 0x14, 0x03, 0x14, 0x00, 0x08, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x21, 0x58, 0x7d, 0x73, 0xcb, 0xf2, 0x09, 0x00,
        0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x0d, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x01, 0x3b, 0x00, 0x00, 0x00,
        0x73, 0x74, 0x75, 0x64, 0x65, 0x6e, 0x74, 0x73, 0x2e, 0x6a, 0x73, 0x6f,
        0x6e, 0x50, 0x4b, 0x05, 0x06, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x02,
        0x00, 0x72, 0x00, 0x00, 0x00, 0x7f, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    fn init_test_logger() {
        INIT.call_once(|| {
            let _ = env_logger::builder().is_test(true).try_init();
        });
    }

    fn create_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        init_test_logger();
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, data) in entries {
            writer.start_file(*name, options).expect("start file");
            writer.write_all(data).expect("write entry");
        }
        writer.finish().expect("finish zip").into_inner()
    }

    #[test]
    fn extract_finds_target_between_other_entries() {
        let v_archive = create_zip(&[
            ("readme.txt", b"ignore me".as_slice()),
            ("students.json", br#"[{"name":"Ann"}]"#.as_slice()),
            ("teachers.json", b"[]".as_slice()),
        ]);

        let v_bytes = extract_entry_from_bytes(&v_archive, &SpecExtractOptions::default())
            .expect("extract");
        assert_eq!(v_bytes, br#"[{"name":"Ann"}]"#);
    }

    #[test]
    fn extract_reports_missing_entry() {
        let v_archive = create_zip(&[("teachers.json", b"[]".as_slice())]);

        let err = extract_entry_from_bytes(&v_archive, &SpecExtractOptions::default())
            .expect_err("must fail");
        assert_eq!(
            err,
            ExtractEntryError::EntryNotFound {
                name_entry: "students.json".to_string()
            }
        );
    }

    #[test]
    fn extract_empty_archive_is_not_found() {
        let v_archive = create_zip(&[]);

        let err = extract_entry_from_bytes(&v_archive, &SpecExtractOptions::default())
            .expect_err("must fail");
        assert_eq!(err.kind(), "entry_not_found");
    }

    #[test]
    fn extract_rejects_non_zip_bytes() {
        let err = extract_entry_from_bytes(
            b"this is definitely not a zip archive, just text",
            &SpecExtractOptions::default(),
        )
        .expect_err("must fail");
        assert_eq!(err.kind(), "archive_decode");

        let err =
            extract_entry_from_bytes(b"", &SpecExtractOptions::default()).expect_err("must fail");
        assert_eq!(err.kind(), "archive_decode");
    }

    #[test]
    fn extract_rejects_truncated_entry() {
        let v_payload: Vec<u8> = (0..4000u32).map(|i| (i * 31 % 251) as u8).collect();
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file("students.json", options).expect("start file");
        writer.write_all(&v_payload).expect("write entry");
        let v_archive = writer.finish().expect("finish zip").into_inner();

        let v_truncated = &v_archive[..v_archive.len() / 2];
        let err = extract_entry_from_bytes(v_truncated, &SpecExtractOptions::default())
            .expect_err("must fail");
        assert_eq!(err.kind(), "archive_decode");
    }

    #[test]
    fn extract_matches_exact_path_only() {
        let v_archive = create_zip(&[
            ("data/students.json", b"[]".as_slice()),
            ("Students.json", b"[]".as_slice()),
        ]);

        let err = extract_entry_from_bytes(&v_archive, &SpecExtractOptions::default())
            .expect_err("must fail");
        assert_eq!(err.kind(), "entry_not_found");
    }

    #[test]
    fn extract_enforces_entry_size_limit() {
        let v_payload = vec![b' '; 2048];
        let v_archive = create_zip(&[("students.json", v_payload.as_slice())]);
        let options = SpecExtractOptions {
            size_entry_max: Some(1024),
            ..SpecExtractOptions::default()
        };

        let err = extract_entry_from_bytes(&v_archive, &options).expect_err("must fail");
        assert_eq!(
            err,
            ExtractEntryError::EntryTooLarge {
                name_entry: "students.json".to_string(),
                size_entry_max: 1024
            }
        );

        let options = SpecExtractOptions {
            size_entry_max: Some(2048),
            ..SpecExtractOptions::default()
        };
        let v_bytes = extract_entry_from_bytes(&v_archive, &options).expect("extract");
        assert_eq!(v_bytes.len(), 2048);
    }

    #[test]
    fn extract_custom_entry_name() {
        let v_archive = create_zip(&[
            ("students.json", b"[1]".as_slice()),
            ("roster.json", b"[2]".as_slice()),
        ]);
        let options = SpecExtractOptions {
            name_entry: "roster.json".to_string(),
            ..SpecExtractOptions::default()
        };

        let v_bytes = extract_entry_from_bytes(&v_archive, &options).expect("extract");
        assert_eq!(v_bytes, b"[2]");
    }

    #[test]
    fn stream_scan_returns_none_at_central_directory() {
        let v_archive = create_zip(&[("a.txt", b"a".as_slice()), ("b.txt", b"b".as_slice())]);
        let mut reader = Cursor::new(v_archive.as_slice());

        let result = extract_entry_from_stream(&mut reader, &SpecExtractOptions::default())
            .expect("scan");
        assert!(result.is_none());
    }

    #[test]
    fn central_directory_lookup_matches_stream_scan() {
        let v_archive = create_zip(&[
            ("other.bin", [0u8; 64].as_slice()),
            ("students.json", br#"[{"a":1}]"#.as_slice()),
        ]);
        let options = SpecExtractOptions::default();

        let v_stream = extract_entry_from_bytes(&v_archive, &options).expect("stream");
        let v_central =
            extract_entry_from_central_directory(&v_archive, &options).expect("central");
        assert_eq!(v_stream, v_central);

        let v_archive_missing = create_zip(&[("other.bin", b"x".as_slice())]);
        let err = extract_entry_from_central_directory(&v_archive_missing, &options)
            .expect_err("must fail");
        assert_eq!(err.kind(), "entry_not_found");
    }

    #[test]
    fn extract_falls_back_to_central_directory_for_data_descriptors() {
        init_test_logger();
        let options = SpecExtractOptions::default();

        let mut reader = Cursor::new(V_ARCHIVE_DATA_DESCRIPTOR.as_slice());
        let err = extract_entry_from_stream(&mut reader, &options).expect_err("must fail");
        assert_eq!(err.kind(), "archive_decode");

        let v_bytes =
            extract_entry_from_bytes(&V_ARCHIVE_DATA_DESCRIPTOR, &options).expect("extract");
        assert_eq!(v_bytes, br#"[{"a":1}]"#);

        let options_missing = SpecExtractOptions {
            name_entry: "roster.json".to_string(),
            ..SpecExtractOptions::default()
        };
        let err = extract_entry_from_bytes(&V_ARCHIVE_DATA_DESCRIPTOR, &options_missing)
            .expect_err("must fail");
        assert_eq!(err.kind(), "entry_not_found");
    }
}
