use std::io::{Cursor, Write};
use std::sync::Once;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

static INIT: Once = Once::new();

pub const C_BOUNDARY: &str = "zipsheet-test-boundary";

pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Build an in-memory ZIP archive from `(name, bytes)` entries.
pub fn create_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(*name, options).expect("start file");
        writer.write_all(data).expect("write entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Build a `multipart/form-data` body with one file field.
pub fn build_multipart_body(name_field: &str, v_file: &[u8]) -> Vec<u8> {
    let mut v_body = Vec::new();
    v_body.extend_from_slice(
        format!(
            "--{C_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{name_field}\"; filename=\"upload.zip\"\r\n\
             Content-Type: application/zip\r\n\r\n"
        )
        .as_bytes(),
    );
    v_body.extend_from_slice(v_file);
    v_body.extend_from_slice(format!("\r\n--{C_BOUNDARY}--\r\n").as_bytes());
    v_body
}
