//! ZIP archive building for bulk downloads.

use std::io::{Cursor, Write};

use dossier_core::AppError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build an in-memory ZIP from (file name, bytes) entries. Duplicate names
/// get a numeric suffix so no entry silently overwrites another.
pub fn build_zip(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, AppError> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = ZipWriter::new(&mut cursor);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut used_names: Vec<String> = Vec::with_capacity(entries.len());
        for (name, bytes) in entries {
            let entry_name = unique_name(name, &used_names);
            used_names.push(entry_name.clone());

            writer
                .start_file(&entry_name, options)
                .map_err(|e| AppError::Internal(format!("Failed to start archive entry: {}", e)))?;
            writer
                .write_all(bytes)
                .map_err(|e| AppError::Internal(format!("Failed to write archive entry: {}", e)))?;
        }

        writer
            .finish()
            .map_err(|e| AppError::Internal(format!("Failed to finalize archive: {}", e)))?;
    }
    Ok(cursor.into_inner())
}

fn unique_name(name: &str, used: &[String]) -> String {
    if !used.iter().any(|n| n == name) {
        return name.to_string();
    }
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{}", ext)),
        _ => (name, String::new()),
    };
    let mut counter = 1;
    loop {
        let candidate = format!("{} ({}){}", stem, counter, extension);
        if !used.iter().any(|n| n == &candidate) {
            return candidate;
        }
        counter += 1;
    }
}
