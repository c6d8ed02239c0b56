//! Document rendering and saving.
//!
//! Values are rendered as pretty-printed JSON or as YAML, and saved with an
//! atomic write (temp file + rename), gzip-compressed when the target name
//! ends in `.gz`.

use super::Format;
use crate::document::Value;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Renders a value as document text.
///
/// JSON output uses `indent_size` spaces per level; YAML output ignores it.
/// The result always ends in a newline.
pub fn render(value: &Value, format: Format, indent_size: usize) -> Result<String> {
    let mut text = match format {
        Format::Json => {
            let indent = " ".repeat(indent_size);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut buffer = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
            value
                .serialize(&mut serializer)
                .context("Failed to serialize JSON")?;
            String::from_utf8(buffer).context("Serialized JSON is not UTF-8")?
        }
        Format::Yaml => serde_yaml::to_string(value).context("Failed to serialize YAML")?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Saves a value to a file.
///
/// The format comes from the file name when it has a known extension and
/// from `default_format` otherwise.
///
/// # Examples
///
/// ```no_run
/// use treepath::document::Value;
/// use treepath::file::saver::save_document;
/// use treepath::file::Format;
///
/// save_document("output.json", &Value::object(), Format::Json, 2).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Serialization fails
/// - Writing to the temp file fails
/// - Renaming the temp file to the target fails
pub fn save_document<P: AsRef<Path>>(
    path: P,
    value: &Value,
    default_format: Format,
    indent_size: usize,
) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path).unwrap_or(default_format);
    let should_compress = path.to_string_lossy().ends_with(".gz");

    let text = render(value, format, indent_size)?;
    write_file_atomic(path, text.as_bytes(), should_compress)
        .with_context(|| format!("Failed to save {}", path.display()))
}

/// Writes data to a file atomically, optionally compressing with gzip.
///
/// This function writes to a temporary file first, then atomically renames
/// it to the target path. This ensures the target file is never left in a
/// partially written state.
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}
