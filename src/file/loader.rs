//! Document loading functionality.
//!
//! This module provides functions to load JSON or YAML documents from files
//! or stdin, decoding them into [`Value`] trees the path operations work on.

use super::Format;
use crate::document::Value;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads and decodes a document from the filesystem.
///
/// Gzipped files (`*.gz`) are decompressed first. The format is taken from
/// the extension in front of any `.gz` suffix; unknown extensions are read
/// as YAML, which also accepts JSON.
///
/// # Examples
///
/// ```no_run
/// use treepath::file::loader::load_document;
///
/// let value = load_document("config.yaml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - The file is gzipped but corrupted
/// - The contents are not a valid document in the detected format
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read {}", path_ref.display()))?
    };

    parse_document(&content, Format::from_path(path_ref))
        .with_context(|| format!("Failed to parse {}", path_ref.display()))
}

/// Loads and decodes a document from standard input.
///
/// Gzip input is detected by its magic bytes. The contents are tried as
/// JSON first, then as YAML.
pub fn load_document_from_stdin() -> Result<Value> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_document(&content, None).context("Failed to parse document from stdin")
}

/// Loads from a file, or from stdin when `path` is `-`.
pub fn load_document_or_stdin(path: &str) -> Result<Value> {
    if path == "-" {
        load_document_from_stdin()
    } else {
        load_document(path)
    }
}

/// Decodes document text in the given format.
///
/// Without a format, JSON is tried first and YAML second.
pub fn parse_document(content: &str, format: Option<Format>) -> Result<Value> {
    match format {
        Some(Format::Json) => serde_json::from_str(content).context("Invalid JSON"),
        Some(Format::Yaml) => parse_yaml(content).context("Invalid YAML"),
        None => match serde_json::from_str(content) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::debug!("not JSON ({}), trying YAML", err);
                parse_yaml(content).context("Input is neither valid JSON nor valid YAML")
            }
        },
    }
}

/// YAML goes through `serde_yaml::Value` so that mappings with number or
/// bool keys still decode.
fn parse_yaml(content: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str::<serde_yaml::Value>(content).map(Value::from)
}

/// Decodes a value given on the command line.
///
/// Valid JSON (`3`, `true`, `"x"`, `[1]`) is decoded; anything else is
/// taken as a plain string.
pub fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
