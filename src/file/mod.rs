//! File I/O for tree documents.
//!
//! This module loads JSON or YAML documents from disk or stdin into
//! [`Value`](crate::document::Value)s and renders values back out, with
//! atomic writes and transparent gzip support.

pub mod loader;
pub mod saver;

/// Document text formats understood by the loader and saver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl std::str::FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => anyhow::bail!("Unknown format '{}', expected json or yaml", other),
        }
    }
}

impl Format {
    /// Guesses the format from a file name, looking past a `.gz` suffix.
    ///
    /// - `data.json` → Json
    /// - `data.yaml.gz` → Yaml
    /// - `data.txt` → None
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Option<Self> {
        let path_str = path.as_ref().to_string_lossy();
        let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);
        let extension = base.rsplit_once('.')?.1;
        extension.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path("a.json"), Some(Format::Json));
        assert_eq!(Format::from_path("a.JSON.gz"), Some(Format::Json));
        assert_eq!(Format::from_path("dir/a.yml"), Some(Format::Yaml));
        assert_eq!(Format::from_path("a.yaml.gz"), Some(Format::Yaml));
        assert_eq!(Format::from_path("a.txt"), None);
        assert_eq!(Format::from_path("noext"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
        assert!("toml".parse::<Format>().is_err());
    }
}
