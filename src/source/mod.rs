//! Where topics come from.
//!
//! The generator only needs an ordered list of [`Topic`]s. Anything that can produce one
//! implements [`TopicSource`]; the only provider today reads a delimited table
//! (see [`CsvTable`]). The serialisable [`Source`] struct is the `[source]` section of
//! `notebook.toml` and knows how to build that provider.

mod topic;
pub use topic::*;

mod providers;
pub use providers::*;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading topics. All of them are fatal: nothing gets rendered from a
/// partially-read table.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("topic file {} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read topic file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("topic file {} does not contain any topics", path.display())]
    Empty { path: PathBuf },

    #[error("delimiter {0:?} is not a single-byte ASCII character")]
    InvalidDelimiter(char),
}

/// Anything that can supply the ordered list of notebook topics
pub trait TopicSource {
    fn produce(&self) -> Result<Vec<Topic>, SourceError>;
}

/// The `[source]` configuration: which table to read and how its columns are named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    /// Path to the delimited topic table
    pub path: PathBuf,
    /// Field delimiter, usually `,` or `;`
    pub delimiter: char,
    /// Header of the column holding topic titles
    pub title_column: String,
    /// Header of the column holding page counts
    pub pages_column: String,
    /// Header of an optional column used to sort topics before rendering
    pub order_column: Option<String>,
    /// Strip whitespace around every field
    pub trim: bool,
}

impl Default for Source {
    fn default() -> Self {
        Source {
            path: PathBuf::from("topics.csv"),
            delimiter: ',',
            title_column: "Topic".to_string(),
            pages_column: "Pages".to_string(),
            order_column: Some("Order".to_string()),
            trim: true,
        }
    }
}

impl Source {
    /// Build the table provider described by this configuration
    pub fn provider(&self) -> Result<CsvTable, SourceError> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(SourceError::InvalidDelimiter(self.delimiter))?;

        Ok(CsvTable {
            path: self.path.clone(),
            delimiter,
            title_column: self.title_column.clone(),
            pages_column: self.pages_column.clone(),
            order_column: self.order_column.clone(),
            trim: self.trim,
        })
    }

    /// Read every topic from the configured table
    pub fn topics(&self) -> Result<Vec<Topic>, SourceError> {
        self.provider()?.produce()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_serialize_source() {
        let source = Source::default();
        let text = toml::to_string(&source).expect("can serialize source to TOML");
        let back: Source = toml::from_str(&text).expect("can parse source TOML");
        assert_eq!(back, source);
    }

    #[test]
    fn partial_source_config_uses_defaults() {
        let source: Source = toml::from_str("path = \"lessons.csv\"\ndelimiter = \";\"\n")
            .expect("can parse partial source");
        assert_eq!(source.path, PathBuf::from("lessons.csv"));
        assert_eq!(source.delimiter, ';');
        assert_eq!(source.title_column, "Topic");
        assert_eq!(source.pages_column, "Pages");
    }

    #[test]
    fn rejects_non_ascii_delimiters() {
        let source = Source {
            delimiter: '§',
            ..Source::default()
        };
        assert!(matches!(
            source.provider(),
            Err(SourceError::InvalidDelimiter('§'))
        ));
    }
}
