//! Errors for the prune library
//!

use derive_more::Display;
use std::error;
use std::io;
use std::path::Path;

#[derive(Debug, Display)]
pub enum PruneError {
    /// Caller supplied inputs that do not make sense together
    #[display("ValidationError: {_0}")]
    Validation(String),
    /// A requested evidence path does not resolve to known evidence
    #[display("EvidenceNotFoundError: {_0}")]
    EvidenceNotFound(String),
    /// A directory index is missing or not valid JSON
    #[display("ParseError: unable to parse {path}: {message}")]
    IndexParse { path: String, message: String },
    /// A git operation failed
    #[display("RepositoryError: {_0}")]
    Repository(String),
    /// A configuration file or value could not be used
    #[display("ConfigError: {_0}")]
    Config(String),

    // Wrappers
    #[display("IOError: {_0}")]
    IO(io::Error),
    #[display("JSONError: {_0}")]
    Json(serde_json::Error),
    #[display("TOMLError: {_0}")]
    TomlDe(toml::de::Error),
    #[display("URLError: {_0}")]
    Url(url::ParseError),
    #[display("{_0}")]
    Basic(String),
}

impl PruneError {
    pub fn basic_str(s: impl AsRef<str>) -> Self {
        PruneError::Basic(s.as_ref().to_string())
    }

    pub fn validation(s: impl AsRef<str>) -> Self {
        PruneError::Validation(s.as_ref().to_string())
    }

    pub fn config(s: impl AsRef<str>) -> Self {
        PruneError::Config(s.as_ref().to_string())
    }

    pub fn repository(s: impl AsRef<str>) -> Self {
        PruneError::Repository(s.as_ref().to_string())
    }

    pub fn evidence_not_found(path: impl AsRef<str>) -> Self {
        PruneError::EvidenceNotFound(format!("evidence {} not found", path.as_ref()))
    }

    pub fn index_parse(path: impl AsRef<Path>, message: impl ToString) -> Self {
        PruneError::IndexParse {
            path: path.as_ref().to_string_lossy().to_string(),
            message: message.to_string(),
        }
    }
}

impl error::Error for PruneError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            PruneError::IO(err) => Some(err),
            PruneError::Json(err) => Some(err),
            PruneError::TomlDe(err) => Some(err),
            PruneError::Url(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PruneError {
    fn from(error: io::Error) -> Self {
        PruneError::IO(error)
    }
}

impl From<serde_json::Error> for PruneError {
    fn from(error: serde_json::Error) -> Self {
        PruneError::Json(error)
    }
}

impl From<toml::de::Error> for PruneError {
    fn from(error: toml::de::Error) -> Self {
        PruneError::TomlDe(error)
    }
}

impl From<url::ParseError> for PruneError {
    fn from(error: url::ParseError) -> Self {
        PruneError::Url(error)
    }
}
