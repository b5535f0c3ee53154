//! Error types for the Kindwise API client

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur when talking to the Kindwise API
#[derive(Debug)]
pub enum KindwiseError {
    /// Image path does not exist
    ImageNotFound(PathBuf),
    /// Image file exists but could not be read
    ImageRead { path: PathBuf, source: io::Error },
    /// Latitude/longitude out of range or not finite
    InvalidCoordinates(f64, f64),
    /// Missing or malformed client configuration
    Config(String),
    /// HTTP request failed (connection, timeout, body decoding)
    Http(reqwest::Error),
    /// Service answered with a non-success status
    Api { status: u16, body: String },
    /// Response JSON did not match the identification shape
    Mapping(MappingError),
}

impl fmt::Display for KindwiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageNotFound(path) => write!(f, "Image not found: {}", path.display()),
            Self::ImageRead { path, source } => {
                write!(f, "Failed to read image {}: {}", path.display(), source)
            }
            Self::InvalidCoordinates(lat, lon) => {
                write!(f, "Invalid coordinates: {lat}, {lon}")
            }
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Http(e) => write!(f, "Kindwise HTTP error: {}", e),
            Self::Api { status, body } => {
                write!(f, "Kindwise API returned status {}: {}", status, body)
            }
            Self::Mapping(e) => write!(f, "Kindwise response error: {}", e),
        }
    }
}

impl std::error::Error for KindwiseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageRead { source, .. } => Some(source),
            Self::Http(e) => Some(e),
            Self::Mapping(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for KindwiseError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<MappingError> for KindwiseError {
    fn from(e: MappingError) -> Self {
        Self::Mapping(e)
    }
}

/// Failure to map a JSON value onto the typed identification model
///
/// `path` is the dotted location of the offending field, e.g.
/// `result.classification.suggestions[0].name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Required field is absent
    Missing { path: String },
    /// Field is present but has the wrong JSON type
    WrongType { path: String, expected: &'static str },
    /// Field has the right JSON type but an unusable value
    InvalidValue { path: String, reason: String },
}

impl MappingError {
    /// Location of the offending field
    pub fn path(&self) -> &str {
        match self {
            Self::Missing { path } | Self::WrongType { path, .. } | Self::InvalidValue { path, .. } => {
                path
            }
        }
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "missing field `{}`", path),
            Self::WrongType { path, expected } => {
                write!(f, "field `{}` is not {}", path, expected)
            }
            Self::InvalidValue { path, reason } => {
                write!(f, "invalid value for `{}`: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for MappingError {}

/// Result type for Kindwise API operations
pub type Result<T> = std::result::Result<T, KindwiseError>;
