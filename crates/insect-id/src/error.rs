//! Error types for the insect-id CLI

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Kindwise(kindwise_api::KindwiseError),
    Config(String),
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Kindwise(err) => write!(f, "{}", err),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Kindwise(err) => Some(err),
            _ => None,
        }
    }
}

impl From<kindwise_api::KindwiseError> for CliError {
    fn from(err: kindwise_api::KindwiseError) -> Self {
        CliError::Kindwise(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<tracing_subscriber::filter::ParseError> for CliError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        CliError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
