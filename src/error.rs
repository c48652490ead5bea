//! Domain-specific error types for graph-narrator

use thiserror::Error;

/// Main error type for chart summarization
#[derive(Error, Debug)]
pub enum GraphNarratorError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Integration error: {message}")]
    Integration { message: String },

    #[error("Unsupported option: {option}")]
    UnsupportedOption { option: String },

    #[error("Remote call failed: {message}")]
    RemoteCall { message: String },

    #[error("Image error: {message}")]
    Image { message: String },

    #[error("Data error: {message}")]
    Data { message: String },
}

impl GraphNarratorError {
    pub fn unsupported(option: impl Into<String>) -> Self {
        GraphNarratorError::UnsupportedOption {
            option: option.into(),
        }
    }
}

impl From<reqwest::Error> for GraphNarratorError {
    fn from(err: reqwest::Error) -> Self {
        GraphNarratorError::RemoteCall {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<serde_json::Error> for GraphNarratorError {
    fn from(err: serde_json::Error) -> Self {
        GraphNarratorError::RemoteCall {
            message: format!("Malformed response body: {}", err),
        }
    }
}

impl From<image::ImageError> for GraphNarratorError {
    fn from(err: image::ImageError) -> Self {
        GraphNarratorError::Image {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for GraphNarratorError {
    fn from(err: csv::Error) -> Self {
        GraphNarratorError::Data {
            message: format!("CSV parse error: {}", err),
        }
    }
}

impl From<calamine::Error> for GraphNarratorError {
    fn from(err: calamine::Error) -> Self {
        GraphNarratorError::Data {
            message: format!("Excel parse error: {}", err),
        }
    }
}

impl From<std::io::Error> for GraphNarratorError {
    fn from(err: std::io::Error) -> Self {
        GraphNarratorError::Data {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GraphNarratorError {
    fn from(err: toml::de::Error) -> Self {
        GraphNarratorError::Configuration {
            message: format!("Invalid config file: {}", err),
        }
    }
}

/// Result type alias for graph-narrator operations
pub type Result<T> = std::result::Result<T, GraphNarratorError>;
