//! Unified error types for the invoice client
//!
//! This module defines error types for each layer:
//! - `ApiError`: invoice backend errors (port + HTTP adapter)
//! - `ConfigError`: environment configuration errors
//! - `AppError`: application layer errors (wraps the others for services)
//!
//! The grouping core has no error type: every input is accepted.

use thiserror::Error;

/// Invoice backend errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Short message suitable for showing to the person operating the client.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout => {
                "The request timed out. A sync over a long period can take a while; try a shorter range."
                    .to_string()
            }
            ApiError::Server { .. } => {
                "Server error. Please try again in a few minutes.".to_string()
            }
            ApiError::Network(_) => {
                "Could not reach the invoice server. Check the connection and that the backend is running."
                    .to_string()
            }
            ApiError::Request(e) if e.is_timeout() => ApiError::Timeout.user_message(),
            ApiError::Request(e) if e.is_connect() => {
                ApiError::Network(e.to_string()).user_message()
            }
            ApiError::Api { message, .. }
            | ApiError::NotFound(message)
            | ApiError::Unauthorized(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Application layer errors - used by services and the MCP surface
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
