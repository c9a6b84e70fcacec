use thiserror::Error;

/// Errors raised outside the matching engine: settings, request loading, output
#[derive(Debug, Error)]
pub enum AlgoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Failed to render settings: {0}")]
    Render(#[from] toml::ser::Error),
}
