use thiserror::Error;

/// Unified error type for git-sv operations
#[derive(Error, Debug)]
pub enum SvError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in git-sv
pub type Result<T> = std::result::Result<T, SvError>;

impl SvError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SvError::Config(msg.into())
    }

    pub fn version(msg: impl Into<String>) -> Self {
        SvError::Version(msg.into())
    }

    /// Create a template execution error with context
    pub fn template(msg: impl Into<String>) -> Self {
        SvError::Template(msg.into())
    }

    pub fn template_not_found(name: impl Into<String>) -> Self {
        SvError::TemplateNotFound(name.into())
    }
}
