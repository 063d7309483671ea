// Risk calculation error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Sub-risk collaborator failed: {collaborator} - {message}")]
    CollaboratorError { collaborator: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RiskError {
    pub fn collaborator(collaborator: &str, message: impl Into<String>) -> Self {
        RiskError::CollaboratorError {
            collaborator: collaborator.to_string(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for RiskError {
    fn from(err: config::ConfigError) -> Self {
        RiskError::ConfigurationError {
            message: err.to_string(),
        }
    }
}
