use crate::domain::ValidationError;
use crate::ports::{ConfigError, GatewayError};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Application error: {0}")]
    Application(String),

    #[error("Authentication required")]
    AuthenticationRequired,
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Gateway(e) if e.is_unauthorized())
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, AppError::Gateway(GatewayError::Decode(_)))
    }
}

pub type AppResult<T> = Result<T, AppError>;
