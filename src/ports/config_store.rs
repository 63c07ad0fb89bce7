use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    ReadError(String),

    #[error("Failed to write configuration: {0}")]
    WriteError(String),

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_url: String,
    pub session_token: Option<String>,
    pub default_category: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000".to_string(),
            session_token: None,
            default_category: crate::domain::DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load_config(&self) -> ConfigResult<AppConfig>;
    async fn save_config(&self, config: &AppConfig) -> ConfigResult<()>;
    async fn get_session_token(&self) -> ConfigResult<Option<String>>;
    async fn set_session_token(&self, token: &str) -> ConfigResult<()>;
    async fn clear_session_token(&self) -> ConfigResult<()>;
}
