use crate::ports::{AppConfig, ConfigError, ConfigResult, ConfigStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    server_url: Option<String>,
    default_category: Option<String>,
}

/// Config lives in a JSON file under the platform config dir; the session
/// token goes to the OS keyring with a 0600 file fallback, and the
/// environment is the final fallback for both.
pub struct FileConfigStore {
    config_path: PathBuf,
    keyring_service: String,
}

impl FileConfigStore {
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::ReadError("Cannot determine config directory".to_string())
        })?;

        let config_path = config_dir.join("todo-tui").join("config.json");

        Ok(Self {
            config_path,
            keyring_service: "todo-tui".to_string(),
        })
    }

    async fn ensure_config_dir(&self) -> ConfigResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }
        Ok(())
    }

    fn token_file_path(&self) -> PathBuf {
        self.config_path.parent().unwrap().join(".session")
    }

    async fn get_token_from_file(&self) -> ConfigResult<Option<String>> {
        match fs::read_to_string(self.token_file_path()).await {
            Ok(token) => Ok(Some(token.trim().to_string())),
            Err(_) => Ok(None),
        }
    }

    async fn set_token_in_file(&self, token: &str) -> ConfigResult<()> {
        self.ensure_config_dir().await?;
        let token_path = self.token_file_path();
        fs::write(&token_path, token)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        // The session token is a credential: owner-only access.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&token_path)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&token_path, perms)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        Ok(())
    }

    fn keyring_entry(&self) -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(&self.keyring_service, "session_token")
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load_config(&self) -> ConfigResult<AppConfig> {
        let defaults = AppConfig::default();

        let config_file = match fs::read_to_string(&self.config_path).await {
            Ok(content) => serde_json::from_str::<ConfigFile>(&content)
                .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?,
            Err(_) => ConfigFile {
                server_url: None,
                default_category: None,
            },
        };

        let mut session_token = self.get_session_token().await?;
        if session_token.is_none() {
            if let Ok(env_token) = std::env::var("TODO_TOKEN") {
                session_token = Some(env_token);
            }
        }

        let server_url = std::env::var("TODO_SERVER")
            .ok()
            .or(config_file.server_url)
            .unwrap_or(defaults.server_url);

        Ok(AppConfig {
            server_url,
            session_token,
            default_category: config_file
                .default_category
                .unwrap_or(defaults.default_category),
        })
    }

    async fn save_config(&self, config: &AppConfig) -> ConfigResult<()> {
        self.ensure_config_dir().await?;

        let config_file = ConfigFile {
            server_url: Some(config.server_url.clone()),
            default_category: Some(config.default_category.clone()),
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        if let Some(token) = &config.session_token {
            self.set_session_token(token).await?;
        }

        Ok(())
    }

    async fn get_session_token(&self) -> ConfigResult<Option<String>> {
        match self.keyring_entry() {
            Ok(entry) => match entry.get_password() {
                Ok(token) => return Ok(Some(token)),
                Err(keyring::Error::NoEntry) => {}
                Err(_) => {
                    tracing::warn!("Keyring not available, falling back to file storage");
                }
            },
            Err(_) => {
                tracing::warn!("Keyring service not available, falling back to file storage");
            }
        }

        self.get_token_from_file().await
    }

    async fn set_session_token(&self, token: &str) -> ConfigResult<()> {
        match self.keyring_entry() {
            Ok(entry) => match entry.set_password(token) {
                Ok(()) => return Ok(()),
                Err(_) => {
                    tracing::warn!("Failed to store in keyring, falling back to file storage");
                }
            },
            Err(_) => {
                tracing::warn!("Keyring not available, using file storage");
            }
        }

        self.set_token_in_file(token).await
    }

    async fn clear_session_token(&self) -> ConfigResult<()> {
        if let Ok(entry) = self.keyring_entry() {
            // NoEntry is fine, anything else falls through to the file.
            let _ = entry.delete_credential();
        }

        match fs::remove_file(self.token_file_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConfigError::WriteError(e.to_string())),
        }
    }
}
