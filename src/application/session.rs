use super::{AppError, AppResult};
use crate::domain::{validate_login, validate_signup, User};
use crate::ports::{AuthGateway, ConfigStore};
use std::sync::Arc;

/// Client-side view of the auth session. The gateway owns the wire
/// credential; this tracks who is logged in and persists the token so a
/// restart can resume without a fresh login.
pub struct Session {
    auth: Arc<dyn AuthGateway>,
    config_store: Arc<dyn ConfigStore>,
    user: tokio::sync::RwLock<Option<User>>,
}

impl Session {
    pub fn new(auth: Arc<dyn AuthGateway>, config_store: Arc<dyn ConfigStore>) -> Self {
        Self {
            auth,
            config_store,
            user: tokio::sync::RwLock::new(None),
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// Validate a stored token by asking the service who it belongs to.
    /// A 401 just means there is no session to resume.
    pub async fn restore(&self) -> AppResult<Option<User>> {
        match self.auth.current_user().await {
            Ok(user) => {
                *self.user.write().await = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        validate_login(email, password)?;

        let session = self.auth.login(email, password).await?;

        if let Err(e) = self.config_store.set_session_token(&session.token).await {
            // Login still succeeded; the user just won't survive a restart.
            tracing::warn!("Failed to persist session token: {e}");
        }

        *self.user.write().await = Some(session.user.clone());
        Ok(session.user)
    }

    /// Create the account. The service does not log the new user in;
    /// callers send them to the login flow next.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> AppResult<User> {
        validate_signup(username, email, password)?;
        Ok(self.auth.signup(username, email, password).await?)
    }

    pub async fn logout(&self) -> AppResult<()> {
        let result = self.auth.logout().await;

        if let Err(e) = self.config_store.clear_session_token().await {
            tracing::warn!("Failed to clear stored session token: {e}");
        }
        *self.user.write().await = None;

        result.map_err(AppError::from)
    }

    /// Drop the local session after the service rejected the credential.
    pub async fn expire(&self) {
        *self.user.write().await = None;
        if let Err(e) = self.config_store.clear_session_token().await {
            tracing::warn!("Failed to clear stored session token: {e}");
        }
    }
}
