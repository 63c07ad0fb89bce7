use crate::domain::{AuthSession, Todo, TodoDraft, TodoId, TodoUpdate, User};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl GatewayError {
    /// A 401 means the ambient session credential is no longer accepted;
    /// callers route back to login instead of showing a plain failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Http { status: 401, .. })
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Typed boundary over the remote todo endpoints. Implementations carry the
/// ambient session credential; they never decide what a failure means for
/// the UI.
#[async_trait]
pub trait TodoGateway: Send + Sync {
    async fn list(&self) -> GatewayResult<Vec<Todo>>;
    async fn search(&self, term: &str) -> GatewayResult<Vec<Todo>>;
    async fn create(&self, draft: &TodoDraft) -> GatewayResult<Todo>;
    async fn update(&self, id: TodoId, update: &TodoUpdate) -> GatewayResult<Todo>;
    async fn toggle(&self, id: TodoId) -> GatewayResult<Todo>;
    async fn remove(&self, id: TodoId) -> GatewayResult<()>;
}

/// Session endpoints of the auth collaborator. Consumed only to obtain and
/// validate the credential the todo gateway rides on.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn signup(&self, username: &str, email: &str, password: &str) -> GatewayResult<User>;
    async fn login(&self, email: &str, password: &str) -> GatewayResult<AuthSession>;
    async fn logout(&self) -> GatewayResult<()>;
    async fn current_user(&self) -> GatewayResult<User>;
}
