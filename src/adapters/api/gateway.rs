use super::{
    ApiClient, LoginRequestDto, LoginResponseDto, SignupRequestDto, TodoCreateDto, TodoDto,
    TodoUpdateDto, UserDto,
};
use crate::domain::{AuthSession, Todo, TodoDraft, TodoId, TodoUpdate, User};
use crate::ports::{AuthGateway, GatewayError, GatewayResult, TodoGateway};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct RestGateway {
    client: Arc<ApiClient>,
}

impl RestGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List endpoints must return an array. Anything else is a decode
    /// failure the caller degrades from, never a panic.
    async fn fetch_todo_list(&self, path: &str) -> GatewayResult<Vec<Todo>> {
        let value = self.client.get_value(path).await?;

        if !value.is_array() {
            return Err(GatewayError::Decode(format!(
                "Expected an array of todos, got {}",
                json_kind(&value)
            )));
        }

        let dtos: Vec<TodoDto> = serde_json::from_value(value)
            .map_err(|e| GatewayError::Decode(format!("Failed to parse todo list: {e}")))?;

        Ok(dtos.into_iter().map(Todo::from).collect())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait]
impl TodoGateway for RestGateway {
    async fn list(&self) -> GatewayResult<Vec<Todo>> {
        self.fetch_todo_list("/todos/all").await
    }

    async fn search(&self, term: &str) -> GatewayResult<Vec<Todo>> {
        let path = format!("/todos/search?query={}", urlencoding::encode(term));
        self.fetch_todo_list(&path).await
    }

    async fn create(&self, draft: &TodoDraft) -> GatewayResult<Todo> {
        let body = TodoCreateDto::from(draft);
        let dto: TodoDto = self.client.post("/todos", &body).await?;
        Ok(dto.into())
    }

    async fn update(&self, id: TodoId, update: &TodoUpdate) -> GatewayResult<Todo> {
        let path = format!("/todos/{id}");
        let body = TodoUpdateDto::from(update);
        let dto: TodoDto = self.client.put(&path, &body).await?;
        Ok(dto.into())
    }

    async fn toggle(&self, id: TodoId) -> GatewayResult<Todo> {
        let path = format!("/todos/{id}/toggle");
        let dto: TodoDto = self.client.patch(&path).await?;
        Ok(dto.into())
    }

    async fn remove(&self, id: TodoId) -> GatewayResult<()> {
        let path = format!("/todos/{id}");
        self.client.delete(&path).await
    }
}

#[async_trait]
impl AuthGateway for RestGateway {
    async fn signup(&self, username: &str, email: &str, password: &str) -> GatewayResult<User> {
        let body = SignupRequestDto {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let dto: UserDto = self.client.post("/auth/signup", &body).await?;
        Ok(dto.into())
    }

    async fn login(&self, email: &str, password: &str) -> GatewayResult<AuthSession> {
        let body = LoginRequestDto {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponseDto = self.client.post("/auth/login", &body).await?;

        // Install the credential before any follow-up call needs it.
        self.client.set_token(response.token.clone());

        let user = match response.user {
            Some(dto) => dto.into(),
            None => self.current_user().await?,
        };

        Ok(AuthSession {
            token: response.token,
            user,
        })
    }

    async fn logout(&self) -> GatewayResult<()> {
        let result = self.client.post_no_content("/auth/logout").await;

        // The credential is gone either way; a dead session can't be reused.
        self.client.clear_token();

        result
    }

    async fn current_user(&self) -> GatewayResult<User> {
        let dto: UserDto = self.client.get("/auth/me").await?;
        Ok(dto.into())
    }
}
