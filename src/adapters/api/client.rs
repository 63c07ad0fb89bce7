use super::dto::ErrorBodyDto;
use crate::ports::{GatewayError, GatewayResult};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use std::time::Duration;

/// Thin wrapper around reqwest carrying the base URL and the ambient session
/// credential. The token is interior-mutable: login installs it, logout
/// clears it, and every in-flight gateway shares the same slot.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("todo-tui/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(token),
        }
    }

    pub fn set_token(&self, token: String) {
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().expect("token lock poisoned").as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        self.decode_response(response).await
    }

    /// Fetch a list endpoint without committing to a shape. Callers inspect
    /// the returned JSON value so a non-array payload can degrade instead of
    /// failing deserialization deep inside reqwest.
    pub async fn get_value(&self, path: &str) -> GatewayResult<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let body = self.check_status(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| GatewayError::Decode(format!("Response is not valid JSON: {e}")))
    }

    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        self.decode_response(response).await
    }

    /// POST with no interesting response body (logout).
    pub async fn post_no_content(&self, path: &str) -> GatewayResult<()> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.post(&url))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        self.check_status(response).await.map(|_| ())
    }

    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.put(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        self.decode_response(response).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.patch(&url))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        self.decode_response(response).await
    }

    pub async fn delete(&self, path: &str) -> GatewayResult<()> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        self.check_status(response).await.map(|_| ())
    }

    async fn decode_response<T: DeserializeOwned>(&self, response: Response) -> GatewayResult<T> {
        let body = self.check_status(response).await?;

        tracing::debug!("API response: {}", body);

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::Decode(format!("Failed to parse response: {e}")))
    }

    /// Map a non-2xx response into `Http`, pulling the server's message out
    /// of the body's `error` field when it sends one.
    async fn check_status(&self, response: Response) -> GatewayResult<String> {
        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorBodyDto>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        Err(GatewayError::Http {
            status: status.as_u16(),
            message,
        })
    }
}
