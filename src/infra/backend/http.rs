use crate::domain::{ListPayload, Task, TaskList, TaskPage, TaskPayload};
use crate::infra::session::TokenSource;
use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::error::ApiError;
use super::traits::TodoBackend;

#[derive(Debug, serde::Deserialize)]
struct CreatedRecord {
    id: String,
}

/// `TodoBackend` over HTTP with a bearer token on every request.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl HttpBackend {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        Self::with_client(base_url, tokens, Client::new())
    }

    pub fn with_client(
        base_url: &str,
        tokens: Arc<dyn TokenSource>,
        client: Client,
    ) -> Result<Self, ApiError> {
        let trimmed = base_url.trim();
        let base_url = Url::parse(trimmed)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
            .ok_or_else(|| ApiError::InvalidBaseUrl(trimmed.to_string()))?;

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// Base URL joined with percent-encoded path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let token = self.tokens.token().ok_or(ApiError::MissingToken)?;
        let url = self.endpoint(segments)?;
        log::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Request {
            method: method.to_string(),
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{} {} returned {}", method, url, status);
            return Err(ApiError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, segments, None).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let url = response.url().to_string();
    response
        .json::<T>()
        .await
        .map_err(|source| ApiError::Decode { url, source })
}

#[async_trait]
impl TodoBackend for HttpBackend {
    async fn lists(&self) -> Result<Vec<TaskList>, ApiError> {
        self.get_json(&["lists"]).await
    }

    async fn list(&self, list_id: &str) -> Result<TaskList, ApiError> {
        self.get_json(&["lists", list_id]).await
    }

    async fn create_list(&self, payload: &ListPayload) -> Result<String, ApiError> {
        let response = self.send(Method::POST, &["lists"], Some(payload)).await?;
        let created: CreatedRecord = decode(response).await?;
        Ok(created.id)
    }

    async fn update_list(&self, list_id: &str, payload: &ListPayload) -> Result<(), ApiError> {
        self.send(Method::PUT, &["lists", list_id], Some(payload))
            .await
            .map(drop)
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, &["lists", list_id], None)
            .await
            .map(drop)
    }

    async fn tasks(&self, list_id: &str) -> Result<TaskPage, ApiError> {
        self.get_json(&["lists", list_id, "tasks"]).await
    }

    async fn task(&self, list_id: &str, task_id: &str) -> Result<Task, ApiError> {
        self.get_json(&["lists", list_id, "tasks", task_id]).await
    }

    async fn create_task(&self, list_id: &str, payload: &TaskPayload) -> Result<String, ApiError> {
        let response = self
            .send(Method::POST, &["lists", list_id, "tasks"], Some(payload))
            .await?;
        let created: CreatedRecord = decode(response).await?;
        Ok(created.id)
    }

    async fn update_task(
        &self,
        list_id: &str,
        task_id: &str,
        payload: &TaskPayload,
    ) -> Result<(), ApiError> {
        self.send(
            Method::PUT,
            &["lists", list_id, "tasks", task_id],
            Some(payload),
        )
        .await
        .map(drop)
    }

    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, &["lists", list_id, "tasks", task_id], None)
            .await
            .map(drop)
    }
}
