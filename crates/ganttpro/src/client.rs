//! REST client for the GanttPro API.
//!
//! API Documentation: <https://ganttpro.com/api/>

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::error::RemoteError;
use crate::models::{CreateTaskSpec, RemoteProject};
use crate::normalize;

/// GanttPro API root.
pub const GANTTPRO_API_URL: &str = "https://api.ganttpro.com/v1.0";

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw payloads are logged up to this many characters.
const LOG_PAYLOAD_CHARS: usize = 200;

/// Operations the importer needs from the remote service.
///
/// Each call completes, successfully or not, before it returns.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Create a project and extract its identifier.
    async fn create_project(&self, name: &str) -> Result<RemoteProject, RemoteError>;

    /// Create a task and return the raw response payload.
    async fn create_task(&self, spec: &CreateTaskSpec) -> Result<Value, RemoteError>;
}

/// GanttPro REST client.
#[derive(Debug, Clone)]
pub struct GanttProClient {
    client: reqwest::Client,
    api_url: String,
}

impl GanttProClient {
    /// Create a client for the public GanttPro API.
    ///
    /// # Errors
    /// Returns error if the key is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_options(
            api_key,
            GANTTPRO_API_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client with a custom API root and request timeout.
    pub fn with_options(api_key: &str, api_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_str(api_key).context("Invalid API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body and parse the JSON response.
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, RemoteError> {
        let url = format!("{}{path}", self.api_url);
        debug!(url = %url, "POST request");

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate(&text), "GanttPro API error");
            return Err(RemoteError::status(status.as_u16(), text));
        }

        debug!(body = %truncate(&text), "GanttPro API response");

        serde_json::from_str(&text).map_err(|e| {
            RemoteError::payload(
                status.as_u16(),
                text.clone(),
                format!("Failed to parse GanttPro API response: {e}"),
            )
        })
    }
}

#[async_trait]
impl RemoteClient for GanttProClient {
    #[instrument(skip(self))]
    async fn create_project(&self, name: &str) -> Result<RemoteProject, RemoteError> {
        let raw = self.post("/projects", &json!({ "name": name })).await?;

        let Some(id) = normalize::project_id(&raw) else {
            return Err(RemoteError::payload(
                200,
                raw.to_string(),
                "No project ID returned",
            ));
        };

        debug!(project_id = %id, "Created project");
        Ok(RemoteProject { id, raw })
    }

    #[instrument(skip(self, spec), fields(name = %spec.name, project_id = %spec.project_id))]
    async fn create_task(&self, spec: &CreateTaskSpec) -> Result<Value, RemoteError> {
        self.post("/tasks", spec).await
    }
}

/// Shorten a payload for logging.
fn truncate(text: &str) -> &str {
    match text.char_indices().nth(LOG_PAYLOAD_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RemoteId, TaskKind};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> GanttProClient {
        GanttProClient::with_options("test-key", &server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_create_project_sends_name_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects"))
            .and(header("x-api-key", "test-key"))
            .and(body_json(json!({"name": "Site Launch"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "item": {"projectId": 555}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let project = client_for(&server)
            .await
            .create_project("Site Launch")
            .await
            .unwrap();
        assert_eq!(project.id, RemoteId::from(555));
    }

    #[tokio::test]
    async fn test_create_project_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .create_project("P")
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(403));
        assert_eq!(err.body.as_deref(), Some("forbidden"));
    }

    #[tokio::test]
    async fn test_create_project_without_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .create_project("P")
            .await
            .unwrap_err();
        assert!(err.is_missing_id());
        assert_eq!(err.message, "No project ID returned");
        assert_eq!(err.body.as_deref(), Some(r#"{"ok":true}"#));
    }

    #[tokio::test]
    async fn test_create_task_posts_spec() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .and(body_json(json!({
                "projectId": 1,
                "name": "Design",
                "duration": 0,
                "type": "project"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": 9}})))
            .expect(1)
            .mount(&server)
            .await;

        let spec = CreateTaskSpec {
            project_id: RemoteId::from(1),
            name: "Design".to_string(),
            duration: 0,
            parent: None,
            kind: Some(TaskKind::Group),
        };
        let payload = client_for(&server).await.create_task(&spec).await.unwrap();
        assert_eq!(payload, json!({"data": {"id": 9}}));
    }

    #[tokio::test]
    async fn test_create_task_unparsable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let spec = CreateTaskSpec {
            project_id: RemoteId::from(1),
            name: "A".to_string(),
            duration: 60,
            parent: None,
            kind: None,
        };
        let err = client_for(&server)
            .await
            .create_task(&spec)
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(200));
        assert!(err.message.starts_with("Failed to parse"));
    }

    #[test]
    fn test_truncate() {
        let long = "x".repeat(500);
        assert_eq!(truncate(&long).len(), LOG_PAYLOAD_CHARS);
        assert_eq!(truncate("short"), "short");
    }
}
