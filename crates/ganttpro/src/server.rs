//! HTTP server for GanttPro imports.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::client::{GanttProClient, RemoteClient};
use crate::config::Config;
use crate::error::ImportError;
use crate::importer::HierarchyImporter;
use crate::models::ImportRequest;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration.
    pub config: Config,
    /// GanttPro API client, absent when no API key is configured.
    pub client: Option<Arc<dyn RemoteClient>>,
}

impl AppState {
    /// Build state from configuration, creating the GanttPro client if an
    /// API key is available.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = match &config.api_key {
            Some(key) => {
                let client =
                    GanttProClient::with_options(key, &config.base_url, config.request_timeout())?;
                info!(base_url = %config.base_url, "GanttPro API client configured");
                Some(Arc::new(client) as Arc<dyn RemoteClient>)
            }
            None => {
                warn!("No GANTTPRO_API_KEY configured - imports will be rejected");
                None
            }
        };

        Ok(Self { config, client })
    }
}

/// Build the HTTP router for the import service.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // CorsLayer answers every OPTIONS request itself with 200.
    Router::new()
        .route(
            "/api/ganttpro",
            post(import_handler).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run an import.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Response {
    let Some(client) = state.client.clone() else {
        error!("Import requested but no API key is configured");
        return ImportError::Configuration("API key not configured".to_string()).into_response();
    };

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected malformed import request");
            return ImportError::Validation(rejection.body_text()).into_response();
        }
    };

    if let Err(e) = request.validate() {
        warn!(error = %e, "Rejected invalid import request");
        return e.into_response();
    }

    match HierarchyImporter::new(client.as_ref()).run(&request).await {
        Ok(report) => {
            let summary = report.summary(&request.project_name);
            info!(
                project_id = %summary.project_id,
                tasks_created = summary.tasks_created,
                tasks_failed = summary.tasks_failed,
                "Import completed"
            );
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid request data", "details": details })),
            )
                .into_response(),
            Self::Configuration(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::ProjectCreation(remote) if remote.is_missing_id() => {
                let data = remote
                    .body
                    .as_deref()
                    .map(|body| {
                        serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
                    })
                    .unwrap_or(Value::Null);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "No project ID returned", "data": data })),
                )
                    .into_response()
            }
            Self::ProjectCreation(remote) => {
                let status = remote
                    .status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let details = remote.body.clone().unwrap_or_else(|| remote.message.clone());
                (
                    status,
                    Json(json!({ "error": "Failed to create project", "details": details })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_remote_status_is_forwarded() {
        let response =
            ImportError::ProjectCreation(RemoteError::status(401, "bad key")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Failed to create project", "details": "bad key"})
        );
    }

    #[tokio::test]
    async fn test_transport_fault_is_internal_error() {
        let response =
            ImportError::ProjectCreation(RemoteError::transport("connection refused"))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["details"],
            json!("connection refused")
        );
    }

    #[tokio::test]
    async fn test_missing_project_id_includes_payload() {
        let response = ImportError::ProjectCreation(RemoteError::payload(
            200,
            r#"{"status":"ok"}"#,
            "No project ID returned",
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "No project ID returned", "data": {"status": "ok"}})
        );
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let response = ImportError::Validation("tasks must not be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], json!("Invalid request data"));
    }
}
