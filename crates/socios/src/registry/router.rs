use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::filter::DirectoryFilter;
use super::service::DirectoryService;
use super::store::PartnerStore;

/// Router fragment exposing the directory endpoints.
pub fn directory_router<S>(service: Arc<DirectoryService<S>>) -> Router
where
    S: PartnerStore + 'static,
{
    Router::new()
        .route("/api/v1/socios/directorio", get(directory_handler::<S>))
        .route("/api/v1/socios/localidades", get(localities_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DirectoryQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    localidad: Option<String>,
}

impl DirectoryQuery {
    fn into_filter(self) -> DirectoryFilter {
        // "all" is the UI's sentinel for "no locality selected".
        let localidad = self
            .localidad
            .filter(|value| !value.is_empty() && value != "all");
        DirectoryFilter::new(self.q.unwrap_or_default(), localidad)
    }
}

pub(crate) async fn directory_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Query(params): Query<DirectoryQuery>,
) -> Response
where
    S: PartnerStore + 'static,
{
    let filter = params.into_filter();
    match service.directory(&filter).await {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => {
            warn!(error = %err, "directory fetch failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn localities_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
) -> Response
where
    S: PartnerStore + 'static,
{
    match service.localities().await {
        Ok(localities) => (StatusCode::OK, axum::Json(localities)).into_response(),
        Err(err) => {
            warn!(error = %err, "locality fetch failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
