use std::sync::Arc;

use anyhow::Error;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    clients::{health::HealthChecker, listmonk::ListmonkClient},
    config::Config,
    error::{ErrorKind, Operation, OperationError},
    models::{
        health::HealthStatus,
        response::Diagnostic,
        state::{TemplateSpec, TemplateState},
        template::Template,
    },
    resources::{Resource, data_source::TemplateDataSource, template::TemplateResource},
};

pub struct AppState {
    client: Arc<ListmonkClient>,
    resource: TemplateResource,
    data_source: TemplateDataSource,
    health_checker: HealthChecker,
}

impl AppState {
    pub fn new(client: Arc<ListmonkClient>) -> Self {
        Self {
            resource: TemplateResource::new(Arc::clone(&client)),
            data_source: TemplateDataSource::new(Arc::clone(&client)),
            health_checker: HealthChecker::new(Arc::clone(&client)),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub state: TemplateState,
    pub desired: TemplateSpec,
}

#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

/// Lifecycle failure rendered as a JSON diagnostic.
pub struct ApiError(OperationError);

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::Identifier | ErrorKind::Config => StatusCode::BAD_REQUEST,
            _ if self.0.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        };

        warn!(operation = %self.0.operation, kind = %self.0.kind(), %status, "Lifecycle operation failed");

        let diagnostic = Diagnostic::new(
            self.0.operation.summary(),
            self.0.source.to_string(),
            self.0.kind(),
        );

        (status, Json(diagnostic)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/templates", get(list_templates))
        .route("/v1/resources/template/create", post(create_template))
        .route("/v1/resources/template/read", post(read_template))
        .route("/v1/resources/template/update", post(update_template))
        .route("/v1/resources/template/delete", post(delete_template))
        .route("/v1/resources/template/import", post(import_template))
        .route("/v1/data-sources/template/read", post(read_template_data_source))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: Config) -> Result<(), Error> {
    let client = Arc::new(ListmonkClient::new(&config.provider_config()?)?);
    let app = router(Arc::new(AppState::new(client)));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Template provider server started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_checker.check_all().await;

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Template>>, ApiError> {
    let templates = state
        .client
        .list_templates()
        .await
        .map_err(|e| OperationError::new(Operation::List, e))?;

    Ok(Json(templates))
}

async fn create_template(
    State(state): State<Arc<AppState>>,
    Json(desired): Json<TemplateSpec>,
) -> Result<Json<TemplateState>, ApiError> {
    Ok(Json(state.resource.create(&desired).await?))
}

async fn read_template(
    State(state): State<Arc<AppState>>,
    Json(current): Json<TemplateState>,
) -> Result<Json<TemplateState>, ApiError> {
    Ok(Json(state.resource.read(&current).await?))
}

async fn update_template(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<TemplateState>, ApiError> {
    Ok(Json(
        state.resource.update(&request.state, &request.desired).await?,
    ))
}

async fn delete_template(
    State(state): State<Arc<AppState>>,
    Json(current): Json<TemplateState>,
) -> Result<StatusCode, ApiError> {
    state.resource.delete(&current).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn import_template(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IdRequest>,
) -> Json<TemplateState> {
    Json(state.resource.import(&request.id))
}

async fn read_template_data_source(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IdRequest>,
) -> Result<Json<TemplateState>, ApiError> {
    Ok(Json(state.data_source.read(&request.id).await?))
}
