//! HTTP transport
//!
//! A single GraphQL endpoint, mounted at `/` and `/graphql`. POST carries a
//! JSON GraphQL request, or a bare query with `Content-Type:
//! application/graphql`; GET either executes the query given in the URL or,
//! when no query is given, serves the GraphiQL explorer.

use crate::config::ServerConfig;
use crate::error::ServerResult;
use async_graphql::http::{parse_query_string, GraphiQLSource};
use axum::extract::{RawQuery, State};
use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use dataset::{Tournament, TournamentSummary};
use schema::{build_schema, TournamentSchema};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    pub schema: TournamentSchema,
    pub tournament: Arc<Tournament>,
    pub graphiql: bool,
}

impl AppState {
    pub fn new(tournament: Arc<Tournament>, config: &ServerConfig) -> Self {
        let schema = build_schema(Arc::clone(&tournament), &config.schema_options());
        Self {
            schema,
            tournament,
            graphiql: config.graphiql,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(flatten)]
    summary: TournamentSummary,
}

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(graphql_get).post(graphql_post))
        .route("/graphql", get(graphql_get).post(graphql_post))
        .route("/health", get(health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn graphql_post(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    match parse_post_body(&headers, &body) {
        Ok(request) => Json(execute(&state.schema, request).await).into_response(),
        Err(message) => {
            debug!("Rejected POST body: {}", message);
            (StatusCode::BAD_REQUEST, message).into_response()
        }
    }
}

fn parse_post_body(headers: &HeaderMap, body: &[u8]) -> Result<async_graphql::Request, String> {
    let graphql_body = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/graphql"));

    if graphql_body {
        let query = std::str::from_utf8(body)
            .map_err(|e| format!("Query body is not valid UTF-8: {e}"))?;
        Ok(async_graphql::Request::new(query))
    } else {
        serde_json::from_slice(body).map_err(|e| format!("Malformed GraphQL request: {e}"))
    }
}

async fn graphql_get(
    State(state): State<AppState>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Response {
    match query.filter(|q| !q.is_empty()) {
        Some(raw) => match parse_query_string(&raw) {
            Ok(request) => Json(execute(&state.schema, request).await).into_response(),
            Err(e) => {
                debug!("Rejected GET query string: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
        },
        None if state.graphiql => {
            Html(GraphiQLSource::build().endpoint(uri.path()).finish()).into_response()
        }
        None => (StatusCode::BAD_REQUEST, "Must provide query string.").into_response(),
    }
}

async fn execute(
    schema: &TournamentSchema,
    request: async_graphql::Request,
) -> async_graphql::Response {
    let operation = request.operation_name.clone();
    let response = schema.execute(request).await;
    if !response.errors.is_empty() {
        debug!(
            "GraphQL operation {:?} finished with {} error(s): {}",
            operation,
            response.errors.len(),
            response.errors[0].message
        );
    }
    response
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        summary: state.tournament.summary(),
    })
}

/// Load the dataset, bind the listener and serve until Ctrl-C.
///
/// A dataset that fails to load is fatal: nothing is bound.
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let config = config.validated()?;
    let tournament = Arc::new(Tournament::load(&config.dataset_path)?);
    let app = build_router(
        AppState::new(tournament, &config),
        config.request_timeout(),
    );

    let listener = TcpListener::bind(config.socket_addr()).await?;
    let local_addr = listener.local_addr()?;
    info!("GraphQL endpoint listening on http://{}/graphql", local_addr);
    if config.graphiql {
        info!("GraphiQL explorer available at http://{}/", local_addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
