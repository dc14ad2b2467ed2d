//! HTTP transport module for quick-answer
//!
//! Axum server with the question page on `/` plus plain health and info
//! endpoints. All shared state is built once at startup and only read here.

use axum::{
    Form, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::answer::AnswerRequester;
use crate::config::Config;
use crate::error::{QuickAnswerError, Result};
use crate::handler::{Submission, handle_submission};
use crate::normalize::Normalizer;
use crate::page::render_index;

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub config: Arc<Config>,
    pub normalizer: Arc<Normalizer>,
    pub requester: Arc<AnswerRequester>,
}

impl HttpState {
    pub fn new(config: Config, normalizer: Normalizer, requester: AnswerRequester) -> Self {
        Self {
            config: Arc::new(config),
            normalizer: Arc::new(normalizer),
            requester: Arc::new(requester),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub question: Option<String>,
}

async fn render(state: &HttpState, submission: Submission) -> Html<String> {
    let view = handle_submission(submission, &state.normalizer, &state.requester).await;
    Html(render_index(&view))
}

/// Question page, first load
pub async fn index_get(State(state): State<HttpState>) -> Html<String> {
    render(&state, Submission::NoSubmission).await
}

/// Question page, form submission. A body that is not a form counts as an
/// absent field.
pub async fn index_post(
    State(state): State<HttpState>,
    form: Option<Form<QuestionForm>>,
) -> Html<String> {
    let question = form
        .and_then(|Form(f)| f.question)
        .unwrap_or_default();
    render(&state, Submission::Submitted(question)).await
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Info endpoint
pub async fn info_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let llm = &state.config.llm;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({
            "llm": {
                "provider": llm.provider,
                "model": llm.model,
                "available": state.requester.is_available()
            },
            "server": {
                "bind": state.config.server.bind.to_string()
            }
        })
        .to_string(),
    )
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index_get).post(index_post))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Start the HTTP server
pub async fn start_http_server(state: HttpState) -> Result<()> {
    let bind = state.config.server.bind;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| QuickAnswerError::Http {
            message: format!("Failed to bind HTTP listener on {}: {}", bind, e),
        })?;

    tracing::info!("Starting HTTP server on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| QuickAnswerError::Http {
            message: format!("HTTP server error: {}", e),
        })?;

    Ok(())
}
