use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::agent::AgentError;
use crate::results::FinalAnswerError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure of a search is reported with its full cause chain: the user
/// sees what went wrong, not a generic message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search agent failed: {0}")]
    Agent(#[from] AgentError),

    #[error("Malformed final answer: {0}")]
    FinalAnswer(#[from] FinalAnswerError),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Agent(AgentError::Llm(_)) => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
            AppError::Agent(AgentError::Tool { .. }) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            AppError::Agent(AgentError::Filter { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_FILTER")
            }
            AppError::Agent(AgentError::OutputParse(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_AGENT_OUTPUT")
            }
            AppError::Agent(AgentError::MaxIterations(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "AGENT_NONCONVERGENCE")
            }
            AppError::FinalAnswer(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_FINAL_ANSWER")
            }
        }
    }

    /// The error and each of its causes, outermost first.
    pub fn trace(&self) -> Vec<String> {
        let mut chain = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        chain
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let trace = self.trace();

        match &self {
            AppError::Validation(msg) => tracing::warn!("Rejected search: {msg}"),
            _ => tracing::error!(code, trace = ?trace, "Search failed"),
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
                "trace": trace
            }
        }));

        (status, body).into_response()
    }
}
