//! Axum route handlers for the Search API and the search page.

use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::listings::ResultRecord;
use crate::results::table::TableRow;
use crate::search::run_search;
use crate::state::AppState;

const SEARCH_PAGE: &str = include_str!("../../static/index.html");

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub tool: String,
    pub input: String,
    pub observation: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query_id: Uuid,
    pub rows: Vec<TableRow>,
    pub html: String,
    pub records: Vec<ResultRecord>,
    pub tool_calls: usize,
    pub steps: Vec<StepView>,
}

/// POST /api/v1/search
///
/// Runs the agent on a free-text job description and returns the result table.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let outcome = run_search(state.engine.as_ref(), &request.query).await?;

    Ok(Json(SearchResponse {
        query_id: outcome.query_id,
        html: outcome.table.to_html(),
        rows: outcome.table.rows,
        records: outcome.aggregate.records().to_vec(),
        tool_calls: outcome.steps.len(),
        steps: outcome
            .steps
            .into_iter()
            .map(|step| StepView {
                tool: step.action.tool,
                input: step.action.input,
                observation: step.observation,
            })
            .collect(),
    }))
}

/// GET /
pub async fn handle_search_page() -> Html<&'static str> {
    Html(SEARCH_PAGE)
}
