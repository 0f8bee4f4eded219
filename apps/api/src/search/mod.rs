// Query-to-listings pipeline: free text -> agent run -> final-answer rows -> table.
// All failures surface as `AppError`; nothing is retried and no partial table is returned.

pub mod handlers;

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::agent::{DecisionEngine, ToolInvocation};
use crate::errors::AppError;
use crate::results::{parse_final_answer, AggregateResult, ResultsTable};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a job description first.";

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query_id: Uuid,
    pub table: ResultsTable,
    /// Every record the tools returned, including provider error records.
    pub aggregate: AggregateResult,
    /// The agent's tool calls, in order, with what it observed.
    pub steps: Vec<ToolInvocation>,
}

/// Runs one search session to completion.
pub async fn run_search(
    engine: &dyn DecisionEngine,
    query: &str,
) -> Result<SearchOutcome, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }

    let query_id = Uuid::new_v4();
    async move {
        info!(query, "Running job search");

        let run = engine.run(query).await?;
        let rows = parse_final_answer(&run.output)?;
        let table = ResultsTable::from_rows(rows);

        info!(
            rows = table.len(),
            records = run.aggregate.len(),
            provider_errors = run.aggregate.error_count(),
            "Job search complete"
        );

        Ok::<_, AppError>(SearchOutcome {
            query_id,
            table,
            aggregate: run.aggregate,
            steps: run.invocations,
        })
    }
    .instrument(info_span!("search", %query_id))
    .await
}
