//! Search agent — drives a reasoning model through the ReAct tool protocol.
//!
//! Each step renders the prompt (tool catalogue + question + transcript), asks
//! the `CompletionModel` for the next step, and either calls a listing tool or
//! stops on `Final Answer:`. The model's decision policy is opaque here: any
//! backend that follows the Thought/Action/Action Input/Observation grammar can
//! drive the loop.
//!
//! `AppState` holds the engine as `Arc<dyn DecisionEngine>`.

pub mod parser;
pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::listings::{AdapterError, Filter, FilterError, ListingAdapter};
use crate::llm_client::{CompletionModel, LlmError};
use crate::results::AggregateResult;

use parser::{parse_step, AgentAction, AgentStep, OutputParseError};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("reasoning model call failed")]
    Llm(#[from] LlmError),

    #[error("could not parse reasoning model output")]
    OutputParse(#[from] OutputParseError),

    #[error("invalid filter for tool '{tool}'")]
    Filter {
        tool: String,
        #[source]
        source: FilterError,
    },

    #[error("tool '{tool}' failed")]
    Tool {
        tool: String,
        #[source]
        source: AdapterError,
    },

    #[error("agent stopped after {0} iterations without a final answer")]
    MaxIterations(usize),
}

/// One tool call made during a run and what the model observed.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub action: AgentAction,
    pub observation: String,
}

/// Outcome of a converged run.
#[derive(Debug, Clone)]
pub struct AgentRun {
    /// Text after `Final Answer:`.
    pub output: String,
    pub invocations: Vec<ToolInvocation>,
    pub aggregate: AggregateResult,
}

/// Anything that can answer a free-text job query by calling listing tools.
#[async_trait]
pub trait DecisionEngine: Send + Sync {
    async fn run(&self, query: &str) -> Result<AgentRun, AgentError>;
}

pub struct SearchAgent {
    model: Arc<dyn CompletionModel>,
    tools: Vec<Arc<dyn ListingAdapter>>,
    max_iterations: usize,
    header: String,
}

impl SearchAgent {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        tools: Vec<Arc<dyn ListingAdapter>>,
        max_iterations: usize,
    ) -> Self {
        let catalogue: Vec<(&str, &str)> = tools
            .iter()
            .map(|t| (t.name(), t.description()))
            .collect();
        let header = prompts::render_header(&catalogue);
        Self {
            model,
            tools,
            max_iterations,
            header,
        }
    }

    fn tool(&self, name: &str) -> Option<&Arc<dyn ListingAdapter>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    fn tool_names(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Runs one tool call and returns the observation text fed back to the model.
    async fn invoke(
        &self,
        action: &AgentAction,
        aggregate: &mut AggregateResult,
    ) -> Result<String, AgentError> {
        let Some(tool) = self.tool(&action.tool) else {
            warn!(tool = %action.tool, "Model requested an unknown tool");
            return Ok(format!(
                "{} is not a valid tool, try one of [{}].",
                action.tool,
                self.tool_names()
            ));
        };

        let filter = Filter::from_input(&action.input).map_err(|source| AgentError::Filter {
            tool: action.tool.clone(),
            source,
        })?;

        info!(
            tool = tool.name(),
            source = ?tool.source(),
            unconstrained = filter.is_empty(),
            "Invoking listing tool"
        );
        let records = tool.fetch(&filter).await.map_err(|source| AgentError::Tool {
            tool: action.tool.clone(),
            source,
        })?;

        aggregate.record_invocation(&records);
        // Serializing plain records with string keys cannot fail.
        Ok(serde_json::to_string(&records).unwrap_or_default())
    }
}

#[async_trait]
impl DecisionEngine for SearchAgent {
    async fn run(&self, query: &str) -> Result<AgentRun, AgentError> {
        let mut scratchpad = String::new();
        let mut invocations = Vec::new();
        let mut aggregate = AggregateResult::default();

        for iteration in 1..=self.max_iterations {
            let prompt = prompts::render_prompt(&self.header, query, &scratchpad);
            let completion = self
                .model
                .complete(&prompt, prompts::STOP_SEQUENCES)
                .await?;
            debug!(iteration, completion = %completion, "Agent step");

            match parse_step(&completion)? {
                AgentStep::Finish { output } => {
                    info!(
                        iterations = iteration,
                        tool_calls = invocations.len(),
                        records = aggregate.len(),
                        "Agent reached a final answer"
                    );
                    return Ok(AgentRun {
                        output,
                        invocations,
                        aggregate,
                    });
                }
                AgentStep::Action(action) => {
                    let observation = self.invoke(&action, &mut aggregate).await?;
                    scratchpad.push_str(&action.log);
                    scratchpad.push_str("\nObservation: ");
                    scratchpad.push_str(&observation);
                    scratchpad.push_str("\nThought: ");
                    invocations.push(ToolInvocation {
                        action,
                        observation,
                    });
                }
            }
        }

        warn!(max_iterations = self.max_iterations, "Agent did not converge");
        Err(AgentError::MaxIterations(self.max_iterations))
    }
}
