//! Parses one model completion into the next agent step.

use thiserror::Error;

const FINAL_ANSWER: &str = "Final Answer:";
const ACTION: &str = "Action:";
const ACTION_INPUT: &str = "Action Input:";

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentAction {
    pub tool: String,
    pub input: String,
    /// Raw completion text, replayed into the scratchpad.
    pub log: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentStep {
    Action(AgentAction),
    Finish { output: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum OutputParseError {
    #[error("Parsing LLM output produced both a final answer and a parse-able action: {0}")]
    AmbiguousStep(String),

    #[error("Invalid Format: Missing 'Action:' after 'Thought:' in: {0}")]
    MissingAction(String),

    #[error("Invalid Format: Missing 'Action Input:' after 'Action:' in: {0}")]
    MissingActionInput(String),
}

pub fn parse_step(text: &str) -> Result<AgentStep, OutputParseError> {
    let has_answer = text.contains(FINAL_ANSWER);

    if let Some((tool, input)) = split_action(text) {
        if has_answer {
            return Err(OutputParseError::AmbiguousStep(text.to_string()));
        }
        return Ok(AgentStep::Action(AgentAction {
            tool,
            input,
            log: text.to_string(),
        }));
    }

    if has_answer {
        // rsplit always yields at least one piece
        let output = text.rsplit(FINAL_ANSWER).next().unwrap_or_default();
        return Ok(AgentStep::Finish {
            output: output.trim().to_string(),
        });
    }

    if !text.contains(ACTION) {
        Err(OutputParseError::MissingAction(text.to_string()))
    } else {
        Err(OutputParseError::MissingActionInput(text.to_string()))
    }
}

/// `Action: <tool> ... Action Input: <input>`, with the input trimmed of
/// whitespace and surrounding double quotes.
fn split_action(text: &str) -> Option<(String, String)> {
    let action_at = text.find(ACTION)?;
    let after_action = &text[action_at + ACTION.len()..];
    let input_at = after_action.find(ACTION_INPUT)?;

    let tool = after_action[..input_at].trim();
    let input = after_action[input_at + ACTION_INPUT.len()..]
        .trim()
        .trim_matches('"');

    Some((tool.to_string(), input.to_string()))
}
