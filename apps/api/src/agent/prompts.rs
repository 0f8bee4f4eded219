// ReAct prompt for the search agent.
// The row keys in the final-answer instruction are parsed verbatim by the results table.

/// Completions stop here so the model never writes its own observations.
pub const STOP_SEQUENCES: &[&str] = &["\nObservation"];

/// Fixed part of the prompt. Replace `{tools}` and `{tool_names}` once per agent.
pub const REACT_TEMPLATE: &str = r#"Answer the following questions as best you can. You have access to the following tools:

{tools}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: The final answer should be returned as a list of dictionaries/rows. The keys to be included are Title, Company, Location, Link. Example: [{"Title":"","Company":"","Location":"","Link":""}]

Begin!"#;

/// Renders the tool-dependent header. `tools` is `(name, description)` in catalogue order.
pub fn render_header(tools: &[(&str, &str)]) -> String {
    let names = tools
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    let catalogue = tools
        .iter()
        .map(|(name, description)| format!("{name}: {description}"))
        .collect::<Vec<_>>()
        .join("\n");

    REACT_TEMPLATE
        .replace("{tool_names}", &names)
        .replace("{tools}", &catalogue)
}

/// Full prompt for one step. User text and transcript are appended, never substituted.
pub fn render_prompt(header: &str, question: &str, scratchpad: &str) -> String {
    format!("{header}\n\nQuestion: {question}\nThought:{scratchpad}")
}
