//! Test double for `CompletionModel`: replays queued completions and records prompts.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionModel, LlmError};

#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt lock poisoned").clone()
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(&self, prompt: &str, _stop: &[&str]) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .expect("prompt lock poisoned")
            .push(prompt.to_string());
        self.responses
            .lock()
            .expect("response lock poisoned")
            .pop_front()
            .ok_or(LlmError::EmptyContent)
    }
}
