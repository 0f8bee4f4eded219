use std::sync::Arc;

use crate::agent::DecisionEngine;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it changes between queries.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable decision engine. Default: `SearchAgent` over the configured model and tools.
    pub engine: Arc<dyn DecisionEngine>,
}
