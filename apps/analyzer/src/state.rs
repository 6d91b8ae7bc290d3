use std::sync::Arc;

use crate::analysis::scorer::CompatibilityModel;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Pluggable model backend. Production: `GeminiScorer`.
    pub model: Arc<dyn CompatibilityModel>,
}
