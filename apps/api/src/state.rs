use std::sync::Arc;

use crate::config::Config;
use crate::matching::lexicon::Lexicon;
use crate::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Job posting / seeker lookups. Postgres in production, in-memory in tests.
    pub store: Arc<dyn JobStore>,
    pub lexicon: Arc<Lexicon>,
    pub config: Config,
}
