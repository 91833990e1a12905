//! Shared application state.

use std::sync::Arc;
use top_songs_ai::LlmBackend;

/// State shared by all request handlers.
///
/// Read-only after startup; handlers are otherwise stateless.
#[derive(Clone)]
pub struct AppState {
    /// The injected chat-completion backend.
    pub backend: Arc<dyn LlmBackend>,
    /// Sampling temperature applied to every request, when configured.
    pub temperature: Option<f32>,
}

impl AppState {
    /// Creates the application state.
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>, temperature: Option<f32>) -> Self {
        Self {
            backend,
            temperature,
        }
    }
}
