use crate::config::Config;
use crate::inference::InferenceClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Present whenever a Hugging Face API key was configured. Feedback mode
    /// refuses to start without one, so in that mode this is always `Some`.
    pub inference: Option<InferenceClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let inference = config
            .huggingface_api_key
            .clone()
            .map(InferenceClient::new);
        Self { config, inference }
    }
}
