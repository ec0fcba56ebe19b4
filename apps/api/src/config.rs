use anyhow::{bail, Context, Result};

/// Which analysis the `/api/analyze` endpoint performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Keyword match against the built-in skill vocabulary. No outbound calls.
    Skills,
    /// Forward a text preview to the hosted inference API for feedback.
    Feedback,
}

impl AnalysisMode {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "skills" => Ok(AnalysisMode::Skills),
            "feedback" => Ok(AnalysisMode::Feedback),
            other => bail!("ANALYSIS_MODE must be 'skills' or 'feedback', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables once at startup.
/// Handlers receive it through `AppState`; nothing reads the environment per call.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub analysis_mode: AnalysisMode,
    /// Bearer token for the inference API. Required in feedback mode.
    pub huggingface_api_key: Option<String>,
    /// Exact CORS origin to allow. `None` means allow any origin.
    pub allowed_origin: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let analysis_mode = match std::env::var("ANALYSIS_MODE") {
            Ok(raw) => AnalysisMode::parse(&raw)?,
            Err(_) => AnalysisMode::Skills,
        };

        // Both spellings appeared across deployments; prefer the short one.
        let huggingface_api_key = std::env::var("HUGGINGFACE_API_KEY")
            .or_else(|_| std::env::var("HUGGINGFACE_API_KEY_TOKEN"))
            .ok();
        if analysis_mode == AnalysisMode::Feedback && huggingface_api_key.is_none() {
            bail!("HUGGINGFACE_API_KEY is required when ANALYSIS_MODE=feedback");
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            analysis_mode,
            huggingface_api_key,
            allowed_origin: std::env::var("ALLOWED_ORIGIN").ok(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
