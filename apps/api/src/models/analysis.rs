use serde::{Deserialize, Serialize};

/// JSON-body form of the analyze request.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume: Option<String>,
}

/// Response for `POST /api/analyze`. Which optional fields appear depends on
/// the input form (filename only for uploads) and the configured analysis
/// mode (skills fields vs feedback).
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}
