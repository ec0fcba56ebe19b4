//! Inference client — the single point of entry for the hosted model call.
//!
//! No other module talks to the Hugging Face API directly. One POST per
//! analyze request, no retries; a failed call surfaces as a 500 on that
//! request and nothing else.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

const INFERENCE_API_URL: &str =
    "https://api-inference.huggingface.co/models/deepseek-ai/DeepSeek-R1-0528";

/// Instruction prepended to the resume preview before it is sent upstream.
const REVIEWER_PROMPT: &str =
    "You are a professional resume reviewer. Provide clear and constructive feedback on the following resume:";

/// Returned when the upstream response carries no usable `generated_text`.
pub const NO_FEEDBACK_PLACEHOLDER: &str = "No feedback generated";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: Option<String>,
}

/// The inference API returns either a bare object or a list of them depending
/// on the model. Decoded as an explicit union rather than probing fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

/// Pulls the feedback text out of an upstream response body, falling back to
/// [`NO_FEEDBACK_PLACEHOLDER`] when the body has no `generated_text` or does
/// not decode at all.
fn feedback_from_body(body: &str) -> String {
    let text = match serde_json::from_str::<InferenceResponse>(body) {
        Ok(InferenceResponse::Single(g)) => g.generated_text,
        Ok(InferenceResponse::Batch(generations)) => {
            generations.into_iter().next().and_then(|g| g.generated_text)
        }
        Err(_) => None,
    };
    text.unwrap_or_else(|| NO_FEEDBACK_PLACEHOLDER.to_string())
}

/// Client for the hosted inference endpoint. Cheap to clone; carried in
/// `AppState`.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    api_key: String,
}

impl InferenceClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Sends the resume preview upstream and returns the generated feedback.
    ///
    /// Non-200 responses become `AppError::Upstream` with the upstream body
    /// verbatim; transport failures become `AppError::UpstreamRequest`.
    pub async fn feedback(&self, preview: &str) -> Result<String, AppError> {
        let prompt = format!("{REVIEWER_PROMPT}\n\n{preview}");

        let response = self
            .client
            .post(INFERENCE_API_URL)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: &prompt })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                details: body,
            });
        }

        debug!("Inference call succeeded ({} bytes)", body.len());
        Ok(feedback_from_body(&body))
    }
}
