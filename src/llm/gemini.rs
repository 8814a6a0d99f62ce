use anyhow::{anyhow, Result};
use musli::json;
use musli::{Decode, Encode};
use reqwest::blocking::Client;

use super::LlmClient;

// Request/response structs we encode and decode with musli::json.

#[derive(Debug, Encode)]
#[musli(name_all = "name")]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Encode, Decode)]
#[musli(name_all = "name")]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Encode, Decode)]
#[musli(name_all = "name")]
struct Part {
    text: String,
}

#[derive(Debug, Decode)]
#[musli(name_all = "name")]
struct GenerateResponse {
    #[musli(default)]
    candidates: Vec<Candidate>,
    #[musli(default, name = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Decode)]
#[musli(name_all = "name")]
struct Candidate {
    #[musli(default)]
    content: Option<Content>,
    // e.g. "STOP", "MAX_TOKENS", "SAFETY", "RECITATION"
    #[musli(default, name = "finishReason")]
    finish_reason: String,
}

#[derive(Debug, Decode)]
#[musli(name_all = "name")]
struct PromptFeedback {
    #[musli(default, name = "blockReason")]
    block_reason: String,
}

#[derive(Debug, Decode)]
#[musli(name_all = "name")]
struct ErrorResponse {
    #[musli(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Decode)]
#[musli(name_all = "name")]
struct ErrorBody {
    #[musli(default)]
    code: u32,
    #[musli(default)]
    message: String,
    #[musli(default)]
    status: String,
}

/// Synchronous Google Gemini client using :generateContent.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        GeminiClient {
            http: Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl LlmClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let req_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let body_str = json::to_string(&req_body)
            .map_err(|e| anyhow!("failed to encode Gemini JSON request: {e}"))?;

        log::trace!("Gemini request body: {body_str}");

        let url = self.generate_url();

        log::info!("Calling Gemini model {:?}", self.model);

        let resp = self
            .http
            .post(&url)
            // The key travels as a query parameter, not a header.
            .query(&[("key", self.api_key.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_str)
            .send()
            .map_err(|e| anyhow!("error calling Gemini at {url}: {e}"))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .map_err(|e| anyhow!("failed to read Gemini response body: {e}"))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &resp_text));
        }

        log::trace!("Gemini raw JSON response: {resp_text}");

        let parsed: GenerateResponse = json::from_str(&resp_text)
            .map_err(|e| anyhow!("failed to decode Gemini JSON: {e}"))?;

        extract_text(parsed)
    }
}

/// Map a non-2xx response to an error, preferring the structured message
/// the API embeds in the body.
fn api_error(status: u16, body: &str) -> anyhow::Error {
    if let Ok(ErrorResponse { error: Some(err) }) = json::from_str::<ErrorResponse>(body) {
        if !err.message.is_empty() {
            return anyhow!(
                "Gemini API error ({} {}): {}",
                err.code,
                err.status,
                err.message
            );
        }
    }
    anyhow!("Gemini API request failed with status {status}: {body}")
}

/// Pull the generated text out of a decoded response, surfacing block and
/// finish conditions as errors.
fn extract_text(resp: GenerateResponse) -> Result<String> {
    // The prompt itself may have been rejected before any candidate ran.
    if let Some(feedback) = &resp.prompt_feedback {
        if !feedback.block_reason.is_empty() {
            return Err(anyhow!(
                "Gemini prompt blocked due to {}",
                feedback.block_reason
            ));
        }
    }

    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(anyhow!("no candidates in Gemini API response"));
    };

    if candidate.finish_reason != "STOP" && candidate.finish_reason != "MAX_TOKENS" {
        return Err(anyhow!(
            "Gemini generation finished due to {}",
            candidate.finish_reason
        ));
    }

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if parts.is_empty() {
        return Err(anyhow!("Gemini response candidate has no content parts"));
    }

    Ok(parts.into_iter().map(|p| p.text).collect())
}
