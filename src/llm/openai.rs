use super::LlmClient;
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Minimal request/response structs for OpenAI Chat Completions API.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// OpenAI-based implementation of LlmClient.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, api_base_url: String) -> Self {
        OpenAiClient {
            client: Client::new(),
            api_key,
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_base_url)
    }
}

impl LlmClient for OpenAiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let req = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
        };

        log::info!("Calling OpenAI model {:?}", req.model);

        let resp = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .context("failed to send request to OpenAI")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(anyhow!(
                "OpenAI API error: HTTP {} - {}",
                status.as_u16(),
                text
            ));
        }

        let chat_resp: ChatResponse = resp.json().context("failed to parse OpenAI response")?;
        extract_content(chat_resp)
    }
}

/// Pull the generated text out of a decoded chat response.
fn extract_content(resp: ChatResponse) -> Result<String> {
    resp.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| anyhow!("no choices in API response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_choices_is_an_error() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = extract_content(resp).unwrap_err();
        assert!(err.to_string().contains("no choices in API response"));
    }

    #[test]
    fn first_choice_content_is_returned_unchanged() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "feat(api): add widgets"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_content(resp).unwrap(), "feat(api): add widgets");
    }

    #[test]
    fn unknown_response_fields_are_tolerated() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"content": "hello"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 9, "completion_tokens": 2, "total_tokens": 11}
        }"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_content(resp).unwrap(), "hello");
    }

    #[test]
    fn chat_url_handles_trailing_slash() {
        let client = OpenAiClient::new(
            "sk-test".into(),
            "o4-mini".into(),
            "https://api.openai.com/".into(),
        );
        assert_eq!(client.chat_url(), "https://api.openai.com/v1/chat/completions");
    }
}
