pub mod gemini;
pub mod openai;
pub mod prompt_builder;
mod prompts;

use anyhow::Result;

/// Trait for talking to an LLM (real backend).
pub trait LlmClient: Send + Sync {
    /// Turn a fully rendered prompt into generated text.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// No-op client for --no-model runs; never touches the network.
pub struct NoopClient;

impl LlmClient for NoopClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        Ok(format!(
            "Dummy response for testing (model calls disabled, prompt was {} chars)",
            prompt.len()
        ))
    }
}
