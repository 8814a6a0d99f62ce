use anyhow::{bail, Result};
use log::debug;

use crate::config::{Config, ProviderKind, DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_MODEL};
use crate::llm::gemini::GeminiClient;
use crate::llm::openai::OpenAiClient;
use crate::llm::{LlmClient, NoopClient};

pub const OPENAI_API_URL: &str = "https://api.openai.com";
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Build the LLM client based on the resolved config. A missing API key is
/// an ordinary error returned to the caller, not a process exit.
pub fn build_llm_client(cfg: &Config) -> Result<Box<dyn LlmClient>> {
    if cfg.no_model {
        debug!("model calls disabled, using NoopClient");
        return Ok(Box::new(NoopClient));
    }

    match cfg.provider {
        ProviderKind::OpenAi => {
            let Some(key) = cfg.openai_api_key.clone() else {
                bail!("OPENAI_API_KEY must be set for the openai provider");
            };
            let model = resolved_model(cfg, DEFAULT_OPENAI_MODEL);

            debug!("using OpenAiClient with model {model:?}");
            Ok(Box::new(OpenAiClient::new(
                key,
                model,
                OPENAI_API_URL.to_string(),
            )))
        }
        ProviderKind::Google => {
            let Some(key) = cfg.gemini_api_key.clone() else {
                bail!("GEMINI_API_KEY must be set for the google provider");
            };
            let model = resolved_model(cfg, DEFAULT_GEMINI_MODEL);

            debug!("using GeminiClient with model {model:?}");
            Ok(Box::new(GeminiClient::new(
                key,
                model,
                GEMINI_API_URL.to_string(),
            )))
        }
    }
}

fn resolved_model(cfg: &Config, default: &str) -> String {
    cfg.model.clone().unwrap_or_else(|| default.to_string())
}
