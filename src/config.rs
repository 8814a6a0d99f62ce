use crate::cli_args::Cli;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_OPENAI_MODEL: &str = "o4-mini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro-exp-03-25";

/// What kind of message to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Commit,
    Pr,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Commit => "commit",
            Mode::Pr => "pr",
        }
    }
}

/// Which remote API backs the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Google,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Google => "google",
        }
    }

    /// Lenient lookup: unknown names fall back to openai with a warning
    /// instead of failing the run.
    pub fn from_name(name: &str) -> Self {
        match name {
            "openai" => ProviderKind::OpenAi,
            "google" => ProviderKind::Google,
            other => {
                log::warn!("unknown provider {other:?}, defaulting to openai");
                ProviderKind::OpenAi
            }
        }
    }
}

/// Final resolved configuration for diffmsg.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub provider: ProviderKind,
    pub model: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub no_model: bool,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and
    /// defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (clap also maps `DIFFMSG_MODEL` / `DIFFMSG_PROVIDER`)
    ///   2. Env vars (`OPENAI_API_KEY`, `GEMINI_API_KEY`)
    ///   3. TOML `~/.config/diffmsg.toml`
    ///   4. Hardcoded defaults
    pub fn from_sources(cli: &Cli) -> Self {
        let file_cfg = load_file_config().unwrap_or_default();

        let mode = resolve_mode(cli.cm, cli.pr);

        let provider = cli
            .provider
            .as_deref()
            .or(file_cfg.provider.as_deref())
            .map(ProviderKind::from_name)
            .unwrap_or(ProviderKind::OpenAi);

        let model = cli.model.clone().or(file_cfg.model);

        let openai_api_key = env_nonempty("OPENAI_API_KEY").or(file_cfg.openai_api_key);
        let gemini_api_key = env_nonempty("GEMINI_API_KEY").or(file_cfg.gemini_api_key);

        Config {
            mode,
            provider,
            model,
            openai_api_key,
            gemini_api_key,
            no_model: cli.no_model,
        }
    }
}

/// Commit wins when both mode flags are set.
fn resolve_mode(cm: bool, pr: bool) -> Mode {
    if pr && cm {
        log::warn!("both --pr and --cm specified, using --cm");
        Mode::Commit
    } else if pr {
        Mode::Pr
    } else {
        Mode::Commit
    }
}

/// An empty env var counts as unset.
fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    pub model: Option<String>,
    pub provider: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
}

/// Return `~/.config/diffmsg.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("diffmsg.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    toml::from_str::<FileConfig>(&data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_wins_when_both_mode_flags_are_set() {
        assert_eq!(resolve_mode(true, true), Mode::Commit);
    }

    #[test]
    fn no_flags_means_commit_mode() {
        assert_eq!(resolve_mode(false, false), Mode::Commit);
    }

    #[test]
    fn pr_flag_alone_selects_pr_mode() {
        assert_eq!(resolve_mode(false, true), Mode::Pr);
    }

    #[test]
    fn known_provider_names_resolve() {
        assert_eq!(ProviderKind::from_name("openai"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::from_name("google"), ProviderKind::Google);
    }

    #[test]
    fn unknown_provider_falls_back_to_openai() {
        assert_eq!(ProviderKind::from_name("banana"), ProviderKind::OpenAi);
    }

    #[test]
    fn file_config_parses_partial_tables() {
        let cfg: FileConfig = toml::from_str("model = \"o4-mini\"").unwrap();
        assert_eq!(cfg.model.as_deref(), Some("o4-mini"));
        assert!(cfg.provider.is_none());
        assert!(cfg.openai_api_key.is_none());
    }
}
