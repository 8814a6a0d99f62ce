use clap::{ArgAction, ArgGroup, CommandFactory, FromArgMatches, Parser};
use std::env;

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "diffmsg",
    version,
    about = "LLM-assisted commit message and PR description generator",
    long_about = "Reads a diff from stdin (or falls back to staged git changes) and asks an \
                  LLM provider for a conventional commit message or a pull request description."
)]
#[command(group(
    ArgGroup::new("model_group")
        .args(["model", "no_model"])
        .multiple(false)
))]
pub struct Cli {
    /// Generate a commit message (default mode)
    #[arg(long)]
    pub cm: bool,

    /// Generate a pull request description
    #[arg(long)]
    pub pr: bool,

    /// Model name to use; defaults depend on the provider
    #[arg(long, env = "DIFFMSG_MODEL")]
    pub model: Option<String>,

    /// Provider to use (openai, google)
    #[arg(long, short = 'p', env = "DIFFMSG_PROVIDER")]
    pub provider: Option<String>,

    /// Disable model calls; print a dummy response instead
    #[arg(long)]
    pub no_model: bool,

    /// Also write the generated message into .git/COMMIT_EDITMSG (no commit is created)
    #[arg(long)]
    pub apply: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parse argv, attaching a dynamic help section that reports which API-key
/// env vars are currently set.
pub fn parse() -> Cli {
    let matches = Cli::command().after_help(env_summary()).get_matches();
    match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    }
}

fn env_summary() -> String {
    format!(
        "Environment:\n  OPENAI_API_KEY  <{}>  required for --provider openai\n  GEMINI_API_KEY  <{}>  required for --provider google",
        env_state("OPENAI_API_KEY"),
        env_state("GEMINI_API_KEY"),
    )
}

fn env_state(key: &str) -> &'static str {
    match env::var(key) {
        Ok(v) if !v.is_empty() => "set",
        _ => "unset",
    }
}
