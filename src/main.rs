mod cli_args;
mod config;
mod diff;
mod git;
mod llm;
mod logging;
mod setup;

use anyhow::Result;
use indicatif::ProgressBar;
use std::time::Duration;

use crate::config::Config;
use crate::llm::prompt_builder;

fn main() -> Result<()> {
    let cli = cli_args::parse();
    logging::init_logger(cli.verbose);

    let cfg = Config::from_sources(&cli);

    let diff = diff::gather_diff()?;
    let prompt = prompt_builder::render(cfg.mode, &diff);

    let client = setup::build_llm_client(&cfg)?;

    // Spinner draws on stderr and hides itself when not attached to a tty.
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Generating {} message...", cfg.mode.as_str()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = client.generate(&prompt);
    spinner.finish_and_clear();
    let message = result?;

    println!("{message}");

    if cli.apply {
        git::write_commit_editmsg(&message)?;
        log::info!("wrote message to .git/COMMIT_EDITMSG");
    }

    Ok(())
}
