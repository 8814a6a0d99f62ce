use crate::config::Mode;
use crate::llm::prompts;

/// Render the final prompt for the selected mode, with the diff appended
/// after the instruction block.
pub fn render(mode: Mode, diff: &str) -> String {
    let template = match mode {
        Mode::Commit => prompts::COMMIT_MESSAGE,
        Mode::Pr => prompts::PR_DESCRIPTION,
    };

    format!("{template}\n{diff}")
}
