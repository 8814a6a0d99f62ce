use anyhow::{anyhow, Context, Result};
use crossterm::tty::IsTty;
use std::io::{self, Read};

use crate::git;

/// Obtain the diff to summarize: piped stdin first, staged changes second.
pub fn gather_diff() -> Result<String> {
    resolve_diff(read_piped_stdin()?, git::staged_diff)
}

/// Read everything from stdin when data was piped in; None when stdin is a
/// terminal.
fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = io::stdin();
    if stdin.is_tty() {
        return Ok(None);
    }

    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("failed to read from stdin")?;
    Ok(Some(buf))
}

/// Pick between piped input and the staged-changes fallback. The fallback
/// is a closure so this stays testable outside a repository.
fn resolve_diff<F>(piped: Option<String>, staged: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(text) = piped {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    log::warn!("no usable input on stdin, checking for staged changes");

    let diff = staged()?;
    let trimmed = diff.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("no staged changes found"));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piped_input_is_returned_trimmed() {
        let diff = resolve_diff(Some("  +added line \n".to_string()), || {
            panic!("fallback must not run when piped input is usable")
        })
        .unwrap();
        assert_eq!(diff, "+added line");
    }

    #[test]
    fn whitespace_only_pipe_falls_back_to_staged() {
        let diff = resolve_diff(Some("   \n\t".to_string()), || {
            Ok("diff --git a/x b/x\n".to_string())
        })
        .unwrap();
        assert_eq!(diff, "diff --git a/x b/x");
    }

    #[test]
    fn no_pipe_falls_back_to_staged() {
        let diff = resolve_diff(None, || Ok("+staged".to_string())).unwrap();
        assert_eq!(diff, "+staged");
    }

    #[test]
    fn empty_staged_output_is_an_error() {
        let err = resolve_diff(None, || Ok("  \n".to_string())).unwrap_err();
        assert!(err.to_string().contains("no staged changes"));
    }

    #[test]
    fn fallback_failure_is_surfaced() {
        let err = resolve_diff(None, || Err(anyhow!("git exploded"))).unwrap_err();
        assert!(err.to_string().contains("git exploded"));
    }
}
