use assert_cmd::{cargo}; // handy crate for testing CLIs

const SAMPLE_DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+fn hello() {}\n";

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage"));
}

#[test]
fn help_reports_api_key_env_state() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("OPENAI_API_KEY"))
        .stdout(predicates::str::contains("GEMINI_API_KEY"));
}

#[test]
fn prints_version() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_model_run_uses_piped_diff() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--no-model")
        .write_stdin(SAMPLE_DIFF)
        .assert()
        .success()
        .stdout(predicates::str::contains("Dummy response"));
}

#[test]
fn conflicting_mode_flags_fall_back_to_commit_with_warning() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.args(["--cm", "--pr", "--no-model"])
        .write_stdin(SAMPLE_DIFF)
        .assert()
        .success()
        .stderr(predicates::str::contains("both --pr and --cm"));
}

#[test]
fn unknown_provider_warns_and_continues() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.args(["-p", "banana", "--no-model"])
        .write_stdin(SAMPLE_DIFF)
        .assert()
        .success()
        .stderr(predicates::str::contains("unknown provider"));
}

#[test]
fn model_and_no_model_flags_conflict() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.args(["--model", "o4-mini", "--no-model"])
        .write_stdin(SAMPLE_DIFF)
        .assert()
        .failure();
}
