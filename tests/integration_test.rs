use anyhow::Result;
use std::process::Command;

/// Helper to run howto commands with a clean provider environment.
fn run_howto(args: &[&str]) -> Result<std::process::Output> {
    let mut cmd = Command::new("cargo");
    cmd.arg("run");
    cmd.arg("--quiet");
    cmd.arg("--");
    cmd.args(args);

    // Strip provider configuration so results do not depend on the
    // host environment.
    for var in [
        "OPENAI_API_KEY",
        "ANTHROPIC_API_KEY",
        "GEMINI_API_KEY",
        "DEEPSEEK_API_KEY",
        "HOWTO_PROVIDER",
        "HOWTO_MODEL",
        "HOWTO_TIMEOUT",
    ] {
        cmd.env_remove(var);
    }

    let output = cmd.output()?;
    Ok(output)
}

#[test]
fn test_providers_listing_works_without_credentials() -> Result<()> {
    let output = run_howto(&["providers"])?;

    assert!(output.status.success(), "providers listing should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available Providers"), "should print header");

    for name in ["OpenAI", "Anthropic", "Gemini", "DeepSeek", "GitHub Copilot"] {
        assert!(stdout.contains(name), "listing should include {name}");
    }

    assert!(
        stdout.contains("gh copilot (CLI)"),
        "copilot row should describe the CLI mechanism"
    );

    Ok(())
}

#[test]
fn test_providers_listing_copilot_is_last() -> Result<()> {
    let output = run_howto(&["providers"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    let rows: Vec<&str> = stdout
        .lines()
        .filter(|line| {
            ["OpenAI", "Anthropic", "Gemini", "DeepSeek", "GitHub Copilot"]
                .iter()
                .any(|name| line.starts_with(name))
        })
        .collect();

    assert_eq!(rows.len(), 5, "one row per provider. Stdout: {stdout}");
    assert!(
        rows[4].starts_with("GitHub Copilot"),
        "copilot should be listed last"
    );

    Ok(())
}

#[test]
fn test_no_query_fails() -> Result<()> {
    let output = run_howto(&[])?;

    assert!(!output.status.success(), "bare invocation should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no query provided"),
        "should explain the failure. Stderr: {stderr}"
    );

    Ok(())
}

#[test]
fn test_unknown_provider_fails() -> Result<()> {
    let output = run_howto(&["--provider", "NoSuchProvider", "list", "files"])?;

    assert!(!output.status.success(), "unknown provider should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not found or not configured"),
        "should name the lookup failure. Stderr: {stderr}"
    );

    Ok(())
}

#[test]
fn test_unconfigured_provider_names_missing_variable() -> Result<()> {
    let output = run_howto(&["--provider", "OpenAI", "list", "files"])?;

    assert!(!output.status.success(), "missing key should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("OPENAI_API_KEY"),
        "should name the missing environment variable. Stderr: {stderr}"
    );

    Ok(())
}

#[test]
fn test_invalid_timeout_flag_fails() -> Result<()> {
    let output = run_howto(&["--provider", "OpenAI", "--timeout", "banana", "list", "files"])?;

    assert!(!output.status.success(), "invalid timeout should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid --timeout"),
        "should reject the timeout value. Stderr: {stderr}"
    );

    Ok(())
}
