//! Shared system-access traits for dependency injection.
//!
//! This module contains common traits used across the codebase to enable
//! testability through dependency injection. Provider lookup depends on
//! ambient state (environment variables, whether the Copilot CLI is
//! installed); abstracting those reads behind traits lets the registry
//! be tested in isolation with mock implementations.

use std::process::{Command, Stdio};

/// Trait for reading environment variables.
///
/// An unset variable and one set to the empty string are both reported
/// as absent, since an empty API key is never usable.
///
/// # Example
///
/// ```
/// use howto::system::{EnvSource, SystemEnv};
///
/// let env = SystemEnv;
/// assert!(env.var("HOWTO_SOME_UNSET_VARIABLE").is_none());
/// ```
pub trait EnvSource: Send + Sync {
    /// Returns the value of `key`, or `None` if unset or empty.
    fn var(&self, key: &str) -> Option<String>;
}

/// Default environment source backed by the process environment.
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Trait for probing whether the GitHub Copilot CLI is usable.
pub trait ToolProbe: Send + Sync {
    /// Returns true when the CLI is installed and answers a version check.
    fn is_available(&self) -> bool;
}

/// Default probe that looks for `gh` on the search path and runs a
/// version check through it.
pub struct SystemToolProbe;

impl ToolProbe for SystemToolProbe {
    fn is_available(&self) -> bool {
        let Ok(gh_path) = which::which("gh") else {
            return false;
        };

        // The modern gh copilot is built in, not an extension; a version
        // probe confirms both presence and a working installation.
        Command::new(gh_path)
            .args(["copilot", "--", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
