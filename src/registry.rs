//! Provider registry: the static table of known AI providers and the
//! lookup operations over it.
//!
//! Descriptors are plain const data; nothing here holds mutable state.
//! Configuration status is recomputed on every call from the process
//! environment (or an injected [`EnvSource`]), because credentials can
//! change between invocations.

use crate::error::ProviderError;
use crate::system::{EnvSource, SystemEnv, SystemToolProbe, ToolProbe};

/// How a provider authenticates requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>` header (OpenAI-compatible APIs).
    Bearer,
    /// Custom API key header (Anthropic's `X-Api-Key`).
    ApiKey,
    /// External CLI tool instead of an HTTP endpoint.
    Cli,
}

/// Static description of one AI provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provider {
    /// Human-readable name, unique within the registry.
    pub name: &'static str,
    /// HTTP endpoint, empty for CLI-backed providers.
    pub endpoint: &'static str,
    /// Model used when the caller does not override it.
    pub default_model: &'static str,
    /// Environment variable holding the API key, empty for CLI-backed.
    pub env_var: &'static str,
    /// Authentication mechanism, drives dispatch.
    pub auth: AuthScheme,
}

pub const OPENAI: Provider = Provider {
    name: "OpenAI",
    endpoint: "https://api.openai.com/v1/chat/completions",
    default_model: "gpt-4o",
    env_var: "OPENAI_API_KEY",
    auth: AuthScheme::Bearer,
};

pub const ANTHROPIC: Provider = Provider {
    name: "Anthropic",
    endpoint: "https://api.anthropic.com/v1/messages",
    default_model: "claude-sonnet-4-20250514",
    env_var: "ANTHROPIC_API_KEY",
    auth: AuthScheme::ApiKey,
};

pub const GEMINI: Provider = Provider {
    name: "Gemini",
    endpoint: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
    default_model: "gemini-2.0-flash",
    env_var: "GEMINI_API_KEY",
    auth: AuthScheme::Bearer,
};

pub const DEEPSEEK: Provider = Provider {
    name: "DeepSeek",
    endpoint: "https://api.deepseek.com/chat/completions",
    default_model: "deepseek-chat",
    env_var: "DEEPSEEK_API_KEY",
    auth: AuthScheme::Bearer,
};

pub const GITHUB_COPILOT: Provider = Provider {
    name: "GitHub Copilot",
    endpoint: "",
    default_model: "gpt-4",
    env_var: "",
    auth: AuthScheme::Cli,
};

/// API-key providers in detection priority order.
const API_PROVIDERS: [Provider; 4] = [OPENAI, ANTHROPIC, GEMINI, DEEPSEEK];

/// Provider information for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub name: &'static str,
    pub default_model: &'static str,
    /// Where the credential comes from, as shown to the user.
    pub credential_source: &'static str,
    pub configured: bool,
}

/// Detects the first available provider.
///
/// API-key providers are scanned in priority order (OpenAI, Anthropic,
/// Gemini, DeepSeek); the first with a non-empty key wins regardless of
/// which was set most recently. When none is configured, the Copilot CLI
/// is probed as a fallback and returned with an empty credential.
pub fn detect() -> Option<(Provider, String)> {
    detect_with(&SystemEnv, &SystemToolProbe)
}

/// Detects the first available provider with injected lookups (for testing).
pub fn detect_with(env: &impl EnvSource, probe: &impl ToolProbe) -> Option<(Provider, String)> {
    for provider in API_PROVIDERS {
        if let Some(key) = env.var(provider.env_var) {
            return Some((provider, key));
        }
    }

    if probe.is_available() {
        return Some((GITHUB_COPILOT, String::new()));
    }

    None
}

/// Returns a provider by name, along with its credential.
///
/// API-key provider names match case-sensitively. The CLI-backed
/// provider also answers to the aliases `"Copilot"` and `"copilot"`.
///
/// # Errors
///
/// [`ProviderError::NotConfigured`] when the name matches but the
/// credential or tool is missing, [`ProviderError::Unknown`] otherwise.
pub fn get_by_name(name: &str) -> Result<(Provider, String), ProviderError> {
    get_by_name_with(name, &SystemEnv, &SystemToolProbe)
}

/// Returns a provider by name with injected lookups (for testing).
pub fn get_by_name_with(
    name: &str,
    env: &impl EnvSource,
    probe: &impl ToolProbe,
) -> Result<(Provider, String), ProviderError> {
    for provider in API_PROVIDERS {
        if provider.name == name {
            return match env.var(provider.env_var) {
                Some(key) => Ok((provider, key)),
                None => Err(ProviderError::NotConfigured(format!(
                    "provider {} requires {} to be set",
                    name, provider.env_var
                ))),
            };
        }
    }

    if name == GITHUB_COPILOT.name || name == "Copilot" || name == "copilot" {
        if !probe.is_available() {
            return Err(ProviderError::NotConfigured(
                "GitHub Copilot CLI not available. Install with: gh extension install github/gh-copilot"
                    .to_string(),
            ));
        }

        return Ok((GITHUB_COPILOT, String::new()));
    }

    Err(ProviderError::Unknown(name.to_string()))
}

/// Returns status records for all known providers.
///
/// API-key providers come first in registry order, the CLI-backed
/// provider last. Purely for display; nothing is mutated.
pub fn list_all() -> Vec<ProviderStatus> {
    list_all_with(&SystemEnv, &SystemToolProbe)
}

/// Returns status records with injected lookups (for testing).
pub fn list_all_with(env: &impl EnvSource, probe: &impl ToolProbe) -> Vec<ProviderStatus> {
    let mut result: Vec<ProviderStatus> = API_PROVIDERS
        .iter()
        .map(|p| ProviderStatus {
            name: p.name,
            default_model: p.default_model,
            credential_source: p.env_var,
            configured: env.var(p.env_var).is_some(),
        })
        .collect();

    result.push(ProviderStatus {
        name: GITHUB_COPILOT.name,
        default_model: GITHUB_COPILOT.default_model,
        credential_source: "gh copilot (CLI)",
        configured: probe.is_available(),
    });

    result
}
