//! Typed failures for provider lookup and querying.
//!
//! Every failure in the registry or dispatcher is surfaced to the caller
//! as one of these variants; nothing is retried or downgraded. The
//! binary prints the message and exits non-zero.

use thiserror::Error;

/// Failure classification for provider resolution and queries.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested provider name is not in the registry.
    #[error("unknown provider: {0}")]
    Unknown(String),

    /// The provider exists but its credential or tool is missing.
    #[error("{0}")]
    NotConfigured(String),

    /// The `gh` binary is not on the search path.
    #[error("GitHub CLI (gh) not found. Install it from https://cli.github.com/")]
    ToolNotFound,

    /// `gh` exists but the copilot command does not work.
    #[error("GitHub Copilot CLI not available. Ensure gh copilot works")]
    ToolNotAvailable,

    /// `gh` reported a missing or expired GitHub login.
    #[error("not authenticated with GitHub. Run: gh auth login")]
    NotAuthenticated,

    /// `gh` reported a missing Copilot subscription.
    #[error("GitHub Copilot subscription required")]
    SubscriptionRequired,

    /// The subprocess failed in a way the stderr heuristics don't cover.
    #[error("gh copilot failed: {0}")]
    ToolFailed(String),

    /// The request body could not be serialized.
    #[error("failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The HTTP request could not be constructed or sent.
    #[error("failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The deadline elapsed before the provider answered.
    #[error("request timed out")]
    Timeout,

    /// The response body was not decodable JSON.
    #[error("failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The provider returned an error payload or a non-success status.
    #[error("API error: {0}")]
    Api(String),

    /// The provider answered with no usable content.
    #[error("no response from {0}")]
    EmptyResponse(String),
}
