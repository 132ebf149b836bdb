//! Per-provider query dispatch.
//!
//! Three wire protocols hide behind one `query` contract: the
//! OpenAI-compatible chat-completion dialect (OpenAI, Gemini, DeepSeek),
//! Anthropic's messages dialect, and the GitHub Copilot CLI invoked as a
//! subprocess. The provider's [`AuthScheme`] tag drives dispatch, so
//! callers stay provider-agnostic and adding a provider is a table edit
//! plus at most one dispatch arm.

use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ProviderError;
use crate::http_client::{HttpClient, HttpResponse, ReqwestHttpClient};
use crate::prompt;
use crate::registry::{AuthScheme, GITHUB_COPILOT, Provider};

/// Cap on generated tokens for every HTTP provider request.
const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Fixed API version header required by Anthropic.
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

/// OpenAI-compatible chat completion request.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<RequestMessage>,
    #[serde(rename = "maxTokens")]
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Anthropic messages request. Field names match the OpenAI-compatible
/// dialect for uniformity; only headers and response shape differ.
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    #[serde(rename = "maxTokens")]
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Sends a chat completion request to the provider.
///
/// Returns the provider's raw reply text, except for the CLI-backed
/// provider whose output is sanitized before returning.
pub async fn query(
    provider: &Provider,
    api_key: &str,
    model: &str,
    prompt_text: &str,
    timeout: Duration,
) -> Result<String, ProviderError> {
    query_with_client(&ReqwestHttpClient::new(), provider, api_key, model, prompt_text, timeout)
        .await
}

/// Sends a query with an injected HTTP client (for testing).
pub async fn query_with_client(
    client: &impl HttpClient,
    provider: &Provider,
    api_key: &str,
    model: &str,
    prompt_text: &str,
    timeout: Duration,
) -> Result<String, ProviderError> {
    info!(provider = provider.name, model, "dispatching query");

    match provider.auth {
        AuthScheme::Cli => query_copilot(model, prompt_text, timeout).await,
        AuthScheme::ApiKey => {
            query_anthropic(client, provider, api_key, model, prompt_text, timeout).await
        }
        AuthScheme::Bearer => {
            query_openai_compatible(client, provider, api_key, model, prompt_text, timeout).await
        }
    }
}

async fn query_openai_compatible(
    client: &impl HttpClient,
    provider: &Provider,
    api_key: &str,
    model: &str,
    prompt_text: &str,
    timeout: Duration,
) -> Result<String, ProviderError> {
    let request = ChatRequest {
        model: model.to_string(),
        messages: vec![RequestMessage {
            role: "user",
            content: prompt_text.to_string(),
        }],
        max_tokens: MAX_OUTPUT_TOKENS,
    };

    let body = serde_json::to_value(&request).map_err(ProviderError::Serialization)?;
    let authorization = format!("Bearer {api_key}");
    let headers = [
        ("Content-Type", "application/json"),
        ("Authorization", authorization.as_str()),
    ];

    let response = client
        .post_json(provider.endpoint, &headers, &body, timeout)
        .await?;

    parse_chat_response(provider, &response)
}

fn parse_chat_response(
    provider: &Provider,
    response: &HttpResponse,
) -> Result<String, ProviderError> {
    let parsed: ChatResponse = match serde_json::from_str(&response.body) {
        Ok(parsed) => parsed,
        Err(_) if !response.is_success() => return Err(status_error(response)),
        Err(err) => return Err(ProviderError::Decode(err)),
    };

    if let Some(error) = parsed.error {
        return Err(ProviderError::Api(error.message));
    }

    if !response.is_success() {
        return Err(status_error(response));
    }

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::EmptyResponse(provider.name.to_string()))
}

async fn query_anthropic(
    client: &impl HttpClient,
    provider: &Provider,
    api_key: &str,
    model: &str,
    prompt_text: &str,
    timeout: Duration,
) -> Result<String, ProviderError> {
    let request = AnthropicRequest {
        model: model.to_string(),
        max_tokens: MAX_OUTPUT_TOKENS,
        messages: vec![RequestMessage {
            role: "user",
            content: prompt_text.to_string(),
        }],
    };

    let body = serde_json::to_value(&request).map_err(ProviderError::Serialization)?;
    let headers = [
        ("Content-Type", "application/json"),
        ("X-Api-Key", api_key),
        ("Anthropic-Version", ANTHROPIC_VERSION),
    ];

    let response = client
        .post_json(provider.endpoint, &headers, &body, timeout)
        .await?;

    parse_anthropic_response(provider, &response)
}

fn parse_anthropic_response(
    provider: &Provider,
    response: &HttpResponse,
) -> Result<String, ProviderError> {
    let parsed: AnthropicResponse = match serde_json::from_str(&response.body) {
        Ok(parsed) => parsed,
        Err(_) if !response.is_success() => return Err(status_error(response)),
        Err(err) => return Err(ProviderError::Decode(err)),
    };

    if let Some(error) = parsed.error {
        return Err(ProviderError::Api(error.message));
    }

    if !response.is_success() {
        return Err(status_error(response));
    }

    parsed
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .map(|block| block.text)
        .ok_or_else(|| ProviderError::EmptyResponse(provider.name.to_string()))
}

fn status_error(response: &HttpResponse) -> ProviderError {
    ProviderError::Api(format!(
        "API returned status {}: {}",
        response.status, response.body
    ))
}

/// Queries the GitHub Copilot CLI.
///
/// Uses `-p` for prompt mode (non-interactive) and `-s` for silent
/// output (no stats). The subprocess is killed when the deadline
/// expires.
async fn query_copilot(
    model: &str,
    prompt_text: &str,
    timeout: Duration,
) -> Result<String, ProviderError> {
    let gh_path = which::which("gh").map_err(|_| ProviderError::ToolNotFound)?;

    let instruction = format!(
        "Output only a shell command (no explanation, no markdown, no backticks) that: {prompt_text}"
    );

    let mut command = tokio::process::Command::new(gh_path);
    command.args(["copilot", "--", "-p", &instruction, "-s"]);

    if !model.is_empty() && model != GITHUB_COPILOT.default_model {
        command.args(["--model", model]);
    }

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result.map_err(|err| ProviderError::ToolFailed(err.to_string()))?,
        Err(_) => return Err(ProviderError::Timeout),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(stderr = %stderr, "gh copilot exited non-zero");
        return Err(classify_copilot_failure(&stderr));
    }

    let result = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if result.is_empty() {
        return Err(ProviderError::EmptyResponse(GITHUB_COPILOT.name.to_string()));
    }

    Ok(prompt::sanitize_command(&result))
}

/// Maps a non-zero `gh copilot` exit onto the failure taxonomy by
/// inspecting stderr.
fn classify_copilot_failure(stderr: &str) -> ProviderError {
    if stderr.contains("not installed") || stderr.contains("extension") {
        return ProviderError::ToolNotAvailable;
    }

    if stderr.contains("auth") || stderr.contains("login") {
        return ProviderError::NotAuthenticated;
    }

    if stderr.contains("subscription") {
        return ProviderError::SubscriptionRequired;
    }

    ProviderError::ToolFailed(stderr.trim().to_string())
}
