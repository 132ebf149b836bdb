//! Howto - AI-powered shell command suggestions.
//!
//! This library provides the core functionality for turning a natural
//! language query into a shell command via an AI provider. It supports:
//!
//! - **Multiple providers**: OpenAI, Anthropic, Gemini, DeepSeek over
//!   HTTP, and the GitHub Copilot CLI as a subprocess
//! - **Auto-detection** of the first configured provider in a fixed
//!   priority order
//! - **Response sanitization** reducing markdown-laden model output to
//!   a single bare command line
//! - **Terminal injection** placing the command in the input buffer for
//!   review before execution
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`registry`] - Static provider table, detection and lookup
//! - [`dispatcher`] - Per-provider request dispatch and response parsing
//! - [`prompt`] - Prompt template and response sanitization
//! - [`http_client`] - HTTP client abstraction
//! - [`config`] - Configuration and timeout resolution
//! - [`error`] - Typed failure taxonomy
//! - [`system`] - Shared dependency injection traits
//! - [`terminal`] - Terminal input injection
//! - [`ui`] - Console output helpers
//!
//! # Example
//!
//! ```ignore
//! use howto::{config, dispatcher, prompt, registry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (provider, api_key) =
//!         registry::detect().ok_or_else(|| anyhow::anyhow!("no provider configured"))?;
//!
//!     let prompt_text = prompt::build("find all rust files larger than 1MB");
//!     let timeout = config::get_timeout(None);
//!
//!     let raw = dispatcher::query(
//!         &provider,
//!         &api_key,
//!         provider.default_model,
//!         &prompt_text,
//!         timeout,
//!     )
//!     .await?;
//!
//!     println!("{}", prompt::sanitize_command(&raw));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http_client;
pub mod prompt;
pub mod registry;
pub mod system;
pub mod terminal;
pub mod ui;
