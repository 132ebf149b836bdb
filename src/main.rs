use std::time::Duration;

use anyhow::anyhow;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::info;

use howto::{config, dispatcher, prompt, registry, terminal, ui};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let matches = Command::new("howto")
        .about("Get command-line suggestions from AI")
        .long_about(
            "Howto is a CLI tool that uses AI to suggest shell commands based on natural language queries.\n\
             \n\
             Supports multiple AI providers:\n\
             - OpenAI (GPT-4, GPT-3.5)\n\
             - Anthropic (Claude)\n\
             - Google Gemini\n\
             - DeepSeek\n\
             - GitHub Copilot\n\
             \n\
             Environment Variables:\n\
             OPENAI_API_KEY      OpenAI API key\n\
             ANTHROPIC_API_KEY   Anthropic API key\n\
             GEMINI_API_KEY      Google Gemini API key\n\
             DEEPSEEK_API_KEY    DeepSeek API key\n\
             HOWTO_MODEL         Override default model for the provider\n\
             HOWTO_PROVIDER      Force a specific provider\n\
             HOWTO_TIMEOUT       Request timeout (e.g., \"30s\", \"1m\") - default: 30s",
        )
        .version("1.0.0")
        .arg(
            Arg::new("query")
                .help("Natural language description of the task")
                .num_args(1..),
        )
        .arg(
            Arg::new("provider")
                .short('p')
                .long("provider")
                .help("Force a specific provider")
                .value_name("NAME")
                .num_args(1),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .help("Override the default model")
                .value_name("MODEL")
                .num_args(1),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Request timeout (e.g., 30s, 1m) - default: 30s")
                .value_name("DURATION")
                .num_args(1),
        )
        .arg(
            Arg::new("dry-run")
                .short('d')
                .long("dry-run")
                .help("Print command without inserting into terminal")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("providers").about("List available AI providers and their status"))
        .get_matches();

    if matches.subcommand_matches("providers").is_some() {
        run_list_providers();
        return;
    }

    if let Err(err) = run_query(&matches).await {
        ui::print_error(&err.to_string());
        std::process::exit(1);
    }
}

async fn run_query(matches: &ArgMatches) -> anyhow::Result<()> {
    let query = matches
        .get_many::<String>("query")
        .unwrap_or_default()
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    if query.is_empty() {
        return Err(anyhow!(
            "no query provided. Use 'howto --help' for usage information"
        ));
    }

    let config = config::Config::load();

    let timeout = config::get_timeout(parse_timeout_flag(matches)?);

    let provider_name = matches
        .get_one::<String>("provider")
        .cloned()
        .or(config.default_provider);

    let (provider, api_key) = resolve_provider(provider_name.as_deref())?;

    let model = matches
        .get_one::<String>("model")
        .cloned()
        .or(config.default_model)
        .unwrap_or_else(|| provider.default_model.to_string());

    info!(provider = provider.name, model = %model, "querying provider");

    let prompt_text = prompt::build(&query);

    let response = dispatcher::query(&provider, &api_key, &model, &prompt_text, timeout)
        .await
        .map_err(|err| anyhow!("failed to query {}: {err}", provider.name))?;

    let command = prompt::sanitize_command(&response);

    if matches.get_flag("dry-run") {
        ui::print_info(&format!("Provider: {} (model: {})", provider.name, model));
        println!("{command}");
        return Ok(());
    }

    terminal::insert_input(&command);

    Ok(())
}

fn resolve_provider(name: Option<&str>) -> anyhow::Result<(registry::Provider, String)> {
    if let Some(name) = name {
        return registry::get_by_name(name)
            .map_err(|err| anyhow!("provider '{name}' not found or not configured: {err}"));
    }

    match registry::detect() {
        Some(found) => Ok(found),
        None => {
            ui::print_info(
                "Set one of: OPENAI_API_KEY, ANTHROPIC_API_KEY, GEMINI_API_KEY, DEEPSEEK_API_KEY",
            );
            Err(anyhow!("no provider configured"))
        }
    }
}

fn parse_timeout_flag(matches: &ArgMatches) -> anyhow::Result<Option<Duration>> {
    match matches.get_one::<String>("timeout") {
        Some(raw) => config::parse_duration(raw)
            .map(Some)
            .ok_or_else(|| anyhow!("invalid --timeout value: {raw}")),
        None => Ok(None),
    }
}

fn run_list_providers() {
    let statuses = registry::list_all();

    ui::print_header("Available Providers");

    let headers = ["Provider", "Status", "Default Model", "Env Variable"];
    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|status| {
            let state = if status.configured { "Ready" } else { "Not configured" };
            vec![
                status.name.to_string(),
                state.to_string(),
                status.default_model.to_string(),
                status.credential_source.to_string(),
            ]
        })
        .collect();

    ui::print_table(&headers, &rows);
}
