//! CLI entrypoint for prompt-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use relay_application::{
    ApiClient, ApiError, FanOutInput, FanOutProgress, FanOutUseCase, NoProgress,
};
use relay_domain::{ApiSettings, FanOutResult, Model, OutputFormat, QueueConfig};
use relay_infrastructure::{ConfigLoader, FileConfig, HttpLlmGateway};
use relay_presentation::{Cli, Command, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

type Client = ApiClient<HttpLlmGateway>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting prompt-relay");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        let config = load_config(&cli)?;
        println!("\nEffective configuration:\n");
        println!("{}", ConfigLoader::render(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    config.validate()?;

    let format = cli
        .output
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);
    ConsoleFormatter::set_color(config.output.color && format == OutputFormat::Text);

    let settings = apply_overrides(config.into_settings(), &cli)?;
    debug!(
        server_url = %settings.server_url,
        model = %settings.model,
        queue_enabled = settings.queue.enabled,
        delay_ms = settings.queue.delay_ms,
        "Resolved settings"
    );

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Run `prompt-relay --help` for usage.");
    };

    // === Dependency Injection ===
    let gateway = Arc::new(HttpLlmGateway::new()?);
    let client = Arc::new(ApiClient::new(gateway, settings));

    run(command, client, format, cli.quiet).await
}

async fn run(
    command: Command,
    client: Arc<Client>,
    format: OutputFormat,
    quiet: bool,
) -> Result<ExitCode> {
    let json = format == OutputFormat::Json;

    match command {
        Command::Models => match client.list_available_models().await {
            Ok(models) => {
                if json {
                    println!("{}", ConsoleFormatter::format_models_json(&models));
                } else {
                    print!("{}", ConsoleFormatter::format_models(&models));
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => Ok(report(&e)),
        },

        Command::TestModel { model } => {
            let model: Model = model.parse()?;
            let ok = client.test_model(&model).await;
            if json {
                println!("{}", ConsoleFormatter::format_model_test_json(&model, ok));
            } else {
                println!("{}", ConsoleFormatter::format_model_test(&model, ok));
            }
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }

        Command::Ask { prompt, system } => {
            let reply = client.ask(&prompt, system.as_deref()).await;
            Ok(print_reply(&client, reply, json))
        }

        Command::Migrate {
            old_schema,
            new_schema,
            dialect,
        } => {
            let old = read_schema(&old_schema)?;
            let new = read_schema(&new_schema)?;
            let reply = client.generate_migration(&old, &new, &dialect).await;
            Ok(print_reply(&client, reply, json))
        }

        Command::Diagram { description, kind } => {
            let reply = client.generate_diagram(&description, &kind).await;
            Ok(print_reply(&client, reply, json))
        }

        Command::Translate {
            text,
            from,
            to,
            style,
        } => {
            let input = FanOutInput::new(text, from, to).with_style(style);
            let use_case = FanOutUseCase::new(Arc::clone(&client));

            let progress: Box<dyn FanOutProgress> = if quiet || json {
                Box::new(NoProgress)
            } else if std::io::stderr().is_terminal() {
                Box::new(ProgressReporter::new())
            } else {
                Box::new(SimpleProgress)
            };

            let results = use_case
                .execute_with_progress(input, progress.as_ref())
                .await;

            if json {
                println!("{}", ConsoleFormatter::format_fan_out_json(&results));
            } else {
                print!("{}", ConsoleFormatter::format_fan_out(&results));
            }

            let all_failed = !results.is_empty() && !results.iter().any(FanOutResult::is_success);
            Ok(if all_failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))
}

/// Command-line flags win over every configuration source
fn apply_overrides(mut settings: ApiSettings, cli: &Cli) -> Result<ApiSettings> {
    if let Some(model) = &cli.model {
        settings.model = model.parse()?;
    }

    let mut queue: QueueConfig = settings.queue.clone();
    if cli.no_queue {
        queue.enabled = false;
    }
    if let Some(delay_ms) = cli.delay_ms {
        queue.delay_ms = delay_ms;
    }

    Ok(settings.with_queue(queue))
}

fn read_schema(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))
}

fn print_reply(client: &Client, reply: Result<String, ApiError>, json: bool) -> ExitCode {
    match reply {
        Ok(content) => {
            if json {
                let model = client.settings().model;
                println!("{}", ConsoleFormatter::format_reply_json(&model, &content));
            } else {
                println!("{}", ConsoleFormatter::format_reply(&content));
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn report(error: &ApiError) -> ExitCode {
    eprintln!("{}", ConsoleFormatter::format_api_error(error));
    ExitCode::FAILURE
}
