//! Wayline command line entry point.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use wayline::commands;
use wayline::{ConfigLoader, ConfigValidator, DefaultBinder, build_stack};
use wayline_config::LoggingConfig;

use cli::{Cli, Commands};

/// Initialize tracing on stderr so command output stays on stdout.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, config: wayline::Config) -> wayline::Result<String> {
    match cli.command {
        Commands::Check { file } => commands::check(&file).await,
        Commands::Extract { file } => commands::extract(&file).await,
        Commands::Interceptors => {
            let stack = build_stack(&config, Arc::new(DefaultBinder));
            Ok(commands::interceptors(&config, &stack))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ConfigLoader::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    if let Some(e) = validation.into_error() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli, config).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
