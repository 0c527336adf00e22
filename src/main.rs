//! ssm-env - Populate environment variables from AWS SSM Parameter Store.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ssm_env::cli::output;
use ssm_env::cli::{execute, Cli};
use ssm_env::core::constants::LOG_ENV;
use ssm_env::error::{ConfigError, Error, MatchError, TemplateError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ssm_env=debug")
        } else {
            EnvFilter::new("ssm_env=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Match(MatchError::Malformed { .. }) => {
                Some("use ssm:///<path>, or pass --no-fail / --allow-relative")
            }
            Error::Template(TemplateError::Parse(_)) => Some("check the --template syntax"),
            Error::Config(ConfigError::CommandNotFound { .. }) => {
                Some("the command must be on PATH or given as a path")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
