//! Command-line interface.

pub mod exec;
pub mod output;
pub mod print;

use std::time::Duration;

use clap::Parser;
use tracing::debug;

use crate::core::config::Settings;
use crate::core::constants::{DEFAULT_BATCH_SIZE, DEFAULT_TEMPLATE};
use crate::core::deadline::Deadline;
use crate::core::env::ProcessEnv;
use crate::core::expand::Expander;
use crate::core::matcher::{Matcher, PrefixMatcher, TemplateMatcher};
use crate::core::{cipher, store};
use crate::error::Result;

/// ssm-env - Populate environment variables from AWS SSM Parameter Store.
#[derive(Parser, Debug)]
#[command(
    name = "ssm-env",
    about = "Populate environment variables from AWS SSM Parameter Store, then exec a program",
    version,
    after_help = "Variables set to ssm:///<path> are replaced with the parameter value.\n\
                  Variables set to '!kms <base64>' are decrypted with AWS KMS."
)]
pub struct Cli {
    /// Template deriving the SSM parameter name from a variable. An empty
    /// result means the variable is not an SSM parameter
    #[arg(short, long, env = "SSM_ENV_TEMPLATE", default_value = DEFAULT_TEMPLATE, hide_default_value = true)]
    pub template: String,

    /// Decrypt SecureString parameters and set the plaintext
    #[arg(long, env = "SSM_ENV_WITH_DECRYPTION")]
    pub with_decryption: bool,

    /// Don't fail if a parameter or KMS value cannot be resolved
    #[arg(long, env = "SSM_ENV_NO_FAIL")]
    pub no_fail: bool,

    /// Print resolved values instead of passing them to the command
    #[arg(long)]
    pub print: bool,

    /// With --print, output a JSON object
    #[arg(long, requires = "print")]
    pub json: bool,

    /// Parameters fetched per GetParameters call (1-10)
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Give up on the whole expansion after this many seconds
    #[arg(long, env = "SSM_ENV_TIMEOUT", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Allow parameter names without a leading '/'
    #[arg(long)]
    pub allow_relative: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command and arguments to run
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required_unless_present = "print",
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Expansion settings selected by the flags.
    pub fn settings(&self) -> Settings {
        Settings {
            with_decryption: self.with_decryption,
            best_effort: self.no_fail,
            print_only: self.print,
            batch_size: self.batch_size,
            timeout: self.timeout.map(Duration::from_secs),
            require_absolute: !self.allow_relative,
        }
    }

    /// The matcher selected by `--template`.
    ///
    /// The default template is served by the built-in prefix matcher.
    pub fn matcher(&self) -> Result<Box<dyn Matcher>> {
        if self.template == DEFAULT_TEMPLATE {
            return Ok(Box::new(PrefixMatcher));
        }
        Ok(Box::new(TemplateMatcher::parse(&self.template)?))
    }
}

/// Expand the process environment, then launch the command.
pub fn execute(cli: Cli) -> Result<()> {
    let settings = cli.settings();
    settings.validate()?;
    let matcher = cli.matcher()?;

    debug!(
        with_decryption = settings.with_decryption,
        best_effort = settings.best_effort,
        print_only = settings.print_only,
        "expanding environment"
    );

    let deadline = settings.timeout.and_then(Deadline::after);
    let expander = Expander::new(
        matcher,
        store::default_store(deadline),
        cipher::default_decrypter(deadline),
        settings,
    )
    .with_deadline(deadline);
    let expansion = expander.expand(&mut ProcessEnv)?;

    if cli.print {
        print::render(&expansion, cli.json)?;
    }

    if cli.command.is_empty() {
        return Ok(());
    }
    exec::launch(&cli.command)
}
