//! Test support utilities for ssm-env integration tests.
//!
//! Provides in-memory fakes for the parameter store and KMS, plus helpers
//! for driving the binary.

#![allow(dead_code)]

pub mod assertions;
pub mod fakes;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fakes::*;

use assert_cmd::Command;
use ssm_env::core::config::Settings;
use ssm_env::core::env::{Environment, MemoryEnv};
use ssm_env::core::expand::Expander;
use ssm_env::core::matcher::{Matcher, PrefixMatcher};

/// The environment every library test starts from.
pub fn base_env() -> MemoryEnv {
    [("SHELL", "/bin/bash"), ("TERM", "screen-256color")]
        .into_iter()
        .collect()
}

/// Base environment plus `extra`.
pub fn env_with(extra: &[(&str, &str)]) -> MemoryEnv {
    let mut env = base_env();
    for (k, v) in extra {
        env.set(k, v);
    }
    env
}

/// Expander using the built-in `ssm://` matcher.
pub fn expander(store: &FakeStore, kms: &FakeKms, settings: Settings) -> Expander {
    expander_with(Box::new(PrefixMatcher), store, kms, settings)
}

pub fn expander_with(
    matcher: Box<dyn Matcher>,
    store: &FakeStore,
    kms: &FakeKms,
    settings: Settings,
) -> Expander {
    Expander::new(
        matcher,
        Box::new(store.clone()),
        Box::new(kms.clone()),
        settings,
    )
}

pub fn strict() -> Settings {
    Settings::default()
}

pub fn best_effort() -> Settings {
    Settings {
        best_effort: true,
        ..Settings::default()
    }
}

/// An `ssm-env` command with a minimal, predictable environment.
///
/// No AWS variables are passed through, so a test that reaches the store
/// fails instead of touching a real account.
pub fn cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ssm-env").expect("failed to find ssm-env binary");
    cmd.env_clear();
    if let Some(path) = std::env::var_os("PATH") {
        cmd.env("PATH", path);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}
