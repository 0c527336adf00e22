//! Error types.
//!
//! Each concern of an expansion pass has its own error enum; they all
//! convert into the top-level [`Error`] so callers can use `?` freely.

use std::time::Duration;
use thiserror::Error;

/// Errors raised while deciding whether a variable references a secret.
#[derive(Error, Debug)]
pub enum MatchError {
    /// The configured matcher could not be evaluated for a variable.
    #[error("determining name of parameter for {name}: {message}")]
    Evaluation { name: String, message: String },

    /// A derived lookup key is not rooted at `/`.
    #[error("SSM parameters must have a leading '/' (ssm:///<path>): {name}={value}")]
    Malformed { name: String, value: String },
}

/// Errors raised by the parameter store or while interpreting its responses.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Call(String),

    #[error("invalid parameters: [{}]", .0.join(", "))]
    InvalidParameters(Vec<String>),

    #[error("parameters missing from response: [{}]", .0.join(", "))]
    Inconsistent(Vec<String>),
}

/// Errors raised while resolving inline KMS-encrypted values.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("failed to decode base64 value: {0}")]
    Decode(String),

    #[error("failed to decrypt KMS value: {0}")]
    Decryption(String),
}

/// Errors in the matcher template text or its evaluation.
#[derive(Error, Debug, PartialEq)]
pub enum TemplateError {
    #[error("template: {0}")]
    Parse(String),

    #[error("template: {0}")]
    Eval(String),
}

/// Invalid settings or invocation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("batch size must be between 1 and {max}, got {got}")]
    BatchSize { got: usize, max: usize },

    #[error("no command specified")]
    NoCommand,

    #[error("{command}: {source}")]
    CommandNotFound {
        command: String,
        #[source]
        source: which::Error,
    },
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("expansion timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
