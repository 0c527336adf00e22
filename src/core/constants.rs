//! Constants used throughout ssm-env.
//!
//! Centralizes magic strings and limits.

/// Program name used as the prefix of fatal error messages.
pub const PROGRAM_NAME: &str = "ssm-env";

/// URI scheme marking a value as an SSM parameter reference.
pub const SSM_PREFIX: &str = "ssm://";

/// Tag marking a value as an inline KMS-encrypted payload.
pub const KMS_PREFIX: &str = "!kms ";

/// Characters stripped from both ends of a KMS payload.
pub const KMS_PAYLOAD_TRIM: &[char] = &['\'', '"', ' '];

/// Template equivalent of the built-in prefix matcher.
pub const DEFAULT_TEMPLATE: &str =
    r#"{{ if hasPrefix .Value "ssm://" }}{{ trimPrefix .Value "ssm://" }}{{ end }}"#;

/// Maximum number of names accepted by a single GetParameters call.
pub const MAX_BATCH_SIZE: usize = 10;

/// Default number of parameters fetched per call.
pub const DEFAULT_BATCH_SIZE: usize = MAX_BATCH_SIZE;

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "SSM_ENV_LOG";
