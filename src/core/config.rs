//! Expansion settings.

use std::time::Duration;

use crate::core::constants::{DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
use crate::error::{ConfigError, Result};

/// Options controlling one expansion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Ask the store to decrypt SecureString parameters.
    pub with_decryption: bool,
    /// Keep literal values for anything that cannot be resolved instead of
    /// failing the pass.
    pub best_effort: bool,
    /// Stage resolved values without writing them to the environment.
    pub print_only: bool,
    /// Names per `GetParameters` call.
    pub batch_size: usize,
    /// Deadline for the whole pass.
    pub timeout: Option<Duration>,
    /// Require lookup keys to start with `/`.
    pub require_absolute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            with_decryption: false,
            best_effort: false,
            print_only: false,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: None,
            require_absolute: true,
        }
    }
}

impl Settings {
    /// Check the settings against store limits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BatchSize` if the batch size is zero or above
    /// the `GetParameters` limit.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::BatchSize {
                got: self.batch_size,
                max: MAX_BATCH_SIZE,
            }
            .into());
        }
        Ok(())
    }
}
