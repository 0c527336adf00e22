//! Overall deadline for an expansion pass.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Point in time after which no further calls are issued and in-flight
/// calls are abandoned.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// A deadline `budget` from now.
    ///
    /// Returns `None` when the budget is too large to represent, which is
    /// the same as having no deadline.
    pub fn after(budget: Duration) -> Option<Self> {
        Instant::now()
            .checked_add(budget)
            .map(|at| Self { at, budget })
    }

    /// Time left before the deadline.
    ///
    /// # Errors
    ///
    /// Returns `Error::Timeout` once the deadline has passed.
    pub fn remaining(&self) -> Result<Duration> {
        match self.at.checked_duration_since(Instant::now()) {
            Some(left) if !left.is_zero() => Ok(left),
            _ => Err(self.expired()),
        }
    }

    /// Fail with `Error::Timeout` once the deadline has passed.
    pub fn check(&self) -> Result<()> {
        self.remaining().map(|_| ())
    }

    /// The error reported when this deadline is missed.
    pub fn expired(&self) -> Error {
        Error::Timeout(self.budget)
    }
}
