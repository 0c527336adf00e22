//! Batched SSM resolution with fail-fast or best-effort handling.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::core::deadline::Deadline;
use crate::core::store::ParameterStore;
use crate::core::types::LookupKey;
use crate::error::{Result, StoreError};

/// Resolves batches of lookup keys against a [`ParameterStore`].
pub struct Resolver<'a> {
    store: &'a dyn ParameterStore,
    with_decryption: bool,
    best_effort: bool,
    deadline: Option<Deadline>,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a dyn ParameterStore, with_decryption: bool, best_effort: bool) -> Self {
        Self {
            store,
            with_decryption,
            best_effort,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Deadline>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Fetch one batch and map each returned value to its lookup key.
    ///
    /// In strict mode any failure aborts: a failed call, rejected names, or
    /// names the store silently dropped. In best-effort mode these are
    /// logged and the batch contributes whatever did resolve.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Call`, `StoreError::InvalidParameters`,
    /// `StoreError::Inconsistent` or `Error::Timeout` in strict mode.
    pub fn resolve(&self, batch: &[LookupKey]) -> Result<HashMap<LookupKey, String>> {
        let response = self
            .deadline
            .map_or(Ok(()), |d| d.check())
            .and_then(|()| self.store.get_parameters(batch, self.with_decryption));

        let response = match response {
            Ok(response) => response,
            Err(e) if self.best_effort => {
                warn!(count = batch.len(), "skipping batch: {}", e);
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e),
        };

        if !response.invalid.is_empty() {
            let err = StoreError::InvalidParameters(response.invalid.clone());
            if !self.best_effort {
                return Err(err.into());
            }
            warn!("{}", err);
        }

        let values: HashMap<LookupKey, String> = response
            .resolved
            .into_iter()
            .map(|p| (p.lookup_key(), p.value))
            .collect();

        let invalid: HashSet<&str> = response.invalid.iter().map(String::as_str).collect();
        let missing: Vec<LookupKey> = batch
            .iter()
            .filter(|key| !values.contains_key(*key) && !invalid.contains(key.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            let err = StoreError::Inconsistent(missing);
            if !self.best_effort {
                return Err(err.into());
            }
            warn!("{}", err);
        }

        debug!(requested = batch.len(), resolved = values.len(), "batch resolved");
        Ok(values)
    }
}
