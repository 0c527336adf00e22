//! Environment expansion.
//!
//! One pass over the environment: classify every variable, resolve SSM
//! references in batches, decrypt inline KMS values, then write the
//! results back. Values are staged first and only applied once the whole
//! pass has succeeded, so a strict-mode failure leaves the environment as
//! it was.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::batch::PendingGroups;
use crate::core::cipher::{self, Decrypter};
use crate::core::config::Settings;
use crate::core::env::Environment;
use crate::core::matcher::{classify, Matcher};
use crate::core::deadline::Deadline;
use crate::core::resolve::Resolver;
use crate::core::store::ParameterStore;
use crate::core::types::{Reference, VarName};
use crate::error::{Error, MatchError, Result};

/// Outcome of an expansion pass.
#[derive(Debug, Default)]
pub struct Expansion {
    /// Resolved values by variable name. Zeroized on drop.
    pub resolved: BTreeMap<VarName, Zeroizing<String>>,
    /// References that kept their literal value (best-effort only).
    pub skipped: Vec<VarName>,
}

impl Expansion {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.resolved.get(name).map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Drives an expansion pass over an [`Environment`].
pub struct Expander {
    matcher: Box<dyn Matcher>,
    store: Box<dyn ParameterStore>,
    decrypter: Box<dyn Decrypter>,
    settings: Settings,
    deadline: Option<Deadline>,
}

impl Expander {
    pub fn new(
        matcher: Box<dyn Matcher>,
        store: Box<dyn ParameterStore>,
        decrypter: Box<dyn Decrypter>,
        settings: Settings,
    ) -> Self {
        Self {
            matcher,
            store,
            decrypter,
            settings,
            deadline: None,
        }
    }

    /// Use an already running deadline instead of starting one from
    /// `settings.timeout` when the pass begins.
    pub fn with_deadline(mut self, deadline: Option<Deadline>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Expand references in `env`.
    ///
    /// Plain variables are never touched. Unless `print_only` is set, every
    /// resolved value is written back with [`Environment::set`].
    ///
    /// # Errors
    ///
    /// Classification errors are always fatal. Everything else is fatal in
    /// strict mode and logged in best-effort mode.
    pub fn expand(&self, env: &mut dyn Environment) -> Result<Expansion> {
        let settings = &self.settings;
        let deadline = self
            .deadline
            .or_else(|| settings.timeout.and_then(Deadline::after));
        let mut expansion = Expansion::default();
        let mut pending = PendingGroups::new();
        let mut encrypted = Vec::new();

        for (name, value) in env.vars() {
            match classify(
                self.matcher.as_ref(),
                &name,
                &value,
                settings.require_absolute,
            ) {
                Ok(Reference::Plain) => {}
                Ok(Reference::Ssm(key)) => pending.insert(key, name),
                Ok(Reference::Kms(payload)) => encrypted.push((name, payload)),
                Err(Error::Match(e @ MatchError::Malformed { .. })) if settings.best_effort => {
                    warn!("skipping: {}", e);
                    expansion.skipped.push(name);
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            ssm = pending.len(),
            kms = encrypted.len(),
            "classified environment"
        );

        if !pending.is_empty() {
            self.resolve_ssm(&pending, deadline, &mut expansion)?;
        }

        for (name, payload) in encrypted {
            let revealed = deadline
                .map_or(Ok(()), |d| d.check())
                .and_then(|()| cipher::reveal(self.decrypter.as_ref(), &payload));

            match revealed {
                Ok(plaintext) => {
                    expansion.resolved.insert(name, plaintext);
                }
                Err(e) if settings.best_effort => {
                    warn!(name = %name, "{}", e);
                    expansion.skipped.push(name);
                }
                Err(e) => return Err(e),
            }
        }

        if settings.print_only {
            debug!(count = expansion.resolved.len(), "print only, environment unchanged");
        } else {
            for (name, value) in &expansion.resolved {
                env.set(name, value);
            }
        }

        Ok(expansion)
    }

    fn resolve_ssm(
        &self,
        pending: &PendingGroups,
        deadline: Option<Deadline>,
        expansion: &mut Expansion,
    ) -> Result<()> {
        let settings = &self.settings;
        let resolver = Resolver::new(
            self.store.as_ref(),
            settings.with_decryption,
            settings.best_effort,
        )
        .with_deadline(deadline);

        let mut values = BTreeMap::new();
        for batch in pending.batches(settings.batch_size) {
            values.extend(resolver.resolve(&batch)?);
        }

        for (key, names) in pending.iter() {
            match values.get(key) {
                Some(value) => {
                    for name in names {
                        expansion
                            .resolved
                            .insert(name.clone(), Zeroizing::new(String::clone(value)));
                    }
                }
                None => expansion.skipped.extend(names.iter().cloned()),
            }
        }

        Ok(())
    }
}
