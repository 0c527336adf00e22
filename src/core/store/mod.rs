//! Parameter store access.
//!
//! Abstracts the `GetParameters` call so the resolver can run against AWS
//! SSM in production and an in-memory fake in tests.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `ParameterStore` trait
//! 2. Add the implementation in a new file (e.g., `secrets_manager.rs`)
//! 3. Feature-gate if it pulls in an SDK

use crate::core::deadline::Deadline;
use crate::core::types::LookupKey;
use crate::error::{Result, StoreError};

#[cfg(feature = "aws")]
pub mod aws;

/// One resolved parameter as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    /// Version or label selector (`:2`), present for versioned lookups.
    pub selector: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            selector: None,
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// The key this parameter answers: name followed by any selector.
    pub fn lookup_key(&self) -> LookupKey {
        match &self.selector {
            Some(selector) => format!("{}{}", self.name, selector),
            None => self.name.clone(),
        }
    }
}

/// Response of one `GetParameters` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pub resolved: Vec<Parameter>,
    /// Requested names the store rejected.
    pub invalid: Vec<String>,
}

/// Batch lookup against a parameter store.
pub trait ParameterStore {
    /// Fetch up to the store's batch limit of names in one call.
    ///
    /// `with_decryption` asks the store to return SecureString values as
    /// plaintext.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Call` on transport, auth or service failure.
    fn get_parameters(&self, names: &[LookupKey], with_decryption: bool) -> Result<Parameters>;
}

impl<T: ParameterStore + ?Sized> ParameterStore for Box<T> {
    fn get_parameters(&self, names: &[LookupKey], with_decryption: bool) -> Result<Parameters> {
        (**self).get_parameters(names, with_decryption)
    }
}

/// Store used when no backend is compiled in. Fails on first use only, so
/// environments without references never notice.
#[derive(Debug, Default)]
pub struct Unavailable;

impl ParameterStore for Unavailable {
    fn get_parameters(&self, _names: &[LookupKey], _with_decryption: bool) -> Result<Parameters> {
        Err(StoreError::Call(
            "SSM support not compiled. Rebuild with: cargo install ssm-env --features aws"
                .to_string(),
        )
        .into())
    }
}

/// The default store for this build.
#[allow(unused_variables)]
pub fn default_store(deadline: Option<Deadline>) -> Box<dyn ParameterStore> {
    #[cfg(feature = "aws")]
    {
        Box::new(aws::Ssm::new(deadline))
    }
    #[cfg(not(feature = "aws"))]
    {
        Box::new(Unavailable)
    }
}
