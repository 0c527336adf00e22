//! In-memory parameter store and KMS.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use ssm_env::core::cipher::Decrypter;
use ssm_env::core::store::{Parameter, ParameterStore, Parameters};
use ssm_env::error::{CipherError, Result, StoreError};

/// One recorded `GetParameters` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub names: Vec<String>,
    pub with_decryption: bool,
}

/// Parameter store backed by a map of lookup keys.
///
/// Behaves like SSM: unknown names come back as invalid, and versioned
/// keys (`/x:2`) are answered with the base name plus a selector. Clones
/// share the call log.
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    values: HashMap<String, String>,
    dropped: HashSet<String>,
    failing: bool,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Omit `key` from both the resolved and invalid lists.
    pub fn dropping(mut self, key: &str) -> Self {
        self.dropped.insert(key.to_string());
        self
    }

    /// Fail every call.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// All names requested across calls, sorted.
    pub fn requested(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .calls
            .borrow()
            .iter()
            .flat_map(|c| c.names.clone())
            .collect();
        names.sort();
        names
    }
}

/// Split `/x:2` into (`/x`, `:2`).
fn split_selector(key: &str) -> (&str, Option<&str>) {
    let leaf = key.rfind('/').map_or(0, |i| i + 1);
    match key[leaf..].find(':') {
        Some(i) => {
            let (name, selector) = key.split_at(leaf + i);
            (name, Some(selector))
        }
        None => (key, None),
    }
}

impl ParameterStore for FakeStore {
    fn get_parameters(&self, names: &[String], with_decryption: bool) -> Result<Parameters> {
        self.calls.borrow_mut().push(Call {
            names: names.to_vec(),
            with_decryption,
        });

        if self.failing {
            return Err(StoreError::Call("ThrottlingException: rate exceeded".into()).into());
        }

        let mut response = Parameters::default();
        for key in names {
            if self.dropped.contains(key) {
                continue;
            }
            match self.values.get(key) {
                Some(value) => {
                    let (name, selector) = split_selector(key);
                    let mut parameter = Parameter::new(name, value.clone());
                    if let Some(selector) = selector {
                        parameter = parameter.with_selector(selector);
                    }
                    response.resolved.push(parameter);
                }
                None => response.invalid.push(key.clone()),
            }
        }
        Ok(response)
    }
}

/// KMS fake mapping ciphertext bytes to plaintext.
#[derive(Debug, Clone, Default)]
pub struct FakeKms {
    plaintexts: HashMap<Vec<u8>, Vec<u8>>,
    calls: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl FakeKms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ciphertext: &[u8], plaintext: &str) -> Self {
        self.plaintexts
            .insert(ciphertext.to_vec(), plaintext.as_bytes().to_vec());
        self
    }

    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.borrow().clone()
    }
}

impl Decrypter for FakeKms {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push(ciphertext.to_vec());
        self.plaintexts
            .get(ciphertext)
            .cloned()
            .ok_or_else(|| CipherError::Decryption("KMS error: access denied".into()).into())
    }
}
