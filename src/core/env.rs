//! Environment providers.
//!
//! The expander never touches `std::env` directly; it reads and writes
//! through [`Environment`] so tests can use an in-memory map.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::types::VarName;

/// Source and sink of environment variables.
pub trait Environment {
    /// Current variables as `(name, value)` pairs.
    fn vars(&self) -> Vec<(VarName, String)>;

    /// Set `name` to `value`.
    fn set(&mut self, name: &str, value: &str);
}

/// The real process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped; they
/// cannot be references and are inherited untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn vars(&self) -> Vec<(VarName, String)> {
        std::env::vars_os()
            .filter_map(|(name, value)| {
                match (name.into_string(), value.into_string()) {
                    (Ok(name), Ok(value)) => Some((name, value)),
                    (name, _) => {
                        debug!(name = ?name, "skipping non-UTF-8 variable");
                        None
                    }
                }
            })
            .collect()
    }

    fn set(&mut self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

/// In-memory environment, ordered by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<VarName, String>,
}

impl MemoryEnv {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Render as sorted `NAME=value` lines.
    pub fn to_lines(&self) -> Vec<String> {
        self.vars
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect()
    }
}

impl Environment for MemoryEnv {
    fn vars(&self) -> Vec<(VarName, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
