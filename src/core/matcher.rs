//! Reference detection.
//!
//! Decides, per environment variable, whether its value is a plain value,
//! an SSM parameter reference, or an inline KMS ciphertext.

use tracing::trace;

use crate::core::constants::{KMS_PAYLOAD_TRIM, KMS_PREFIX, SSM_PREFIX};
use crate::core::template::Template;
use crate::core::types::{LookupKey, Reference};
use crate::error::{MatchError, Result};

/// Derives a parameter store key from a variable.
///
/// Returning `Ok(None)` means the variable is not an SSM reference.
pub trait Matcher {
    /// Compute the lookup key for `name=value`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the matcher cannot be evaluated.
    fn lookup_key(&self, name: &str, value: &str) -> Result<Option<LookupKey>>;
}

impl<F> Matcher for F
where
    F: Fn(&str, &str) -> Result<Option<LookupKey>>,
{
    fn lookup_key(&self, name: &str, value: &str) -> Result<Option<LookupKey>> {
        self(name, value)
    }
}

/// Built-in matcher: values starting with `ssm://` reference the remainder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixMatcher;

impl Matcher for PrefixMatcher {
    fn lookup_key(&self, _name: &str, value: &str) -> Result<Option<LookupKey>> {
        Ok(value
            .strip_prefix(SSM_PREFIX)
            .filter(|key| !key.is_empty())
            .map(str::to_string))
    }
}

/// Matcher driven by a user-supplied [`Template`].
#[derive(Debug, Clone)]
pub struct TemplateMatcher {
    template: Template,
}

impl TemplateMatcher {
    /// Parse template text into a matcher.
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self {
            template: Template::parse(source)?,
        })
    }
}

impl Matcher for TemplateMatcher {
    fn lookup_key(&self, name: &str, value: &str) -> Result<Option<LookupKey>> {
        let key = self.template.render(name, value)?;
        Ok(Some(key).filter(|k| !k.is_empty()))
    }
}

/// Extract the payload of an inline KMS value (`!kms <base64>`).
///
/// Surrounding quotes and spaces around the payload are dropped.
pub fn kms_payload(value: &str) -> Option<&str> {
    value
        .strip_prefix(KMS_PREFIX)
        .map(|rest| rest.trim_matches(KMS_PAYLOAD_TRIM))
}

/// Classify one environment variable.
///
/// The KMS convention is checked first, so a value is never both kinds.
/// When `require_absolute` is set, lookup keys must start with `/`.
///
/// # Errors
///
/// Returns `MatchError::Evaluation` if the matcher fails, and
/// `MatchError::Malformed` for keys outside the `/` namespace.
pub fn classify(
    matcher: &dyn Matcher,
    name: &str,
    value: &str,
    require_absolute: bool,
) -> Result<Reference> {
    if let Some(payload) = kms_payload(value) {
        trace!(name, "kms reference");
        return Ok(Reference::Kms(payload.to_string()));
    }

    let key = matcher
        .lookup_key(name, value)
        .map_err(|e| MatchError::Evaluation {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    match key {
        None => Ok(Reference::Plain),
        Some(key) if require_absolute && !key.starts_with('/') => Err(MatchError::Malformed {
            name: name.to_string(),
            value: value.to_string(),
        }
        .into()),
        Some(key) => {
            trace!(name, key = %key, "ssm reference");
            Ok(Reference::Ssm(key))
        }
    }
}
