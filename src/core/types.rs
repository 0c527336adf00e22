//! Type aliases and small value types for domain concepts.

/// An environment variable name (e.g., DATABASE_URL).
pub type VarName = String;

/// Parameter store identifier, including an optional version or label
/// selector (`/app/db:2`). Keys that differ only in selector are distinct.
pub type LookupKey = String;

/// What an environment variable's value refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Ordinary value, left untouched.
    Plain,
    /// Value names a parameter store entry.
    Ssm(LookupKey),
    /// Value carries a base64 KMS ciphertext.
    Kms(String),
}
