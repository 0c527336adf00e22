//! Inline KMS-encrypted values.
//!
//! A variable set to `!kms <base64 ciphertext>` is decoded and decrypted
//! in place. The decrypter is a trait so tests can swap in a fake.

use tracing::trace;
use zeroize::Zeroizing;

use crate::core::deadline::Deadline;
use crate::error::{CipherError, Result};

mod decode;

#[cfg(feature = "aws")]
pub mod aws;

pub use decode::decode;

/// Decrypts an opaque ciphertext blob.
pub trait Decrypter {
    /// # Errors
    ///
    /// Returns `CipherError::Decryption` if the provider rejects the blob.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

impl<T: Decrypter + ?Sized> Decrypter for Box<T> {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        (**self).decrypt(ciphertext)
    }
}

/// Decrypter used when no backend is compiled in.
#[derive(Debug, Default)]
pub struct Unavailable;

impl Decrypter for Unavailable {
    fn decrypt(&self, _ciphertext: &[u8]) -> Result<Vec<u8>> {
        Err(CipherError::Decryption(
            "KMS support not compiled. Rebuild with: cargo install ssm-env --features aws"
                .to_string(),
        )
        .into())
    }
}

/// The default decrypter for this build.
#[allow(unused_variables)]
pub fn default_decrypter(deadline: Option<Deadline>) -> Box<dyn Decrypter> {
    #[cfg(feature = "aws")]
    {
        Box::new(aws::Kms::new(deadline))
    }
    #[cfg(not(feature = "aws"))]
    {
        Box::new(Unavailable)
    }
}

/// Decode and decrypt a `!kms` payload into text.
///
/// # Errors
///
/// Returns `CipherError::Decode` for malformed base64 and
/// `CipherError::Decryption` if the provider fails or the plaintext is
/// not UTF-8.
pub fn reveal(decrypter: &dyn Decrypter, payload: &str) -> Result<Zeroizing<String>> {
    let ciphertext = decode(payload)?;
    trace!(ciphertext_len = ciphertext.len(), "decrypting kms value");

    let plaintext = Zeroizing::new(decrypter.decrypt(&ciphertext)?);
    let text = std::str::from_utf8(&plaintext)
        .map_err(|e| CipherError::Decryption(format!("UTF-8 error: {}", e)))?;

    Ok(Zeroizing::new(text.to_string()))
}
