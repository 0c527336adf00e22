//! AWS KMS decrypter.
//!
//! KMS stores the key identifier inside the ciphertext blob, so no key ID
//! is configured here.

use std::cell::OnceCell;

use aws_sdk_kms::error::DisplayErrorContext;
use aws_sdk_kms::primitives::Blob;
use tokio::runtime::Runtime;
use tracing::{debug, trace};

use super::Decrypter;
use crate::core::aws;
use crate::core::deadline::Deadline;
use crate::error::{CipherError, Result};

struct Session {
    runtime: Runtime,
    client: aws_sdk_kms::Client,
}

/// Lazily-initialized KMS client.
pub struct Kms {
    deadline: Option<Deadline>,
    session: OnceCell<Session>,
}

impl Kms {
    pub fn new(deadline: Option<Deadline>) -> Self {
        Self {
            deadline,
            session: OnceCell::new(),
        }
    }

    fn session(&self) -> Result<&Session> {
        if let Some(session) = self.session.get() {
            return Ok(session);
        }

        debug!("initializing KMS client");
        let runtime = aws::runtime()
            .map_err(|e| CipherError::Decryption(format!("failed to create runtime: {}", e)))?;
        let config = runtime.block_on(aws::bounded(self.deadline, aws::load_config()))?;
        let client = aws_sdk_kms::Client::new(&config);

        Ok(self.session.get_or_init(|| Session { runtime, client }))
    }
}

impl Decrypter for Kms {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let session = self.session()?;
        trace!(ciphertext_len = ciphertext.len(), "decrypting with AWS KMS");

        let output = session
            .runtime
            .block_on(aws::bounded(
                self.deadline,
                session
                    .client
                    .decrypt()
                    .ciphertext_blob(Blob::new(ciphertext))
                    .send(),
            ))?
            .map_err(|e| CipherError::Decryption(DisplayErrorContext(&e).to_string()))?;

        let plaintext = output
            .plaintext()
            .ok_or_else(|| CipherError::Decryption("no plaintext returned".into()))?;

        Ok(plaintext.as_ref().to_vec())
    }
}
