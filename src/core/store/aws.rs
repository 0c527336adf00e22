//! AWS Systems Manager Parameter Store backend.
//!
//! Uses AWS credentials from the environment (AWS_ACCESS_KEY_ID, etc.)
//! or from the default credential provider chain.

use std::cell::OnceCell;

use aws_sdk_ssm::error::DisplayErrorContext;
use tokio::runtime::Runtime;
use tracing::{debug, trace};

use super::{Parameter, ParameterStore, Parameters};
use crate::core::aws;
use crate::core::deadline::Deadline;
use crate::core::types::LookupKey;
use crate::error::{Result, StoreError};

struct Session {
    runtime: Runtime,
    client: aws_sdk_ssm::Client,
}

/// Lazily-initialized SSM client.
///
/// Nothing touches the network or credential chain until the first
/// `get_parameters` call.
pub struct Ssm {
    deadline: Option<Deadline>,
    session: OnceCell<Session>,
}

impl Ssm {
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

        debug!("initializing SSM client");
        let runtime = aws::runtime()
            .map_err(|e| StoreError::Call(format!("failed to create runtime: {}", e)))?;
        let config = runtime.block_on(aws::bounded(self.deadline, aws::load_config()))?;
        let client = aws_sdk_ssm::Client::new(&config);

        Ok(self.session.get_or_init(|| Session { runtime, client }))
    }
}

impl ParameterStore for Ssm {
    fn get_parameters(&self, names: &[LookupKey], with_decryption: bool) -> Result<Parameters> {
        let session = self.session()?;
        trace!(count = names.len(), with_decryption, "GetParameters");

        let output = session
            .runtime
            .block_on(aws::bounded(
                self.deadline,
                session
                    .client
                    .get_parameters()
                    .set_names(Some(names.to_vec()))
                    .with_decryption(with_decryption)
                    .send(),
            ))?
            .map_err(|e| StoreError::Call(DisplayErrorContext(&e).to_string()))?;

        let resolved = output
            .parameters()
            .iter()
            .filter_map(|p| {
                Some(Parameter {
                    name: p.name()?.to_string(),
                    value: p.value()?.to_string(),
                    selector: p.selector().map(str::to_string),
                })
            })
            .collect();

        Ok(Parameters {
            resolved,
            invalid: output.invalid_parameters().to_vec(),
        })
    }
}
