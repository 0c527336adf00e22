//! Shared AWS SDK plumbing.
//!
//! The SDK is async; ssm-env is not. Each client owns a current-thread
//! tokio runtime and blocks on it, and both are built on first use.

use std::future::Future;

use aws_config::BehaviorVersion;
use tokio::runtime::Runtime;

use crate::core::deadline::Deadline;
use crate::error::Result;

/// Build a single-threaded runtime for driving SDK calls.
pub(crate) fn runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Load SDK configuration from the default provider chain.
///
/// The default region chain falls back to the EC2 instance metadata
/// endpoint, so tasks on EC2 work without `AWS_REGION`.
pub(crate) async fn load_config() -> aws_config::SdkConfig {
    aws_config::defaults(BehaviorVersion::latest()).load().await
}

/// Run `fut` until it completes or `deadline` passes, whichever is first.
///
/// An abandoned future is dropped, which cancels the in-flight request.
pub(crate) async fn bounded<F: Future>(deadline: Option<Deadline>, fut: F) -> Result<F::Output> {
    let Some(deadline) = deadline else {
        return Ok(fut.await);
    };
    tokio::time::timeout(deadline.remaining()?, fut)
        .await
        .map_err(|_| deadline.expired())
}
