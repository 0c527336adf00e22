//! Core library components.
//!
//! This module contains the expansion engine: reference detection,
//! batching, parameter store resolution, KMS decryption and write-back.

#[cfg(feature = "aws")]
mod aws;

pub mod batch;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod deadline;
pub mod env;
pub mod expand;
pub mod matcher;
pub mod resolve;
pub mod store;
pub mod template;
pub mod types;
