//! ssm-env - Populate environment variables from AWS SSM Parameter Store.
//!
//! Variables whose value references a parameter (`ssm:///app/db/password`)
//! or carries a KMS ciphertext (`!kms AQICAHh...`) are replaced with the
//! secret before the target program is exec'd.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── exec          # Replace the process with the target program
//! │   ├── print         # --print output
//! │   └── output        # Terminal styling
//! └── core/             # Expansion engine
//!     ├── matcher       # Plain / SSM / KMS classification
//!     ├── template      # Matcher template language
//!     ├── batch         # Key de-duplication and batching
//!     ├── store/        # ParameterStore trait + AWS SSM
//!     ├── resolve       # Batch resolution and failure policy
//!     ├── deadline      # Overall pass deadline
//!     ├── cipher/       # Decrypter trait, base64, AWS KMS
//!     ├── env           # Environment providers
//!     └── expand        # The expansion pass
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ssm_env::core::config::Settings;
//! use ssm_env::core::env::ProcessEnv;
//! use ssm_env::core::expand::Expander;
//! use ssm_env::core::matcher::PrefixMatcher;
//! use ssm_env::core::{cipher, store};
//!
//! let settings = Settings::default();
//! let expander = Expander::new(
//!     Box::new(PrefixMatcher),
//!     store::default_store(None),
//!     cipher::default_decrypter(None),
//!     settings,
//! );
//! expander.expand(&mut ProcessEnv)?;
//! # Ok::<(), ssm_env::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
