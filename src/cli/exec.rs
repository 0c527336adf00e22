//! Launching the target program.

use std::process::Command;

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Replace the current process with `command`, inheriting the (expanded)
/// environment.
///
/// Only returns on failure. On non-Unix platforms the command is spawned
/// and this process exits with its status.
pub fn launch(command: &[String]) -> Result<()> {
    let (program, args) = command.split_first().ok_or(ConfigError::NoCommand)?;

    let path = which::which(program).map_err(|source| ConfigError::CommandNotFound {
        command: program.clone(),
        source,
    })?;
    debug!(path = %path.display(), "launching");

    let mut cmd = Command::new(&path);
    cmd.args(args);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.arg0(program);
        Err(cmd.exec().into())
    }

    #[cfg(not(unix))]
    {
        let status = cmd.status()?;
        std::process::exit(status.code().unwrap_or(1));
    }
}
