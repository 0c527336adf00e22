//! Terminal output helpers.
//!
//! Everything except `--print` values goes to stderr; stdout belongs to
//! the launched program. Colors respect NO_COLOR.

use console::style;

use crate::core::constants::PROGRAM_NAME;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print a fatal error prefixed with the program name (red).
///
/// Example: `ssm-env: invalid parameters: [/bad]`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{}: {}", style(PROGRAM_NAME).red().bold(), msg);
    } else {
        eprintln!("{}: {}", PROGRAM_NAME, msg);
    }
}

/// Print a warning (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("⚠").yellow(), msg);
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// Print a hint (cyan).
///
/// Example: `→ parameter names must start with '/': ssm:///<path>`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Format a variable name in cyan.
pub fn key(k: &str) -> String {
    if colors_enabled() {
        style(k).cyan().to_string()
    } else {
        k.to_string()
    }
}
