//! Output for `--print`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::output;
use crate::core::expand::Expansion;
use crate::error::Result;

#[derive(Serialize)]
struct Report<'a> {
    resolved: BTreeMap<&'a str, &'a str>,
    skipped: &'a [String],
}

/// Print resolved values to stdout, as `NAME=value` lines or JSON.
pub fn render(expansion: &Expansion, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(expansion)?);
        return Ok(());
    }

    for (name, value) in &expansion.resolved {
        println!("{}={}", name, value.as_str());
    }
    for name in &expansion.skipped {
        output::warn(&format!("{} kept its literal value", output::key(name)));
    }
    Ok(())
}

fn to_json(expansion: &Expansion) -> Result<String> {
    let report = Report {
        resolved: expansion
            .resolved
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect(),
        skipped: &expansion.skipped,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
