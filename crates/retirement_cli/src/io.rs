//! JSON/TOML file loading, dispatched on the file extension.

use color_eyre::eyre::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => {
            toml::from_str(&text).with_context(|| format!("parsing TOML from {}", path.display()))
        }
        Some("json") | None => serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON from {}", path.display())),
        Some(other) => bail!(
            "unrecognized file extension '{other}' for {}; expected .json or .toml",
            path.display()
        ),
    }
}
