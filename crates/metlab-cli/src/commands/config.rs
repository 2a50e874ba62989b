use std::io::Write;

use anyhow::Result;

use metlab_core::config::MetlabConfig;

const MASK: &str = "********";

/// Prints the effective configuration as TOML with credentials masked.
pub fn show(config: &MetlabConfig, out: &mut dyn Write) -> Result<()> {
    let mut shown = config.clone();
    if shown.backend.api_key.is_some() {
        shown.backend.api_key = Some(MASK.to_string());
    }
    if shown.backend.access_token.is_some() {
        shown.backend.access_token = Some(MASK.to_string());
    }
    out.write_all(shown.to_toml()?.as_bytes())?;
    Ok(())
}
