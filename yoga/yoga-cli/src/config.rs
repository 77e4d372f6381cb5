//! The `init-config` command.

use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;
use yoga_assess::AssessorConfig;

/// Writes the default configuration to `path`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (pass --force to overwrite)", path.display());
    }

    AssessorConfig::default().save(path)?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}
