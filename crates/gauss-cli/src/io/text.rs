// crates/gauss-cli/src/io/text.rs

use std::path::Path;

use anyhow::{Context, Result};

/// Load a plaintext file as raw bytes. Empty files are rejected.
pub fn load(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("read text {}", path.display()))?;
    if bytes.is_empty() {
        anyhow::bail!("text file is empty: {}", path.display());
    }
    Ok(bytes)
}
