use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use designspace_extractor::extract_to_file;

/// Extract the designspace of a variable font and report where it went.
pub fn extract(font: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let written = extract_to_file(font, output)
        .with_context(|| format!("Failed to extract designspace from {}", font.display()))?;
    println!("Designspace saved to: {}", written.display());
    Ok(written)
}
