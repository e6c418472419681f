// src/dirs/mod.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Create `path` (and any missing parents) if it does not exist yet.
pub fn ensure_dir_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        info!(dir = %path.display(), "directory already exists");
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))?;
        info!(dir = %path.display(), "created directory");
    }
    Ok(())
}

/// Remove `path` and everything under it if it exists.
pub fn remove_dir_if_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("removing directory {}", path.display()))?;
        info!(dir = %path.display(), "removed directory");
    } else {
        info!(dir = %path.display(), "directory does not exist");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn ensure_is_idempotent() -> Result<()> {
        let base = tempdir()?;
        let dir = base.path().join("data/clips");
        ensure_dir_exists(&dir)?;
        ensure_dir_exists(&dir)?;
        assert!(dir.is_dir());
        Ok(())
    }

    #[test]
    fn remove_deletes_tree_and_tolerates_missing() -> Result<()> {
        let base = tempdir()?;
        let dir = base.path().join("data");
        ensure_dir_exists(&dir.join("clips"))?;
        std::fs::write(dir.join("clips/1.mp3"), b"audio")?;

        remove_dir_if_exists(&dir)?;
        assert!(!dir.exists());

        // A second removal is a no-op, not an error.
        remove_dir_if_exists(&dir)?;
        Ok(())
    }
}
