// src/extract/mod.rs
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{info, instrument, warn};

/// Fixed name the metadata table is extracted to, whatever its path
/// inside the archive was.
pub const VALIDATED_TSV: &str = "validated.tsv";

/// Directory all clip members are flattened into.
pub const CLIPS_DIR: &str = "clips";

/// Compute where a member belongs under the destination directory, or
/// `None` if it should not be extracted at all.
///
/// Only fixed literals and the member's base file name ever make it into
/// the returned path, so hostile member names (`../`, absolute paths)
/// cannot escape the destination.
fn dest_name_for_member(member_path: &Path) -> Option<PathBuf> {
    let name = member_path.to_string_lossy();
    if name.ends_with(VALIDATED_TSV) {
        return Some(PathBuf::from(VALIDATED_TSV));
    }
    if name.contains("clips/") {
        // Flatten nested clip directories down to the base file name.
        // Members sharing a basename overwrite each other in archive
        // order.
        match member_path.file_name() {
            Some(base) => return Some(Path::new(CLIPS_DIR).join(base)),
            None => {
                warn!(member = %name, "clip member has no usable file name; skipping");
                return None;
            }
        }
    }
    None
}

/// Extract `validated.tsv` and all `clips/` members from a tar archive
/// (gzip-compressed or plain) into `dest_dir`, then delete the archive.
///
/// `dest_dir` must already exist. The archive is only deleted once every
/// member has been processed without error; a failed extraction leaves
/// the archive in place so the caller can retry, with already-extracted
/// members left on disk.
#[instrument(level = "info", skip(archive_path, dest_dir), fields(archive = %archive_path.as_ref().display()))]
pub fn extract_validated_and_clips(
    archive_path: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
) -> Result<()> {
    let archive_path = archive_path.as_ref();
    let dest_dir = dest_dir.as_ref();
    info!("starting extraction");

    let file = File::open(archive_path)
        .with_context(|| format!("opening archive {}", archive_path.display()))?;
    let reader: Box<dyn Read> = if is_gzip(archive_path) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut archive = Archive::new(reader);

    let mut extracted = 0usize;
    for entry in archive
        .entries()
        .with_context(|| format!("reading archive {}", archive_path.display()))?
    {
        let mut entry = entry.context("reading archive member")?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let member_path = entry.path().context("decoding member name")?.into_owned();
        let Some(rel) = dest_name_for_member(&member_path) else {
            continue;
        };
        let dest = dest_dir.join(&rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        entry.unpack(&dest).with_context(|| {
            format!(
                "extracting {} to {}",
                member_path.display(),
                dest.display()
            )
        })?;
        extracted += 1;
    }

    info!(members = extracted, "completed extraction");
    fs::remove_file(archive_path)
        .with_context(|| format!("deleting archive {}", archive_path.display()))?;
    Ok(())
}

fn is_gzip(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("gz") | Some("tgz")
    )
}
