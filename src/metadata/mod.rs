// src/metadata/mod.rs
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Collapsed speaker gender category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// One usable row of `validated.tsv`: the clip's relative audio path and
/// its collapsed gender category. `gender` is `None` when the raw label
/// matches neither collapse rule (e.g. `other`); such rows are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRecord {
    pub path: String,
    pub gender: Option<Gender>,
}

/// The two columns we project out of the table. Real corpora carry a
/// dozen more columns per row; serde leaves them unread.
#[derive(Debug, Deserialize)]
struct RawRow {
    path: String,
    gender: Option<String>,
}

fn collapse_gender(raw: &str) -> Option<Gender> {
    match raw {
        "male" | "male_masculine" => Some(Gender::Male),
        "female" | "female_feminine" => Some(Gender::Female),
        _ => None,
    }
}

/// Load the validated-clips table from `file_path`, keeping only the
/// `path` and `gender` columns. Rows without a gender label are dropped;
/// the remaining raw labels collapse to [`Gender::Male`] /
/// [`Gender::Female`], with unrecognized labels kept as `None`.
pub fn load_validated(file_path: impl AsRef<Path>) -> Result<Vec<ClipRecord>> {
    let file_path = file_path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(file_path)
        .with_context(|| format!("opening {}", file_path.display()))?;

    // An Option field deserializes to None when its column is absent, so
    // the schema check has to happen on the header itself.
    let headers = reader.headers().context("reading TSV header")?.clone();
    for required in ["path", "gender"] {
        if !headers.iter().any(|h| h == required) {
            bail!(
                "{} is missing required column {:?}",
                file_path.display(),
                required
            );
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        let row = row.with_context(|| format!("parsing row in {}", file_path.display()))?;
        // Empty gender fields deserialize to None; drop those rows
        // before deriving a category.
        let Some(raw_gender) = row.gender else {
            continue;
        };
        records.push(ClipRecord {
            path: row.path,
            gender: collapse_gender(&raw_gender),
        });
    }

    info!(rows = records.len(), file = %file_path.display(), "loaded validated metadata");
    Ok(records)
}
