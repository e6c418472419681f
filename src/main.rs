use anyhow::Result;
use clap::Parser;
use cvprep::{dirs, extract, fetch, metadata};
use reqwest::blocking::Client;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Download a speech-corpus archive and prepare it for training:
/// extract `validated.tsv` plus the clips, then load the metadata table.
#[derive(Parser, Debug)]
#[command(name = "cvprep", version, about)]
struct Args {
    /// URL of the corpus tar archive (plain or gzip-compressed)
    url: String,

    /// Directory the corpus is prepared into
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Delete the data directory before starting
    #[arg(long)]
    fresh: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    info!("startup");

    // ─── 2) prepare the data directory ───────────────────────────────
    if args.fresh {
        dirs::remove_dir_if_exists(&args.data_dir)?;
    }
    dirs::ensure_dir_exists(&args.data_dir)?;

    // ─── 3) download the corpus archive ──────────────────────────────
    let client = Client::new();
    let archive_name = fetch::filename_from_url(&args.url)?;
    let archive_path = args.data_dir.join(&archive_name);
    fetch::download_file(&client, &args.url, &archive_path)?;

    // ─── 4) extract validated.tsv + clips ────────────────────────────
    extract::extract_validated_and_clips(&archive_path, &args.data_dir)?;

    // ─── 5) load the metadata table ──────────────────────────────────
    let records = metadata::load_validated(args.data_dir.join(extract::VALIDATED_TSV))?;
    let male = records
        .iter()
        .filter(|r| r.gender == Some(metadata::Gender::Male))
        .count();
    let female = records
        .iter()
        .filter(|r| r.gender == Some(metadata::Gender::Female))
        .count();
    info!(
        total = records.len(),
        male,
        female,
        uncategorized = records.len() - male - female,
        "corpus ready"
    );

    Ok(())
}
