// src/fetch/mod.rs
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;
use url::Url;

/// Name used when the URL has no usable final path segment.
const FALLBACK_FILE_NAME: &str = "corpus.tar.gz";

const BLOCK_SIZE: usize = 8 * 1024;

/// Derive the on-disk file name for a download URL: the last path
/// segment, with any query string excluded.
pub fn filename_from_url(url_str: &str) -> Result<String> {
    let url = Url::parse(url_str).with_context(|| format!("parsing URL {}", url_str))?;
    let name = url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME);
    Ok(name.to_string())
}

/// Download `url` and save it to `save_path`, streaming the body to disk
/// while driving a byte-level progress bar sized from the
/// `content-length` header (0 when the server does not send one).
pub fn download_file(client: &Client, url: &str, save_path: impl AsRef<Path>) -> Result<()> {
    let save_path = save_path.as_ref();
    let file_name = filename_from_url(url)?;
    info!(name = %file_name, "starting download");

    let mut resp = client
        .get(url)
        .send()
        .with_context(|| format!("GET {}", url))?
        .error_for_status()?;
    let total_size = resp.content_length().unwrap_or(0);

    let bar = ProgressBar::new(total_size);
    bar.set_style(
        ProgressStyle::with_template(
            "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec})",
        )?
        .progress_chars("=>-"),
    );
    bar.set_message(file_name.clone());

    let mut file = File::create(save_path)
        .with_context(|| format!("creating {}", save_path.display()))?;
    let mut buf = [0u8; BLOCK_SIZE];
    loop {
        let n = resp
            .read(&mut buf)
            .with_context(|| format!("reading body from {}", url))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])
            .with_context(|| format!("writing to {}", save_path.display()))?;
        bar.inc(n as u64);
    }
    bar.finish();

    info!(name = %file_name, "completed download");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_last_path_segment() -> Result<()> {
        let name = filename_from_url("https://example.com/corpora/cv-corpus-17.0-en.tar.gz")?;
        assert_eq!(name, "cv-corpus-17.0-en.tar.gz");
        Ok(())
    }

    #[test]
    fn filename_excludes_query_string() -> Result<()> {
        let name = filename_from_url("https://example.com/dl/cv.tar.gz?token=abc&expires=123")?;
        assert_eq!(name, "cv.tar.gz");
        Ok(())
    }

    #[test]
    fn filename_falls_back_without_path() -> Result<()> {
        let name = filename_from_url("https://example.com/")?;
        assert_eq!(name, FALLBACK_FILE_NAME);
        Ok(())
    }

    #[test]
    fn filename_rejects_invalid_url() {
        assert!(filename_from_url("not a url").is_err());
    }
}
