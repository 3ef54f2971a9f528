// Per-URL output folders and the two artifacts written into them

use crate::error::{CoreError, Result};
use pagesnap_scanner::CrawlResult;
use pagesnap_scanner::result::TextDocument;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_OUTPUT_DIR: &str = "output/rust";
pub const LINKS_FILE: &str = "links.csv";
pub const TEXT_FILE: &str = "text.json";
pub const MAX_FOLDER_NAME_LEN: usize = 64;

/// Replaces anything that is not an ASCII letter, digit, `-` or `_` with `_`
/// and cuts the result to [`MAX_FOLDER_NAME_LEN`] characters.
pub fn sanitize_folder_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FOLDER_NAME_LEN)
        .collect()
}

/// Output folder name for `url`: its sanitized hostname.
///
/// Falls back to the sanitized URL minus its scheme when there is no hostname.
pub fn folder_name(url: &str) -> String {
    let parsed = Url::parse(url).ok();
    match parsed.as_ref().and_then(Url::host_str) {
        Some(host) => sanitize_folder_name(host),
        None => {
            let stripped = url
                .trim_start_matches("https://")
                .trim_start_matches("http://");
            sanitize_folder_name(stripped)
        }
    }
}

pub fn create_output_dir(root: &Path, url: &str) -> Result<PathBuf> {
    let dir = root.join(folder_name(url));
    fs::create_dir_all(&dir).map_err(|source| CoreError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// One link per row, single column, no header.
pub fn write_links_csv(links: &[String], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for link in links {
        writer.write_record([link])?;
    }
    writer.flush().map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} links to {}", links.len(), path.display());
    Ok(())
}

/// `{"text": ...}`, pretty-printed.
pub fn write_text_json(text: &str, path: &Path) -> Result<()> {
    let document = TextDocument {
        text: text.to_string(),
    };
    let json = serde_json::to_string_pretty(&document)?;

    let mut file = File::create(path).map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(json.as_bytes())
        .map_err(|source| CoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Wrote {} chars of text to {}", text.len(), path.display());
    Ok(())
}

/// Writes both artifacts into `dir`.
///
/// A failure on `links.csv` does not prevent `text.json` from being attempted;
/// every failure is returned.
pub fn save_result(result: &CrawlResult, dir: &Path) -> Vec<CoreError> {
    let mut errors = Vec::new();

    if let Err(e) = write_links_csv(&result.links, &dir.join(LINKS_FILE)) {
        errors.push(e);
    }
    if let Err(e) = write_text_json(&result.text, &dir.join(TEXT_FILE)) {
        errors.push(e);
    }

    errors
}
