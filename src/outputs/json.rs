//! JSON export of a collected edition.
//!
//! The file is one JSON object: each key is a collection key (a headline by
//! default) and each value a [`Document`](crate::models::Document) object.
//! Indentation is two spaces.
//!
//! # Atomic Replace
//!
//! The JSON is written next to the target as `.<name>.<pid>.tmp` and then
//! renamed over it, so a failed write never leaves a truncated file in place
//! of an earlier good one. The process id keeps concurrent runs aimed at the
//! same path from sharing a temp file.

use crate::error::ExportError;
use crate::models::ArticleCollection;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

/// `cnn_lite_<YYYYMMDDHHMM>.json` for the given local time.
pub fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("cnn_lite_{}.json", now.format("%Y%m%d%H%M")))
}

/// Serialize `articles` with two-space indentation.
pub fn to_json_string(articles: &ArticleCollection) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(articles)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

/// Write `articles` to `path`, replacing any existing file.
///
/// Creates missing parent directories, writes a temp file beside `path`
/// and renames it into place.
///
/// # Arguments
///
/// * `articles` - The collection to serialize
/// * `path` - Destination file
///
/// # Returns
///
/// `Ok(())` once the file is in place.
///
/// # Errors
///
/// - [`ExportError::Serialize`] if the collection cannot be serialized
/// - [`ExportError::Io`] if a directory, the temp file or the rename fails;
///   any earlier file at `path` is left untouched
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = articles.len()))]
pub async fn write_articles(articles: &ArticleCollection, path: &Path) -> Result<(), ExportError> {
    let json = to_json_string(articles)?;
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
    }

    let tmp = temp_path_for(path);
    fs::write(&tmp, json).await.map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp, path).await {
        warn!(tmp = %tmp.display(), error = %e, "Rename failed; removing temp file");
        let _ = fs::remove_file(&tmp).await;
        return Err(io_err(e));
    }

    info!("Created file");
    Ok(())
}
