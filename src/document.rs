//! Document assembly and writing.
//!
//! [`build_document`] runs the whole fetch: library → albums → document. It
//! either returns a complete [`OutputDocument`] or an error; there is no
//! partial result.
//!
//! [`write_document`] replaces the artifact atomically. The JSON is written
//! to a sibling `.tmp` file first and renamed over the target, so a failed
//! write leaves the previous document untouched.

use crate::api::{ApiError, MediaApi};
use crate::assemble::assemble;
use crate::config::{ConfigError, FetchConfig};
use crate::fetch::{FetchEvent, fetch_library};
use crate::types::{Album, NormalizedItem, OutputDocument};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can abort a run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl RunError {
    /// Whether the fix is to check the Cloudinary credentials.
    pub fn is_credential_problem(&self) -> bool {
        match self {
            RunError::Config(e) => e.is_credential_problem(),
            RunError::Api(e) => e.is_credential_problem(),
            RunError::Document(_) => false,
        }
    }
}

/// Put the final document together.
///
/// `total_images` always equals the number of carousel items.
pub fn finalize(
    cloud_name: &str,
    generated_at: DateTime<Utc>,
    carousel_images: Vec<NormalizedItem>,
    albums: Vec<Album>,
) -> OutputDocument {
    OutputDocument {
        cloud_name: cloud_name.to_string(),
        last_updated: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        total_images: carousel_images.len(),
        carousel_images,
        albums,
    }
}

/// Fetch the library and build the document.
pub fn build_document(
    api: &impl MediaApi,
    config: &FetchConfig,
    cloud_name: &str,
    generated_at: DateTime<Utc>,
    on_event: impl FnMut(FetchEvent),
) -> Result<OutputDocument, RunError> {
    let library = fetch_library(api, config.page_size, on_event)?;
    let carousel = library.all_items();
    let albums = assemble(library.folders, &config.covers);
    Ok(finalize(cloud_name, generated_at, carousel, albums))
}

/// Write the document as pretty JSON, replacing any previous file.
///
/// Parent directories are created as needed.
pub fn write_document(document: &OutputDocument, path: &Path) -> Result<(), DocumentError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');

    replace_file(path, |tmp| fs::write(tmp, json))?;
    Ok(())
}

/// Fill a sibling temp file with `write_temp`, then rename it over `path`.
///
/// The temp file is removed if either step fails.
fn replace_file(path: &Path, write_temp: impl FnOnce(&Path) -> io::Result<()>) -> io::Result<()> {
    let tmp = temp_path(path);
    let result = write_temp(&tmp).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
