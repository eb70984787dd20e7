//! CLI output formatting.
//!
//! Each piece of output has a `format_*` function that returns lines, and
//! where needed a `print_*` wrapper that writes them. Format functions are
//! pure, so the exact wording is unit tested.
//!
//! # Output Format
//!
//! ## Fetch
//!
//! ```text
//! Folders: 3
//!     2024-sol_april (42 items)
//!     2023-lisbon (17 items)
//!     empty-folder (0 items)
//!     (unfiled) (5 items)
//!
//! Albums
//! 001 2024 Sol April (42 items)
//!     Folder: 2024-sol_april
//!     Cover: #3
//! 002 2023 Lisbon (17 items)
//!     Folder: 2023-lisbon
//!
//! Wrote 64 items in 2 albums → src/data/gallery.json
//! ```
//!
//! ## Errors
//!
//! Credential problems get remediation steps; everything else is printed
//! as-is. Both go to stderr.

use crate::config::{ENV_API_KEY, ENV_API_SECRET, ENV_CLOUD_NAME, ENV_URL};
use crate::document::RunError;
use crate::fetch::FetchEvent;
use crate::types::OutputDocument;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn item_count(n: usize) -> String {
    match n {
        1 => "1 item".to_string(),
        n => format!("{n} items"),
    }
}

/// Format a single fetch progress event.
pub fn format_fetch_event(event: &FetchEvent) -> Vec<String> {
    match event {
        FetchEvent::FoldersListed { count } => vec![format!("Folders: {count}")],
        FetchEvent::FolderFetched { key, item_count: n } => {
            vec![format!("    {} ({})", key, item_count(*n))]
        }
        FetchEvent::UnfiledFetched { item_count: n } => {
            vec![format!("    (unfiled) ({})", item_count(*n))]
        }
    }
}

/// Print a fetch progress event to stdout.
pub fn print_fetch_event(event: &FetchEvent) {
    for line in format_fetch_event(event) {
        println!("{}", line);
    }
}

/// Format the album listing and write summary after a successful run.
pub fn format_fetch_summary(document: &OutputDocument, path: &Path) -> Vec<String> {
    let mut lines = vec![String::new(), "Albums".to_string()];

    for (i, album) in document.albums.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            album.title,
            item_count(album.items.len())
        ));
        lines.push(format!("    Folder: {}", album.folder));
        let cover_pos = album.items.iter().position(|item| *item == album.cover);
        if let Some(pos) = cover_pos.filter(|&pos| pos != 0) {
            lines.push(format!("    Cover: #{}", pos + 1));
        }
    }
    if document.albums.is_empty() {
        lines.push("    (none)".to_string());
    }

    let album_word = if document.albums.len() == 1 {
        "album"
    } else {
        "albums"
    };
    lines.push(String::new());
    lines.push(format!(
        "Wrote {} in {} {} → {}",
        item_count(document.total_images),
        document.albums.len(),
        album_word,
        path.display()
    ));
    lines
}

/// Print the run summary to stdout.
pub fn print_fetch_summary(document: &OutputDocument, path: &Path) {
    for line in format_fetch_summary(document, path) {
        println!("{}", line);
    }
}

/// Format the folder listing of the `folders` command.
pub fn format_folder_list(folders: &[String]) -> Vec<String> {
    let mut lines = vec![format!("Folders: {}", folders.len())];
    lines.extend(
        folders
            .iter()
            .enumerate()
            .map(|(i, key)| format!("{} {}", format_index(i + 1), key)),
    );
    lines
}

/// Print the folder listing to stdout.
pub fn print_folder_list(folders: &[String]) {
    for line in format_folder_list(folders) {
        println!("{}", line);
    }
}

/// Format an aborted run for the user.
///
/// Credential problems explain which variables to set. Any other error is
/// shown verbatim.
pub fn format_error_report(error: &RunError) -> Vec<String> {
    let mut lines = vec![format!("Error: {}", error)];
    if error.is_credential_problem() {
        lines.extend([
            String::new(),
            "Cloudinary credentials are missing or invalid. Set either:".to_string(),
            format!("    {ENV_CLOUD_NAME}=<cloud name>"),
            format!("    {ENV_API_KEY}=<api key>"),
            format!("    {ENV_API_SECRET}=<api secret>"),
            "or:".to_string(),
            format!("    {ENV_URL}=cloudinary://<api key>:<api secret>@<cloud name>"),
            String::new(),
            "The values are on the Cloudinary console dashboard under API Keys.".to_string(),
        ]);
    }
    lines.push("No output was written.".to_string());
    lines
}

/// Print an aborted run to stderr.
pub fn print_error_report(error: &RunError) {
    for line in format_error_report(error) {
        eprintln!("{}", line);
    }
}
