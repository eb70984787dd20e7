//! Folder-by-folder library fetch.
//!
//! A run enumerates the library in a fixed order:
//!
//! ```text
//! 1. list_folders()                       one call
//! 2. for each folder: search pages        folder="<key>", cursor-chained
//! 3. unfiled bucket: search pages         folder=""
//! ```
//!
//! Every page is requested with [`MAX_PAGE_SIZE`] results (or the configured
//! page size), newest first. The loop follows `next_cursor` until a page
//! comes back without one. Items are appended in the order the provider
//! returns them; nothing is re-sorted or deduplicated.
//!
//! Only top-level folders are listed, and `folder="<key>"` matches that
//! folder exactly. Assets in nested subfolders (`2024-april/day1`) are not
//! fetched at all: they belong to no album, are not in the unfiled bucket,
//! and are not counted.
//!
//! All calls are sequential. The first error stops the whole fetch and is
//! returned as-is. There is no retry.

use crate::api::{ApiError, MediaApi, SearchRequest};
use crate::classify::classify;
use crate::types::NormalizedItem;

/// Largest page the search API will return.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Which slice of the library a search covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderScope {
    Folder(String),
    /// Assets stored at the root, outside any folder.
    Unfiled,
}

impl FolderScope {
    /// Search expression selecting exactly this scope.
    pub fn expression(&self) -> String {
        match self {
            FolderScope::Folder(key) => format!("folder=\"{}\"", escape_expression(key)),
            FolderScope::Unfiled => "folder=\"\"".to_string(),
        }
    }
}

fn escape_expression(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Fetch every asset in one scope, newest first.
pub fn fetch_folder(
    api: &impl MediaApi,
    scope: &FolderScope,
    page_size: u32,
) -> Result<Vec<NormalizedItem>, ApiError> {
    let mut request = SearchRequest {
        expression: scope.expression(),
        max_results: page_size,
        next_cursor: None,
    };
    let mut items = Vec::new();

    loop {
        let page = api.search_page(&request)?;
        items.extend(page.resources.iter().map(classify));
        match page.next_cursor {
            Some(cursor) => request.next_cursor = Some(cursor),
            None => break,
        }
    }

    Ok(items)
}

/// Items of one folder, in fetch order.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderItems {
    pub key: String,
    pub items: Vec<NormalizedItem>,
}

/// Everything one run pulled from the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedLibrary {
    /// In folder listing order. Empty folders are kept here; the assembler
    /// drops them.
    pub folders: Vec<FolderItems>,
    pub unfiled: Vec<NormalizedItem>,
}

impl FetchedLibrary {
    /// Flat list: every folder in listing order, then the unfiled bucket.
    pub fn all_items(&self) -> Vec<NormalizedItem> {
        self.folders
            .iter()
            .flat_map(|folder| folder.items.iter())
            .chain(self.unfiled.iter())
            .cloned()
            .collect()
    }
}

/// Progress notifications emitted while fetching.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    FoldersListed { count: usize },
    FolderFetched { key: String, item_count: usize },
    UnfiledFetched { item_count: usize },
}

/// Fetch the whole library: folder listing, each folder, then unfiled.
pub fn fetch_library(
    api: &impl MediaApi,
    page_size: u32,
    mut on_event: impl FnMut(FetchEvent),
) -> Result<FetchedLibrary, ApiError> {
    let keys = api.list_folders()?;
    on_event(FetchEvent::FoldersListed { count: keys.len() });

    let mut folders = Vec::with_capacity(keys.len());
    for key in keys {
        let items = fetch_folder(api, &FolderScope::Folder(key.clone()), page_size)?;
        on_event(FetchEvent::FolderFetched {
            key: key.clone(),
            item_count: items.len(),
        });
        folders.push(FolderItems { key, items });
    }

    let unfiled = fetch_folder(api, &FolderScope::Unfiled, page_size)?;
    on_event(FetchEvent::UnfiledFetched {
        item_count: unfiled.len(),
    });

    Ok(FetchedLibrary { folders, unfiled })
}
