//! Album assembly: folders → sorted albums with covers.
//!
//! ## Covers
//!
//! Each album's cover defaults to its first item, which is the newest one
//! since items arrive newest first. A `[covers]` entry in `config.toml`
//! picks a different index:
//!
//! ```toml
//! [covers]
//! "2024-sol_april" = 2
//! ```
//!
//! An index past the end of the album falls back to 0. An explicit `0`
//! and a missing entry mean the same thing.
//!
//! ## Ordering
//!
//! Albums are sorted by title, descending, with plain string comparison.
//! Folder keys lead with a zero-padded date (`2024-04-...`), so this comes
//! out newest first. Nothing here parses dates.

use crate::fetch::FolderItems;
use crate::naming::folder_title;
use crate::types::{Album, CoverOverrides, NormalizedItem};

/// Index of the cover item for a folder of `item_count` items.
///
/// Returns `None` only for an empty folder.
pub fn cover_index(
    folder_key: &str,
    item_count: usize,
    overrides: &CoverOverrides,
) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    match overrides.get(folder_key) {
        Some(&index) if index < item_count => Some(index),
        _ => Some(0),
    }
}

/// Build one album, or `None` for an empty folder.
pub fn build_album(
    folder_key: &str,
    items: Vec<NormalizedItem>,
    overrides: &CoverOverrides,
) -> Option<Album> {
    let index = cover_index(folder_key, items.len(), overrides)?;
    let cover = items.get(index).or_else(|| items.first())?.clone();
    Some(Album {
        title: folder_title(folder_key),
        folder: folder_key.to_string(),
        cover,
        items,
    })
}

/// Build and sort albums for every non-empty folder.
pub fn assemble(folders: Vec<FolderItems>, overrides: &CoverOverrides) -> Vec<Album> {
    let mut albums: Vec<Album> = folders
        .into_iter()
        .filter_map(|folder| build_album(&folder.key, folder.items, overrides))
        .collect();
    sort_albums(&mut albums);
    albums
}

/// Sort by title, descending. Stable, so equal titles keep listing order.
pub fn sort_albums(albums: &mut [Album]) {
    albums.sort_by(|a, b| b.title.cmp(&a.title));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{folder_items, item};

    fn overrides(entries: &[(&str, usize)]) -> CoverOverrides {
        entries
            .iter()
            .map(|(key, index)| (key.to_string(), *index))
            .collect()
    }

    // =========================================================================
    // Cover selection
    // =========================================================================

    #[test]
    fn cover_defaults_to_first_item() {
        let album = build_album("F", folder_items(3), &CoverOverrides::new()).unwrap();
        assert_eq!(album.cover, album.items[0]);
    }

    #[test]
    fn cover_override_in_bounds() {
        let album = build_album("F", folder_items(3), &overrides(&[("F", 2)])).unwrap();
        assert_eq!(album.cover, album.items[2]);
    }

    #[test]
    fn cover_override_out_of_bounds_falls_back() {
        let album = build_album("F", folder_items(3), &overrides(&[("F", 5)])).unwrap();
        assert_eq!(album.cover, album.items[0]);
    }

    #[test]
    fn cover_override_zero_is_honored() {
        assert_eq!(cover_index("F", 3, &overrides(&[("F", 0)])), Some(0));
    }

    #[test]
    fn cover_override_for_other_folder_ignored() {
        assert_eq!(cover_index("F", 3, &overrides(&[("G", 2)])), Some(0));
    }

    #[test]
    fn cover_index_empty_folder() {
        assert_eq!(cover_index("F", 0, &overrides(&[("F", 0)])), None);
    }

    // =========================================================================
    // Materialization
    // =========================================================================

    #[test]
    fn empty_folder_produces_no_album() {
        assert!(build_album("F", Vec::new(), &CoverOverrides::new()).is_none());
    }

    #[test]
    fn album_keeps_all_items_in_order() {
        let items = folder_items(4);
        let album = build_album("2024-sol_april", items.clone(), &CoverOverrides::new()).unwrap();
        assert_eq!(album.items, items);
        assert_eq!(album.title, "2024 Sol April");
        assert_eq!(album.folder, "2024-sol_april");
    }

    #[test]
    fn assemble_skips_empty_folders() {
        let folders = vec![
            FolderItems {
                key: "A".into(),
                items: folder_items(3),
            },
            FolderItems {
                key: "B".into(),
                items: Vec::new(),
            },
        ];
        let albums = assemble(folders, &CoverOverrides::new());
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].folder, "A");
        assert_eq!(albums[0].items.len(), 3);
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    #[test]
    fn albums_sort_by_title_descending() {
        let folders = ["2023-april", "2024-april", "2022-april"]
            .into_iter()
            .map(|key| FolderItems {
                key: key.into(),
                items: vec![item(key)],
            })
            .collect();
        let albums = assemble(folders, &CoverOverrides::new());
        let titles: Vec<&str> = albums.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["2024 April", "2023 April", "2022 April"]);
    }

    #[test]
    fn sort_is_lexicographic_not_numeric() {
        let folders = ["9-x", "10-x"]
            .into_iter()
            .map(|key| FolderItems {
                key: key.into(),
                items: vec![item(key)],
            })
            .collect();
        let albums = assemble(folders, &CoverOverrides::new());
        let titles: Vec<&str> = albums.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["9 X", "10 X"]);
    }

    #[test]
    fn equal_titles_keep_listing_order() {
        // "2024-april" and "2024_april" share a title.
        let folders = ["2024-april", "2024_april"]
            .into_iter()
            .map(|key| FolderItems {
                key: key.into(),
                items: vec![item(key)],
            })
            .collect();
        let albums = assemble(folders, &CoverOverrides::new());
        let keys: Vec<&str> = albums.iter().map(|a| a.folder.as_str()).collect();
        assert_eq!(keys, ["2024-april", "2024_april"]);
    }
}
