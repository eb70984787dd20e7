//! Shared test utilities: raw asset builders and normalized item fixtures.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let api = MockApi::new().with_folder("trip", vec![image_assets("trip", 3)]);
//! let items = folder_items(3);
//! ```

use crate::classify::classify;
use crate::types::{NormalizedItem, RawAsset};

// =========================================================================
// Raw asset builders
// =========================================================================

/// A raw asset with the given resource type, format and delivery URL.
pub fn raw_asset(resource_type: &str, format: &str, secure_url: &str) -> RawAsset {
    RawAsset {
        secure_url: secure_url.to_string(),
        resource_type: resource_type.to_string(),
        format: format.to_string(),
        ..RawAsset::default()
    }
}

/// A JPEG image in `folder` (empty = unfiled) named `<name>.jpg`.
pub fn image_asset(folder: &str, name: &str) -> RawAsset {
    let public_id = if folder.is_empty() {
        name.to_string()
    } else {
        format!("{folder}/{name}")
    };
    RawAsset {
        secure_url: format!("https://res.cloudinary.com/demo/image/upload/v1/{public_id}.jpg"),
        public_id,
        resource_type: "image".into(),
        format: "jpg".into(),
        folder: folder.to_string(),
        ..RawAsset::default()
    }
}

/// `count` distinct JPEG images in `folder`, named `img-0` … `img-{count-1}`.
pub fn image_assets(folder: &str, count: usize) -> Vec<RawAsset> {
    (0..count)
        .map(|i| image_asset(folder, &format!("img-{i}")))
        .collect()
}

// =========================================================================
// Normalized items
// =========================================================================

/// A normalized image item derived from `name`.
pub fn item(name: &str) -> NormalizedItem {
    classify(&image_asset("", name))
}

/// `count` distinct normalized items.
pub fn folder_items(count: usize) -> Vec<NormalizedItem> {
    (0..count).map(|i| item(&format!("item-{i}"))).collect()
}
