//! Shared types used across the fetch pipeline.
//!
//! [`RawAsset`] is what the provider hands us. Everything else is ours and
//! ends up in the JSON document the site reads, so the serialized field
//! names here are a contract: renaming one breaks the website.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One asset record as returned by the search API.
///
/// Every field is optional on the wire, and a field of the wrong type reads
/// as missing. The classifier degrades on missing data instead of rejecting
/// the record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawAsset {
    #[serde(deserialize_with = "lenient_string")]
    pub public_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub secure_url: String,
    /// `image`, `video`, or `raw`.
    #[serde(deserialize_with = "lenient_string")]
    pub resource_type: String,
    /// File format without the dot, e.g. `heic`, `jpg`, `mp4`.
    #[serde(deserialize_with = "lenient_string")]
    pub format: String,
    /// Folder path; empty for unfiled assets.
    #[serde(deserialize_with = "lenient_string")]
    pub folder: String,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(
        deserialize_with = "lenient_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<u32>,
    #[serde(
        deserialize_with = "lenient_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<u32>,
    /// Free-form contextual metadata (`custom` key/value pairs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl RawAsset {
    /// Read one search result record. Never fails: anything that is not a
    /// JSON object becomes an empty asset.
    pub fn from_record(record: Value) -> Self {
        serde_json::from_value(record).unwrap_or_default()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_u64()
        .and_then(|n| u32::try_from(n).ok()))
}

/// A classified asset, ready for the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// What the site displays: a transformed image, a poster frame, or the
    /// playable live photo itself.
    pub url: String,
    #[serde(rename = "originalUrl")]
    pub original_url: String,
    #[serde(rename = "isVideo")]
    pub is_video: bool,
    /// Only set for HEIC video resources. Implies `is_video`.
    #[serde(
        rename = "isHEICLivePhoto",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_live_photo: bool,
}

/// All items of one folder, with a chosen cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,
    /// The raw folder key the album was built from.
    pub folder: String,
    #[serde(rename = "coverImage")]
    pub cover: NormalizedItem,
    /// Newest first.
    #[serde(rename = "images")]
    pub items: Vec<NormalizedItem>,
}

/// The artifact written at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    #[serde(rename = "cloudName")]
    pub cloud_name: String,
    /// RFC 3339 UTC timestamp of this run.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    #[serde(rename = "totalImages")]
    pub total_images: usize,
    /// Every item across all folders and the unfiled bucket.
    #[serde(rename = "carouselImages")]
    pub carousel_images: Vec<NormalizedItem>,
    pub albums: Vec<Album>,
}

/// Folder key → cover index.
pub type CoverOverrides = BTreeMap<String, usize>;
