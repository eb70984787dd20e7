//! Asset classification and delivery URL normalization.
//!
//! Each [`RawAsset`] becomes exactly one [`NormalizedItem`]. Rules are
//! evaluated in order, first match wins:
//!
//! | Asset | `url` | `is_video` | `is_live_photo` |
//! |---|---|---|---|
//! | video + `heic` | untouched | yes | yes |
//! | other video | poster frame (`so_0,f_jpg,q_auto`) | yes | no |
//! | `heic` / `heif` still | `f_auto,q_auto` | no | no |
//! | any `/image/upload/` URL | `f_auto,q_auto` | no | no |
//! | anything else | untouched | no | no |
//!
//! HEIC "videos" are iOS live photos. The provider already serves them as
//! playable video, so they are never re-encoded or thumbnailed.
//!
//! Transformations are spliced into the delivery path right after the
//! `/image/upload/` or `/video/upload/` segment. A URL without the segment
//! comes back unchanged, so nothing in here can fail.

use crate::types::{NormalizedItem, RawAsset};

pub const IMAGE_DELIVERY_SEGMENT: &str = "/image/upload/";
pub const VIDEO_DELIVERY_SEGMENT: &str = "/video/upload/";

/// Browser-negotiated format and quality.
pub const AUTO_FORMAT_TRANSFORM: &str = "f_auto,q_auto";
/// First frame of a video, as a JPEG.
pub const VIDEO_POSTER_TRANSFORM: &str = "so_0,f_jpg,q_auto";

/// Category an asset falls into. Drives which transformation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    LivePhoto,
    Video,
    HeicStill,
    Image,
    Passthrough,
}

/// Decide which rule matches a raw asset.
pub fn asset_kind(raw: &RawAsset) -> AssetKind {
    let is_video = raw.resource_type.eq_ignore_ascii_case("video");
    let format = raw.format.to_ascii_lowercase();

    if is_video && format == "heic" {
        AssetKind::LivePhoto
    } else if is_video {
        AssetKind::Video
    } else if format == "heic" || format == "heif" {
        AssetKind::HeicStill
    } else if raw.secure_url.contains(IMAGE_DELIVERY_SEGMENT) {
        AssetKind::Image
    } else {
        AssetKind::Passthrough
    }
}

/// Classify one asset and build its normalized delivery URLs.
pub fn classify(raw: &RawAsset) -> NormalizedItem {
    let original_url = raw.secure_url.clone();
    let kind = asset_kind(raw);

    let url = match kind {
        AssetKind::LivePhoto | AssetKind::Passthrough => original_url.clone(),
        AssetKind::Video => {
            splice_transform(&original_url, VIDEO_DELIVERY_SEGMENT, VIDEO_POSTER_TRANSFORM)
        }
        AssetKind::HeicStill | AssetKind::Image => {
            splice_transform(&original_url, IMAGE_DELIVERY_SEGMENT, AUTO_FORMAT_TRANSFORM)
        }
    };

    NormalizedItem {
        url,
        original_url,
        is_video: matches!(kind, AssetKind::LivePhoto | AssetKind::Video),
        is_live_photo: kind == AssetKind::LivePhoto,
    }
}

/// Insert `transform` as a path component right after `segment`.
///
/// ```text
/// https://res.cloudinary.com/demo/image/upload/v1/a.jpg
///   → https://res.cloudinary.com/demo/image/upload/f_auto,q_auto/v1/a.jpg
/// ```
///
/// Returns the URL unchanged when the segment is missing or the same
/// transformation is already in place.
pub fn splice_transform(url: &str, segment: &str, transform: &str) -> String {
    let Some(pos) = url.find(segment) else {
        return url.to_string();
    };
    let (head, tail) = url.split_at(pos + segment.len());

    let already_applied = tail
        .strip_prefix(transform)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
    if already_applied {
        return url.to_string();
    }

    format!("{head}{transform}/{tail}")
}
