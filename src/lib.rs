//! # cloud-gal
//!
//! Build-time fetcher for a photo gallery site. Reads a Cloudinary library
//! folder by folder and writes one JSON document the static site renders
//! albums from.
//!
//! # Pipeline
//!
//! ```text
//! 1. Fetch      folders + unfiled  →  normalized items   (paginated search)
//! 2. Assemble   items per folder   →  sorted albums      (titles, covers)
//! 3. Write      albums + items     →  gallery.json       (atomic replace)
//! ```
//!
//! The run is all-or-nothing. Any API failure aborts before the write, so
//! the site either gets a complete new document or keeps the old one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | Asset → item: live photo, video poster, HEIC and image URL transforms |
//! | [`fetch`] | Folder enumeration and cursor pagination over [`api::MediaApi`] |
//! | [`assemble`] | Album titles, cover selection, title ordering |
//! | [`document`] | Document assembly, atomic write, run-level errors |
//! | [`api`] | `MediaApi` trait and the Cloudinary HTTP client |
//! | [`config`] | `config.toml` loading and environment credentials |
//! | [`naming`] | Folder key → display title |
//! | [`types`] | Data model and the JSON contract with the site |
//! | [`output`] | CLI output formatting, including the error report |
//!
//! # Design Decisions
//!
//! ## One Document, Fully Replaced
//!
//! The site reads a single file. Each run rebuilds it from scratch with no
//! diffing against the previous output. Deleting an asset upstream removes it
//! from the site on the next build with no cleanup step.
//!
//! ## Transformations in the URL
//!
//! Cloudinary transforms on delivery, keyed by a path component. Converting
//! HEIC for browsers or extracting a video poster is a string splice into the
//! URL (see [`classify::splice_transform`]); nothing is downloaded or
//! re-encoded here.
//!
//! ## Sequential Fetch
//!
//! Folders and pages are fetched one at a time with a blocking client. A
//! library of a few thousand assets is a handful of requests, and a strict
//! order keeps the output deterministic for a stable remote state.

pub mod api;
pub mod assemble;
pub mod classify;
pub mod config;
pub mod document;
pub mod fetch;
pub mod naming;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
