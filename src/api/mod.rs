//! Remote media API boundary.
//!
//! - **Backend**: the [`MediaApi`] trait, request/page types, [`ApiError`]
//! - **Cloudinary**: [`CloudinaryApi`], the blocking HTTP implementation

pub mod backend;
pub mod cloudinary;

pub use backend::{ApiError, MediaApi, SearchPage, SearchRequest};
pub use cloudinary::CloudinaryApi;
