//! Custom extractors for Axum handlers.
//!
//! These turn extraction failures into the shared [`crate::ErrorResponse`]
//! body instead of Axum's plain-text rejections.

pub mod id_path;
pub mod json_body;

pub use id_path::IdPath;
pub use json_body::JsonBody;
