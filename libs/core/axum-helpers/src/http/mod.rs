//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer_from_env, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors_layer_from_env()?);
//! ```

pub mod cors;
pub mod security;

// Re-export commonly used functions
pub use cors::{DEFAULT_ALLOWED_ORIGIN, cors_layer_from_env, create_cors_layer, parse_origins};
pub use security::security_headers;
