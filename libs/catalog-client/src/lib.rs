//! Catalog Client
//!
//! HTTP client state for the catalog API and the list/detail view models
//! built on top of it.
//!
//! - **[`context`]**: [`DataContext`] holds the last fetched page of items
//!   and the total match count
//! - **[`view`]**: [`ListView`] drives search and pagination, cancels stale
//!   fetches and windows the rows that fit the viewport
//!
//! ```rust,no_run
//! use catalog_client::{DataContext, ListView, Viewport};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), catalog_client::FetchError> {
//! let context = Arc::new(DataContext::new("http://localhost:3001")?);
//! let view = ListView::new(context);
//!
//! view.set_search("monitor").await?;
//! println!("{}", view.render(Viewport::new(600, 0)).await);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod models;
pub mod view;

pub use context::{DataContext, FetchParams};
pub use error::FetchError;
pub use models::{Item, Stats};
pub use view::{ListView, PaginationState, Row, Viewport, render_detail};
