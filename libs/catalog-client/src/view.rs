//! List and detail view models for the catalog.

use futures::future::{AbortHandle, AbortRegistration};
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::context::{DataContext, FetchParams};
use crate::error::FetchError;
use crate::models::Item;

/// Items per request; large so scrolling rarely needs another page.
pub const PAGE_LIMIT: u64 = 100;
/// Height of one list row in pixels.
pub const ROW_HEIGHT: u32 = 50;
/// Rows rendered beyond each edge of the viewport.
const OVERSCAN: usize = 1;

/// Visible region of the scrolling list, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub height: u32,
    pub scroll_offset: u32,
}

impl Viewport {
    pub fn new(height: u32, scroll_offset: u32) -> Self {
        Self {
            height,
            scroll_offset,
        }
    }
}

/// One materialized list row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    /// Distance from the top of the list, in pixels
    pub top: u32,
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u64,
    pub total_pages: u64,
    pub label: String,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl PaginationState {
    fn new(page: u64, total: u64, limit: u64) -> Self {
        let total_pages = total.div_ceil(limit);
        Self {
            page,
            total_pages,
            label: format!("Page {} of {}", page, total_pages.max(1)),
            previous_disabled: page <= 1,
            next_disabled: page >= total_pages,
        }
    }
}

#[derive(Debug)]
struct ViewState {
    search: String,
    page: u64,
    in_flight: Option<AbortHandle>,
}

/// Searchable, paginated item list.
///
/// Every search or page change issues a new fetch and aborts the one still
/// in flight, so a slow stale response can never overwrite a newer one.
pub struct ListView {
    context: Arc<DataContext>,
    state: Mutex<ViewState>,
    limit: u64,
    row_height: u32,
}

impl ListView {
    pub fn new(context: Arc<DataContext>) -> Self {
        Self {
            context,
            state: Mutex::new(ViewState {
                search: String::new(),
                page: 1,
                in_flight: None,
            }),
            limit: PAGE_LIMIT,
            row_height: ROW_HEIGHT,
        }
    }

    pub fn context(&self) -> &Arc<DataContext> {
        &self.context
    }

    pub async fn search(&self) -> String {
        self.state.lock().await.search.clone()
    }

    pub async fn page(&self) -> u64 {
        self.state.lock().await.page
    }

    /// Loads the current page. Used for the first render.
    pub async fn load(&self) -> Result<(), FetchError> {
        let (params, registration) = {
            let mut state = self.state.lock().await;
            self.begin_fetch(&mut state)
        };
        self.run_fetch(params, registration).await
    }

    /// Replaces the search text and jumps back to the first page.
    pub async fn set_search(&self, text: impl Into<String>) -> Result<(), FetchError> {
        let (params, registration) = {
            let mut state = self.state.lock().await;
            state.search = text.into();
            state.page = 1;
            self.begin_fetch(&mut state)
        };
        self.run_fetch(params, registration).await
    }

    /// Moves forward one page. Returns `false` without fetching when the
    /// next button is disabled.
    pub async fn next_page(&self) -> Result<bool, FetchError> {
        let total = self.context.total().await;
        let (params, registration) = {
            let mut state = self.state.lock().await;
            if PaginationState::new(state.page, total, self.limit).next_disabled {
                return Ok(false);
            }
            state.page += 1;
            self.begin_fetch(&mut state)
        };
        self.run_fetch(params, registration).await.map(|_| true)
    }

    /// Moves back one page. Returns `false` without fetching on page 1.
    pub async fn previous_page(&self) -> Result<bool, FetchError> {
        let (params, registration) = {
            let mut state = self.state.lock().await;
            if state.page <= 1 {
                return Ok(false);
            }
            state.page -= 1;
            self.begin_fetch(&mut state)
        };
        self.run_fetch(params, registration).await.map(|_| true)
    }

    /// Aborts the fetch in flight and registers a new one.
    fn begin_fetch(&self, state: &mut ViewState) -> (FetchParams, AbortRegistration) {
        if let Some(previous) = state.in_flight.take() {
            previous.abort();
        }
        let (handle, registration) = AbortHandle::new_pair();
        state.in_flight = Some(handle);

        let params = FetchParams {
            page: state.page,
            limit: self.limit,
            q: state.search.clone(),
        };
        (params, registration)
    }

    async fn run_fetch(
        &self,
        params: FetchParams,
        registration: AbortRegistration,
    ) -> Result<(), FetchError> {
        match self.context.fetch_items(params, Some(registration)).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => {
                debug!("Superseded fetch cancelled");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch items");
                Err(e)
            }
        }
    }

    pub async fn pagination(&self) -> PaginationState {
        let total = self.context.total().await;
        let page = self.page().await;
        PaginationState::new(page, total, self.limit)
    }

    /// Rows intersecting the viewport, plus one row of overscan each side.
    pub async fn visible_rows(&self, viewport: Viewport) -> Vec<Row> {
        let items = self.context.items().await;
        window(&items, viewport, self.row_height)
    }

    /// Text frame of the whole list view.
    pub async fn render(&self, viewport: Viewport) -> String {
        let search = self.search().await;
        let items = self.context.items().await;
        let pagination = self.pagination().await;

        let mut out = String::new();
        let _ = writeln!(out, "Search items... [{}]", search);
        // The empty state follows the page, not the window: scrolling past
        // the last row just shows no rows.
        if items.is_empty() {
            let _ = writeln!(out, "No items found.");
        } else {
            for row in window(&items, viewport, self.row_height) {
                let _ = writeln!(out, "  {}  ({})", row.name, row.href);
            }
        }
        let _ = write!(
            out,
            "{} | {} | {}",
            button("Previous", pagination.previous_disabled),
            pagination.label,
            button("Next", pagination.next_disabled)
        );
        out
    }
}

fn button(label: &str, disabled: bool) -> String {
    if disabled {
        format!("({})", label)
    } else {
        format!("[{}]", label)
    }
}

fn window(items: &[Item], viewport: Viewport, row_height: u32) -> Vec<Row> {
    if items.is_empty() || row_height == 0 {
        return Vec::new();
    }

    let row_height_px = row_height as usize;
    let first_visible = viewport.scroll_offset as usize / row_height_px;
    let bottom = viewport.scroll_offset as usize + viewport.height as usize;
    let end_visible = bottom.div_ceil(row_height_px);

    let start = first_visible.saturating_sub(OVERSCAN);
    let end = (end_visible + OVERSCAN).min(items.len());

    items
        .iter()
        .enumerate()
        .take(end)
        .skip(start)
        .map(|(index, item)| Row {
            index,
            top: (index as u32).saturating_mul(row_height),
            name: item.name.clone(),
            href: format!("/items/{}", item.id),
        })
        .collect()
}

/// Text frame of the `/items/{id}` detail view.
pub fn render_detail(item: &Item) -> String {
    format!(
        "{}\nCategory: {}\nPrice: ${:.2}\n[Back to list] (/)",
        item.name, item.category, item.price
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(count: u64) -> Vec<Item> {
        (1..=count)
            .map(|id| Item {
                id,
                name: format!("Item {}", id),
                category: "Misc".to_string(),
                price: 1.0,
            })
            .collect()
    }

    #[test]
    fn test_pagination_labels_and_flags() {
        let first = PaginationState::new(1, 250, 100);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.label, "Page 1 of 3");
        assert!(first.previous_disabled);
        assert!(!first.next_disabled);

        let last = PaginationState::new(3, 250, 100);
        assert!(!last.previous_disabled);
        assert!(last.next_disabled);

        let empty = PaginationState::new(1, 0, 100);
        assert_eq!(empty.label, "Page 1 of 1");
        assert!(empty.previous_disabled);
        assert!(empty.next_disabled);

        let exact = PaginationState::new(1, 100, 100);
        assert_eq!(exact.total_pages, 1);
        assert!(exact.next_disabled);
    }

    #[test]
    fn test_window_at_top_has_trailing_overscan() {
        let rows = window(&items(100), Viewport::new(600, 0), ROW_HEIGHT);
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, (0..13).collect::<Vec<_>>());
        assert_eq!(rows[0].href, "/items/1");
        assert_eq!(rows[0].name, "Item 1");
    }

    #[test]
    fn test_window_mid_scroll() {
        // Rows 20..=32 intersect [1010, 1610); one extra row each side
        let rows = window(&items(100), Viewport::new(600, 1010), ROW_HEIGHT);
        assert_eq!(rows.first().map(|r| r.index), Some(19));
        assert_eq!(rows.last().map(|r| r.index), Some(33));
        assert_eq!(rows[1].top, 1000);
    }

    #[test]
    fn test_window_clamps_to_item_count() {
        let rows = window(&items(5), Viewport::new(600, 0), ROW_HEIGHT);
        assert_eq!(rows.len(), 5);

        let past_end = window(&items(5), Viewport::new(600, 10_000), ROW_HEIGHT);
        assert!(past_end.is_empty());
    }

    #[test]
    fn test_render_detail() {
        let item = Item {
            id: 2,
            name: "Noise Cancelling Headphones".to_string(),
            category: "Electronics".to_string(),
            price: 399.0,
        };
        let text = render_detail(&item);
        assert!(text.starts_with("Noise Cancelling Headphones\n"));
        assert!(text.contains("Category: Electronics"));
        assert!(text.contains("Price: $399.00"));
    }
}
