//! Offset/limit pagination over the platform's list-style endpoints.
//!
//! Every list endpoint returns bounded pages together with a
//! server-reported total. This module drives the page-by-page protocol and
//! accumulates the entire result set in memory, so callers only ever see
//! the complete list. Any non-success page is fatal; no partial result is
//! returned.

use crate::client::ApiError;
use crate::model::PagedResponse;

/// Page size used for all list requests.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Literal status marker the server uses for a successful response body.
pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
    /// The server answered a page request with a non-success status.
    #[error("server reported status {status:?} for page at offset {offset}")]
    NonSuccessStatus { status: String, offset: u64 },
    /// The server returned an empty page before the reported total was
    /// reached. Without this check a stale total would loop forever.
    #[error("result set ended early: received {received} of {total} items")]
    IncompleteResultSet { received: usize, total: u64 },
    #[error(transparent)]
    FetchError(#[from] ApiError),
}

/// Fetches an entire result set from an offset/limit-paginated endpoint.
///
/// `fetch` is called with `(offset, limit)` and must perform one page
/// request. Pagination starts at offset 0 and advances by `page_size`
/// until the accumulated item count reaches the server-reported total.
/// The total is reconfirmed from every page, so the most recent value
/// wins if it changes mid-run; a total smaller than the accumulated count
/// simply terminates the loop.
pub fn fetch_all_pages<T, F>(page_size: u64, mut fetch: F) -> Result<Vec<T>, PaginationError>
where
    F: FnMut(u64, u64) -> Result<PagedResponse<T>, ApiError>,
{
    let mut items: Vec<T> = Vec::new();
    let mut offset: u64 = 0;

    loop {
        let page = fetch(offset, page_size)?;
        if page.status != SUCCESS_STATUS {
            return Err(PaginationError::NonSuccessStatus {
                status: page.status,
                offset,
            });
        }

        let total = page.meta.pagination.total;
        let page_len = page.data.len();
        items.extend(page.data);

        if (items.len() as u64) < total {
            if page_len == 0 {
                return Err(PaginationError::IncompleteResultSet {
                    received: items.len(),
                    total,
                });
            }
            offset += page_size;
        } else {
            return Ok(items);
        }
    }
}
