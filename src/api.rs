//! The catalog API seam.

use futures::future::BoxFuture;

use crate::model::{CatalogItem, SearchPage};
use crate::Result;

/// Catalog endpoints the widget calls.
///
/// Implementations own the transport (URLs, headers, CSRF token, JSON decoding)
/// and report failures as [`Error::Request`](crate::Error::Request). The widget
/// spawns the returned futures and never retries them.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogApi: Send + Sync {
    /// Items matching `query`. An empty page is a valid answer.
    fn search(&self, query: String) -> BoxFuture<'static, Result<SearchPage>>;

    /// Set the purchase flag of item `id` and return the patched item.
    fn set_to_buy(&self, id: u64, to_buy: bool) -> BoxFuture<'static, Result<CatalogItem>>;
}
