//! The asynchronous page source seam and the fetch command.
//!
//! The feed never talks to a backend directly; it asks an injected
//! [`PageSource`] for one page at a time and receives the outcome through
//! the bubbletea message channel. Any backend (an HTTP API, a database, an
//! in-memory vector) plugs in by implementing the trait.
//!
//! ```rust
//! use async_trait::async_trait;
//! use bubbletea_scrollfeed::feed::{DefaultCard, FetchError, PageRequest, PageSource};
//!
//! struct Tips(Vec<DefaultCard>);
//!
//! #[async_trait]
//! impl PageSource for Tips {
//!     type Item = DefaultCard;
//!
//!     async fn fetch_page(&self, req: PageRequest) -> Result<Vec<DefaultCard>, FetchError> {
//!         let start = (req.page - 1) * req.page_size;
//!         let end = (start + req.page_size).min(self.0.len());
//!         Ok(self.0.get(start..end).unwrap_or(&[]).to_vec())
//!     }
//! }
//! ```

use super::types::{Card, FetchError, PageFailedMsg, PageLoadedMsg, PageRequest};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use bubbletea_rs::{Cmd, Msg};

/// Supplies pages of feed items.
///
/// Exhaustion is signaled in-band: a short or empty page means there is no
/// more data. Implementations should reserve `Err` for genuine failures,
/// never for "no more items".
#[async_trait]
pub trait PageSource: Send + Sync {
    /// The item type this source produces.
    type Item: Card;

    /// Fetches one page. `request.page` is 1-based.
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Self::Item>, FetchError>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    type Item = T::Item;

    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Self::Item>, FetchError> {
        (**self).fetch_page(request).await
    }
}

/// Everything one fetch attempt needs, captured by value into the command.
#[derive(Debug, Clone, Copy)]
pub(super) struct FetchSpec {
    pub id: i64,
    pub generation: u64,
    pub page: usize,
    pub page_size: usize,
    pub attempt: u32,
    pub backoff: Duration,
    pub timeout: Option<Duration>,
}

/// Builds the command that runs one fetch attempt.
///
/// The command sleeps out the retry backoff, applies the fetch deadline,
/// and resolves to either a [`PageLoadedMsg`] or a [`PageFailedMsg`]. The
/// feed's id and generation ride along so stale completions can be dropped
/// on arrival.
pub(super) fn fetch_cmd<I: Card>(
    source: Arc<dyn PageSource<Item = I>>,
    spec: FetchSpec,
) -> Cmd {
    Box::pin(async move {
        if !spec.backoff.is_zero() {
            tokio::time::sleep(spec.backoff).await;
        }

        let request = PageRequest {
            page: spec.page,
            page_size: spec.page_size,
        };
        let result = match spec.timeout {
            Some(deadline) => tokio::time::timeout(deadline, source.fetch_page(request))
                .await
                .unwrap_or(Err(FetchError::TimedOut(deadline))),
            None => source.fetch_page(request).await,
        };

        let msg: Msg = match result {
            Ok(items) => Box::new(PageLoadedMsg {
                id: spec.id,
                generation: spec.generation,
                page: spec.page,
                items,
            }),
            Err(error) => Box::new(PageFailedMsg {
                id: spec.id,
                generation: spec.generation,
                page: spec.page,
                attempt: spec.attempt,
                error,
            }),
        };
        Some(msg)
    })
}
