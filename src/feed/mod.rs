//! Infinite-scroll feed component.
//!
//! `feed::Model` accumulates pages of cards from an injected
//! [`PageSource`], rendering them as a scrollable column beneath a title
//! that pins to the top row once scrolled. While the title is pinned,
//! exactly one card is shown in its expanded form, the next one about to
//! slide under it; scrolling hands the highlight from card to card, and
//! the final card keeps it even after passing the boundary so the end of
//! the feed never loses its spotlight.
//!
//! Pages are fetched lazily: when scrolling brings the bottom of the
//! content within the sentinel margin, the feed asks the source for the
//! next page. At most one fetch is in flight at a time, and a short or
//! empty page permanently marks the feed as exhausted. A failed fetch
//! stops pagination by default (the items already on screen stay put);
//! see [`RetryPolicy`] for retry-with-backoff instead.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use bubbletea_rs::{Cmd, Msg};
//! use bubbletea_scrollfeed::feed::{
//!     self, DefaultCard, DefaultCardDelegate, FetchError, PageRequest, PageSource,
//! };
//!
//! struct CheckPoints;
//!
//! #[async_trait]
//! impl PageSource for CheckPoints {
//!     type Item = DefaultCard;
//!
//!     async fn fetch_page(&self, req: PageRequest) -> Result<Vec<DefaultCard>, FetchError> {
//!         // Query the backend for one page; a short page ends the feed.
//!         Ok(vec![])
//!     }
//! }
//!
//! struct App {
//!     feed: feed::Model<DefaultCard>,
//! }
//!
//! impl App {
//!     fn new() -> (Self, Cmd) {
//!         let mut feed = feed::Model::new(CheckPoints, DefaultCardDelegate::new(), 80, 24)
//!             .with_title("Check points");
//!         let cmd = feed.start();
//!         (Self { feed }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.feed.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.feed.view()
//!     }
//! }
//! ```

mod defaultcard;
mod keys;
mod model;
mod source;
mod style;
mod types;


pub use defaultcard::{DefaultCard, DefaultCardDelegate, DefaultCardStyles};
pub use keys::FeedKeyMap;
pub use model::{Model, DEFAULT_FETCH_TIMEOUT, DEFAULT_PAGE_SIZE};
pub use source::PageSource;
pub use style::FeedStyles;
pub use types::{
    Card, CardDelegate, FetchError, LayoutSettledMsg, PageFailedMsg, PageLoadedMsg, PageRequest,
    RetryPolicy,
};

use crate::spinner;
use bubbletea_rs::{batch, tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use source::{fetch_cmd, FetchSpec};
use std::sync::Arc;
use std::time::Duration;

/// Delay before the initial activation pass, letting the first render
/// settle the layout.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

impl<I: Card> Model<I> {
    /// Kicks the feed off: fetches page 1, starts the loading spinner and
    /// schedules the delayed initial activation pass.
    ///
    /// On success the fetched items replace the (empty) feed; on terminal
    /// failure the feed shows the error screen and attempts no pagination.
    pub fn start(&mut self) -> Cmd {
        self.loading = true;
        self.last_error = None;
        let id = self.id;
        let settle = bubbletea_tick(SETTLE_DELAY, move |_| {
            Box::new(LayoutSettledMsg { id }) as Msg
        });
        let fetch = self.fetch(1, 0, Duration::ZERO);
        let spin = self.spinner.start();
        batch(vec![fetch, settle, spin])
    }

    /// Discards everything and fetches page 1 again.
    ///
    /// Results of fetches still in flight from before the refresh are
    /// dropped when they arrive.
    pub fn refresh(&mut self) -> Cmd {
        self.reset();
        self.loading = true;
        let fetch = self.fetch(1, 0, Duration::ZERO);
        let spin = self.spinner.start();
        batch(vec![fetch, spin])
    }

    /// Requests the next page.
    ///
    /// Silently returns `None` while a fetch is in flight or once the feed
    /// is exhausted, so callers may invoke it as often as they like; at
    /// most one fetch runs at a time.
    pub fn load_more(&mut self) -> Option<Cmd> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(self.fetch(self.page + 1, 0, Duration::ZERO))
    }

    fn fetch(&self, page: usize, attempt: u32, backoff: Duration) -> Cmd {
        fetch_cmd(
            Arc::clone(&self.source),
            FetchSpec {
                id: self.id,
                generation: self.generation,
                page,
                page_size: self.page_size,
                attempt,
                backoff,
                timeout: self.fetch_timeout,
            },
        )
    }

    /// Processes one runtime message.
    ///
    /// Handles scroll keys, page results, the settle tick and spinner
    /// ticks; everything else is ignored. Call this from the embedding
    /// model's `update`.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }
        if let Some(settled) = msg.downcast_ref::<LayoutSettledMsg>() {
            if settled.id == self.id {
                self.refresh_activation();
            }
            return None;
        }
        if msg.downcast_ref::<spinner::TickMsg>().is_some() {
            return self.spinner.update(&msg);
        }
        let msg = match msg.downcast::<PageLoadedMsg<I>>() {
            Ok(loaded) => return self.on_page_loaded(*loaded),
            Err(msg) => msg,
        };
        match msg.downcast::<PageFailedMsg>() {
            Ok(failed) => self.on_page_failed(*failed),
            Err(_) => None,
        }
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let page_rows = self.body_height().max(1);
        if self.keymap.up.matches(key_msg) {
            self.scroll_up(1);
        } else if self.keymap.down.matches(key_msg) {
            self.scroll_down(1);
        } else if self.keymap.page_up.matches(key_msg) {
            self.scroll_up(page_rows);
        } else if self.keymap.page_down.matches(key_msg) {
            self.scroll_down(page_rows);
        } else if self.keymap.go_to_start.matches(key_msg) {
            self.goto_top();
        } else if self.keymap.go_to_end.matches(key_msg) {
            self.goto_bottom();
        } else {
            return None;
        }
        self.maybe_load_more()
    }

    /// Asks for the next page when the scroll position has entered the
    /// sentinel range. The `load_more` guard absorbs repeat triggers.
    fn maybe_load_more(&mut self) -> Option<Cmd> {
        if self
            .sentinel
            .in_range(self.scroll_offset, self.body_height(), self.content_height())
        {
            self.load_more()
        } else {
            None
        }
    }

    fn on_page_loaded(&mut self, msg: PageLoadedMsg<I>) -> Option<Cmd> {
        if msg.id != self.id || msg.generation != self.generation {
            tracing::trace!(page = msg.page, "discarding stale page result");
            return None;
        }
        self.loading = false;
        let fetched = msg.items.len();
        if msg.page == 1 {
            self.items = msg.items;
            self.page = 1;
            self.last_error = None;
            self.has_more = true;
        } else if fetched > 0 {
            self.items.extend(msg.items);
            self.page = msg.page;
        }
        if fetched < self.page_size {
            self.has_more = false;
        }
        tracing::debug!(
            page = msg.page,
            fetched,
            total = self.items.len(),
            has_more = self.has_more,
            "page loaded"
        );
        self.refresh_activation();
        None
    }

    fn on_page_failed(&mut self, msg: PageFailedMsg) -> Option<Cmd> {
        if msg.id != self.id || msg.generation != self.generation {
            tracing::trace!(page = msg.page, "discarding stale page failure");
            return None;
        }
        if let Some(delay) = self.retry_policy.backoff_for(msg.attempt) {
            tracing::debug!(
                page = msg.page,
                attempt = msg.attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "retrying page fetch"
            );
            return Some(self.fetch(msg.page, msg.attempt + 1, delay));
        }
        self.loading = false;
        self.has_more = false;
        tracing::warn!(
            page = msg.page,
            error = %msg.error,
            "page fetch failed; stopping pagination"
        );
        self.last_error = Some(msg.error);
        None
    }

    /// Renders the feed.
    ///
    /// Layout, top to bottom: the title (in flow at the top of the feed,
    /// pinned to the first row once scrolled), the cards with the active
    /// one expanded, a status line while fetching, and the help footer.
    pub fn view(&self) -> String {
        if self.width == 0 || self.height == 0 {
            return String::new();
        }
        let body_height = self.body_height();
        let mut rows: Vec<String> = Vec::with_capacity(body_height + 1);

        if self.is_empty() {
            self.empty_screen(&mut rows, body_height);
        } else {
            let content = self.content_rows();
            for row in self.scroll_offset..self.scroll_offset + body_height {
                rows.push(content.get(row).cloned().unwrap_or_default());
            }
            if self.pinned() {
                let pinned_rows = self.title_height().min(rows.len());
                for row in rows.iter_mut().take(pinned_rows) {
                    *row = self.styles.pinned_title.render(self.title());
                }
            }
        }

        rows.push(self.help.view(&self.keymap));
        rows.join("\n")
    }

    /// The feed before any card exists: title plus either the loading
    /// line, the terminal error screen, or the empty placeholder.
    fn empty_screen(&self, rows: &mut Vec<String>, body_height: usize) {
        if self.title_height() > 0 {
            rows.push(self.styles.title.render(self.title()));
        }
        if self.loading {
            rows.push(format!(
                "{} {}",
                self.spinner.view(),
                self.styles.status.render("Loading…")
            ));
        } else if let Some(error) = self.last_error() {
            rows.push(self.styles.error_title.render("Couldn't load the feed"));
            rows.push(self.styles.error_detail.render(&error.to_string()));
        } else {
            rows.push(self.styles.empty.render("Nothing here yet."));
        }
        rows.resize(body_height, String::new());
    }

    fn content_rows(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(self.content_height());
        if self.title_height() > 0 {
            rows.push(self.styles.title.render(self.title()));
        }
        let spacing = self.delegate.spacing();
        for index in 0..self.items.len() {
            let expanded = self.active_index() == Some(index);
            let rendered = {
                let item = &self.items[index];
                if expanded {
                    self.delegate.render_expanded(self, index, item)
                } else {
                    self.delegate.render_compact(self, index, item)
                }
            };
            let want = self.card_height(index);
            let mut lines: Vec<String> = rendered.lines().map(str::to_string).collect();
            lines.resize(want, String::new());
            rows.extend(lines);
            for _ in 0..spacing {
                rows.push(String::new());
            }
        }
        if self.loading {
            rows.push(format!(
                "{} {}",
                self.spinner.view(),
                self.styles.status.render("Loading more…")
            ));
        }
        rows
    }
}
