//! The feed model: state, construction, geometry and scrolling.

use super::keys::FeedKeyMap;
use super::source::PageSource;
use super::style::FeedStyles;
use super::types::{Card, CardDelegate, FetchError, RetryPolicy};
use crate::activation::{StaticLayout, Tracker};
use crate::sentinel::Sentinel;
use crate::{help, spinner};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Items requested per page unless overridden with
/// [`Model::with_page_size`].
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Deadline applied to each fetch attempt unless overridden with
/// [`Model::with_fetch_timeout`].
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// An infinite-scroll feed of cards.
///
/// The model accumulates pages from an injected [`PageSource`], renders
/// them as a scrollable column of cards beneath a (stickable) title, and
/// keeps exactly one card expanded as the user scrolls: the next card
/// about to slide under the pinned title.
///
/// # Examples
///
/// ```
/// use bubbletea_scrollfeed::feed::{DefaultCard, DefaultCardDelegate, Model};
/// # use async_trait::async_trait;
/// # use bubbletea_scrollfeed::feed::{FetchError, PageRequest, PageSource};
/// # struct Tips;
/// # #[async_trait]
/// # impl PageSource for Tips {
/// #     type Item = DefaultCard;
/// #     async fn fetch_page(&self, _: PageRequest) -> Result<Vec<DefaultCard>, FetchError> {
/// #         Ok(vec![])
/// #     }
/// # }
///
/// let mut feed = Model::new(Tips, DefaultCardDelegate::new(), 80, 24)
///     .with_title("Check points")
///     .with_page_size(20);
/// let first_fetch = feed.start();
/// ```
pub struct Model<I: Card> {
    pub(super) title: String,
    pub(super) items: Vec<I>,
    pub(super) delegate: Box<dyn CardDelegate<I> + Send + Sync>,
    pub(super) source: Arc<dyn PageSource<Item = I>>,

    // Pagination state
    pub(super) page: usize,
    pub(super) page_size: usize,
    pub(super) loading: bool,
    pub(super) has_more: bool,
    pub(super) last_error: Option<FetchError>,
    pub(super) retry_policy: RetryPolicy,
    pub(super) fetch_timeout: Option<Duration>,

    // Message routing identity
    pub(super) id: i64,
    pub(super) generation: u64,

    // View state
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) scroll_offset: usize,
    pub(super) pin_title: bool,
    pub(super) sentinel: Sentinel,
    pub(super) tracker: Tracker,
    pub(super) spinner: spinner::Model,

    /// Key bindings; replace individual bindings to customize.
    pub keymap: FeedKeyMap,
    /// Styles for the feed chrome.
    pub styles: FeedStyles,
    /// The help footer renderer.
    pub help: help::Model,
}

impl<I: Card> Model<I> {
    /// Creates a feed over the given source and delegate.
    ///
    /// The feed starts empty with `has_more = true`; call [`Model::start`]
    /// to fetch the first page.
    pub fn new<S, D>(source: S, delegate: D, width: usize, height: usize) -> Self
    where
        S: PageSource<Item = I> + 'static,
        D: CardDelegate<I> + Send + Sync + 'static,
    {
        Self {
            title: String::new(),
            items: Vec::new(),
            delegate: Box::new(delegate),
            source: Arc::new(source),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            loading: false,
            has_more: true,
            last_error: None,
            retry_policy: RetryPolicy::default(),
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
            id: next_id(),
            generation: 0,
            width,
            height,
            scroll_offset: 0,
            pin_title: true,
            sentinel: Sentinel::new(),
            tracker: Tracker::new(),
            spinner: spinner::Model::new(),
            keymap: FeedKeyMap::default(),
            styles: FeedStyles::default(),
            help: help::Model::new().with_width(width),
        }
    }

    // --- Builders ---

    /// Sets the feed title (builder pattern). An empty title disables the
    /// title row and, with it, pinning and activation tracking.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets how many items each page requests (builder pattern).
    /// Clamped to at least 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the failure policy for page fetches (builder pattern).
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sets the per-attempt fetch deadline (builder pattern). Pass `None`
    /// to wait indefinitely.
    pub fn with_fetch_timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.fetch_timeout = timeout.into();
        self
    }

    /// Sets the sentinel's pre-trigger margin in content rows
    /// (builder pattern).
    pub fn with_trigger_margin(mut self, margin: usize) -> Self {
        self.sentinel = self.sentinel.with_margin(margin);
        self
    }

    /// Enables or disables title pinning (builder pattern). With pinning
    /// off the title always scrolls away and no card is ever expanded.
    pub fn with_pinned_title(mut self, pin: bool) -> Self {
        self.pin_title = pin;
        self
    }

    /// Replaces the keymap (builder pattern).
    pub fn with_keymap(mut self, keymap: FeedKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the chrome styles (builder pattern).
    pub fn with_styles(mut self, styles: FeedStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the loading spinner (builder pattern).
    pub fn with_spinner(mut self, spinner: spinner::Model) -> Self {
        self.spinner = spinner;
        self
    }

    // --- Accessors ---

    /// The feed's unique id, used to route its messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The current reset epoch. Messages constructed by hand (e.g. in
    /// tests or custom drivers) must carry this value to be accepted.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The feed title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All items fetched so far, in fetch order.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Number of items fetched so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items have been fetched (or all were removed).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, if present.
    pub fn item(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    /// True while a page fetch (or retry) is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// True while more pages may exist. Becomes false on a short page,
    /// an empty page, or a (non-retried) fetch failure, and stays false
    /// until [`Model::reset`].
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// The last successfully fetched page number; 0 before the first page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// The configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The most recent fetch error, if any. For pagination failures this
    /// is informational only; the already-fetched items stay on screen.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Index of the currently expanded card, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.tracker.active()
    }

    /// The first visible content row.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// The feed width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The feed height in rows, including the help footer.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes the feed.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.help.width = width;
        self.clamp_scroll();
        self.refresh_activation();
    }

    // --- Geometry ---
    //
    // Content rows are: the title (when present), then each card followed
    // by its spacing, then the status row while loading. The viewport is
    // the window of `body_height` rows starting at `scroll_offset`; when
    // the title is pinned it covers the top row(s) of that window.

    pub(super) fn title_height(&self) -> usize {
        usize::from(!self.title.is_empty())
    }

    pub(super) fn card_height(&self, index: usize) -> usize {
        if self.tracker.active() == Some(index) {
            self.delegate.expanded_height()
        } else {
            self.delegate.height()
        }
    }

    /// Content row of the top of card `index`; `index == len` gives the
    /// first row after the last card.
    pub(super) fn card_top(&self, index: usize) -> usize {
        let per_card_gap = self.delegate.spacing();
        let mut row = self.title_height();
        for i in 0..index.min(self.items.len()) {
            row += self.card_height(i) + per_card_gap;
        }
        row
    }

    pub(super) fn status_rows(&self) -> usize {
        usize::from(self.loading)
    }

    /// Total content rows, status line included.
    pub(super) fn content_height(&self) -> usize {
        self.card_top(self.items.len()) + self.status_rows()
    }

    /// Rows available to content: the widget height minus the help footer.
    pub(super) fn body_height(&self) -> usize {
        self.height.saturating_sub(1)
    }

    pub(super) fn max_scroll(&self) -> usize {
        self.content_height().saturating_sub(self.body_height())
    }

    /// True while the title is stuck to the top row.
    pub fn pinned(&self) -> bool {
        self.pin_title && self.title_height() > 0 && self.scroll_offset > 0 && !self.items.is_empty()
    }

    pub(super) fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Re-runs the activation pass against the current layout.
    ///
    /// The geometry snapshot is taken with the *current* active card's
    /// expanded height, so expansion feeds back into the next pass the way
    /// live layout does in a browser.
    pub(super) fn refresh_activation(&mut self) {
        let pinned = self.pinned();
        let offset = self.scroll_offset as i32;
        let probe = StaticLayout {
            title_bottom: Some(self.title_height() as i32),
            card_tops: (0..self.items.len())
                .map(|i| Some(self.card_top(i) as i32 - offset))
                .collect(),
        };
        self.tracker.recompute(pinned, &probe);
    }

    // --- Scrolling ---

    /// Scrolls up by `rows`.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
        self.refresh_activation();
    }

    /// Scrolls down by `rows`, clamped to the end of the content.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = (self.scroll_offset + rows).min(self.max_scroll());
        self.refresh_activation();
    }

    /// Jumps to the top of the feed.
    pub fn goto_top(&mut self) {
        self.scroll_offset = 0;
        self.refresh_activation();
    }

    /// Jumps to the bottom of the feed.
    pub fn goto_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
        self.refresh_activation();
    }

    // --- External mutation ---

    /// Removes and returns the item at `index` (e.g. after a delete in the
    /// backing store). Scroll and activation are re-derived.
    pub fn remove(&mut self, index: usize) -> Option<I> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        if self.items.is_empty() {
            self.tracker.clear();
        }
        self.clamp_scroll();
        self.refresh_activation();
        Some(removed)
    }

    /// Restores the pristine state: no items, page 0, `has_more = true`,
    /// no error, scroll at the top. Bumps the reset epoch so completions
    /// of fetches issued before the reset are discarded on arrival.
    pub fn reset(&mut self) {
        self.items.clear();
        self.page = 0;
        self.loading = false;
        self.has_more = true;
        self.last_error = None;
        self.scroll_offset = 0;
        self.generation += 1;
        self.tracker.clear();
    }
}
