//! Bottom-of-feed trigger for loading the next page.
//!
//! Browser feeds usually implement this with a near-invisible marker
//! element placed after the list, fetching the next page when the marker
//! scrolls into an extended viewport. Terminal feeds have exact row
//! arithmetic available, so the marker reduces to a rule: the sentinel is
//! in range once fewer than `margin` content rows remain hidden below the
//! viewport.
//!
//! The sentinel is stateless; the feed's own `loading`/`has_more` guard
//! makes repeated in-range reports harmless.
//!
//! ```rust
//! use bubbletea_scrollfeed::sentinel::Sentinel;
//!
//! let sentinel = Sentinel::new().with_margin(4);
//! // 30 content rows, a 10-row viewport scrolled to offset 14:
//! // 6 rows remain below, within the 4 + viewport range? 14+10+4 >= 30.
//! assert!(sentinel.in_range(14, 10, 30));
//! assert!(!sentinel.in_range(10, 10, 30));
//! ```

/// Pre-trigger margin, in content rows, applied by [`Sentinel::new`].
///
/// Roughly two default cards of lead time, so the fetch starts before the
/// user reaches the very end of the feed.
pub const DEFAULT_MARGIN: usize = 8;

/// Decides when the feed should request its next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel {
    margin: usize,
}

impl Sentinel {
    /// Creates a sentinel with [`DEFAULT_MARGIN`] rows of lead time.
    pub fn new() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
        }
    }

    /// Sets the pre-trigger margin in content rows (builder pattern).
    ///
    /// A margin of zero fires only once the final content row is visible.
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// The configured pre-trigger margin.
    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Returns true when the bottom of the content is within `margin` rows
    /// of the visible window, i.e. the next page should be requested.
    ///
    /// `offset` is the first visible content row, `viewport` the number of
    /// visible rows, and `content` the total number of content rows.
    pub fn in_range(&self, offset: usize, viewport: usize, content: usize) -> bool {
        offset + viewport + self.margin >= content
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new()
    }
}
