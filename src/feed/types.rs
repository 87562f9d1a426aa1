//! Core types and traits for the feed component.
//!
//! This module defines:
//! - the [`Card`] trait for feed content
//! - the [`CardDelegate`] trait for custom rendering
//! - page fetch vocabulary: [`PageRequest`], [`FetchError`], [`RetryPolicy`]
//! - the messages the feed routes through the bubbletea runtime

use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;

/// Trait for items that can be shown as cards in a feed.
///
/// The `Display` implementation is the card's one-line label (its compact
/// form); [`Card::body`] supplies the longer text shown when the card is
/// expanded. Items travel through the bubbletea message channel, hence the
/// `Send + 'static` bounds.
///
/// # Examples
///
/// ```
/// use bubbletea_scrollfeed::feed::Card;
/// use std::fmt::Display;
///
/// #[derive(Clone)]
/// struct Tip {
///     label: String,
///     detail: String,
/// }
///
/// impl Display for Tip {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}", self.label)
///     }
/// }
///
/// impl Card for Tip {
///     fn body(&self) -> String {
///         self.detail.clone()
///     }
/// }
/// ```
pub trait Card: Display + Clone + Send + 'static {
    /// Longer text for the expanded rendering. Defaults to empty, which
    /// collapses the expanded form to a highlighted label.
    fn body(&self) -> String {
        String::new()
    }
}

/// Trait for customizing how cards are rendered in both visual states.
///
/// The feed derives its row geometry from `height`, `expanded_height` and
/// `spacing`, so renderers must produce exactly that many lines (short
/// output is padded, long output truncated).
pub trait CardDelegate<I: Card> {
    /// Rows occupied by a compact card.
    fn height(&self) -> usize;

    /// Rows occupied by the expanded (active) card.
    fn expanded_height(&self) -> usize;

    /// Blank rows between consecutive cards.
    fn spacing(&self) -> usize;

    /// Renders the compact form of the card at `index`.
    fn render_compact(&self, m: &super::Model<I>, index: usize, item: &I) -> String;

    /// Renders the expanded form of the card at `index`.
    fn render_expanded(&self, m: &super::Model<I>, index: usize, item: &I) -> String;
}

/// One page-fetch request: 1-based page number and the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    /// Maximum items the source should return for this page.
    pub page_size: usize,
}

/// Failure reported by a [`super::PageSource`] or by the fetch deadline.
///
/// The feed never interprets these beyond success-versus-failure; codes and
/// messages exist for logging and for the initial-load error screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Opaque backend or transport failure.
    #[error("{message} (code {code})")]
    Backend {
        /// Backend-defined error code, not interpreted by the feed.
        code: String,
        /// Human-readable description.
        message: String,
    },
    /// The fetch did not complete within the configured deadline.
    #[error("page fetch timed out after {0:?}")]
    TimedOut(Duration),
}

impl FetchError {
    /// Convenience constructor for the opaque backend variant.
    pub fn backend(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// What the feed does when a page fetch fails.
///
/// The default, [`RetryPolicy::Stop`], treats any pagination failure as
/// exhaustion: the feed keeps what it has and stops asking for more.
/// [`RetryPolicy::Backoff`] retries the same page with linearly growing
/// delays before giving up the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// A failed fetch permanently stops pagination.
    Stop,
    /// Retry a failed fetch up to `attempts` times, waiting
    /// `delay * attempt_number` before each retry.
    Backoff {
        /// Retries allowed beyond the first try.
        attempts: u32,
        /// Base delay; the n-th retry waits `delay * n`.
        delay: Duration,
    },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::Stop
    }
}

impl RetryPolicy {
    /// Delay before the next retry after `completed_attempt` (0-based)
    /// failed, or `None` when the policy is out of retries.
    pub(crate) fn backoff_for(&self, completed_attempt: u32) -> Option<Duration> {
        match self {
            Self::Stop => None,
            Self::Backoff { attempts, delay } => {
                if completed_attempt < *attempts {
                    Some(*delay * (completed_attempt + 1))
                } else {
                    None
                }
            }
        }
    }
}

/// Message delivered when a page fetch succeeds.
///
/// `id` and `generation` identify the feed instance and its reset epoch;
/// the feed drops messages whose identity no longer matches, which is how
/// results of fetches outlived by a [`super::Model::reset`] are discarded.
#[derive(Debug, Clone)]
pub struct PageLoadedMsg<I> {
    /// Id of the feed that issued the fetch.
    pub id: i64,
    /// Reset epoch the fetch was issued under.
    pub generation: u64,
    /// 1-based page number that was fetched.
    pub page: usize,
    /// The fetched items, in backend order.
    pub items: Vec<I>,
}

/// Message delivered when a page fetch fails (including timeouts).
#[derive(Debug, Clone)]
pub struct PageFailedMsg {
    /// Id of the feed that issued the fetch.
    pub id: i64,
    /// Reset epoch the fetch was issued under.
    pub generation: u64,
    /// 1-based page number that failed.
    pub page: usize,
    /// 0-based attempt counter for retry bookkeeping.
    pub attempt: u32,
    /// What went wrong.
    pub error: FetchError,
}

/// One-shot message scheduled shortly after [`super::Model::start`], giving
/// the first layout a moment to settle before the initial activation pass.
#[derive(Debug, Clone)]
pub struct LayoutSettledMsg {
    /// Id of the feed the pass belongs to.
    pub id: i64,
}
