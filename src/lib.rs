#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-scrollfeed/")]

//! # bubbletea-scrollfeed
//!
//! Infinite-scroll feed components for building terminal applications with
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs).
//!
//! The crate grew out of the endless-feed pattern of consumer catalog
//! apps: a column of cards loads page by page as the user scrolls, and the
//! card about to slide under the pinned header is highlighted in an
//! expanded form. Everything here follows the Elm Architecture,
//! `update()` consuming runtime messages and `view()` rendering a string,
//! and embeds into a bubbletea-rs model like any other component.
//!
//! ## Components
//!
//! - [`feed::Model`]: the feed itself. Page accumulation with an
//!   at-most-one-in-flight fetch guard, exhaustion detection, key-driven
//!   scrolling, pinned title, expanded-card spotlight, loading status and
//!   help footer.
//! - [`activation::Tracker`]: the scroll-position rule deciding which
//!   card is expanded, usable on its own with synthetic geometry.
//! - [`sentinel::Sentinel`]: the bottom-of-feed rule deciding when to
//!   request the next page.
//! - [`spinner::Model`]: the loading indicator on the feed's status line.
//! - [`help::Model`]: compact/full key binding help rendering.
//! - [`key`]: type-safe key bindings with help metadata.
//!
//! ## Quick start
//!
//! Implement [`feed::PageSource`] for your backend and embed a
//! [`feed::Model`]:
//!
//! ```rust
//! use async_trait::async_trait;
//! use bubbletea_scrollfeed::prelude::*;
//!
//! struct Backend;
//!
//! #[async_trait]
//! impl PageSource for Backend {
//!     type Item = DefaultCard;
//!
//!     async fn fetch_page(&self, req: PageRequest) -> Result<Vec<DefaultCard>, FetchError> {
//!         // One backend query per page; short page = no more data.
//!         Ok(vec![])
//!     }
//! }
//!
//! let mut feed = Feed::new(Backend, DefaultCardDelegate::new(), 80, 24)
//!     .with_title("Check points")
//!     .with_page_size(20);
//! let init_cmd = feed.start();
//! // Hand `init_cmd` to the runtime; forward messages to `feed.update`.
//! ```
//!
//! ## Fetch semantics
//!
//! Page fetches are strictly sequential: `load_more` is a guarded no-op
//! while a fetch is in flight or after the source has signaled exhaustion
//! (a page shorter than the page size, an empty page, or a failure under
//! the default [`feed::RetryPolicy::Stop`]). Every fetch runs under a
//! configurable deadline, and completions that outlive a
//! [`feed::Model::reset`] are discarded on arrival rather than cancelled.

pub mod activation;
pub mod feed;
pub mod help;
pub mod key;
pub mod sentinel;
pub mod spinner;

pub use activation::{LayoutProbe, StaticLayout, Tracker};
pub use feed::Model as Feed;
pub use feed::{
    Card, CardDelegate, DefaultCard, DefaultCardDelegate, DefaultCardStyles, FeedKeyMap,
    FeedStyles, FetchError, PageRequest, PageSource, RetryPolicy,
};
pub use help::Model as HelpModel;
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use sentinel::Sentinel;
pub use spinner::{Model as Spinner, TickMsg as SpinnerTickMsg, ELLIPSIS, LINE, MINI_DOT};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_scrollfeed::prelude::*;
/// ```
pub mod prelude {
    pub use crate::activation::{LayoutProbe, StaticLayout, Tracker};
    pub use crate::feed::Model as Feed;
    pub use crate::feed::{
        Card, CardDelegate, DefaultCard, DefaultCardDelegate, DefaultCardStyles, FeedKeyMap,
        FeedStyles, FetchError, PageRequest, PageSource, RetryPolicy,
    };
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
        Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::sentinel::Sentinel;
    pub use crate::spinner::Model as Spinner;
}
