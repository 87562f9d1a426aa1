//! Styling for the feed chrome.
//!
//! Card appearance belongs to the delegate (see
//! [`super::DefaultCardStyles`]); the styles here cover everything around
//! the cards: the title in both of its modes, the status line, and the
//! initial-load error screen. All defaults use `AdaptiveColor` so they read
//! well on light and dark terminals.

use lipgloss_extras::prelude::*;

/// Styles for the feed's non-card elements.
#[derive(Debug, Clone)]
pub struct FeedStyles {
    /// The title while it scrolls with the content.
    pub title: Style,
    /// The title while it is pinned to the top row.
    pub pinned_title: Style,
    /// The status line shown while a page fetch is in flight.
    pub status: Style,
    /// Headline of the initial-load error screen.
    pub error_title: Style,
    /// Detail line of the initial-load error screen.
    pub error_detail: Style,
    /// Placeholder line for an empty feed.
    pub empty: Style,
}

impl Default for FeedStyles {
    fn default() -> Self {
        let title = Style::new()
            .bold(true)
            .foreground(AdaptiveColor {
                Light: "#1A1A1A",
                Dark: "#FFFDF5",
            })
            .padding(0, 1, 0, 1);
        let pinned_title = title.clone().background(AdaptiveColor {
            Light: "#E0E0DD",
            Dark: "#353533",
        });
        let status = Style::new().foreground(AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        });
        let error_title = Style::new().bold(true).foreground(AdaptiveColor {
            Light: "#C53F3F",
            Dark: "#ED567A",
        });
        let error_detail = Style::new().foreground(AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        });
        let empty = status.clone().italic(true);

        Self {
            title,
            pinned_title,
            status,
            error_title,
            error_detail,
            empty,
        }
    }
}
