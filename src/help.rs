//! Help footer for scrollfeed components.
//!
//! Renders the key bindings of any [`crate::key::KeyMap`] either as a
//! compact single line (the feed's default footer) or as aligned columns
//! when expanded:
//!
//! ```text
//! ↑/k up • ↓/j down • f/pgdn page down • g top
//! ```
//!
//! ```rust
//! use bubbletea_scrollfeed::help;
//! use bubbletea_scrollfeed::feed::FeedKeyMap;
//!
//! let model = help::Model::new().with_width(60);
//! let line = model.view(&FeedKeyMap::default());
//! assert!(!line.is_empty());
//! ```

use crate::key::{Binding, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help view elements.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for key names.
    pub key: Style,
    /// Style for binding descriptions.
    pub desc: Style,
    /// Style for separators and the truncation ellipsis.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let separator = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });
        Self {
            key,
            desc,
            separator,
        }
    }
}

/// The help view model.
#[derive(Debug, Clone)]
pub struct Model {
    /// When true, [`Model::view`] renders the grouped multi-column help
    /// instead of the single line.
    pub show_all: bool,
    /// Maximum width in cells; 0 means unconstrained.
    pub width: usize,
    /// Separator between short-help entries.
    pub short_separator: String,
    /// Separator between full-help columns.
    pub full_separator: String,
    /// Marker appended when entries are dropped for width.
    pub ellipsis: String,
    /// Visual styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help model with default separators and adaptive styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum render width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the keymap: short view normally, full view when `show_all`.
    pub fn view<K: KeyMap + ?Sized>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders the single-line help for the given bindings, truncating with
    /// an ellipsis once the width budget is spent.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        let mut out = String::new();
        let mut total_width = 0;
        for binding in bindings {
            if !binding.enabled() {
                continue;
            }
            let help = binding.help();
            let entry = format!(
                "{}{} {}",
                if total_width > 0 { separator.as_str() } else { "" },
                self.styles.key.clone().inline(true).render(&help.key),
                self.styles.desc.clone().inline(true).render(&help.desc),
            );
            let entry_width = lipgloss::width_visible(&entry);
            if self.width > 0 && total_width + entry_width > self.width {
                out.push_str(&self.truncation_tail());
                break;
            }
            total_width += entry_width;
            out.push_str(&entry);
        }
        out
    }

    /// Renders the grouped help, one column per binding group.
    pub fn full_help_view(&self, groups: Vec<Vec<&Binding>>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        let mut columns: Vec<String> = Vec::new();
        let mut total_width = 0;
        for group in groups {
            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    format!(
                        "{} {}",
                        self.styles.key.clone().inline(true).render(&help.key),
                        self.styles.desc.clone().inline(true).render(&help.desc),
                    )
                })
                .collect();
            if rows.is_empty() {
                continue;
            }
            let column = rows.join("\n");
            let column_width = lipgloss::width_visible(&column);
            if self.width > 0 && total_width + column_width > self.width {
                columns.push(self.truncation_tail());
                break;
            }
            total_width += column_width;
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(column.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    fn truncation_tail(&self) -> String {
        format!(
            " {}",
            self.styles
                .separator
                .clone()
                .inline(true)
                .render(&self.ellipsis)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key;

    struct TwoBindings {
        up: Binding,
        down: Binding,
    }

    impl KeyMap for TwoBindings {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.up, &self.down]
        }

        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.up], vec![&self.down]]
        }
    }

    fn keymap() -> TwoBindings {
        TwoBindings {
            up: key::new_binding(vec![key::with_keys_str(&["up"]), key::with_help("↑", "up")]),
            down: key::new_binding(vec![
                key::with_keys_str(&["down"]),
                key::with_help("↓", "down"),
            ]),
        }
    }

    #[test]
    fn test_short_help_lists_enabled_bindings() {
        let view = Model::new().view(&keymap());
        assert!(view.contains("up"));
        assert!(view.contains("down"));
    }

    #[test]
    fn test_disabled_bindings_are_hidden() {
        let mut km = keymap();
        km.down.set_enabled(false);
        let view = Model::new().view(&km);
        assert!(view.contains("up"));
        assert!(!view.contains("down"));
    }

    #[test]
    fn test_full_help_one_column_per_group() {
        let mut model = Model::new();
        model.show_all = true;
        let view = model.view(&keymap());
        assert!(view.contains("up"));
        assert!(view.contains("down"));
    }
}
