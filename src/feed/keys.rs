//! Key bindings for scrolling the feed.

use crate::key::{self, KeyMap as KeyMapTrait};

/// Key bindings for feed navigation.
///
/// Defaults pair the standard navigation keys with vim-style alternates.
/// Replace individual bindings, or the whole map via
/// [`super::Model::with_keymap`], to customize.
#[derive(Debug, Clone)]
pub struct FeedKeyMap {
    /// Scroll up one row. Default: `↑`, `k`.
    pub up: key::Binding,
    /// Scroll down one row. Default: `↓`, `j`.
    pub down: key::Binding,
    /// Scroll up one viewport. Default: `PgUp`, `b`.
    pub page_up: key::Binding,
    /// Scroll down one viewport. Default: `PgDn`, `f`, `Space`.
    pub page_down: key::Binding,
    /// Jump to the top of the feed. Default: `Home`, `g`.
    pub go_to_start: key::Binding,
    /// Jump to the bottom of the feed. Default: `End`, `G`.
    pub go_to_end: key::Binding,
}

impl Default for FeedKeyMap {
    fn default() -> Self {
        Self {
            up: key::new_binding(vec![
                key::with_keys_str(&["up", "k"]),
                key::with_help("↑/k", "up"),
            ]),
            down: key::new_binding(vec![
                key::with_keys_str(&["down", "j"]),
                key::with_help("↓/j", "down"),
            ]),
            page_up: key::new_binding(vec![
                key::with_keys_str(&["pgup", "b"]),
                key::with_help("b/pgup", "page up"),
            ]),
            page_down: key::new_binding(vec![
                key::with_keys_str(&["pgdown", "f", "space"]),
                key::with_help("f/pgdn", "page down"),
            ]),
            go_to_start: key::new_binding(vec![
                key::with_keys_str(&["home", "g"]),
                key::with_help("g/home", "go to start"),
            ]),
            go_to_end: key::new_binding(vec![
                key::with_keys_str(&["end", "G"]),
                key::with_help("G/end", "go to end"),
            ]),
        }
    }
}

impl KeyMapTrait for FeedKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.up, &self.down, &self.page_up, &self.page_down]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.up, &self.down],
            vec![&self.page_up, &self.page_down],
            vec![&self.go_to_start, &self.go_to_end],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::KeyMsg;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_default_bindings_match() {
        let keymap = FeedKeyMap::default();
        let j = KeyMsg {
            key: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
        };
        assert!(keymap.down.matches(&j));
        assert!(!keymap.up.matches(&j));
    }

    #[test]
    fn test_help_listing() {
        let keymap = FeedKeyMap::default();
        assert_eq!(keymap.short_help().len(), 4);
        assert_eq!(keymap.full_help().len(), 3);
    }
}
