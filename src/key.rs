//! Type-safe key bindings for scrollfeed components.
//!
//! A [`Binding`] groups one or more key combinations under a single action
//! together with the help text shown in the feed's footer. Components store
//! their bindings in a keymap struct (see [`crate::feed::FeedKeyMap`]) and
//! implement the [`KeyMap`] trait so the help view can render them.
//!
//! Bindings can be built either with the builder methods:
//!
//! ```rust
//! use bubbletea_scrollfeed::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! let down = Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
//!     .with_help("↓/j", "scroll down");
//! assert_eq!(down.keys().len(), 2);
//! ```
//!
//! or with the option-style constructors, which accept key names as strings:
//!
//! ```rust
//! use bubbletea_scrollfeed::key;
//!
//! let page_down = key::new_binding(vec![
//!     key::with_keys_str(&["pgdown", "f", "space"]),
//!     key::with_help("f/pgdn", "page down"),
//! ]);
//! assert_eq!(page_down.keys().len(), 3);
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination: a key code plus its modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code of the combination.
    pub code: KeyCode,
    /// Modifier keys that must be held (empty for plain keys).
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

impl From<char> for KeyPress {
    fn from(c: char) -> Self {
        KeyCode::Char(c).into()
    }
}

impl From<&str> for KeyPress {
    /// Parses a human-readable key name.
    ///
    /// Accepts the names used throughout this crate's default keymaps:
    /// `"up"`, `"down"`, `"left"`, `"right"`, `"pgup"`, `"pgdown"`,
    /// `"home"`, `"end"`, `"enter"`, `"esc"`, `"tab"`, `"space"`,
    /// single characters (`"g"`), and `ctrl+`/`alt+`/`shift+` prefixes
    /// (`"ctrl+u"`). Unrecognized names map to [`KeyCode::Null`], which
    /// matches nothing.
    fn from(s: &str) -> Self {
        let mut mods = KeyModifiers::NONE;
        let mut name = s;
        loop {
            if let Some(rest) = name.strip_prefix("ctrl+") {
                mods |= KeyModifiers::CONTROL;
                name = rest;
            } else if let Some(rest) = name.strip_prefix("alt+") {
                mods |= KeyModifiers::ALT;
                name = rest;
            } else if let Some(rest) = name.strip_prefix("shift+") {
                mods |= KeyModifiers::SHIFT;
                name = rest;
            } else {
                break;
            }
        }

        let code = match name {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "pgup" | "pageup" => KeyCode::PageUp,
            "pgdown" | "pagedown" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => KeyCode::Null,
                }
            }
        };

        Self { code, mods }
    }
}

/// Help text for a binding: the key column and its description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Display form of the keys, e.g. `"↓/j"`.
    pub key: String,
    /// What the binding does, e.g. `"scroll down"`.
    pub desc: String,
}

/// A set of key combinations bound to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from a list of key combinations.
    ///
    /// Anything convertible to [`KeyPress`] is accepted: bare
    /// [`KeyCode`]s, `(KeyCode, KeyModifiers)` tuples, chars, or key name
    /// strings such as `"ctrl+u"`.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text shown for this binding (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// The key combinations this binding responds to.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text attached to this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding currently participates in matching and help.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding at runtime.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns true if the key message matches any combination of this
    /// binding. Disabled bindings never match.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled()
            && self
                .keys
                .iter()
                .any(|k| k.code == msg.key && k.mods == msg.modifiers)
    }
}

/// A configuration option for [`new_binding`].
#[derive(Debug, Clone)]
pub enum BindingOpt {
    /// Replaces the binding's key combinations.
    Keys(Vec<KeyPress>),
    /// Sets the binding's help text.
    Help(Help),
    /// Creates the binding disabled.
    Disabled,
}

/// Creates a binding from a list of options, Go-bubbles style.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        match opt {
            BindingOpt::Keys(keys) => binding.keys = keys,
            BindingOpt::Help(help) => binding.help = help,
            BindingOpt::Disabled => binding.disabled = true,
        }
    }
    binding
}

/// Option: bind the given key codes.
pub fn with_keys(keys: Vec<KeyCode>) -> BindingOpt {
    BindingOpt::Keys(keys.into_iter().map(Into::into).collect())
}

/// Option: bind keys given by name (see [`KeyPress`] string conversion for
/// the accepted names).
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    BindingOpt::Keys(keys.iter().map(|s| KeyPress::from(*s)).collect())
}

/// Option: set the help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    BindingOpt::Help(Help {
        key: key.to_string(),
        desc: desc.to_string(),
    })
}

/// Option: create the binding disabled.
pub fn with_disabled() -> BindingOpt {
    BindingOpt::Disabled
}

/// Returns true if the message matches the binding.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Returns true if the message matches any of the bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Trait for keymaps that can describe themselves to the help view.
///
/// Implement this on a component's keymap struct; [`crate::help::Model`]
/// renders the result as the footer line.
pub trait KeyMap {
    /// The essential bindings, shown in the compact single-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// All bindings, grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_binding_matches_any_combination() {
        let b = Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]);
        assert!(b.matches(&key(KeyCode::Down)));
        assert!(b.matches(&key(KeyCode::Char('j'))));
        assert!(!b.matches(&key(KeyCode::Up)));
    }

    #[test]
    fn test_modifiers_must_match() {
        let b = Binding::new(vec!["ctrl+u"]);
        assert!(!b.matches(&key(KeyCode::Char('u'))));
        assert!(b.matches(&KeyMsg {
            key: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
        }));
    }

    #[test]
    fn test_string_names_parse() {
        assert_eq!(KeyPress::from("pgup").code, KeyCode::PageUp);
        assert_eq!(KeyPress::from("space").code, KeyCode::Char(' '));
        assert_eq!(KeyPress::from("g").code, KeyCode::Char('g'));
        assert_eq!(KeyPress::from("bogus-name").code, KeyCode::Null);
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = Binding::new(vec![KeyCode::Enter]).with_help("enter", "go");
        b.set_enabled(false);
        assert!(!b.matches(&key(KeyCode::Enter)));
        b.set_enabled(true);
        assert!(b.matches(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_new_binding_options() {
        let b = new_binding(vec![
            with_keys_str(&["down", "j"]),
            with_help("↓/j", "scroll down"),
        ]);
        assert_eq!(b.keys().len(), 2);
        assert_eq!(b.help().key, "↓/j");
        assert!(b.enabled());

        let d = new_binding(vec![with_keys(vec![KeyCode::Up]), with_disabled()]);
        assert!(!d.enabled());
    }

    #[test]
    fn test_match_helpers() {
        let up = Binding::new(vec![KeyCode::Up]);
        let down = Binding::new(vec![KeyCode::Down]);
        let msg = key(KeyCode::Down);
        assert!(!matches_binding(&msg, &up));
        assert!(matches(&msg, &[&up, &down]));
    }
}
