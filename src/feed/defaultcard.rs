//! Default card type and delegate.
//!
//! [`DefaultCard`] is a label-plus-description card, the shape of an
//! identification tip in a catalog feed. [`DefaultCardDelegate`] renders it
//! as a single dim line while compact and as a highlighted label over a
//! wrapped description while expanded.

use super::{Card, CardDelegate, Model};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Left indent applied by both card states, in cells.
const CARD_INDENT: usize = 2;

/// Truncates `text` to at most `width` cells on a grapheme boundary,
/// appending `…` when anything was cut.
pub(super) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out.push('…');
    out
}

/// Greedy word wrap to `width` cells, at most `max_lines` lines; the last
/// line is truncated if the text goes on.
pub(super) fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate_width = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if candidate_width <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                break;
            }
        }
        // A single word wider than the line gets hard-truncated.
        current = if word.width() > width {
            truncate(word, width)
        } else {
            word.to_string()
        };
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    if lines.len() == max_lines {
        // Mark the cut if anything was dropped.
        let rendered: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
        if rendered < text.split_whitespace().count() {
            if let Some(last) = lines.last_mut() {
                if last.width() < width {
                    last.push('…');
                } else {
                    *last = truncate(last, width.saturating_sub(1));
                }
            }
        }
    }
    lines
}

/// A basic feed card: a short label and a longer description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultCard {
    /// The one-line label shown in both states.
    pub label: String,
    /// The longer text revealed when the card expands.
    pub description: String,
}

impl DefaultCard {
    /// Creates a card from a label and description.
    pub fn new(label: &str, description: &str) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

impl std::fmt::Display for DefaultCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl Card for DefaultCard {
    fn body(&self) -> String {
        self.description.clone()
    }
}

/// Styles for [`DefaultCardDelegate`].
#[derive(Debug, Clone)]
pub struct DefaultCardStyles {
    /// Label of a compact card.
    pub compact_label: Style,
    /// Label of the expanded card.
    pub expanded_label: Style,
    /// Description lines of the expanded card.
    pub expanded_body: Style,
}

impl Default for DefaultCardStyles {
    fn default() -> Self {
        let compact_label = Style::new()
            .foreground(Color::from("#dddddd"))
            .padding(0, 0, 0, 2);
        let expanded_label = Style::new()
            .border_style(lipgloss::normal_border())
            .border_left(true)
            .border_left_foreground(Color::from("#AD58B4"))
            .foreground(Color::from("#EE6FF8"))
            .padding(0, 0, 0, 1);
        let expanded_body = expanded_label.clone().foreground(Color::from("#AD58B4"));
        Self {
            compact_label,
            expanded_label,
            expanded_body,
        }
    }
}

/// Renders [`DefaultCard`]s: one dim line compact, label plus wrapped
/// description expanded.
#[derive(Debug, Clone)]
pub struct DefaultCardDelegate {
    /// Visual styles for both card states.
    pub styles: DefaultCardStyles,
    description_lines: usize,
    spacing: usize,
}

impl Default for DefaultCardDelegate {
    fn default() -> Self {
        Self {
            styles: DefaultCardStyles::default(),
            description_lines: 3,
            spacing: 1,
        }
    }
}

impl DefaultCardDelegate {
    /// Creates a delegate with default styles, three description lines and
    /// one blank row between cards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many description lines the expanded card shows
    /// (builder pattern). Clamped to at least 1.
    pub fn with_description_lines(mut self, lines: usize) -> Self {
        self.description_lines = lines.max(1);
        self
    }

    /// Sets the blank rows between cards (builder pattern).
    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    fn text_width<I: Card>(&self, m: &Model<I>) -> usize {
        m.width().saturating_sub(CARD_INDENT)
    }
}

impl<I: Card> CardDelegate<I> for DefaultCardDelegate {
    fn height(&self) -> usize {
        1
    }

    fn expanded_height(&self) -> usize {
        1 + self.description_lines
    }

    fn spacing(&self) -> usize {
        self.spacing
    }

    fn render_compact(&self, m: &Model<I>, _index: usize, item: &I) -> String {
        let width = self.text_width(m);
        if width == 0 {
            return String::new();
        }
        self.styles
            .compact_label
            .clone()
            .render(&truncate(&item.to_string(), width))
    }

    fn render_expanded(&self, m: &Model<I>, _index: usize, item: &I) -> String {
        let width = self.text_width(m);
        if width == 0 {
            return String::new();
        }
        let label = self
            .styles
            .expanded_label
            .clone()
            .render(&truncate(&item.to_string(), width));

        let mut lines = vec![label];
        let body = item.body();
        let mut body_lines = wrap(&body, width, self.description_lines);
        body_lines.resize(self.description_lines, String::new());
        for line in body_lines {
            lines.push(self.styles.expanded_body.clone().render(&line));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("a rather long label", 8);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 8);
    }

    #[test]
    fn test_truncate_handles_wide_graphemes() {
        let cut = truncate("日本語のラベル", 6);
        assert!(cut.width() <= 6);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap("one two three four", 9, 5);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_caps_line_count() {
        let lines = wrap("one two three four five six seven", 9, 2);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_card_display_and_body() {
        let card = DefaultCard::new("Union label", "Blue stitching dates it to the 70s");
        assert_eq!(card.to_string(), "Union label");
        assert!(card.body().contains("stitching"));
    }
}
