//! Animated loading indicator for the feed's status line.
//!
//! While a page fetch is in flight the feed shows a spinner next to its
//! loading message. The component is driven by [`TickMsg`] messages that it
//! schedules for itself; each message carries the owning spinner's id and a
//! sequence tag so that stale or foreign ticks are ignored and the
//! animation cannot be double-driven.
//!
//! ```rust
//! use bubbletea_scrollfeed::spinner::{Model, MINI_DOT};
//!
//! let spinner = Model::new().with_frames(MINI_DOT.clone());
//! assert!(!spinner.view().is_empty());
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A frame set and the delay between frames.
#[derive(Debug, Clone)]
pub struct Frames {
    /// Animation frames, cycled in order.
    pub frames: Vec<String>,
    /// Delay between frames; smaller is faster.
    pub fps: Duration,
}

/// Classic line spinner: `| / - \`.
pub static LINE: Lazy<Frames> = Lazy::new(|| Frames {
    frames: vec!["|", "/", "-", "\\"].into_iter().map(String::from).collect(),
    fps: Duration::from_millis(100),
});

/// Braille dot spinner, compact enough for a one-cell status slot.
pub static MINI_DOT: Lazy<Frames> = Lazy::new(|| Frames {
    frames: vec!["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]
        .into_iter()
        .map(String::from)
        .collect(),
    fps: Duration::from_millis(83),
});

/// Growing ellipsis for textual loading lines.
pub static ELLIPSIS: Lazy<Frames> = Lazy::new(|| Frames {
    frames: vec!["", ".", "..", "..."].into_iter().map(String::from).collect(),
    fps: Duration::from_millis(333),
});

/// Message that advances a spinner by one frame.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Id of the spinner the tick belongs to.
    pub id: i64,
    /// Sequence tag; ticks with a stale tag are dropped.
    pub tag: i64,
}

/// Spinner state: the current frame plus routing identity.
#[derive(Debug, Clone)]
pub struct Model {
    /// The frame set being animated.
    pub frames: Frames,
    /// Style applied to the rendered frame.
    pub style: Style,
    frame: usize,
    id: i64,
    tag: i64,
}

impl Model {
    /// Creates a spinner with the `MINI_DOT` frames and no styling.
    pub fn new() -> Self {
        Self {
            frames: MINI_DOT.clone(),
            style: Style::new(),
            frame: 0,
            id: next_id(),
            tag: 0,
        }
    }

    /// Sets the frame set (builder pattern).
    pub fn with_frames(mut self, frames: Frames) -> Self {
        self.frames = frames;
        self.frame = 0;
        self
    }

    /// Sets the style applied to each frame (builder pattern).
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// This spinner's unique id, used to route [`TickMsg`]s.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Command that starts (or restarts) the animation.
    pub fn start(&mut self) -> Cmd {
        self.tag += 1;
        self.tick()
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.frames.fps, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Advances the animation when the message is a tick addressed to this
    /// spinner; returns the command scheduling the next frame.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick_msg = msg.downcast_ref::<TickMsg>()?;
        if tick_msg.id != self.id || tick_msg.tag != self.tag {
            return None;
        }
        self.frame = (self.frame + 1) % self.frames.frames.len().max(1);
        self.tag += 1;
        Some(self.tick())
    }

    /// Renders the current frame.
    pub fn view(&self) -> String {
        match self.frames.frames.get(self.frame) {
            Some(frame) => self.style.render(frame),
            None => String::new(),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        assert_ne!(Model::new().id(), Model::new().id());
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut spinner = Model::new().with_frames(LINE.clone());
        let _ = spinner.start();
        assert_eq!(spinner.view(), "|");

        let msg: Msg = Box::new(TickMsg {
            id: spinner.id(),
            tag: 1,
        });
        let next = spinner.update(&msg);
        assert!(next.is_some());
        assert_eq!(spinner.view(), "/");
    }

    #[test]
    fn test_foreign_and_stale_ticks_ignored() {
        let mut spinner = Model::new().with_frames(LINE.clone());
        let _ = spinner.start();

        let foreign: Msg = Box::new(TickMsg {
            id: spinner.id() + 999,
            tag: 1,
        });
        assert!(spinner.update(&foreign).is_none());

        let stale: Msg = Box::new(TickMsg {
            id: spinner.id(),
            tag: 0,
        });
        assert!(spinner.update(&stale).is_none());
        assert_eq!(spinner.view(), "|");
    }

    #[test]
    fn test_frames_wrap() {
        let mut spinner = Model::new().with_frames(LINE.clone());
        let _ = spinner.start();
        for _ in 0..4 {
            let msg: Msg = Box::new(TickMsg {
                id: spinner.id(),
                tag: spinner.tag,
            });
            spinner.update(&msg);
        }
        assert_eq!(spinner.view(), "|");
    }
}
