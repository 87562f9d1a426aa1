//! Scroll-driven active-card tracking.
//!
//! As a feed scrolls beneath a pinned title, exactly one card is rendered
//! in its expanded form: the next one about to slide under the title.
//! [`Tracker`] owns that decision. It is deliberately decoupled from any
//! rendering engine: geometry arrives through the [`LayoutProbe`] trait as
//! plain vertical offsets, so the selection rules can be exercised with
//! synthetic numbers (see the tests at the bottom of this file).
//!
//! Coordinates grow downward. A card whose top offset is greater than or
//! equal to the title's bottom offset sits visually at-or-below the title.
//!
//! # Selection rules
//!
//! On each [`Tracker::recompute`] call:
//!
//! 1. When tracking is disabled (the title is not pinned) or the probe
//!    holds no cards, the active index is cleared and no geometry is read.
//! 2. When the previous pass left the *last* card active ("locked"), only
//!    the second-to-last card is consulted: if its top is still at or below
//!    the boundary it takes over; otherwise the last card stays active even
//!    though it has scrolled past the boundary. The lock keeps the tail of
//!    the feed highlighted instead of dropping the highlight entirely.
//! 3. Otherwise the cards are scanned first to last and the first one whose
//!    top is at or below the boundary becomes active. If every card has
//!    scrolled above the boundary there is no active card.
//! 4. The lock flag is re-derived after every pass: it is set exactly when
//!    the active card is the final one.
//!
//! Any geometry reading that comes back `None` (a card mid-render, a
//! missing title) turns the whole pass into a no-op; the previous state is
//! kept and the next pass tries again.

/// Read-only geometry source for one activation pass.
///
/// Implementations return offsets in whatever vertical unit the host UI
/// uses (terminal rows here, pixels elsewhere); the tracker only compares
/// them. `None` means the element is not currently measurable, which
/// aborts the pass.
pub trait LayoutProbe {
    /// Number of cards currently rendered.
    fn card_count(&self) -> usize;

    /// Bottom edge of the title element, viewport-relative.
    fn title_bottom(&self) -> Option<i32>;

    /// Top edge of the card at `index`, viewport-relative.
    fn card_top(&self, index: usize) -> Option<i32>;
}

/// Simple probe over in-memory geometry, mainly for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    /// Bottom edge of the title; `None` while unmeasurable.
    pub title_bottom: Option<i32>,
    /// Top edge per card; `None` entries are unmeasurable cards.
    pub card_tops: Vec<Option<i32>>,
}

impl LayoutProbe for StaticLayout {
    fn card_count(&self) -> usize {
        self.card_tops.len()
    }

    fn title_bottom(&self) -> Option<i32> {
        self.title_bottom
    }

    fn card_top(&self, index: usize) -> Option<i32> {
        self.card_tops.get(index).copied().flatten()
    }
}

/// Tracks which card is active as the user scrolls.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    active: Option<usize>,
    last_card_locked: bool,
}

impl Tracker {
    /// Creates a tracker with no active card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the currently active card, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// True when the final card is active and held by the lock rule.
    pub fn is_last_card_locked(&self) -> bool {
        self.last_card_locked
    }

    /// Drops the active card and the lock, e.g. when the feed empties or
    /// pinning is switched off.
    pub fn clear(&mut self) {
        self.active = None;
        self.last_card_locked = false;
    }

    /// Runs one activation pass against the given geometry and returns the
    /// resulting active index.
    ///
    /// `pinned` gates the whole computation: when false the tracker clears
    /// itself without touching the probe.
    pub fn recompute(&mut self, pinned: bool, probe: &impl LayoutProbe) -> Option<usize> {
        if !pinned {
            self.clear();
            return None;
        }

        let count = probe.card_count();
        if count == 0 {
            self.clear();
            return None;
        }

        let Some(boundary) = probe.title_bottom() else {
            return self.active;
        };

        if self.last_card_locked {
            if count == 1 {
                // Only card in the feed; nothing to hand over to.
                self.active = Some(0);
            } else {
                let Some(runner_up_top) = probe.card_top(count - 2) else {
                    return self.active;
                };
                self.active = if runner_up_top >= boundary {
                    Some(count - 2)
                } else {
                    Some(count - 1)
                };
            }
        } else {
            let previous = self.active;
            self.active = None;
            for index in 0..count {
                let Some(top) = probe.card_top(index) else {
                    // Unmeasurable card: abandon the pass untouched.
                    self.active = previous;
                    return self.active;
                };
                if top >= boundary {
                    self.active = Some(index);
                    break;
                }
            }
        }

        self.last_card_locked = self.active == Some(count - 1);
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: i32 = 100;

    fn layout(tops: &[i32]) -> StaticLayout {
        StaticLayout {
            title_bottom: Some(BOUNDARY),
            card_tops: tops.iter().map(|&t| Some(t)).collect(),
        }
    }

    #[test]
    fn test_scan_selects_first_card_at_or_below_boundary() {
        let mut tracker = Tracker::new();
        let active = tracker.recompute(true, &layout(&[BOUNDARY - 50, BOUNDARY + 10, BOUNDARY + 80]));
        assert_eq!(active, Some(1));
        assert!(!tracker.is_last_card_locked());
    }

    #[test]
    fn test_boundary_touch_counts_as_below() {
        let mut tracker = Tracker::new();
        let active = tracker.recompute(true, &layout(&[BOUNDARY - 1, BOUNDARY, BOUNDARY + 40]));
        assert_eq!(active, Some(1));
    }

    #[test]
    fn test_no_card_qualifies() {
        let mut tracker = Tracker::new();
        let active = tracker.recompute(true, &layout(&[BOUNDARY - 90, BOUNDARY - 50, BOUNDARY - 10]));
        assert_eq!(active, None);
        assert!(!tracker.is_last_card_locked());
    }

    #[test]
    fn test_disabled_tracking_forces_none() {
        let mut tracker = Tracker::new();
        tracker.recompute(true, &layout(&[BOUNDARY + 10]));
        assert_eq!(tracker.active(), Some(0));

        let active = tracker.recompute(false, &layout(&[BOUNDARY + 10]));
        assert_eq!(active, None);
        assert!(!tracker.is_last_card_locked());
    }

    #[test]
    fn test_empty_probe_clears() {
        let mut tracker = Tracker::new();
        tracker.recompute(true, &layout(&[BOUNDARY + 10]));
        let active = tracker.recompute(true, &layout(&[]));
        assert_eq!(active, None);
    }

    #[test]
    fn test_last_card_becomes_locked() {
        let mut tracker = Tracker::new();
        // All cards except the last have scrolled above the boundary.
        let active = tracker.recompute(
            true,
            &layout(&[BOUNDARY - 80, BOUNDARY - 60, BOUNDARY - 40, BOUNDARY - 20, BOUNDARY + 5]),
        );
        assert_eq!(active, Some(4));
        assert!(tracker.is_last_card_locked());
    }

    #[test]
    fn test_lock_hands_over_to_runner_up_when_it_is_below_boundary() {
        let mut tracker = Tracker::new();
        tracker.recompute(
            true,
            &layout(&[BOUNDARY - 80, BOUNDARY - 60, BOUNDARY - 40, BOUNDARY - 20, BOUNDARY + 5]),
        );
        assert_eq!(tracker.active(), Some(4));

        // Scrolled back up: the second-to-last card sits below the boundary
        // again, so it takes the highlight.
        let active = tracker.recompute(
            true,
            &layout(&[BOUNDARY - 60, BOUNDARY - 40, BOUNDARY - 20, BOUNDARY + 10, BOUNDARY + 35]),
        );
        assert_eq!(active, Some(3));
        assert!(!tracker.is_last_card_locked());
    }

    #[test]
    fn test_lock_holds_while_runner_up_is_above_boundary() {
        let mut tracker = Tracker::new();
        tracker.recompute(
            true,
            &layout(&[BOUNDARY - 80, BOUNDARY - 60, BOUNDARY - 40, BOUNDARY - 20, BOUNDARY + 5]),
        );

        // Scrolled further down: every card is above the boundary now, but
        // the last one keeps the highlight.
        let active = tracker.recompute(
            true,
            &layout(&[BOUNDARY - 120, BOUNDARY - 100, BOUNDARY - 80, BOUNDARY - 60, BOUNDARY - 35]),
        );
        assert_eq!(active, Some(4));
        assert!(tracker.is_last_card_locked());
    }

    #[test]
    fn test_single_card_stays_locked() {
        let mut tracker = Tracker::new();
        tracker.recompute(true, &layout(&[BOUNDARY + 10]));
        assert!(tracker.is_last_card_locked());

        let active = tracker.recompute(true, &layout(&[BOUNDARY - 30]));
        assert_eq!(active, Some(0));
        assert!(tracker.is_last_card_locked());
    }

    #[test]
    fn test_missing_title_is_a_no_op() {
        let mut tracker = Tracker::new();
        tracker.recompute(true, &layout(&[BOUNDARY + 10, BOUNDARY + 40]));
        assert_eq!(tracker.active(), Some(0));

        let probe = StaticLayout {
            title_bottom: None,
            card_tops: vec![Some(BOUNDARY - 10), Some(BOUNDARY - 5)],
        };
        let active = tracker.recompute(true, &probe);
        assert_eq!(active, Some(0));
    }

    #[test]
    fn test_missing_card_aborts_scan_unchanged() {
        let mut tracker = Tracker::new();
        tracker.recompute(true, &layout(&[BOUNDARY + 10, BOUNDARY + 40]));
        assert_eq!(tracker.active(), Some(0));

        let probe = StaticLayout {
            title_bottom: Some(BOUNDARY),
            card_tops: vec![None, Some(BOUNDARY + 40)],
        };
        let active = tracker.recompute(true, &probe);
        assert_eq!(active, Some(0));
    }

    #[test]
    fn test_append_after_lock_consults_new_runner_up() {
        let mut tracker = Tracker::new();
        tracker.recompute(true, &layout(&[BOUNDARY - 20, BOUNDARY + 5]));
        assert_eq!(tracker.active(), Some(1));
        assert!(tracker.is_last_card_locked());

        // A page of cards arrives below the locked one. The old last card is
        // now second-to-last and still below the boundary, so it keeps the
        // highlight through the handover rule.
        let active = tracker.recompute(
            true,
            &layout(&[BOUNDARY - 20, BOUNDARY + 5, BOUNDARY + 30]),
        );
        assert_eq!(active, Some(1));
        assert!(!tracker.is_last_card_locked());
    }
}
