// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle selection over a drawing surface.
//!
//! The tool moves through `Inactive → Ready → Drawing → Inactive`:
//!
//! - [`RectSelect::activate`] arms the tool and forgets any earlier rectangle.
//! - The next pointer-down inside the surface starts drawing; outside the
//!   surface it cancels.
//! - Pointer moves update the live rectangle, clamped to the surface.
//! - Pointer-up commits the rectangle and returns to `Inactive`. The committed
//!   rectangle stays available as the save region until the tool is armed
//!   again or [`RectSelect::clear`] is called.
//!
//! A second pointer-down while drawing cancels the gesture.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use gatemap_event_state::rect_select::{RectSelect, SelectOutcome};
//!
//! let surface = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let mut select = RectSelect::new();
//!
//! select.activate();
//! assert_eq!(select.pointer_down(Point::new(300.0, 400.0), surface), SelectOutcome::Started);
//! // Moving past the surface edge clamps to it.
//! select.pointer_move(Point::new(900.0, 100.0), surface);
//! let outcome = select.pointer_up(Point::new(100.0, 100.0), surface);
//!
//! let committed = Rect::new(100.0, 100.0, 300.0, 400.0);
//! assert_eq!(outcome, SelectOutcome::Committed(committed));
//! assert_eq!(select.save_region(), Some(committed));
//! ```

use kurbo::{Point, Rect};

/// Where the tool is in its gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectPhase {
    /// Not selecting; pointer events belong to other tools.
    #[default]
    Inactive,
    /// Armed; the next pointer-down starts a rectangle.
    Ready,
    /// A rectangle is being drawn.
    Drawing,
}

/// What a pointer event did to the selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectOutcome {
    /// The event was not consumed by the tool.
    Ignored,
    /// A rectangle was started.
    Started,
    /// The live rectangle changed.
    Updated(Rect),
    /// A rectangle was committed.
    Committed(Rect),
    /// The gesture was abandoned and the tool went inactive.
    Cancelled,
}

impl SelectOutcome {
    /// Whether the tool consumed the event.
    #[must_use]
    pub fn is_consumed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Rectangle selection state machine in surface pixel space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RectSelect {
    phase: SelectPhase,
    origin: Option<Point>,
    current: Option<Point>,
    committed: Option<Rect>,
}

impl RectSelect {
    /// Creates an inactive tool with no committed rectangle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SelectPhase {
        self.phase
    }

    /// Whether the tool is armed or drawing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != SelectPhase::Inactive
    }

    /// Arms the tool from any phase and forgets any earlier rectangle.
    pub fn activate(&mut self) {
        self.phase = SelectPhase::Ready;
        self.origin = None;
        self.current = None;
        self.committed = None;
    }

    /// Handles a pointer-down at `pos` on a surface spanning `bounds`.
    pub fn pointer_down(&mut self, pos: Point, bounds: Rect) -> SelectOutcome {
        match self.phase {
            SelectPhase::Inactive => SelectOutcome::Ignored,
            SelectPhase::Ready if contains_inclusive(bounds, pos) => {
                self.origin = Some(pos);
                self.current = Some(pos);
                self.phase = SelectPhase::Drawing;
                SelectOutcome::Started
            }
            SelectPhase::Ready | SelectPhase::Drawing => {
                self.abort();
                SelectOutcome::Cancelled
            }
        }
    }

    /// Handles a pointer move; only meaningful while drawing.
    pub fn pointer_move(&mut self, pos: Point, bounds: Rect) -> SelectOutcome {
        if self.phase != SelectPhase::Drawing {
            return SelectOutcome::Ignored;
        }
        self.current = Some(clamp_to(bounds, pos));
        self.live_rect()
            .map_or(SelectOutcome::Ignored, SelectOutcome::Updated)
    }

    /// Handles a pointer-up; commits the rectangle while drawing.
    pub fn pointer_up(&mut self, pos: Point, bounds: Rect) -> SelectOutcome {
        if self.phase != SelectPhase::Drawing {
            return SelectOutcome::Ignored;
        }
        self.current = Some(clamp_to(bounds, pos));
        let rect = self.live_rect();
        self.phase = SelectPhase::Inactive;
        self.origin = None;
        self.current = None;
        match rect {
            Some(rect) => {
                self.committed = Some(rect);
                SelectOutcome::Committed(rect)
            }
            None => SelectOutcome::Cancelled,
        }
    }

    /// Abandons an armed or in-progress gesture.
    ///
    /// A committed rectangle is kept. Returns `true` if the tool was active.
    pub fn cancel(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.abort();
        true
    }

    /// Returns to `Inactive` and forgets the committed rectangle.
    ///
    /// Returns `true` if anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = self.is_active() || self.committed.is_some();
        *self = Self::default();
        changed
    }

    /// The rectangle being drawn, normalized so `x0 <= x1` and `y0 <= y1`.
    #[must_use]
    pub fn live_rect(&self) -> Option<Rect> {
        match (self.phase, self.origin, self.current) {
            (SelectPhase::Drawing, Some(origin), Some(current)) => {
                Some(Rect::from_points(origin, current))
            }
            _ => None,
        }
    }

    /// The last committed rectangle, possibly with zero area.
    #[must_use]
    pub fn committed(&self) -> Option<Rect> {
        self.committed
    }

    /// The committed rectangle if it has positive area.
    ///
    /// A zero-width or zero-height rectangle means "no selection" for export.
    #[must_use]
    pub fn save_region(&self) -> Option<Rect> {
        self.committed
            .filter(|r| r.width() > 0.0 && r.height() > 0.0)
    }

    fn abort(&mut self) {
        self.phase = SelectPhase::Inactive;
        self.origin = None;
        self.current = None;
    }
}

fn contains_inclusive(bounds: Rect, pos: Point) -> bool {
    (bounds.x0..=bounds.x1).contains(&pos.x) && (bounds.y0..=bounds.y1).contains(&pos.y)
}

fn clamp_to(bounds: Rect, pos: Point) -> Point {
    Point::new(
        pos.x.clamp(bounds.x0, bounds.x1),
        pos.y.clamp(bounds.y0, bounds.y1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    #[test]
    fn inactive_tool_ignores_pointer() {
        let mut select = RectSelect::new();
        let p = Point::new(10.0, 10.0);
        assert_eq!(select.pointer_down(p, SURFACE), SelectOutcome::Ignored);
        assert_eq!(select.pointer_move(p, SURFACE), SelectOutcome::Ignored);
        assert_eq!(select.pointer_up(p, SURFACE), SelectOutcome::Ignored);
        assert_eq!(select.committed(), None);
    }

    #[test]
    fn full_gesture_commits_normalized_rect() {
        let mut select = RectSelect::new();
        select.activate();
        assert_eq!(select.phase(), SelectPhase::Ready);
        select.pointer_down(Point::new(300.0, 400.0), SURFACE);
        assert_eq!(select.phase(), SelectPhase::Drawing);
        assert_eq!(
            select.pointer_move(Point::new(200.0, 500.0), SURFACE),
            SelectOutcome::Updated(Rect::new(200.0, 400.0, 300.0, 500.0))
        );
        assert_eq!(
            select.pointer_up(Point::new(100.0, 100.0), SURFACE),
            SelectOutcome::Committed(Rect::new(100.0, 100.0, 300.0, 400.0))
        );
        assert_eq!(select.phase(), SelectPhase::Inactive);
        assert_eq!(select.live_rect(), None);
    }

    #[test]
    fn corners_are_clamped_to_surface() {
        let mut select = RectSelect::new();
        select.activate();
        select.pointer_down(Point::new(700.0, 50.0), SURFACE);
        let SelectOutcome::Committed(rect) =
            select.pointer_up(Point::new(1200.0, -80.0), SURFACE)
        else {
            panic!("expected a committed rectangle");
        };
        assert_eq!(rect, Rect::new(700.0, 0.0, 800.0, 50.0));
        assert!(rect.x0 >= 0.0 && rect.x1 <= 800.0 && rect.y0 >= 0.0 && rect.y1 <= 600.0);
    }

    #[test]
    fn pointer_down_outside_cancels() {
        let mut select = RectSelect::new();
        select.activate();
        assert_eq!(
            select.pointer_down(Point::new(-1.0, 10.0), SURFACE),
            SelectOutcome::Cancelled
        );
        assert!(!select.is_active());
    }

    #[test]
    fn second_pointer_down_cancels_drawing() {
        let mut select = RectSelect::new();
        select.activate();
        select.pointer_down(Point::new(10.0, 10.0), SURFACE);
        assert_eq!(
            select.pointer_down(Point::new(20.0, 20.0), SURFACE),
            SelectOutcome::Cancelled
        );
        assert_eq!(select.committed(), None);
        assert!(!select.is_active());
    }

    #[test]
    fn zero_area_commit_is_not_a_save_region() {
        let mut select = RectSelect::new();
        select.activate();
        select.pointer_down(Point::new(10.0, 10.0), SURFACE);
        select.pointer_up(Point::new(10.0, 90.0), SURFACE);
        assert_eq!(select.committed(), Some(Rect::new(10.0, 10.0, 10.0, 90.0)));
        assert_eq!(select.save_region(), None);
    }

    #[test]
    fn activate_forgets_committed_and_cancel_keeps_it() {
        let mut select = RectSelect::new();
        select.activate();
        select.pointer_down(Point::new(10.0, 10.0), SURFACE);
        select.pointer_up(Point::new(50.0, 50.0), SURFACE);
        assert!(select.save_region().is_some());

        assert!(!select.cancel());
        assert!(select.save_region().is_some());

        select.activate();
        assert_eq!(select.committed(), None);
        assert!(select.cancel());
        assert!(!select.clear());
    }

    #[test]
    fn clear_drops_committed() {
        let mut select = RectSelect::new();
        select.activate();
        select.pointer_down(Point::new(10.0, 10.0), SURFACE);
        select.pointer_up(Point::new(50.0, 50.0), SURFACE);
        assert!(select.clear());
        assert_eq!(select, RectSelect::new());
    }
}
