// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan drag helper: turn pointer positions into incremental pan deltas.
//!
//! ## Usage
//!
//! 1) Call [`PanDrag::start`] on pointer-down with the surface position.
//! 2) On each pointer-move, call [`PanDrag::update`] and feed the returned
//!    delta into the view's pan operation.
//! 3) Call [`PanDrag::end`] on pointer-up.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use gatemap_event_state::drag::PanDrag;
//!
//! let mut drag = PanDrag::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! assert_eq!(drag.update(Point::new(15.0, 22.0)), Some(Vec2::new(5.0, 2.0)));
//! assert_eq!(drag.update(Point::new(12.0, 22.0)), Some(Vec2::new(-3.0, 0.0)));
//!
//! drag.end();
//! assert_eq!(drag.update(Point::new(0.0, 0.0)), None);
//! ```

use kurbo::{Point, Vec2};

/// Tracks one pan gesture.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct PanDrag {
    last_pos: Option<Point>,
}

impl PanDrag {
    /// Starts a pan at `pos`, replacing any gesture in progress.
    pub fn start(&mut self, pos: Point) {
        self.last_pos = Some(pos);
    }

    /// Moves the pointer to `pos`, returning the delta since the previous event.
    ///
    /// Returns `None` when no pan is in progress.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let last = self.last_pos.as_mut()?;
        let delta = pos - *last;
        *last = pos;
        Some(delta)
    }

    /// Ends the pan.
    pub fn end(&mut self) {
        self.last_pos = None;
    }

    /// Returns `true` while a pan is in progress.
    pub fn is_active(&self) -> bool {
        self.last_pos.is_some()
    }
}
