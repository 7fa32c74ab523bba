// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

/// The data-space rectangle currently shown on the drawing surface.
///
/// Horizontal values grow to the right and vertical values grow upward. The
/// view code keeps `hmax > hmin` and `vmax > vmin` for every window it
/// produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewWindow {
    /// Left edge.
    pub hmin: f64,
    /// Right edge.
    pub hmax: f64,
    /// Bottom edge.
    pub vmin: f64,
    /// Top edge.
    pub vmax: f64,
}

impl ViewWindow {
    /// Creates a window from its four edges.
    #[must_use]
    pub const fn new(hmin: f64, hmax: f64, vmin: f64, vmax: f64) -> Self {
        Self {
            hmin,
            hmax,
            vmin,
            vmax,
        }
    }

    /// Horizontal span.
    #[must_use]
    pub fn hrange(&self) -> f64 {
        self.hmax - self.hmin
    }

    /// Vertical span.
    #[must_use]
    pub fn vrange(&self) -> f64 {
        self.vmax - self.vmin
    }

    /// Center of the window.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.hmin + self.hmax) / 2.0,
            (self.vmin + self.vmax) / 2.0,
        )
    }

    /// Whether both spans are positive and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let (h, v) = (self.hrange(), self.vrange());
        h.is_finite() && v.is_finite() && h > 0.0 && v > 0.0
    }

    /// Whether `point` lies inside or on the edge of the window.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (self.hmin..=self.hmax).contains(&point.x) && (self.vmin..=self.vmax).contains(&point.y)
    }

    /// The window as a rectangle (`x` horizontal, `y` vertical).
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.hmin, self.vmin, self.hmax, self.vmax)
    }

    /// The window covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.x1, rect.y0, rect.y1)
    }

    /// Shifts all four edges by `delta` data units.
    #[must_use]
    pub fn translate(self, delta: Vec2) -> Self {
        Self::new(
            self.hmin + delta.x,
            self.hmax + delta.x,
            self.vmin + delta.y,
            self.vmax + delta.y,
        )
    }

    /// Scales every edge's distance from `anchor` by `factor`.
    ///
    /// The anchor itself keeps its place; `factor < 1` shows less data.
    #[must_use]
    pub fn scale_about(self, anchor: Point, factor: f64) -> Self {
        Self::new(
            anchor.x - (anchor.x - self.hmin) * factor,
            anchor.x - (anchor.x - self.hmax) * factor,
            anchor.y - (anchor.y - self.vmin) * factor,
            anchor.y - (anchor.y - self.vmax) * factor,
        )
    }

    /// Grows each span by `margin` times its size on both sides.
    #[must_use]
    pub fn expand_by_fraction(self, margin: f64) -> Self {
        let dh = self.hrange() * margin;
        let dv = self.vrange() * margin;
        Self::new(self.hmin - dh, self.hmax + dh, self.vmin - dv, self.vmax + dv)
    }
}

impl Default for ViewWindow {
    /// The unit square, which is what an empty diagram shows.
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
}
