// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use gatemap_geometry::DataExtent;
use kurbo::{Point, Rect, Size, Vec2};

use crate::modes::{AspectFix, ZoomDirection};
use crate::window::ViewWindow;

/// Data-space stretch applied by one zoom step.
pub const ZOOM_FACTOR: f64 = 1.2;

/// Fraction of the data span added on each side when fitting.
pub const DEFAULT_MARGIN: f64 = 0.1;

const DEFAULT_DPI: f64 = 100.0;

/// Maps a data-space [`ViewWindow`] onto a drawing surface.
///
/// The surface is stored as a physical size in inches plus a resolution, so
/// that pixel dimensions are derived (`inches * dpi`). Surface pixel space has
/// its origin at the bottom-left corner with `y` growing upward; use
/// [`ViewTransform::flip_y`] to convert from top-left host coordinates.
///
/// Every operation keeps the window's spans positive. Operations that cannot
/// be carried out (non-positive sizes, empty data) leave the state untouched.
#[derive(Clone, Debug)]
pub struct ViewTransform {
    window: ViewWindow,
    size_inches: Size,
    dpi: f64,
}

impl ViewTransform {
    /// Creates a transform over a `surface` (in pixels) at `dpi`.
    ///
    /// - The initial window is the unit square.
    /// - Non-positive surface dimensions fall back to one pixel, and a
    ///   non-positive `dpi` falls back to `100`.
    #[must_use]
    pub fn new(surface: Size, dpi: f64) -> Self {
        let dpi = if dpi.is_finite() && dpi > 0.0 {
            dpi
        } else {
            DEFAULT_DPI
        };
        let surface = Size::new(positive_or_one(surface.width), positive_or_one(surface.height));
        Self {
            window: ViewWindow::default(),
            size_inches: Size::new(surface.width / dpi, surface.height / dpi),
            dpi,
        }
    }

    /// The visible data window.
    #[must_use]
    pub fn window(&self) -> ViewWindow {
        self.window
    }

    /// Replaces the visible window.
    ///
    /// Windows with a non-positive or non-finite span are ignored. The window
    /// is used as given; callers wanting an aspect-correct view should call
    /// [`ViewTransform::fit_to_surface_resize`] afterwards.
    pub fn set_window(&mut self, window: ViewWindow) {
        if window.is_valid() {
            self.window = window;
        }
    }

    /// Display resolution in dots per inch.
    #[must_use]
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Physical surface size.
    #[must_use]
    pub fn size_inches(&self) -> Size {
        self.size_inches
    }

    /// Surface size in pixels.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        self.size_inches * self.dpi
    }

    /// Surface bounds in pixel space, `(0, 0)` to `(width, height)`.
    #[must_use]
    pub fn surface_rect(&self) -> Rect {
        self.surface_size().to_rect()
    }

    /// Data units covered by one surface pixel on each axis.
    #[must_use]
    pub fn data_per_pixel(&self) -> Vec2 {
        let size = self.surface_size();
        Vec2::new(
            self.window.hrange() / size.width,
            self.window.vrange() / size.height,
        )
    }

    /// Converts a surface pixel position to data coordinates.
    #[must_use]
    pub fn pixel_to_data(&self, pixel: Point) -> Point {
        let size = self.surface_size();
        Point::new(
            self.window.hmin + self.window.hrange() * (pixel.x / size.width),
            self.window.vmin + self.window.vrange() * (pixel.y / size.height),
        )
    }

    /// Converts data coordinates to a surface pixel position.
    #[must_use]
    pub fn data_to_pixel(&self, data: Point) -> Point {
        let size = self.surface_size();
        Point::new(
            (data.x - self.window.hmin) / self.window.hrange() * size.width,
            (data.y - self.window.vmin) / self.window.vrange() * size.height,
        )
    }

    /// Flips a pixel position between bottom-left and top-left origins.
    ///
    /// The mapping is its own inverse.
    #[must_use]
    pub fn flip_y(&self, pixel: Point) -> Point {
        Point::new(pixel.x, self.surface_size().height - pixel.y)
    }

    /// Pans by a pixel delta so that content follows the pointer.
    pub fn pan(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let per_pixel = self.data_per_pixel();
        self.window = self.window.translate(Vec2::new(
            -delta.x * per_pixel.x,
            -delta.y * per_pixel.y,
        ));
    }

    /// Zooms one step about a pixel anchor.
    ///
    /// The data point under `anchor` stays under it. Zooming in and then out
    /// about the same anchor restores the window up to rounding.
    pub fn zoom(&mut self, anchor: Point, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => 1.0 / ZOOM_FACTOR,
            ZoomDirection::Out => ZOOM_FACTOR,
        };
        self.zoom_by(anchor, factor);
    }

    /// Scales the visible data span about a pixel anchor by `factor`.
    ///
    /// `factor < 1` zooms in. Non-positive or non-finite factors are ignored.
    pub fn zoom_by(&mut self, anchor: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let anchor_data = self.pixel_to_data(anchor);
        let zoomed = self.window.scale_about(anchor_data, factor);
        if zoomed.is_valid() {
            self.window = zoomed;
        }
    }

    /// Fits the window around `extent` plus `margin` times its span per side.
    ///
    /// The shorter side (relative to the surface proportions) is then grown
    /// symmetrically so the window has the surface's aspect ratio. Returns
    /// `false`, leaving the window unchanged, when `extent` holds no data.
    pub fn fit_to_data(&mut self, extent: &DataExtent, margin: f64) -> bool {
        let Some(rect) = extent.to_rect() else {
            return false;
        };
        if !(rect.x0.is_finite() && rect.x1.is_finite() && rect.y0.is_finite() && rect.y1.is_finite())
        {
            return false;
        }
        let padded = ViewWindow::from_rect(rect).expand_by_fraction(margin.max(0.0));
        let (window, _) = aspect_fix(padded, self.surface_size());
        self.window = window;
        true
    }

    /// Updates the surface to `size` pixels and re-fixes the aspect ratio.
    ///
    /// The current window keeps its center; one span grows or shrinks so the
    /// window matches the new proportions. Non-positive sizes are ignored and
    /// return `None`.
    pub fn fit_to_surface_resize(&mut self, size: Size) -> Option<AspectFix> {
        if !(size.width > 0.0 && size.height > 0.0) || !size.is_finite() {
            return None;
        }
        self.size_inches = Size::new(size.width / self.dpi, size.height / self.dpi);
        let (window, fix) = aspect_fix(self.window, size);
        self.window = window;
        Some(fix)
    }

    /// Switches to `new_dpi`, keeping pixel dimensions constant.
    ///
    /// The physical size is rescaled by `old / new`. Returns `false` when the
    /// resolution is unchanged or not positive.
    pub fn apply_dpi_change(&mut self, new_dpi: f64) -> bool {
        if !(new_dpi.is_finite() && new_dpi > 0.0) || new_dpi == self.dpi {
            return false;
        }
        let ratio = self.dpi / new_dpi;
        self.size_inches = self.size_inches * ratio;
        self.dpi = new_dpi;
        true
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewTransformDebugInfo {
        ViewTransformDebugInfo {
            window: self.window,
            surface_size: self.surface_size(),
            size_inches: self.size_inches,
            dpi: self.dpi,
            data_per_pixel: self.data_per_pixel(),
        }
    }
}

/// Grows one span of `window` so that `hrange / vrange == width / height`.
///
/// Windows wider than the surface grow vertically, others horizontally. A
/// window with no extent on either axis first gets a unit vertical span.
fn aspect_fix(window: ViewWindow, surface: Size) -> (ViewWindow, AspectFix) {
    let mut window = window;
    if window.hrange() == 0.0 && window.vrange() == 0.0 {
        window.vmin -= 0.5;
        window.vmax += 0.5;
    }
    let (hrange, vrange) = (window.hrange(), window.vrange());
    if hrange / vrange >= surface.width / surface.height {
        let extra = (hrange * (surface.height / surface.width) - vrange) / 2.0;
        window.vmin -= extra;
        window.vmax += extra;
        (window, AspectFix::Vertical)
    } else {
        let extra = (vrange * (surface.width / surface.height) - hrange) / 2.0;
        window.hmin -= extra;
        window.hmax += extra;
        (window, AspectFix::Horizontal)
    }
}

fn positive_or_one(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}

/// Debug snapshot of a [`ViewTransform`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransformDebugInfo {
    /// Visible data window.
    pub window: ViewWindow,
    /// Surface size in pixels.
    pub surface_size: Size,
    /// Surface size in inches.
    pub size_inches: Size,
    /// Display resolution.
    pub dpi: f64,
    /// Data units per pixel on each axis.
    pub data_per_pixel: Vec2,
}
