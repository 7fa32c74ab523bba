// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive diagram: one owner for the scene, view, and tools.
//!
//! Event handlers take positions in surface pixels with a bottom-left origin
//! and return `true` when the surface needs to be redrawn.

use std::fmt;
use std::path::Path;

use gatemap_event_state::drag::PanDrag;
use gatemap_event_state::rect_select::{RectSelect, SelectOutcome};
use gatemap_geometry::{
    Axis, Checkpoint, Crossing, DisplayConfig, PathPoint, Scene, SignedAxis, build,
};
use gatemap_imaging::ImagingBackend;
use gatemap_view2d::{DEFAULT_MARGIN, ViewTransform, ZoomDirection};
use kurbo::{Point, Size, Vec2};
use tracing::{debug, trace, warn};

use crate::error::ExportError;
use crate::export::{ExportSummary, export_png};
use crate::input::{CursorHint, Key};
use crate::render::{Frame, render_scene};

/// Fraction of the surface one arrow key press pans by.
pub const KEY_PAN_FRACTION: f64 = 0.1;

/// Course data handed to [`Diagram::refresh`].
#[derive(Clone, Copy, Debug)]
pub struct Course<'a> {
    /// Course code; the view is preserved while it stays the same.
    pub code: &'a str,
    /// Checkpoints in course order.
    pub checkpoints: &'a [Checkpoint],
    /// Optional recorded path.
    pub path: Option<&'a [PathPoint]>,
    /// Optional crossing segments, already filtered to this course.
    pub crossings: Option<&'a [Crossing]>,
}

impl<'a> Course<'a> {
    /// A course with checkpoints only.
    pub fn new(code: &'a str, checkpoints: &'a [Checkpoint]) -> Self {
        Self {
            code,
            checkpoints,
            path: None,
            crossings: None,
        }
    }

    /// Adds a path overlay.
    pub fn with_path(mut self, path: &'a [PathPoint]) -> Self {
        self.path = Some(path);
        self
    }

    /// Adds crossing segments.
    pub fn with_crossings(mut self, crossings: &'a [Crossing]) -> Self {
        self.crossings = Some(crossings);
        self
    }
}

/// What [`Diagram::refresh`] did to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No course was given; nothing changed.
    Skipped,
    /// Same course as before, already fitted; the window was kept.
    Preserved,
    /// The window was fitted to the data of a new or not yet fitted course.
    Refit,
    /// Nothing visible to fit; the window was kept.
    NoData,
}

/// One axis value under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisReading {
    /// Physical axis.
    pub axis: Axis,
    /// Value along the physical axis.
    pub value: f64,
}

impl AxisReading {
    fn new(axis: SignedAxis, displayed: f64) -> Self {
        Self {
            axis: axis.axis(),
            value: axis.physical_value(displayed),
        }
    }
}

impl fmt::Display for AxisReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:.3}", self.axis.name(), self.value)
    }
}

/// Physical coordinates under a surface position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerCoordinates {
    /// Reading along the horizontal diagram axis.
    pub horizontal: AxisReading,
    /// Reading along the vertical diagram axis.
    pub vertical: AxisReading,
}

impl fmt::Display for PointerCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.horizontal, self.vertical)
    }
}

/// Interactive checkpoint diagram.
#[derive(Clone, Debug)]
pub struct Diagram {
    view: ViewTransform,
    select: RectSelect,
    drag: PanDrag,
    scene: Scene,
    config: DisplayConfig,
    course: Option<String>,
    // The window has been fitted to `course` at least once.
    fitted: bool,
}

impl Diagram {
    /// Creates an empty diagram over a `surface` in pixels.
    pub fn new(surface: Size, config: DisplayConfig) -> Self {
        Self {
            view: ViewTransform::new(surface, config.dpi),
            select: RectSelect::new(),
            drag: PanDrag::default(),
            scene: Scene::new(),
            config,
            course: None,
            fitted: false,
        }
    }

    /// The view transform.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// The current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The configuration of the last refresh.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// The rectangle selection tool.
    pub fn selection(&self) -> &RectSelect {
        &self.select
    }

    /// Code of the course shown, if any.
    pub fn course_code(&self) -> Option<&str> {
        self.course.as_deref()
    }

    /// Rebuilds the scene for `course` under `config`.
    ///
    /// A display resolution change is applied first, keeping the surface's
    /// pixel size. Any selection is dropped. The window is preserved when the
    /// course code matches the previous refresh and the window was already
    /// fitted to that course. Otherwise it is fitted to the new data; a course
    /// without visible data keeps trying on later refreshes.
    pub fn refresh(&mut self, course: Option<&Course<'_>>, config: &DisplayConfig) -> RefreshOutcome {
        let Some(course) = course else {
            return RefreshOutcome::Skipped;
        };
        if self.view.apply_dpi_change(config.dpi) {
            debug!(dpi = config.dpi, "display resolution changed");
        }
        self.config = config.clone();
        self.scene = build(course.checkpoints, course.path, course.crossings, config);
        self.select.clear();
        self.drag.end();

        let same_course = self.course.as_deref() == Some(course.code);
        let outcome = if same_course && self.fitted {
            RefreshOutcome::Preserved
        } else {
            if !same_course {
                self.course = Some(course.code.to_owned());
            }
            self.fitted = self.view.fit_to_data(&self.scene.extent(), DEFAULT_MARGIN);
            if self.fitted {
                debug!(view = ?self.view.debug_info(), "fitted window to data");
                RefreshOutcome::Refit
            } else {
                RefreshOutcome::NoData
            }
        };
        debug!(
            course = course.code,
            primitives = self.scene.primitives().len(),
            ?outcome,
            "refreshed diagram"
        );
        outcome
    }

    /// Pointer pressed at `pos`.
    pub fn on_pointer_down(&mut self, pos: Point) -> bool {
        if self.select.is_active() {
            let outcome = self.select.pointer_down(pos, self.view.surface_rect());
            trace!(?pos, ?outcome, "selection pointer down");
            return outcome.is_consumed();
        }
        self.drag.start(pos);
        false
    }

    /// Pointer moved to `pos`.
    pub fn on_pointer_move(&mut self, pos: Point) -> bool {
        if self.select.is_active() {
            let outcome = self.select.pointer_move(pos, self.view.surface_rect());
            return matches!(outcome, SelectOutcome::Updated(_));
        }
        match self.drag.update(pos) {
            Some(delta) => self.pan(delta),
            None => false,
        }
    }

    /// Pointer released at `pos`.
    pub fn on_pointer_up(&mut self, pos: Point) -> bool {
        if self.select.is_active() {
            let outcome = self.select.pointer_up(pos, self.view.surface_rect());
            trace!(?pos, ?outcome, "selection pointer up");
            return outcome.is_consumed();
        }
        let moved = match self.drag.update(pos) {
            Some(delta) => self.pan(delta),
            None => false,
        };
        self.drag.end();
        moved
    }

    /// Scroll of `step` notches at `pos`; positive steps zoom in.
    pub fn on_scroll(&mut self, pos: Point, step: f64) -> bool {
        let Some(direction) = ZoomDirection::from_scroll(step) else {
            return false;
        };
        self.view.zoom(pos, direction);
        trace!(?pos, ?direction, window = ?self.view.window(), "zoom");
        true
    }

    /// A key press.
    pub fn on_key(&mut self, key: Key) -> bool {
        let size = self.view.surface_size();
        let step = Vec2::new(size.width, size.height) * KEY_PAN_FRACTION;
        let center = self.view.surface_rect().center();
        match key {
            Key::Left => self.pan(Vec2::new(step.x, 0.0)),
            Key::Right => self.pan(Vec2::new(-step.x, 0.0)),
            Key::Up => self.pan(Vec2::new(0.0, -step.y)),
            Key::Down => self.pan(Vec2::new(0.0, step.y)),
            Key::ZoomIn => self.on_scroll(center, 1.0),
            Key::ZoomOut => self.on_scroll(center, -1.0),
            Key::Escape => {
                if self.select.is_active() {
                    self.select.cancel()
                } else {
                    self.select.clear()
                }
            }
            Key::Select => {
                self.drag.end();
                self.select.activate();
                true
            }
            Key::Reset => {
                let refit = self.view.fit_to_data(&self.scene.extent(), DEFAULT_MARGIN);
                self.fitted |= refit;
                refit
            }
        }
    }

    /// The surface was resized to `size` pixels.
    ///
    /// The window keeps its center and is re-fixed to the new proportions.
    /// Any selection is dropped, as its pixels no longer mean the same data.
    pub fn on_resize(&mut self, size: Size) -> bool {
        let Some(fix) = self.view.fit_to_surface_resize(size) else {
            return false;
        };
        self.select.clear();
        self.drag.end();
        trace!(?size, ?fix, "resized");
        true
    }

    /// Physical axis values under `pos`.
    pub fn pointer_coordinates(&self, pos: Point) -> PointerCoordinates {
        let data = self.view.pixel_to_data(pos);
        let axes = self.config.axes;
        PointerCoordinates {
            horizontal: AxisReading::new(axes.horizontal, data.x),
            vertical: AxisReading::new(axes.vertical, data.y),
        }
    }

    /// Cursor the host should show.
    pub fn cursor(&self) -> CursorHint {
        if self.select.is_active() {
            CursorHint::Crosshair
        } else if self.drag.is_active() {
            CursorHint::Grabbing
        } else {
            CursorHint::Default
        }
    }

    /// Draws the surface, including the selection overlay.
    pub fn render<B: ImagingBackend + ?Sized>(&self, backend: &mut B) {
        let overlay = self.select.live_rect().or_else(|| self.select.save_region());
        render_scene(
            backend,
            &self.scene,
            &self.view,
            &Frame::full(&self.view),
            overlay,
        );
    }

    /// Exports to `path` at the configured save resolution.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<ExportSummary, ExportError> {
        self.save_at(path, self.config.save_dpi)
    }

    /// Exports to `path` at `save_dpi`.
    ///
    /// Only the committed selection is exported when there is one.
    pub fn save_at(&self, path: impl AsRef<Path>, save_dpi: f64) -> Result<ExportSummary, ExportError> {
        let path = path.as_ref();
        export_png(path, &self.scene, &self.view, self.select.save_region(), save_dpi)
            .inspect_err(|err| warn!(path = %path.display(), %err, "export failed"))
    }

    fn pan(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        self.view.pan(delta);
        trace!(?delta, window = ?self.view.window(), "pan");
        true
    }
}
