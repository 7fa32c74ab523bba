// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::records::CheckpointId;

/// Bounding box of the content that must stay visible after a fit.
///
/// An empty extent uses `+inf` minimums and `-inf` maximums, so folding in
/// the first point makes it a degenerate box around that point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataExtent {
    /// Minimum horizontal value.
    pub hmin: f64,
    /// Maximum horizontal value.
    pub hmax: f64,
    /// Minimum vertical value.
    pub vmin: f64,
    /// Maximum vertical value.
    pub vmax: f64,
}

impl DataExtent {
    /// The "no data" sentinel.
    pub const EMPTY: Self = Self {
        hmin: f64::INFINITY,
        hmax: f64::NEG_INFINITY,
        vmin: f64::INFINITY,
        vmax: f64::NEG_INFINITY,
    };

    /// Creates an extent from explicit bounds.
    pub const fn new(hmin: f64, hmax: f64, vmin: f64, vmax: f64) -> Self {
        Self {
            hmin,
            hmax,
            vmin,
            vmax,
        }
    }

    /// Grows the extent to contain `point`.
    pub fn include(&mut self, point: Point) {
        self.hmin = self.hmin.min(point.x);
        self.hmax = self.hmax.max(point.x);
        self.vmin = self.vmin.min(point.y);
        self.vmax = self.vmax.max(point.y);
    }

    /// Whether no point has been folded in yet.
    pub fn is_empty(&self) -> bool {
        !(self.hmin <= self.hmax && self.vmin <= self.vmax)
    }

    /// Horizontal span (`0` for a single point, negative when empty).
    pub fn width(&self) -> f64 {
        self.hmax - self.hmin
    }

    /// Vertical span.
    pub fn height(&self) -> f64 {
        self.vmax - self.vmin
    }

    /// The extent as a rectangle, or `None` when empty.
    pub fn to_rect(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| Rect::new(self.hmin, self.vmin, self.hmax, self.vmax))
    }
}

impl Default for DataExtent {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// What produced a primitive. Lets hosts and tests find primitives by origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// The 3-point base line of a checkpoint.
    Checkpoint(CheckpointId),
    /// The guide line of an extended checkpoint.
    Extension(CheckpointId),
    /// The number label of a checkpoint.
    Number(CheckpointId),
    /// The recorded path overlay.
    Path,
    /// Crossing segment at this index in the input.
    Crossing(usize),
}

/// How a polyline is decorated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// Plain stroked line.
    Plain,
    /// Stroked line with a filled circle marker at every vertex.
    Marked,
}

/// A colored polyline in diagram coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    /// Vertices in draw order.
    pub points: Vec<Point>,
    /// Stroke (and marker) color.
    pub color: Color,
    /// Decoration.
    pub style: LineStyle,
    /// Origin of this line.
    pub source: Source,
}

/// A text label in diagram coordinates.
///
/// `anchor` is the bottom-center of the text: the text is horizontally
/// centered on it and its baseline sits on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Bottom-center anchor.
    pub anchor: Point,
    /// Text to draw.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Font size in points.
    pub size: f64,
    /// Origin of this label.
    pub source: Source,
}

/// One draw primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A polyline, optionally with markers.
    Line(Polyline),
    /// A text label.
    Label(Label),
}

impl Primitive {
    /// The primitive's color.
    pub fn color(&self) -> Color {
        match self {
            Self::Line(line) => line.color,
            Self::Label(label) => label.color,
        }
    }

    /// What produced the primitive.
    pub fn source(&self) -> Source {
        match self {
            Self::Line(line) => line.source,
            Self::Label(label) => label.source,
        }
    }
}

/// Ordered draw primitives plus the extent a fit should keep visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
    extent: DataExtent,
}

impl Scene {
    /// Creates an empty scene with the [`DataExtent::EMPTY`] sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitives in draw order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Extent of the must-remain-visible content.
    pub fn extent(&self) -> DataExtent {
        self.extent
    }

    /// Whether the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Polylines in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &Polyline> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            Primitive::Label(_) => None,
        })
    }

    /// Labels in draw order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Label(label) => Some(label),
            Primitive::Line(_) => None,
        })
    }

    /// Primitives produced by `source`, in draw order.
    pub fn by_source(&self, source: Source) -> impl Iterator<Item = &Primitive> + '_ {
        self.primitives.iter().filter(move |p| p.source() == source)
    }

    pub(crate) fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub(crate) fn include(&mut self, point: Point) {
        self.extent.include(point);
    }
}
