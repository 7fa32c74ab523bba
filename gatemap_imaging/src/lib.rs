// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gatemap Imaging: backend-agnostic imaging IR and backend traits.
//!
//! This crate defines the small imaging vocabulary the diagram renderer
//! speaks, and the traits a backend implements to consume it. It sits between
//! the diagram layer (which knows about checkpoints, labels and view windows)
//! and concrete renderers (a CPU rasterizer, or a recorder used by tests).
//!
//! Geometry stays in [`kurbo`] types throughout: paths are lists of
//! [`kurbo::PathEl`], clips and rectangle fills are [`kurbo::Rect`], strokes
//! are [`kurbo::Stroke`]. Backends narrow to their own precision.
//!
//! # Core concepts
//!
//! - **Resources**: opaque handles ([`PathId`], [`PaintId`]) whose lifetimes
//!   are managed via [`ResourceBackend`]. A render pass creates what it needs
//!   and destroys it afterwards.
//! - **Operations**: [`StateOp`] changes the transform, the layer stack, the
//!   current paint or the current stroke. [`DrawOp`] fills or strokes using
//!   that state. [`ImagingOp`] wraps either for recording.
//! - **Backends**: [`ImagingBackend`] accepts operations and
//!   [`ImagingBackendExt`] adds scoped helpers.
//!
//! Layers are the only scoping mechanism: a rectangular clip or a group
//! opacity lives on a pushed [`LayerOp`] and ends with the matching pop.
//!
//! # Example
//!
//! ```ignore
//! # use gatemap_imaging::*;
//! # use kurbo::{Point, Rect};
//! # use peniko::Color;
//! let mut backend = MyBackend::default();
//!
//! let paint = backend.create_paint(PaintDesc::solid(Color::BLACK));
//! let path = backend.create_path(PathDesc::polyline(&[Point::ZERO, Point::new(10.0, 5.0)]));
//!
//! backend.with_clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0), |b| {
//!     b.state(StateOp::SetPaint(paint));
//!     b.state(StateOp::SetStroke(StrokeStyle::new(1.5)));
//!     b.draw(DrawOp::StrokePath(path));
//! });
//! ```

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{BezPath, PathEl, Point, Rect, Shape};
use peniko::{Brush, Color};

/// Handle to a path resource.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathId(pub u32);

/// Handle to a paint resource. One paint may serve many draws.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaintId(pub u32);

/// Affine transform type used by the imaging IR.
pub type Affine = kurbo::Affine;

/// Stroke parameters used by [`StateOp::SetStroke`].
pub type StrokeStyle = kurbo::Stroke;

/// Parameters for a pushed layer.
///
/// The clip is in the coordinates current at push time. The opacity applies
/// when the layer is composited into its parent.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LayerOp {
    /// Rectangle that bounds drawing inside the layer.
    pub clip: Option<Rect>,
    /// Group opacity in `0..=1`.
    pub opacity: Option<f32>,
}

impl LayerOp {
    /// A layer that only clips.
    #[inline]
    pub fn clip(rect: Rect) -> Self {
        Self {
            clip: Some(rect),
            opacity: None,
        }
    }

    /// A layer that only fades its contents.
    #[inline]
    pub fn opacity(opacity: f32) -> Self {
        Self {
            clip: None,
            opacity: Some(opacity),
        }
    }

    /// Returns true if pushing this layer would change nothing.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.clip.is_none() && self.opacity.is_none_or(|o| o >= 1.0)
    }
}

/// State operations that mutate the current imaging state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Replace the current transform.
    SetTransform(Affine),
    /// Push a layer. Every push must be matched by a [`StateOp::PopLayer`].
    PushLayer(LayerOp),
    /// Pop the most recently pushed layer.
    PopLayer,
    /// Set the paint used by later draws.
    SetPaint(PaintId),
    /// Set the stroke used by later [`DrawOp::StrokePath`] draws.
    SetStroke(StrokeStyle),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill a path (non-zero winding) with the current paint.
    FillPath(PathId),
    /// Stroke a path with the current stroke and paint.
    StrokePath(PathId),
    /// Fill an axis-aligned rectangle with the current paint.
    FillRect(Rect),
}

/// Either kind of operation, in the order a backend received them.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// Geometry of a path resource.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PathDesc {
    /// Path elements in drawing order.
    pub elements: Box<[PathEl]>,
}

impl PathDesc {
    /// An open polyline through `points`. No points give an empty path.
    pub fn polyline(points: &[Point]) -> Self {
        let elements: Vec<PathEl> = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                if i == 0 {
                    PathEl::MoveTo(p)
                } else {
                    PathEl::LineTo(p)
                }
            })
            .collect();
        Self {
            elements: elements.into_boxed_slice(),
        }
    }

    /// Flattens any kurbo shape into a path.
    pub fn from_shape(shape: &impl Shape, tolerance: f64) -> Self {
        Self {
            elements: shape.path_elements(tolerance).collect(),
        }
    }

    /// Rebuilds a kurbo path.
    pub fn to_bez_path(&self) -> BezPath {
        BezPath::from_vec(self.elements.to_vec())
    }

    /// Whether the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl From<BezPath> for PathDesc {
    fn from(path: BezPath) -> Self {
        Self {
            elements: path.elements().to_vec().into_boxed_slice(),
        }
    }
}

/// Description of a paint resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintDesc {
    /// Brush used when rendering.
    pub brush: Brush,
}

impl PaintDesc {
    /// A solid color paint.
    #[inline]
    pub fn solid(color: Color) -> Self {
        Self {
            brush: Brush::Solid(color),
        }
    }

    /// The color of a solid paint.
    pub fn solid_color(&self) -> Option<Color> {
        match self.brush {
            Brush::Solid(color) => Some(color),
            _ => None,
        }
    }
}

/// Resource lifetime interface.
///
/// IDs stay valid and refer to the same resource until the matching
/// `destroy_*` call. Destroying an unknown or already destroyed ID is a no-op.
pub trait ResourceBackend {
    /// Create a path resource.
    fn create_path(&mut self, desc: PathDesc) -> PathId;
    /// Destroy a previously created path.
    fn destroy_path(&mut self, id: PathId);

    /// Create a paint resource.
    fn create_paint(&mut self, desc: PaintDesc) -> PaintId;
    /// Destroy a previously created paint.
    fn destroy_paint(&mut self, id: PaintId);
}

/// Minimal imaging backend trait.
pub trait ImagingBackend: ResourceBackend {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Same as `self.state(StateOp::PushLayer(op))`.
    #[inline]
    fn layer_push(&mut self, op: LayerOp) {
        self.state(StateOp::PushLayer(op));
    }

    /// Same as `self.state(StateOp::PopLayer)`.
    #[inline]
    fn layer_pop(&mut self) {
        self.state(StateOp::PopLayer);
    }

    /// Push a rectangular clip layer, ended by [`ImagingBackend::layer_pop`].
    #[inline]
    fn clip_to_rect(&mut self, rect: Rect) {
        self.layer_push(LayerOp::clip(rect));
    }
}

/// Scoped helpers for any [`ImagingBackend`].
///
/// Kept apart from [`ImagingBackend`] so the closure-taking methods do not
/// get in the way of `&mut dyn ImagingBackend`.
pub trait ImagingBackendExt: ImagingBackend {
    /// Run `f` inside a pushed layer, popping it afterwards.
    ///
    /// If `f` panics, the layer is not popped.
    #[inline]
    fn with_layer<R>(&mut self, op: LayerOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.layer_push(op);
        let out = f(self);
        self.layer_pop();
        out
    }

    /// Run `f` with drawing clipped to `rect`.
    #[inline]
    fn with_clip_rect<R>(&mut self, rect: Rect, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::clip(rect), f)
    }

    /// Run `f` inside a layer composited at `opacity`.
    #[inline]
    fn with_opacity_layer<R>(&mut self, opacity: f32, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::opacity(opacity), f)
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}
