// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lowering a [`Scene`] into imaging operations.
//!
//! The renderer maps diagram coordinates through the [`ViewTransform`] into
//! surface pixels, and surface pixels into the device space of a [`Frame`]
//! (top-left origin, `y` down). Points are transformed on the CPU, so the
//! backend transform stays at identity.
//!
//! Sizes are given in points and converted with the display resolution, then
//! multiplied by the frame scale. An export at a higher resolution therefore
//! only changes pixel density, not proportions.
//!
//! Emitted order for one call to [`render_scene`]:
//! 1. The white background over the whole frame.
//! 2. A clip layer over the frame containing every primitive in scene order:
//!    lines are stroked, marked lines then get a filled circle per vertex, and
//!    labels are stroked glyph outlines.
//! 3. Inside the same clip, the optional selection overlay in a translucent
//!    layer.
//!
//! All path and paint resources created for the pass are destroyed before
//! returning.

use gatemap_geometry::{Label, LineStyle, Polyline, Primitive, Scene};
use gatemap_imaging::{
    Affine, DrawOp, ImagingBackend, ImagingBackendExt, PaintDesc, PaintId, PathDesc, PathId,
    ResourceBackend, StateOp, StrokeStyle,
};
use gatemap_view2d::ViewTransform;
use kurbo::{BezPath, Cap, Circle, Join, Point, Rect, Shape, Size};
use peniko::Color;

use crate::glyphs;

/// Stroke width of diagram lines, in points.
pub const LINE_WIDTH_PT: f64 = 1.5;

/// Diameter of vertex markers, in points.
pub const MARKER_SIZE_PT: f64 = 6.0;

/// Background of every rendered frame.
pub const BACKGROUND: Color = Color::WHITE;

/// Fill of the selection overlay.
pub const SELECTION_FILL: Color = Color::from_rgb8(255, 0, 0);

/// Outline of the selection overlay.
pub const SELECTION_EDGE: Color = Color::BLACK;

/// Opacity of the selection overlay layer.
pub const SELECTION_OPACITY: f32 = 0.2;

/// Stroke width of the selection outline, in points.
const SELECTION_EDGE_PT: f64 = 1.0;

/// Tolerance used when flattening marker circles into paths.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Points per inch.
const POINTS_PER_INCH: f64 = 72.0;

/// Converts a length in points to pixels at `dpi`.
pub fn points_to_pixels(points: f64, dpi: f64) -> f64 {
    points * dpi / POINTS_PER_INCH
}

/// A region of the surface mapped onto an output of its own.
///
/// The region is in surface pixel space (bottom-left origin). Device
/// coordinates start at the region's top-left corner and are multiplied by
/// `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    region: Rect,
    scale: f64,
}

impl Frame {
    /// The whole surface at its own resolution.
    pub fn full(view: &ViewTransform) -> Self {
        Self {
            region: view.surface_rect(),
            scale: 1.0,
        }
    }

    /// A surface region rendered at `scale` device pixels per surface pixel.
    pub fn new(region: Rect, scale: f64) -> Self {
        Self {
            region: region.abs(),
            scale,
        }
    }

    /// Surface region covered by the frame.
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Device pixels per surface pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Output size in device pixels.
    pub fn output_size(&self) -> Size {
        self.region.size() * self.scale
    }

    /// Maps a surface pixel position to device space.
    pub fn surface_to_output(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.region.x0) * self.scale,
            (self.region.y1 - p.y) * self.scale,
        )
    }

    /// Maps a surface pixel rectangle to device space.
    pub fn rect_to_output(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.surface_to_output(Point::new(rect.x0, rect.y0)),
            self.surface_to_output(Point::new(rect.x1, rect.y1)),
        )
    }
}

/// Draws `scene` as seen through `view` into `frame`.
///
/// `overlay` is a selection rectangle in surface pixels to draw on top, if
/// any. Exports pass `None`.
pub fn render_scene<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    scene: &Scene,
    view: &ViewTransform,
    frame: &Frame,
    overlay: Option<Rect>,
) {
    let mut pass = Pass {
        view,
        frame,
        px_per_pt: points_to_pixels(1.0, view.dpi()) * frame.scale(),
        resources: Resources::default(),
    };
    let bounds = Rect::from_origin_size(Point::ZERO, frame.output_size());

    backend.state(StateOp::SetTransform(Affine::IDENTITY));
    let background = pass.resources.paint(backend, BACKGROUND);
    backend.state(StateOp::SetPaint(background));
    backend.draw(DrawOp::FillRect(bounds));

    backend.with_clip_rect(bounds, |b| {
        for primitive in scene.primitives() {
            match primitive {
                Primitive::Line(line) => pass.line(b, line),
                Primitive::Label(label) => pass.label(b, label),
            }
        }
        if let Some(rect) = overlay {
            pass.selection(b, rect);
        }
    });

    pass.resources.release(backend);
}

struct Pass<'a> {
    view: &'a ViewTransform,
    frame: &'a Frame,
    px_per_pt: f64,
    resources: Resources,
}

impl Pass<'_> {
    fn to_device(&self, data: Point) -> Point {
        self.frame.surface_to_output(self.view.data_to_pixel(data))
    }

    fn line<B: ImagingBackend + ?Sized>(&mut self, b: &mut B, line: &Polyline) {
        let points: Vec<Point> = line.points.iter().map(|&p| self.to_device(p)).collect();
        let paint = self.resources.paint(b, line.color);
        b.state(StateOp::SetPaint(paint));

        if points.len() >= 2 {
            let path = self.resources.path(b, PathDesc::polyline(&points));
            b.state(StateOp::SetStroke(
                StrokeStyle::new(LINE_WIDTH_PT * self.px_per_pt)
                    .with_caps(Cap::Square)
                    .with_join(Join::Round),
            ));
            b.draw(DrawOp::StrokePath(path));
        }

        if line.style == LineStyle::Marked && !points.is_empty() {
            let radius = MARKER_SIZE_PT * self.px_per_pt / 2.0;
            let mut markers = BezPath::new();
            for &center in &points {
                markers.extend(Circle::new(center, radius).path_elements(CIRCLE_TOLERANCE));
            }
            let path = self.resources.path(b, PathDesc::from(markers));
            b.draw(DrawOp::FillPath(path));
        }
    }

    fn label<B: ImagingBackend + ?Sized>(&mut self, b: &mut B, label: &Label) {
        let size_px = label.size * self.px_per_pt;
        let outline = glyphs::outline(&label.text, self.to_device(label.anchor), size_px);
        if outline.elements().is_empty() {
            return;
        }
        let paint = self.resources.paint(b, label.color);
        let path = self.resources.path(b, PathDesc::from(outline));
        b.state(StateOp::SetPaint(paint));
        b.state(StateOp::SetStroke(
            StrokeStyle::new(glyphs::stroke_width(size_px))
                .with_caps(Cap::Round)
                .with_join(Join::Round),
        ));
        b.draw(DrawOp::StrokePath(path));
    }

    fn selection<B: ImagingBackend + ?Sized>(&mut self, b: &mut B, rect: Rect) {
        let device = self.frame.rect_to_output(rect);
        let fill = self.resources.paint(b, SELECTION_FILL);
        let edge = self.resources.paint(b, SELECTION_EDGE);
        let outline = self
            .resources
            .path(b, PathDesc::from_shape(&device, CIRCLE_TOLERANCE));
        let stroke = StrokeStyle::new(SELECTION_EDGE_PT * self.px_per_pt);
        b.with_opacity_layer(SELECTION_OPACITY, |b| {
            b.state(StateOp::SetPaint(fill));
            b.draw(DrawOp::FillRect(device));
            b.state(StateOp::SetPaint(edge));
            b.state(StateOp::SetStroke(stroke));
            b.draw(DrawOp::StrokePath(outline));
        });
    }
}

/// Resources created during one render pass.
#[derive(Default)]
struct Resources {
    paths: Vec<PathId>,
    paints: Vec<(Color, PaintId)>,
}

impl Resources {
    /// A solid paint for `color`, shared across the pass.
    fn paint<B: ResourceBackend + ?Sized>(&mut self, backend: &mut B, color: Color) -> PaintId {
        if let Some(&(_, id)) = self.paints.iter().find(|(c, _)| *c == color) {
            return id;
        }
        let id = backend.create_paint(PaintDesc::solid(color));
        self.paints.push((color, id));
        id
    }

    fn path<B: ResourceBackend + ?Sized>(&mut self, backend: &mut B, desc: PathDesc) -> PathId {
        let id = backend.create_path(desc);
        self.paths.push(id);
        id
    }

    fn release<B: ResourceBackend + ?Sized>(self, backend: &mut B) {
        for id in self.paths {
            backend.destroy_path(id);
        }
        for (_, id) in self.paints {
            backend.destroy_paint(id);
        }
    }
}
