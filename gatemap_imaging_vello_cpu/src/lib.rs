// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU–backed implementation of the imaging backend.
//!
//! This crate implements [`ImagingBackend`] on top of the sparse-strips
//! [`vello_cpu::RenderContext`], so that diagrams expressed in the
//! `gatemap_imaging` IR can be rasterized without a GPU.
//!
//! [`rasterize`] wraps the whole cycle of creating a context, drawing into it
//! and reading back straight-alpha RGBA8 pixels.

#![deny(unsafe_code)]
#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use gatemap_imaging::{
    Affine, DrawOp, ImagingBackend, LayerOp, PaintDesc, PaintId, PathDesc, PathId,
    ResourceBackend, StateOp, StrokeStyle,
};
use kurbo::{Cap, Join, PathEl, Rect};
use peniko::Brush;
use vello_cpu::kurbo::{
    Affine as CpuAffine, BezPath, Cap as CpuCap, Join as CpuJoin, Point as CpuPoint,
    Rect as CpuRect, Shape, Stroke,
};
use vello_cpu::{Pixmap, RenderContext, RenderMode, RenderSettings};

const CLIP_TOLERANCE: f64 = 0.1;

/// What a `PushLayer` turned into, so the matching pop can undo it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pushed {
    Skipped,
    Layer,
}

/// CPU-backed implementation of the imaging backend using `vello_cpu`.
pub struct VelloCpuImagingBackend<'ctx> {
    /// Render context that receives the drawing.
    pub ctx: &'ctx mut RenderContext,
    paths: Vec<Option<BezPath>>,
    paints: Vec<Option<PaintDesc>>,
    layers: Vec<Pushed>,
}

impl fmt::Debug for VelloCpuImagingBackend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VelloCpuImagingBackend")
            .field("paths", &self.paths.len())
            .field("paints", &self.paints.len())
            .field("layer_depth", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl<'ctx> VelloCpuImagingBackend<'ctx> {
    /// Wraps a render context.
    pub fn new(ctx: &'ctx mut RenderContext) -> Self {
        Self {
            ctx,
            paths: Vec::new(),
            paints: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Number of layers pushed and not yet popped.
    pub fn layer_depth(&self) -> usize {
        self.layers.len()
    }

    fn set_paint(&mut self, id: PaintId) {
        let Some(Some(desc)) = self.paints.get(id.0 as usize) else {
            return;
        };
        match &desc.brush {
            Brush::Solid(color) => self.ctx.set_paint(*color),
            Brush::Gradient(gradient) => self.ctx.set_paint(gradient.clone()),
            // Diagrams never paint with images; keep the previous paint.
            Brush::Image(_) => {}
        }
    }

    fn push_layer(&mut self, layer: &LayerOp) {
        if layer.is_noop() {
            self.layers.push(Pushed::Skipped);
            return;
        }
        let clip = layer.clip.map(|r| to_cpu_rect(r).to_path(CLIP_TOLERANCE));
        self.ctx
            .push_layer(clip.as_ref(), None, layer.opacity, None, None);
        self.layers.push(Pushed::Layer);
    }

    fn pop_layer(&mut self) {
        // An unmatched pop is ignored.
        if self.layers.pop() == Some(Pushed::Layer) {
            self.ctx.pop_layer();
        }
    }
}

fn to_cpu_point(p: kurbo::Point) -> CpuPoint {
    CpuPoint::new(p.x, p.y)
}

fn to_cpu_rect(r: Rect) -> CpuRect {
    CpuRect::new(r.x0, r.y0, r.x1, r.y1)
}

fn to_cpu_affine(xf: Affine) -> CpuAffine {
    CpuAffine::new(xf.as_coeffs())
}

fn to_cpu_path(desc: &PathDesc) -> BezPath {
    let mut path = BezPath::new();
    for el in &desc.elements {
        match *el {
            PathEl::MoveTo(p) => path.move_to(to_cpu_point(p)),
            PathEl::LineTo(p) => path.line_to(to_cpu_point(p)),
            PathEl::QuadTo(c, p) => path.quad_to(to_cpu_point(c), to_cpu_point(p)),
            PathEl::CurveTo(c1, c2, p) => {
                path.curve_to(to_cpu_point(c1), to_cpu_point(c2), to_cpu_point(p));
            }
            PathEl::ClosePath => path.close_path(),
        }
    }
    path
}

fn to_cpu_cap(cap: Cap) -> CpuCap {
    match cap {
        Cap::Butt => CpuCap::Butt,
        Cap::Round => CpuCap::Round,
        Cap::Square => CpuCap::Square,
    }
}

fn to_cpu_stroke(style: &StrokeStyle) -> Stroke {
    let mut stroke = Stroke::new(style.width);
    stroke.miter_limit = style.miter_limit;
    stroke.join = match style.join {
        Join::Bevel => CpuJoin::Bevel,
        Join::Miter => CpuJoin::Miter,
        Join::Round => CpuJoin::Round,
    };
    stroke.start_cap = to_cpu_cap(style.start_cap);
    stroke.end_cap = to_cpu_cap(style.end_cap);
    stroke
}

fn next_id<T>(slots: &[Option<T>]) -> u32 {
    u32::try_from(slots.len()).unwrap_or(u32::MAX)
}

impl ResourceBackend for VelloCpuImagingBackend<'_> {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id = PathId(next_id(&self.paths));
        self.paths.push(Some(to_cpu_path(&desc)));
        id
    }

    fn destroy_path(&mut self, id: PathId) {
        if let Some(slot) = self.paths.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id = PaintId(next_id(&self.paints));
        self.paints.push(Some(desc));
        id
    }

    fn destroy_paint(&mut self, id: PaintId) {
        if let Some(slot) = self.paints.get_mut(id.0 as usize) {
            *slot = None;
        }
    }
}

impl ImagingBackend for VelloCpuImagingBackend<'_> {
    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::SetTransform(xf) => self.ctx.set_transform(to_cpu_affine(xf)),
            StateOp::PushLayer(layer) => self.push_layer(&layer),
            StateOp::PopLayer => self.pop_layer(),
            StateOp::SetPaint(id) => self.set_paint(id),
            StateOp::SetStroke(style) => self.ctx.set_stroke(to_cpu_stroke(&style)),
        }
    }

    fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::FillPath(id) => {
                if let Some(Some(path)) = self.paths.get(id.0 as usize) {
                    self.ctx.fill_path(path);
                }
            }
            DrawOp::StrokePath(id) => {
                if let Some(Some(path)) = self.paths.get(id.0 as usize) {
                    self.ctx.stroke_path(path);
                }
            }
            DrawOp::FillRect(rect) => self.ctx.fill_rect(&to_cpu_rect(rect)),
        }
    }
}

/// Renders into a fresh `width` × `height` surface and returns its pixels.
///
/// The result is row-major, top row first, four bytes per pixel in
/// straight-alpha RGBA order. Pixels nothing was drawn over stay fully
/// transparent. Any layers `build` leaves open are closed before reading back.
pub fn rasterize<F>(width: u16, height: u16, build: F) -> Vec<u8>
where
    F: FnOnce(&mut VelloCpuImagingBackend<'_>),
{
    let settings = RenderSettings {
        render_mode: RenderMode::OptimizeSpeed,
        ..RenderSettings::default()
    };
    let mut ctx = RenderContext::new_with(width, height, settings);
    let mut backend = VelloCpuImagingBackend::new(&mut ctx);
    build(&mut backend);
    while backend.layer_depth() > 0 {
        backend.pop_layer();
    }

    let mut pixmap = Pixmap::new(width, height);
    backend.ctx.flush();
    backend.ctx.render_to_pixmap(&mut pixmap);

    let unpremul = pixmap.take_unpremultiplied();
    let mut bytes = Vec::with_capacity(unpremul.len() * 4);
    for p in unpremul {
        bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatemap_imaging::ImagingBackendExt;
    use kurbo::Point;
    use peniko::Color;

    const W: u16 = 16;
    const H: u16 = 8;

    fn pixel(bytes: &[u8], x: usize, y: usize) -> [u8; 4] {
        let i = (y * usize::from(W) + x) * 4;
        [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
    }

    fn fill_all(b: &mut VelloCpuImagingBackend<'_>, color: Color) {
        let paint = b.create_paint(PaintDesc::solid(color));
        b.state(StateOp::SetPaint(paint));
        b.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, W.into(), H.into())));
    }

    #[test]
    fn untouched_surface_is_transparent() {
        let bytes = rasterize(W, H, |_| {});
        assert_eq!(bytes.len(), usize::from(W) * usize::from(H) * 4);
        assert!(bytes.iter().all(|&b| b == 0), "expected a blank surface");
    }

    #[test]
    fn fill_rect_paints_solid_color() {
        let bytes = rasterize(W, H, |b| fill_all(b, Color::from_rgb8(255, 0, 0)));
        assert_eq!(pixel(&bytes, 3, 3), [255, 0, 0, 255]);
        assert_eq!(pixel(&bytes, 15, 7), [255, 0, 0, 255]);
    }

    #[test]
    fn clip_layer_limits_drawing() {
        let bytes = rasterize(W, H, |b| {
            b.with_clip_rect(Rect::new(0.0, 0.0, 8.0, H.into()), |b| {
                fill_all(b, Color::from_rgb8(0, 0, 255));
            });
        });
        assert_eq!(pixel(&bytes, 2, 4), [0, 0, 255, 255]);
        assert_eq!(pixel(&bytes, 12, 4)[3], 0);
    }

    #[test]
    fn transform_moves_geometry() {
        let bytes = rasterize(W, H, |b| {
            let paint = b.create_paint(PaintDesc::solid(Color::BLACK));
            b.state(StateOp::SetPaint(paint));
            b.state(StateOp::SetTransform(Affine::translate((8.0, 0.0))));
            b.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 8.0, H.into())));
        });
        assert_eq!(pixel(&bytes, 3, 3)[3], 0);
        assert_eq!(pixel(&bytes, 11, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn stroked_polyline_covers_its_pixels() {
        let bytes = rasterize(W, H, |b| {
            let paint = b.create_paint(PaintDesc::solid(Color::BLACK));
            let path = b.create_path(PathDesc::polyline(&[
                Point::new(0.0, 4.0),
                Point::new(16.0, 4.0),
            ]));
            b.state(StateOp::SetPaint(paint));
            b.state(StateOp::SetStroke(StrokeStyle::new(2.0)));
            b.draw(DrawOp::StrokePath(path));
        });
        assert_eq!(pixel(&bytes, 8, 3)[3], 255);
        assert_eq!(pixel(&bytes, 8, 0)[3], 0);
    }

    #[test]
    fn unbalanced_layers_are_closed() {
        let bytes = rasterize(W, H, |b| {
            b.clip_to_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
            fill_all(b, Color::WHITE);
            assert_eq!(b.layer_depth(), 1);
        });
        assert_eq!(pixel(&bytes, 1, 1), [255, 255, 255, 255]);
        assert_eq!(pixel(&bytes, 10, 6)[3], 0);
    }
}
