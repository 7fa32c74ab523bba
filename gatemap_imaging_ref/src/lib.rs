// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gatemap Imaging Reference Backend.
//!
//! [`RefBackend`] implements [`ImagingBackend`] and [`ResourceBackend`]
//! without producing pixels. It records every operation together with the
//! imaging state it ran under, so tests can assert on what a renderer emitted:
//! colors in draw order, clip and opacity layers, stroke widths, and whether
//! resources were released.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use gatemap_imaging::{
    Affine, DrawOp, ImagingBackend, ImagingOp, LayerOp, PaintDesc, PaintId, PathDesc, PathId,
    ResourceBackend, StateOp, StrokeStyle,
};
use peniko::Color;

/// Imaging state at one point of a recording.
#[derive(Clone, Debug, Default)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Affine,
    /// Pushed layers, outermost first.
    pub layers: Vec<LayerOp>,
    /// Current paint, if set.
    pub paint: Option<PaintId>,
    /// Color of the current paint, resolved when the paint was set.
    ///
    /// `None` for non-solid paints. It survives the paint being destroyed.
    pub color: Option<Color>,
    /// Current stroke, if set.
    pub stroke: Option<StrokeStyle>,
}

impl StateSnapshot {
    /// Number of layers pushed and not yet popped.
    pub fn layer_depth(&self) -> usize {
        self.layers.len()
    }

    /// The innermost layer, if any.
    pub fn top_layer(&self) -> Option<&LayerOp> {
        self.layers.last()
    }

    /// Group opacity in effect, multiplied through every layer.
    pub fn effective_opacity(&self) -> f32 {
        self.layers.iter().filter_map(|l| l.opacity).product()
    }
}

/// One recorded operation and the state after it was applied.
#[derive(Clone, Debug)]
pub struct Event {
    /// The operation.
    pub op: ImagingOp,
    /// State after a state op, or the state a draw op used.
    pub state: StateSnapshot,
}

/// Recording implementation of the imaging backend.
///
/// Resource descriptors are kept in slots indexed by their IDs. Destroyed
/// slots stay empty; IDs are never reused.
#[derive(Default, Debug)]
pub struct RefBackend {
    paths: Vec<Option<PathDesc>>,
    paints: Vec<Option<PaintDesc>>,
    events: Vec<Event>,
    state: StateSnapshot,
}

impl RefBackend {
    /// Every recorded operation, in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded operations without their state.
    pub fn ops(&self) -> impl Iterator<Item = &ImagingOp> + '_ {
        self.events.iter().map(|e| &e.op)
    }

    /// Draw operations with the state they were drawn under, in order.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &StateSnapshot)> + '_ {
        self.events.iter().filter_map(|e| match &e.op {
            ImagingOp::Draw(op) => Some((op, &e.state)),
            ImagingOp::State(_) => None,
        })
    }

    /// Paint colors of all draws, in order.
    ///
    /// Draws made without a solid paint in effect are skipped.
    pub fn draw_colors(&self) -> Vec<Color> {
        self.draws().filter_map(|(_, state)| state.color).collect()
    }

    /// The current imaging state.
    pub fn state_snapshot(&self) -> &StateSnapshot {
        &self.state
    }

    /// Looks up a live path resource.
    pub fn path(&self, id: PathId) -> Option<&PathDesc> {
        self.paths.get(slot(id.0))?.as_ref()
    }

    /// Looks up a live paint resource.
    pub fn paint(&self, id: PaintId) -> Option<&PaintDesc> {
        self.paints.get(slot(id.0))?.as_ref()
    }

    /// Number of paths created and not yet destroyed.
    pub fn live_paths(&self) -> usize {
        self.paths.iter().flatten().count()
    }

    /// Number of paints created and not yet destroyed.
    pub fn live_paints(&self) -> usize {
        self.paints.iter().flatten().count()
    }

    /// Forgets the recording but keeps resources and state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, op: ImagingOp) {
        self.events.push(Event {
            op,
            state: self.state.clone(),
        });
    }
}

fn slot(id: u32) -> usize {
    id as usize
}

fn next_id<T>(slots: &[Option<T>]) -> u32 {
    u32::try_from(slots.len()).unwrap_or(u32::MAX)
}

impl ResourceBackend for RefBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id = PathId(next_id(&self.paths));
        self.paths.push(Some(desc));
        id
    }

    fn destroy_path(&mut self, id: PathId) {
        if let Some(entry) = self.paths.get_mut(slot(id.0)) {
            *entry = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id = PaintId(next_id(&self.paints));
        self.paints.push(Some(desc));
        id
    }

    fn destroy_paint(&mut self, id: PaintId) {
        if let Some(entry) = self.paints.get_mut(slot(id.0)) {
            *entry = None;
        }
    }
}

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::SetTransform(xf) => self.state.transform = *xf,
            StateOp::PushLayer(layer) => self.state.layers.push(layer.clone()),
            StateOp::PopLayer => {
                self.state.layers.pop();
            }
            StateOp::SetPaint(id) => {
                self.state.paint = Some(*id);
                self.state.color = self.paint(*id).and_then(PaintDesc::solid_color);
            }
            StateOp::SetStroke(style) => self.state.stroke = Some(style.clone()),
        }
        self.record(ImagingOp::State(op));
    }

    fn draw(&mut self, op: DrawOp) {
        self.record(ImagingOp::Draw(op));
    }
}
