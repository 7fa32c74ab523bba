// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use crate::axis::AxisPair;
use crate::color;
use crate::config::DisplayConfig;
use crate::records::{Checkpoint, Crossing, PathPoint};
use crate::scene::{Label, LineStyle, Polyline, Primitive, Scene, Source};

/// Lateral-offset algebra for one checkpoint on one axis pair.
///
/// Distances in the diagram plane (guide-line length, label distance) are
/// turned into 3D lateral offsets with the ratio between the half track width
/// and its projected length, so they look the same regardless of how the
/// checkpoint is oriented relative to the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckpointGeometry {
    /// Projected `-w/2`, center and `+w/2` points.
    pub base: [Point; 3],
    /// Projected distance between the `-w/2` edge point and the center.
    pub base_plane_length: f64,
    /// Lateral distance between the same two points (`w/2`).
    pub base_3d_length: f64,
}

impl CheckpointGeometry {
    /// Projects the checkpoint's base line through `axes`.
    pub fn new(checkpoint: &Checkpoint, axes: AxisPair) -> Self {
        let half = checkpoint.half_width();
        let base = [
            axes.project_lateral(checkpoint, -half),
            axes.project_lateral(checkpoint, 0.0),
            axes.project_lateral(checkpoint, half),
        ];
        Self {
            base,
            base_plane_length: (base[1] - base[0]).hypot(),
            base_3d_length: half,
        }
    }

    /// Whether the lateral direction projects to a single point.
    pub fn is_degenerate(&self) -> bool {
        self.base_plane_length == 0.0
    }

    /// Converts a diagram-plane distance into a lateral offset.
    ///
    /// Returns `0` when the geometry is degenerate.
    pub fn plane_to_lateral(&self, plane_distance: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            plane_distance * (self.base_3d_length / self.base_plane_length)
        }
    }

    /// Lateral offset of each end of a guide line `extend_length` long per side.
    pub fn extended_offset(&self, extend_length: f64) -> f64 {
        self.plane_to_lateral(extend_length)
    }

    /// Lateral offset of the number label.
    ///
    /// `number_distance` is measured from the track edge: the `+w/2` edge when
    /// positive, the `-w/2` edge otherwise.
    pub fn label_offset(&self, number_distance: f64) -> f64 {
        let label_distance = if number_distance > 0.0 {
            number_distance + self.base_3d_length
        } else {
            number_distance - self.base_3d_length
        };
        self.plane_to_lateral(label_distance)
    }
}

/// Builds the scene for one course.
///
/// Checkpoints are emitted in slice order, each as its base line, then its
/// guide line (if extended), then its label (if shown). The path overlay and
/// crossing segments follow. Only base lines and labels count toward the
/// scene's [`DataExtent`](crate::DataExtent).
pub fn build(
    checkpoints: &[Checkpoint],
    path: Option<&[PathPoint]>,
    crossings: Option<&[Crossing]>,
    config: &DisplayConfig,
) -> Scene {
    let axes = config.axes;
    let mut scene = Scene::new();

    for checkpoint in checkpoints {
        if !config.shows_checkpoint(checkpoint.id) {
            continue;
        }
        let geometry = CheckpointGeometry::new(checkpoint, axes);

        scene.push(Primitive::Line(Polyline {
            points: geometry.base.to_vec(),
            color: checkpoint.color,
            style: LineStyle::Marked,
            source: Source::Checkpoint(checkpoint.id),
        }));

        if config.extends_checkpoint(checkpoint.id) {
            let offset = geometry.extended_offset(config.extend_length);
            scene.push(Primitive::Line(Polyline {
                points: vec![
                    axes.project_lateral(checkpoint, -offset),
                    axes.project_lateral(checkpoint, offset),
                ],
                color: checkpoint.color,
                style: LineStyle::Plain,
                source: Source::Extension(checkpoint.id),
            }));
        }

        if config.shows_number(checkpoint.id) {
            let offset = geometry.label_offset(config.number_distance);
            let anchor = axes.project_lateral(checkpoint, offset);
            scene.push(Primitive::Label(Label {
                anchor,
                text: checkpoint.id.to_string(),
                color: checkpoint.color,
                size: config.number_size,
                source: Source::Number(checkpoint.id),
            }));
            scene.include(anchor);
        }

        for point in geometry.base {
            scene.include(point);
        }
    }

    if let Some(path) = path.filter(|p| !p.is_empty()) {
        scene.push(Primitive::Line(Polyline {
            points: path.iter().map(|p| axes.project_point(*p)).collect(),
            color: color::path_color(),
            style: LineStyle::Plain,
            source: Source::Path,
        }));
    }

    for (index, crossing) in crossings.unwrap_or_default().iter().enumerate() {
        let color = if crossing.success {
            color::success_color()
        } else {
            color::failure_color()
        };
        let points: Vec<Point> = vec![
            axes.project_point(crossing.start),
            axes.project_point(crossing.end),
        ];
        scene.push(Primitive::Line(Polyline {
            points: points.clone(),
            color,
            style: LineStyle::Plain,
            source: Source::Crossing(index),
        }));
        scene.push(Primitive::Line(Polyline {
            points,
            color,
            style: LineStyle::Marked,
            source: Source::Crossing(index),
        }));
    }

    scene
}
