// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gatemap Geometry: projection of 3D checkpoint data onto a 2D diagram plane.
//!
//! This crate turns typed course records into a renderable [`Scene`]:
//! - [`SignedAxis`] / [`AxisPair`] project 3D points and lateral offsets onto
//!   the two diagram axes (`x`, `y`, `z` and their negations).
//! - [`CheckpointGeometry`] holds the lateral-offset algebra for a single
//!   checkpoint: the 3-point base line, and the conversion of diagram-plane
//!   distances (extension length, label distance) back into 3D lateral offsets.
//! - [`build`] walks checkpoints, the optional path, and optional crossing
//!   segments, and emits ordered, colored primitives plus the [`DataExtent`]
//!   that must stay visible when the view is fitted.
//!
//! It does **not** own a view transform or any rendering backend; see
//! `gatemap_view2d` and `gatemap_imaging` for those.
//!
//! ## Minimal example
//!
//! ```rust
//! use gatemap_geometry::{build, Checkpoint, DisplayConfig, Vec3};
//!
//! let checkpoints = [Checkpoint::new(1, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0))
//!     .with_track_width(100.0)];
//!
//! // Default axes are `x` (horizontal) and `-z` (vertical).
//! let scene = build(&checkpoints, None, None, &DisplayConfig::default());
//!
//! let extent = scene.extent();
//! assert_eq!(extent.hmin, -50.0);
//! // The label sits `number_distance` (75) beyond the right track edge.
//! assert_eq!(extent.hmax, 125.0);
//! ```
//!
//! ## Degenerate geometry
//!
//! A checkpoint whose lateral direction is perpendicular to the diagram plane
//! projects to a single point. Extension and label offsets then collapse to
//! zero rather than dividing by a zero plane length.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod axis;
mod builder;
pub mod color;
mod config;
mod records;
mod scene;

pub use axis::{Axis, AxisPair, ParseAxisError, SignedAxis};
pub use builder::{CheckpointGeometry, build};
pub use config::{CheckpointSet, DisplayConfig};
pub use records::{Checkpoint, CheckpointId, Crossing, DEFAULT_TRACK_WIDTH, PathPoint, Vec3};
pub use scene::{DataExtent, Label, LineStyle, Polyline, Primitive, Scene, Source};
