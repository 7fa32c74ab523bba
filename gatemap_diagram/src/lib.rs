// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gatemap Diagram: an interactive, exportable checkpoint diagram.
//!
//! This crate ties the workspace together behind one owned value,
//! [`Diagram`]:
//! - [`Diagram::refresh`] rebuilds the scene from course data and a
//!   [`DisplayConfig`](gatemap_geometry::DisplayConfig), keeping the view when
//!   the course is unchanged and fitting it otherwise.
//! - Pointer, scroll, key, and resize handlers drive panning, anchored zoom,
//!   and rectangle selection.
//! - [`Diagram::render`] lowers the scene into `gatemap_imaging` operations
//!   for any backend.
//! - [`Diagram::save`] rasterizes the view, or the selected part of it, to a
//!   PNG at the save resolution.
//!
//! Around it sit the pieces a host needs to feed it: [`settings`] parses the
//! settings form with per-field errors, and [`ingest`] turns tabular records
//! into checkpoints, paths, and crossings.
//!
//! ## Minimal example
//!
//! ```rust
//! use gatemap_diagram::{Course, Diagram, Key, RefreshOutcome};
//! use gatemap_geometry::{Checkpoint, DisplayConfig, Vec3};
//! use kurbo::{Point, Size};
//!
//! let checkpoints = [
//!     Checkpoint::new(0, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
//!     Checkpoint::new(1, Vec3::new(0.0, 0.0, 800.0), Vec3::new(1.0, 0.0, 0.0)),
//! ];
//! let config = DisplayConfig::default();
//! let mut diagram = Diagram::new(Size::new(800.0, 600.0), config.clone());
//!
//! let course = Course::new("MCTR", &checkpoints);
//! assert_eq!(diagram.refresh(Some(&course), &config), RefreshOutcome::Refit);
//!
//! // Zoom in about the pointer, then refresh the same course: the view stays.
//! diagram.on_scroll(Point::new(200.0, 150.0), 1.0);
//! let zoomed = diagram.view().window();
//! assert_eq!(diagram.refresh(Some(&course), &config), RefreshOutcome::Preserved);
//! assert_eq!(diagram.view().window(), zoomed);
//!
//! // Reset refits to the data.
//! assert!(diagram.on_key(Key::Reset));
//! ```
//!
//! Coordinates passed to the event handlers are surface pixels with the
//! origin at the bottom-left corner. Hosts with a top-left origin convert with
//! [`ViewTransform::flip_y`](gatemap_view2d::ViewTransform::flip_y).
//!
//! Logging goes through `tracing`; the crate never installs a subscriber.

mod diagram;
pub mod error;
pub mod export;
pub mod glyphs;
pub mod ingest;
pub mod input;
pub mod render;
pub mod settings;

pub use diagram::{AxisReading, Course, Diagram, KEY_PAN_FRACTION, PointerCoordinates, RefreshOutcome};
pub use error::{ExportError, IngestError, SettingsError};
pub use export::ExportSummary;
pub use input::{CursorHint, Key};
