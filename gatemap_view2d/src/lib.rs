// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gatemap View 2D: the data window behind an interactive diagram.
//!
//! This crate provides a small, headless model of which rectangle of data
//! space is visible on a drawing surface. It focuses on:
//! - Conversion between surface pixels and data coordinates.
//! - Panning by pixel deltas, with content following the pointer.
//! - Zooming in fixed steps about a pixel anchor.
//! - Aspect-locked fitting to a data extent, and re-fixing the aspect ratio
//!   when the surface is resized.
//! - Keeping pixel dimensions stable across display DPI changes.
//!
//! Unlike a zoom+pan camera, [`ViewTransform`] stores the visible
//! [`ViewWindow`] directly, and the horizontal and vertical scales are only
//! equal because every fit keeps them so. Panning and zooming preserve the
//! ratio.
//!
//! ## Minimal example
//!
//! ```rust
//! use gatemap_geometry::DataExtent;
//! use gatemap_view2d::{DEFAULT_MARGIN, ViewTransform, ZoomDirection};
//! use kurbo::{Point, Size};
//!
//! // 800x600 pixel surface at 100 dpi.
//! let mut view = ViewTransform::new(Size::new(800.0, 600.0), 100.0);
//! view.fit_to_data(&DataExtent::new(-50.0, 125.0, 0.0, 10.0), DEFAULT_MARGIN);
//!
//! // Zoom in about the pixel under the pointer; the data under it stays put.
//! let pointer = Point::new(400.0, 300.0);
//! let before = view.pixel_to_data(pointer);
//! view.zoom(pointer, ZoomDirection::In);
//! let after = view.pixel_to_data(pointer);
//! assert!((after.x - before.x).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod modes;
mod transform;
mod window;

pub use modes::{AspectFix, ZoomDirection};
pub use transform::{DEFAULT_MARGIN, ViewTransform, ViewTransformDebugInfo, ZOOM_FACTOR};
pub use window::ViewWindow;
