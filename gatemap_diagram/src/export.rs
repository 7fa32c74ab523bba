// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterizing the diagram to a PNG file.
//!
//! An export covers the whole surface, or the committed selection when there
//! is one with positive area. The region is converted to inches with the
//! display resolution and rasterized at the save resolution, so only pixel
//! density changes between the screen and the file.
//!
//! The image is always PNG, whatever the file extension, and carries a
//! `pHYs` chunk with the save resolution. It is written to a temporary file
//! next to the target and then moved into place.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use gatemap_geometry::Scene;
use gatemap_imaging_vello_cpu::rasterize;
use gatemap_view2d::ViewTransform;
use kurbo::{Point, Rect};
use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ExportError;
use crate::render::{Frame, render_scene};

const METERS_PER_INCH: f64 = 0.0254;

/// Where and how large an export is, before anything is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportPlan {
    region: Rect,
    region_inches: Rect,
    width: u16,
    height: u16,
    dpi: f64,
    scale: f64,
    cropped: bool,
}

impl ExportPlan {
    /// Plans an export of `view` at `save_dpi`.
    ///
    /// `selection` is a committed selection in surface pixels; a missing or
    /// zero-area selection exports the whole surface.
    pub fn new(
        view: &ViewTransform,
        selection: Option<Rect>,
        save_dpi: f64,
    ) -> Result<Self, ExportError> {
        if !(save_dpi.is_finite() && save_dpi > 0.0) {
            return Err(ExportError::InvalidDpi(save_dpi));
        }
        let selection = selection.filter(|r| r.width() > 0.0 && r.height() > 0.0);
        let region = selection.unwrap_or_else(|| view.surface_rect());
        let dpi = view.dpi();
        let region_inches = Rect::from_points(
            Point::new(region.x0 / dpi, region.y0 / dpi),
            Point::new(region.x1 / dpi, region.y1 / dpi),
        );

        let width = (region_inches.width() * save_dpi).round();
        let height = (region_inches.height() * save_dpi).round();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(ExportError::EmptyRegion);
        }
        let (Some(w), Some(h)) = (pixel_count(width), pixel_count(height)) else {
            return Err(ExportError::TooLarge {
                width,
                height,
                max: u16::MAX,
            });
        };

        Ok(Self {
            region: region.abs(),
            region_inches,
            width: w,
            height: h,
            dpi: save_dpi,
            scale: save_dpi / dpi,
            cropped: selection.is_some(),
        })
    }

    /// Surface region being exported, in display pixels.
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Exported region in inches from the surface's bottom-left corner.
    pub fn region_inches(&self) -> Rect {
        self.region_inches
    }

    /// Output width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Output resolution.
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Whether only a selection is exported.
    pub fn is_cropped(&self) -> bool {
        self.cropped
    }

    /// The render frame for this export.
    pub fn frame(&self) -> Frame {
        Frame::new(self.region, self.scale)
    }
}

/// What an export wrote.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSummary {
    /// Destination file.
    pub path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Resolution recorded in the file.
    pub dpi: f64,
    /// Exported region in inches.
    pub region_inches: Rect,
    /// Whether a selection limited the export.
    pub cropped: bool,
}

/// Rasterizes `scene` through `view` and writes it to `path` as PNG.
///
/// The view is only read; a failed export leaves the previous file at `path`
/// (if any) in place.
pub fn export_png(
    path: impl AsRef<Path>,
    scene: &Scene,
    view: &ViewTransform,
    selection: Option<Rect>,
    save_dpi: f64,
) -> Result<ExportSummary, ExportError> {
    let path = path.as_ref();
    let plan = ExportPlan::new(view, selection, save_dpi)?;
    let frame = plan.frame();
    let pixels = rasterize(plan.width, plan.height, |backend| {
        render_scene(backend, scene, view, &frame, None);
    });
    let encoded = encode_png(&pixels, plan.width, plan.height, plan.dpi)?;
    write_atomically(path, &encoded)?;

    let summary = ExportSummary {
        path: path.to_path_buf(),
        width: u32::from(plan.width),
        height: u32::from(plan.height),
        dpi: plan.dpi,
        region_inches: plan.region_inches,
        cropped: plan.cropped,
    };
    debug!(
        path = %path.display(),
        width = summary.width,
        height = summary.height,
        dpi = summary.dpi,
        cropped = summary.cropped,
        "exported diagram"
    );
    Ok(summary)
}

/// Encodes straight-alpha RGBA8 pixels, top row first.
pub fn encode_png(pixels: &[u8], width: u16, height: u16, dpi: f64) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, u32::from(width), u32::from(height));
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let ppu = pixels_per_meter(dpi);
    encoder.set_pixel_dims(Some(PixelDimensions {
        xppu: ppu,
        yppu: ppu,
        unit: Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels)?;
    writer.finish()?;
    Ok(out)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(bytes).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "checked against the u16 range before the cast"
)]
fn pixel_count(v: f64) -> Option<u16> {
    (v <= f64::from(u16::MAX)).then(|| v as u16)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "resolutions are far below u32::MAX pixels per meter"
)]
fn pixels_per_meter(dpi: f64) -> u32 {
    (dpi / METERS_PER_INCH).round().clamp(0.0, f64::from(u32::MAX)) as u32
}
