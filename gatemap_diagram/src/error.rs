// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for settings, record ingestion, and export.

use std::fmt;
use std::io;
use std::path::PathBuf;

use gatemap_geometry::ParseAxisError;
use thiserror::Error;

/// A text field of the settings form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingsField {
    /// Distance between a checkpoint number and the track edge.
    NumberDistance,
    /// Font size of checkpoint numbers.
    NumberSize,
    /// Guide-line half length.
    ExtendLength,
    /// Display resolution.
    Dpi,
    /// Export resolution.
    SaveDpi,
    /// Checkpoints with guide lines.
    ExtendedCheckpoints,
    /// Checkpoints not drawn.
    HiddenCheckpoints,
    /// Checkpoints without a number label.
    HiddenNumbers,
    /// Horizontal diagram axis.
    HorizontalAxis,
    /// Vertical diagram axis.
    VerticalAxis,
}

impl SettingsField {
    /// Human readable field name, as shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::NumberDistance => "Number distance",
            Self::NumberSize => "Number size",
            Self::ExtendLength => "Extend length",
            Self::Dpi => "DPI",
            Self::SaveDpi => "Save DPI",
            Self::ExtendedCheckpoints => "Extended checkpoints",
            Self::HiddenCheckpoints => "Hidden checkpoints",
            Self::HiddenNumbers => "Hidden numbers",
            Self::HorizontalAxis => "Horizontal axis",
            Self::VerticalAxis => "Vertical axis",
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a checkpoint-set expression such as `"0,2-5,177-193"` was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{item}` is not a checkpoint number or a `low-high` range")]
pub struct CheckpointSetError {
    /// The offending comma-separated item, trimmed.
    pub item: String,
}

/// A settings field that could not be applied.
///
/// The field keeps its previous value; other fields are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// The text is not a finite number.
    #[error("{field} must be a number.")]
    NotANumber {
        /// Field that failed.
        field: SettingsField,
        /// Text as entered.
        text: String,
    },

    /// The number must be strictly positive.
    #[error("{field} must be greater than zero.")]
    NotPositive {
        /// Field that failed.
        field: SettingsField,
        /// Parsed value.
        value: f64,
    },

    /// The number must not be negative.
    #[error("{field} must not be negative.")]
    Negative {
        /// Field that failed.
        field: SettingsField,
        /// Parsed value.
        value: f64,
    },

    /// A checkpoint-set expression is malformed.
    #[error("{field} are not in the correct format: {source}")]
    CheckpointSet {
        /// Field that failed.
        field: SettingsField,
        /// What was wrong with the expression.
        source: CheckpointSetError,
    },

    /// An axis token is not one of `x`, `y`, `z`, `-x`, `-y`, `-z`.
    #[error("{field}: {source}")]
    Axis {
        /// Field that failed.
        field: SettingsField,
        /// Parse failure from the axis token.
        source: ParseAxisError,
    },
}

impl SettingsError {
    /// The field this error belongs to.
    pub fn field(&self) -> SettingsField {
        match self {
            Self::NotANumber { field, .. }
            | Self::NotPositive { field, .. }
            | Self::Negative { field, .. }
            | Self::CheckpointSet { field, .. }
            | Self::Axis { field, .. } => *field,
        }
    }
}

/// A record table that could not be turned into typed records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// A required column is absent from the header.
    #[error("missing column `{column}`")]
    MissingColumn {
        /// Normalized column name.
        column: &'static str,
    },

    /// A cell that must hold a number does not.
    #[error("row {row}: `{column}` value `{text}` is not a number")]
    BadNumber {
        /// Zero-based index of the data row, counting skipped empty rows.
        row: usize,
        /// Normalized column name.
        column: &'static str,
        /// Cell text as read.
        text: String,
    },
}

/// Failure to write an exported image.
///
/// The interactive view is never modified by an export, failed or not.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export resolution is not a positive finite number.
    #[error("save DPI must be a positive number, got {0}")]
    InvalidDpi(f64),

    /// The region to export has no pixels at the requested resolution.
    #[error("export region is empty")]
    EmptyRegion,

    /// The image would exceed the rasterizer's size limit.
    #[error("export of {width}x{height} pixels exceeds the {max} pixel limit per side")]
    TooLarge {
        /// Requested width in pixels.
        width: f64,
        /// Requested height in pixels.
        height: f64,
        /// Largest supported side length.
        max: u16,
    },

    /// PNG encoding failed.
    #[error("failed to encode PNG")]
    Encode(#[from] png::EncodingError),

    /// Creating, writing, or moving the output file failed.
    #[error("failed to write {}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
