// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeSet;

use crate::axis::AxisPair;
use crate::records::CheckpointId;

/// A set of checkpoint numbers, e.g. parsed from `"0,2-5,177-193"`.
pub type CheckpointSet = BTreeSet<CheckpointId>;

/// Everything that shapes one build of the diagram.
///
/// A fresh value is produced for every update request and stays immutable
/// for the duration of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Horizontal and vertical diagram axes.
    pub axes: AxisPair,
    /// Checkpoints that are not drawn at all.
    pub hidden_checkpoints: CheckpointSet,
    /// Checkpoints that also get a long unmarked guide line.
    pub extended_checkpoints: CheckpointSet,
    /// Diagram-plane length of each half of a guide line. Non-negative.
    pub extend_length: f64,
    /// Checkpoints whose number label is suppressed.
    pub hidden_numbers: CheckpointSet,
    /// Diagram-plane distance from the track edge to the label.
    ///
    /// Positive places labels beyond the `+w/2` edge, otherwise beyond the
    /// `-w/2` edge.
    pub number_distance: f64,
    /// Label font size in points. Positive.
    pub number_size: f64,
    /// Display resolution in dots per inch. Positive.
    pub dpi: f64,
    /// Export resolution in dots per inch. Positive.
    pub save_dpi: f64,
}

impl DisplayConfig {
    /// Default guide-line half length.
    pub const DEFAULT_EXTEND_LENGTH: f64 = 2000.0;
    /// Default label distance.
    pub const DEFAULT_NUMBER_DISTANCE: f64 = 75.0;
    /// Default label size in points.
    pub const DEFAULT_NUMBER_SIZE: f64 = 14.0;
    /// Default display and export resolution.
    pub const DEFAULT_DPI: f64 = 100.0;

    /// Whether checkpoint `id` is drawn.
    #[inline]
    pub fn shows_checkpoint(&self, id: CheckpointId) -> bool {
        !self.hidden_checkpoints.contains(&id)
    }

    /// Whether checkpoint `id` gets a guide line.
    #[inline]
    pub fn extends_checkpoint(&self, id: CheckpointId) -> bool {
        self.extended_checkpoints.contains(&id)
    }

    /// Whether checkpoint `id` gets a number label.
    #[inline]
    pub fn shows_number(&self, id: CheckpointId) -> bool {
        !self.hidden_numbers.contains(&id)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            axes: AxisPair::default(),
            hidden_checkpoints: CheckpointSet::new(),
            extended_checkpoints: CheckpointSet::new(),
            extend_length: Self::DEFAULT_EXTEND_LENGTH,
            hidden_numbers: CheckpointSet::new(),
            number_distance: Self::DEFAULT_NUMBER_DISTANCE,
            number_size: Self::DEFAULT_NUMBER_SIZE,
            dpi: Self::DEFAULT_DPI,
            save_dpi: Self::DEFAULT_DPI,
        }
    }
}
