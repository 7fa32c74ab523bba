// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-independent input vocabulary.

/// A key the diagram reacts to.
///
/// Hosts map their own key codes onto these; everything else is ignored
/// before it reaches the diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Reveal more of the data to the left.
    Left,
    /// Reveal more of the data to the right.
    Right,
    /// Reveal more of the data above.
    Up,
    /// Reveal more of the data below.
    Down,
    /// Zoom in about the surface center (`+`).
    ZoomIn,
    /// Zoom out about the surface center (`-`).
    ZoomOut,
    /// Abandon the selection gesture, or drop the committed selection.
    Escape,
    /// Arm the rectangle selection tool.
    Select,
    /// Refit the view to the data.
    Reset,
}

/// Pointer cursor the host should show over the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CursorHint {
    /// Regular arrow.
    #[default]
    Default,
    /// The selection tool is armed or drawing.
    Crosshair,
    /// A pan drag is in progress.
    Grabbing,
}
