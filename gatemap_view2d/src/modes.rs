// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Direction of a single zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Show less data (content grows).
    In,
    /// Show more data (content shrinks).
    Out,
}

impl ZoomDirection {
    /// Maps a scroll step to a direction: positive steps zoom in.
    ///
    /// Returns `None` for a zero step.
    #[must_use]
    pub fn from_scroll(step: f64) -> Option<Self> {
        if step > 0.0 {
            Some(Self::In)
        } else if step < 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

/// Which span an aspect fix grew to match the surface proportions.
///
/// Returned by fitting operations; shared by
/// [`crate::ViewTransform::fit_to_data`] and
/// [`crate::ViewTransform::fit_to_surface_resize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AspectFix {
    /// The vertical span was grown (or left as is when already exact).
    #[default]
    Vertical,
    /// The horizontal span was grown.
    Horizontal,
}
