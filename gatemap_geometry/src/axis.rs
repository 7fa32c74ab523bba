// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use kurbo::Point;

use crate::records::{Checkpoint, Vec3};

/// One of the three game coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Points right from the finish line.
    X,
    /// Points up.
    Y,
    /// Points backward from the finish line.
    Z,
}

impl Axis {
    /// Lowercase axis name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

/// A game axis plus a sign, selecting what a diagram axis displays.
///
/// `-z` plots the negated `z` coordinate, which puts "forward from the
/// finish line" at the top of a diagram whose vertical axis grows upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignedAxis {
    axis: Axis,
    negated: bool,
}

impl SignedAxis {
    /// `x`
    pub const X: Self = Self::new(Axis::X, false);
    /// `y`
    pub const Y: Self = Self::new(Axis::Y, false);
    /// `z`
    pub const Z: Self = Self::new(Axis::Z, false);
    /// `-x`
    pub const NEG_X: Self = Self::new(Axis::X, true);
    /// `-y`
    pub const NEG_Y: Self = Self::new(Axis::Y, true);
    /// `-z`
    pub const NEG_Z: Self = Self::new(Axis::Z, true);

    /// All six selectable axes in menu order.
    pub const ALL: [Self; 6] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::NEG_X,
        Self::NEG_Y,
        Self::NEG_Z,
    ];

    /// Creates a signed axis.
    pub const fn new(axis: Axis, negated: bool) -> Self {
        Self { axis, negated }
    }

    /// The underlying game axis.
    pub const fn axis(self) -> Axis {
        self.axis
    }

    /// Whether values along this axis are negated.
    pub const fn is_negated(self) -> bool {
        self.negated
    }

    /// `-1.0` for negated axes, `1.0` otherwise.
    pub const fn sign(self) -> f64 {
        if self.negated { -1.0 } else { 1.0 }
    }

    /// The token for this axis (`"x"`, `"-z"`, ...).
    pub const fn token(self) -> &'static str {
        match (self.axis, self.negated) {
            (Axis::X, false) => "x",
            (Axis::Y, false) => "y",
            (Axis::Z, false) => "z",
            (Axis::X, true) => "-x",
            (Axis::Y, true) => "-y",
            (Axis::Z, true) => "-z",
        }
    }

    /// Projects a raw 3D point.
    #[inline]
    pub fn project_point(self, point: Vec3) -> f64 {
        self.sign() * point.component(self.axis)
    }

    /// Projects the point `offset` units along the checkpoint's lateral direction.
    #[inline]
    pub fn project_lateral(self, checkpoint: &Checkpoint, offset: f64) -> f64 {
        let center = checkpoint.center.component(self.axis);
        let right = checkpoint.right.component(self.axis);
        self.sign() * (center + offset * right)
    }

    /// Converts a displayed value back into the physical axis value.
    ///
    /// For `-z`, a displayed `490.0` is a game `z` of `-490.0`.
    #[inline]
    pub fn physical_value(self, displayed: f64) -> f64 {
        self.sign() * displayed
    }
}

impl fmt::Display for SignedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SignedAxis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|axis| axis.token() == token)
            .ok_or_else(|| ParseAxisError {
                token: String::from(token),
            })
    }
}

/// Error returned when an axis token is not one of the six supported values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAxisError {
    token: String,
}

impl ParseAxisError {
    /// The rejected token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for ParseAxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown axis `{}` (expected one of x, y, z, -x, -y, -z)",
            self.token
        )
    }
}

impl core::error::Error for ParseAxisError {}

/// The horizontal and vertical axes of a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisPair {
    /// Axis shown left to right.
    pub horizontal: SignedAxis,
    /// Axis shown bottom to top.
    pub vertical: SignedAxis,
}

impl AxisPair {
    /// Creates an axis pair.
    pub const fn new(horizontal: SignedAxis, vertical: SignedAxis) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Projects a raw 3D point onto the diagram plane.
    #[inline]
    pub fn project_point(self, point: Vec3) -> Point {
        Point::new(
            self.horizontal.project_point(point),
            self.vertical.project_point(point),
        )
    }

    /// Projects a lateral offset of a checkpoint onto the diagram plane.
    #[inline]
    pub fn project_lateral(self, checkpoint: &Checkpoint, offset: f64) -> Point {
        Point::new(
            self.horizontal.project_lateral(checkpoint, offset),
            self.vertical.project_lateral(checkpoint, offset),
        )
    }
}

impl Default for AxisPair {
    fn default() -> Self {
        Self::new(SignedAxis::X, SignedAxis::NEG_Z)
    }
}
