// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::ops::{Add, Mul, Neg, Sub};

use peniko::Color;

use crate::axis::Axis;

/// Track width used when the upstream data specifies none.
pub const DEFAULT_TRACK_WIDTH: f64 = 90.0;

/// Checkpoint number as it appears in course data.
pub type CheckpointId = i64;

/// A point or direction in game (3D) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the component along `axis`.
    #[inline]
    pub const fn component(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    #[inline]
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

/// One point of a recorded driving path. Order within a path is draw order.
pub type PathPoint = Vec3;

/// A gate along the track.
///
/// The gate spans `track_width` along its `right` direction, centered on
/// `center`. Positions along that line are addressed by a signed *lateral
/// offset* (see [`Checkpoint::lateral_point`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    /// Checkpoint number, unique within a course.
    pub id: CheckpointId,
    /// Center of the gate.
    pub center: Vec3,
    /// Lateral direction of the gate (roughly unit length).
    pub right: Vec3,
    /// Full width of the track at this gate. Always positive.
    pub track_width: f64,
    /// Line and label color.
    pub color: Color,
}

impl Checkpoint {
    /// Creates a checkpoint with [`DEFAULT_TRACK_WIDTH`] and a black color.
    pub fn new(id: CheckpointId, center: Vec3, right: Vec3) -> Self {
        Self {
            id,
            center,
            right,
            track_width: DEFAULT_TRACK_WIDTH,
            color: Color::BLACK,
        }
    }

    /// Returns the checkpoint with the given track width.
    #[must_use]
    pub fn with_track_width(mut self, track_width: f64) -> Self {
        self.track_width = track_width;
        self
    }

    /// Returns the checkpoint with the given color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Half of the track width.
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.track_width / 2.0
    }

    /// The 3D point `offset` units along the lateral direction from the center.
    #[inline]
    pub fn lateral_point(&self, offset: f64) -> Vec3 {
        self.center + self.right * offset
    }
}

/// A recorded line-crossing attempt, drawn as a segment between two points.
#[derive(Clone, Debug, PartialEq)]
pub struct Crossing {
    /// First endpoint.
    pub start: Vec3,
    /// Second endpoint.
    pub end: Vec3,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Course code the attempt was recorded on.
    pub track: String,
}
