// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagram colors.
//!
//! Colors are computed in HSV and quantized to 8-bit RGB, so two colors that
//! describe the same HSV triple always compare equal.

use peniko::Color;

use crate::records::Checkpoint;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// HSV at the start of the checkpoint ramp (medium green).
pub const RAMP_START: [f64; 3] = [0.33, 1.0, 0.7];
/// HSV at the end of the checkpoint ramp (bright red).
pub const RAMP_END: [f64; 3] = [1.0, 1.0, 1.0];

/// Converts an HSV triple (each channel in `0..=1`) to linear RGB channels.
///
/// Hue wraps: `h = 1.0` is the same red as `h = 0.0`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let h = h.clamp(0.0, 1.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    if s == 0.0 {
        return [v, v, v];
    }

    let scaled = h * 6.0;
    let floor = scaled.floor();
    let f = scaled - floor;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    #[allow(
        clippy::cast_possible_truncation,
        reason = "floor is an integer in 0..=6"
    )]
    let sector = floor as i32;
    match sector.rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Converts an HSV triple to an opaque 8-bit color.
pub fn hsv(h: f64, s: f64, v: f64) -> Color {
    let [r, g, b] = hsv_to_rgb(h, s, v);
    Color::from_rgb8(channel(r), channel(g), channel(b))
}

fn channel(value: f64) -> u8 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is clamped to 0..=255 before the cast"
    )]
    let byte = (value * 255.0).round().clamp(0.0, 255.0) as u8;
    byte
}

/// Color of a successful crossing and of the path overlay.
pub fn success_color() -> Color {
    hsv(0.0, 0.0, 0.0)
}

/// Color of a failed crossing: HSV `(0, 0, 0.6)`.
pub fn failure_color() -> Color {
    hsv(0.0, 0.0, 0.6)
}

/// Color of the recorded path overlay.
pub fn path_color() -> Color {
    Color::BLACK
}

/// Color of checkpoint `index` out of `count` on the green-to-red ramp.
///
/// Uses `t = (index + 1) / count`, so the last checkpoint is exactly
/// [`RAMP_END`] and the first is one step past [`RAMP_START`].
pub fn ramp(index: usize, count: usize) -> Color {
    if count == 0 {
        return hsv(RAMP_START[0], RAMP_START[1], RAMP_START[2]);
    }
    let t = (index + 1) as f64 / count as f64;
    let lerp = |i: usize| RAMP_START[i] + (RAMP_END[i] - RAMP_START[i]) * t;
    hsv(lerp(0), lerp(1), lerp(2))
}

/// Assigns ramp colors to `checkpoints` in slice order.
pub fn assign_ramp(checkpoints: &mut [Checkpoint]) {
    let count = checkpoints.len();
    for (index, checkpoint) in checkpoints.iter_mut().enumerate() {
        checkpoint.color = ramp(index, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Vec3;
    use alloc::vec::Vec;

    #[test]
    fn crossing_colors_are_exact() {
        assert_eq!(failure_color(), Color::from_rgb8(153, 153, 153));
        assert_eq!(success_color(), Color::from_rgb8(0, 0, 0));
        assert_eq!(path_color(), success_color());
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hsv(0.0, 1.0, 1.0), Color::from_rgb8(255, 0, 0));
        assert_eq!(hsv(1.0, 1.0, 1.0), Color::from_rgb8(255, 0, 0));
        assert_eq!(hsv(1.0 / 3.0, 1.0, 1.0), Color::from_rgb8(0, 255, 0));
        assert_eq!(hsv(2.0 / 3.0, 1.0, 1.0), Color::from_rgb8(0, 0, 255));
    }

    #[test]
    fn ramp_ends_at_red() {
        assert_eq!(ramp(4, 5), Color::from_rgb8(255, 0, 0));
        assert_eq!(ramp(0, 1), Color::from_rgb8(255, 0, 0));
    }

    #[test]
    fn assign_ramp_follows_slice_order() {
        let mut cps: Vec<Checkpoint> = (0..4)
            .map(|id| Checkpoint::new(id, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)))
            .collect();
        assign_ramp(&mut cps);
        for (i, cp) in cps.iter().enumerate() {
            assert_eq!(cp.color, ramp(i, 4));
        }
        assert_ne!(cps[0].color, cps[3].color);
    }
}
