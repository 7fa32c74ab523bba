// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroked vector glyphs for checkpoint numbers.
//!
//! Labels only ever show integer ids, so a font is not needed: each digit and
//! the minus sign is a handful of strokes on a 4 × 6 grid, drawn with round
//! caps. Coordinates here are device pixels with `y` growing downward.

use kurbo::{BezPath, Point, Size};

/// Digit height as a fraction of the font size.
pub const CAP_HEIGHT_RATIO: f64 = 0.72;

const GRID_WIDTH: f64 = 4.0;
const GRID_HEIGHT: f64 = 6.0;
const GRID_GAP: f64 = 2.0;

type GlyphStroke = &'static [(f64, f64)];

fn strokes(c: char) -> &'static [GlyphStroke] {
    match c {
        '0' => &[&[(0., 0.), (4., 0.), (4., 6.), (0., 6.), (0., 0.)]],
        '1' => &[&[(1., 1.), (2., 0.), (2., 6.)]],
        '2' => &[&[(0., 0.), (4., 0.), (4., 3.), (0., 3.), (0., 6.), (4., 6.)]],
        '3' => &[&[(0., 0.), (4., 0.), (4., 6.), (0., 6.)], &[(0., 3.), (4., 3.)]],
        '4' => &[&[(0., 0.), (0., 3.), (4., 3.)], &[(4., 0.), (4., 6.)]],
        '5' => &[&[(4., 0.), (0., 0.), (0., 3.), (4., 3.), (4., 6.), (0., 6.)]],
        '6' => &[&[(4., 0.), (0., 0.), (0., 6.), (4., 6.), (4., 3.), (0., 3.)]],
        '7' => &[&[(0., 0.), (4., 0.), (4., 6.)]],
        '8' => &[
            &[(0., 0.), (4., 0.), (4., 6.), (0., 6.), (0., 0.)],
            &[(0., 3.), (4., 3.)],
        ],
        '9' => &[&[(4., 3.), (0., 3.), (0., 0.), (4., 0.), (4., 6.), (0., 6.)]],
        '-' => &[&[(0.5, 3.), (3.5, 3.)]],
        _ => &[],
    }
}

fn unit(size_px: f64) -> f64 {
    size_px * CAP_HEIGHT_RATIO / GRID_HEIGHT
}

/// Extent of `text` at `size_px`, excluding stroke width.
///
/// Characters without a glyph still take up a cell.
pub fn text_size(text: &str, size_px: f64) -> Size {
    let count = text.chars().count() as f64;
    if count == 0.0 {
        return Size::ZERO;
    }
    let u = unit(size_px);
    Size::new(
        (count * (GRID_WIDTH + GRID_GAP) - GRID_GAP) * u,
        GRID_HEIGHT * u,
    )
}

/// Stroke width that goes with `size_px`.
pub fn stroke_width(size_px: f64) -> f64 {
    size_px / 10.0
}

/// Outline of `text` whose bottom-center sits on `anchor`.
pub fn outline(text: &str, anchor: Point, size_px: f64) -> BezPath {
    let mut path = BezPath::new();
    let size = text_size(text, size_px);
    let u = unit(size_px);
    let left = anchor.x - size.width / 2.0;
    let top = anchor.y - size.height;
    for (index, c) in text.chars().enumerate() {
        let origin_x = left + index as f64 * (GRID_WIDTH + GRID_GAP) * u;
        for stroke in strokes(c) {
            let mut points = stroke
                .iter()
                .map(|&(x, y)| Point::new(origin_x + x * u, top + y * u));
            if let Some(first) = points.next() {
                path.move_to(first);
                for p in points {
                    path.line_to(p);
                }
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;

    #[test]
    fn size_grows_with_text() {
        let one = text_size("7", 60.0);
        let two = text_size("17", 60.0);
        assert!((one.height - 43.2).abs() < 1e-9, "digit height is 0.72 em");
        assert!(two.width > one.width, "wider text for more digits");
        assert_eq!(text_size("", 60.0), Size::ZERO);
    }

    #[test]
    fn outline_is_bottom_centered_on_anchor() {
        let anchor = Point::new(100.0, 50.0);
        let bbox = outline("80", anchor, 30.0).bounding_box();
        assert!((bbox.center().x - anchor.x).abs() < 1e-9, "horizontally centered");
        assert!((bbox.y1 - anchor.y).abs() < 1e-9, "bottom on the anchor");
        assert!(bbox.y0 < anchor.y, "text extends upward");
    }

    #[test]
    fn unknown_characters_leave_a_gap() {
        let path = outline("1?1", Point::ZERO, 10.0);
        let moves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2, "only the two digits are drawn");
        assert!(outline("", Point::ZERO, 10.0).elements().is_empty());
    }
}
