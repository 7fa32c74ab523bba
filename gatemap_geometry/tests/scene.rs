// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene building over whole courses.

use gatemap_geometry::color::{failure_color, success_color};
use gatemap_geometry::{
    Checkpoint, Crossing, DataExtent, DisplayConfig, LineStyle, Primitive, Source, Vec3, build,
};
use kurbo::Point;

fn straight(id: i64) -> Checkpoint {
    Checkpoint::new(id, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)).with_track_width(100.0)
}

#[test]
fn single_checkpoint_line_label_and_extent() {
    let scene = build(&[straight(1)], None, None, &DisplayConfig::default());

    let line = scene.lines().next().unwrap();
    let h: Vec<f64> = line.points.iter().map(|p| p.x).collect();
    let v: Vec<f64> = line.points.iter().map(|p| p.y).collect();
    assert_eq!(h, [-50.0, 0.0, 50.0]);
    assert_eq!(v, [0.0, 0.0, 0.0]);
    assert_eq!(line.style, LineStyle::Marked);

    let label = scene.labels().next().unwrap();
    assert_eq!(label.text, "1");
    assert_eq!(label.anchor, Point::new(125.0, 0.0));
    assert_eq!(label.size, 14.0);

    assert_eq!(scene.extent(), DataExtent::new(-50.0, 125.0, 0.0, 0.0));
}

#[test]
fn hidden_number_shrinks_extent() {
    let config = DisplayConfig {
        hidden_numbers: [1].into_iter().collect(),
        ..DisplayConfig::default()
    };
    let scene = build(&[straight(1)], None, None, &config);
    assert_eq!(scene.labels().count(), 0);
    assert_eq!(scene.extent().hmax, 50.0);
}

#[test]
fn hidden_checkpoint_contributes_nothing() {
    let far = Checkpoint::new(2, Vec3::new(5000.0, 0.0, -5000.0), Vec3::new(0.0, 0.0, 1.0));
    let with_hidden = DisplayConfig {
        hidden_checkpoints: [2].into_iter().collect(),
        extended_checkpoints: [2].into_iter().collect(),
        ..DisplayConfig::default()
    };

    let a = build(&[straight(1), far], None, None, &with_hidden);
    let b = build(&[straight(1)], None, None, &DisplayConfig::default());
    assert_eq!(a, b);
    assert_eq!(a.by_source(Source::Extension(2)).count(), 0);
}

#[test]
fn extension_is_not_part_of_extent() {
    let config = DisplayConfig {
        extended_checkpoints: [1].into_iter().collect(),
        hidden_numbers: [1].into_iter().collect(),
        ..DisplayConfig::default()
    };
    let scene = build(&[straight(1)], None, None, &config);
    let Some(Primitive::Line(ext)) = scene.by_source(Source::Extension(1)).next() else {
        panic!("expected an extension line");
    };
    assert_eq!(ext.points, [Point::new(-2000.0, 0.0), Point::new(2000.0, 0.0)]);
    assert_eq!(ext.style, LineStyle::Plain);
    assert_eq!(scene.extent(), DataExtent::new(-50.0, 50.0, 0.0, 0.0));
}

#[test]
fn negative_number_distance_labels_left_edge() {
    let config = DisplayConfig {
        number_distance: -20.0,
        ..DisplayConfig::default()
    };
    let scene = build(&[straight(1)], None, None, &config);
    assert_eq!(scene.labels().next().unwrap().anchor.x, -70.0);
    assert_eq!(scene.extent().hmin, -70.0);
}

#[test]
fn path_and_crossings_follow_checkpoints() {
    let path = [
        Vec3::new(0.0, 0.0, 10.0),
        Vec3::new(1000.0, 0.0, 20.0),
        Vec3::new(2000.0, 0.0, 30.0),
    ];
    let crossings = [
        Crossing {
            start: Vec3::new(0.0, 0.0, 0.0),
            end: Vec3::new(1.0, 0.0, 1.0),
            success: true,
            track: "3-2".into(),
        },
        Crossing {
            start: Vec3::new(2.0, 0.0, 2.0),
            end: Vec3::new(3.0, 0.0, 3.0),
            success: false,
            track: "3-2".into(),
        },
    ];
    let scene = build(
        &[straight(1)],
        Some(&path),
        Some(&crossings),
        &DisplayConfig::default(),
    );

    let sources: Vec<Source> = scene.primitives().iter().map(Primitive::source).collect();
    assert_eq!(
        sources,
        [
            Source::Checkpoint(1),
            Source::Number(1),
            Source::Path,
            Source::Crossing(0),
            Source::Crossing(0),
            Source::Crossing(1),
            Source::Crossing(1),
        ]
    );

    let lines: Vec<_> = scene.lines().collect();
    assert_eq!(lines[1].points[2], Point::new(2000.0, -30.0));
    assert_eq!(lines[2].color, success_color());
    assert_eq!(lines[2].style, LineStyle::Plain);
    assert_eq!(lines[3].style, LineStyle::Marked);
    assert_eq!(lines[4].color, failure_color());
    assert_eq!(lines[5].color, failure_color());

    // Overlays never move the fitted area.
    assert_eq!(scene.extent(), DataExtent::new(-50.0, 125.0, 0.0, 0.0));
}

#[test]
fn zero_checkpoints_give_sentinel_extent() {
    let path = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let scene = build(&[], Some(&path), None, &DisplayConfig::default());
    assert_eq!(scene.primitives().len(), 1);
    assert!(scene.extent().is_empty());
}
