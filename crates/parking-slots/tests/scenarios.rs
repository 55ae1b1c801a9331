use approx::assert_relative_eq;
use parking_slots::infer::{group_rows, RowGroupingParams};
use parking_slots::{BoundingBox, Detection, EmptySlotDetector, EmptySlotParams};

fn car(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Detection {
    Detection::car(BoundingBox::new(x_min, y_min, x_max, y_max), 0.9)
}

fn detector() -> EmptySlotDetector {
    EmptySlotDetector::new(EmptySlotParams::default()).expect("default params")
}

/// Pixel-space single row: tolerance scaled for a 100 px tall image.
fn pixel_detector() -> EmptySlotDetector {
    EmptySlotDetector::new(EmptySlotParams::for_image_height(100.0)).expect("pixel params")
}

#[test]
fn three_evenly_spaced_cars_leave_two_slots() {
    let dets = vec![
        car(0.0, 40.0, 10.0, 60.0),
        car(20.0, 40.0, 30.0, 60.0),
        car(40.0, 40.0, 50.0, 60.0),
    ];
    let res = pixel_detector().detect(&dets).unwrap();
    assert_eq!(res.rows.len(), 1);
    assert_eq!(res.empty_slots.len(), 2);
    for s in &res.empty_slots {
        assert_relative_eq!(s.bbox.width(), 10.0);
    }
    assert_eq!(res.empty_slots[0].bbox, BoundingBox::new(10.0, 40.0, 20.0, 60.0));
    assert_eq!(res.empty_slots[1].bbox, BoundingBox::new(30.0, 40.0, 40.0, 60.0));
}

#[test]
fn wide_gap_is_tiled_with_nine_slots() {
    let dets = vec![car(0.0, 40.0, 10.0, 60.0), car(100.0, 40.0, 110.0, 60.0)];
    let res = pixel_detector().detect(&dets).unwrap();
    assert_eq!(res.empty_slots.len(), 9);
    assert_relative_eq!(res.empty_slots[0].bbox.x_min, 10.0);
    assert_relative_eq!(res.empty_slots[8].bbox.x_max, 100.0, epsilon = 1e-9);
    for w in res.empty_slots.windows(2) {
        assert_relative_eq!(w[0].bbox.x_max, w[1].bbox.x_min, epsilon = 1e-9);
    }
}

#[test]
fn close_centers_share_a_row_far_one_is_alone() {
    // centers 0.50, 0.505, 0.90
    let dets = vec![
        car(0.00, 0.45, 0.10, 0.55),
        car(0.30, 0.455, 0.40, 0.555),
        car(0.00, 0.85, 0.10, 0.95),
    ];
    let res = detector().detect(&dets).unwrap();
    assert_eq!(res.rows.len(), 2);
    assert_eq!(res.rows[0].source_indices, vec![0, 1]);
    assert_eq!(res.rows[1].source_indices, vec![2]);
    assert_eq!(res.rows[1].num_slots, 0);
}

#[test]
fn single_car_has_no_slots() {
    let res = detector().detect(&[car(0.1, 0.1, 0.2, 0.2)]).unwrap();
    assert_eq!(res.rows.len(), 1);
    assert!(res.empty_slots.is_empty());
}

#[test]
fn empty_input_is_not_an_error() {
    let res = detector().detect(&[]).unwrap();
    assert!(res.rows.is_empty());
    assert!(res.empty_slots.is_empty());
    assert!(res.coordinates().is_empty());
}

#[test]
fn rows_partition_the_input() {
    let mut dets = Vec::new();
    let mut seed = 7u64;
    for i in 0..60 {
        // cheap LCG jitter
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let jitter = (seed >> 40) as f64 / (1u64 << 24) as f64 * 0.04;
        let y = 0.05 + 0.3 * (i % 3) as f64 + jitter;
        let x = 0.015 * (i / 3) as f64;
        dets.push(car(x, y, x + 0.012, y + 0.1));
    }
    let rows = group_rows(&dets, &RowGroupingParams::default()).unwrap();
    let mut seen: Vec<usize> = rows.iter().flat_map(|r| r.source_indices.clone()).collect();
    assert_eq!(seen.len(), dets.len());
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), dets.len());
    for row in &rows {
        for d in &row.detections {
            assert!((d.bbox.center_y() - row.reference_center_y).abs() < 0.1);
        }
    }
}

#[test]
fn no_slot_for_gaps_at_or_below_half_width() {
    let dets = vec![
        car(0.0, 40.0, 10.0, 60.0),
        car(15.0, 40.0, 25.0, 60.0),
        car(29.0, 40.0, 39.0, 60.0),
    ];
    let res = pixel_detector().detect(&dets).unwrap();
    assert!(res.empty_slots.is_empty());
}

#[test]
fn repeated_runs_are_identical() {
    let dets = vec![
        car(0.02, 0.10, 0.10, 0.25),
        car(0.30, 0.11, 0.38, 0.26),
        car(0.05, 0.60, 0.13, 0.76),
        car(0.51, 0.62, 0.59, 0.78),
    ];
    let d = detector();
    let first = d.detect(&dets).unwrap();
    let second = d.detect(&dets).unwrap();
    assert_eq!(first, second);
}

#[test]
fn degenerate_row_is_skipped_not_fatal() {
    // Widths overflow to infinity, so the canonical width is unusable.
    let dets = vec![
        car(-1.7e308, 0.1, 1.7e308, 0.2),
        car(-1.7e308, 0.1, 1.7e308, 0.2),
        car(0.0, 0.6, 0.1, 0.7),
        car(0.3, 0.6, 0.4, 0.7),
    ];
    let res = detector().detect(&dets).unwrap();
    assert_eq!(res.rows.len(), 2);
    assert_eq!(res.skipped_rows.len(), 1);
    assert_eq!(res.skipped_rows[0].row, 0);
    assert!(res.rows[0].canonical.is_none());
    assert_eq!(res.rows[1].num_slots, 2);
    assert_eq!(res.empty_slots.len(), 2);
}

#[test]
fn hairline_row_with_wide_gap_is_skipped() {
    let dets = vec![
        car(0.0, 0.1, 1e-9, 0.2),
        car(0.5, 0.1, 0.5 + 1e-9, 0.2),
        car(0.0, 0.6, 0.1, 0.7),
        car(0.3, 0.6, 0.4, 0.7),
    ];
    let res = detector().detect(&dets).unwrap();
    assert_eq!(res.rows.len(), 2);
    assert_eq!(res.skipped_rows.len(), 1);
    assert_eq!(res.skipped_rows[0].row, 0);
    assert_eq!(res.rows[0].num_slots, 0);
    assert_eq!(res.empty_slots.len(), 2);
    assert!(res.empty_slots.iter().all(|s| s.row == 1));
}
