//! Label set algebra regression test
//!
//! Subsetting and intersection of gated populations, the pixel-set law of
//! intersection, merging of touching labels and marker combinations.

use neurospatial_core::{LabelMap, PositivitySet};
use neurospatial_raster::{CpuBackend, RasterBackend};
use neurospatial_spatial::{
    count_labels, filter_by_area, intersect, intersect_all, marker_combinations, subset,
};
use neurospatial_test::RegParams;
use neurospatial_test::fixtures::MapBuilder;

/// Seven isolated disks with ids 1..7.
fn seven_cells() -> LabelMap {
    let mut builder = MapBuilder::new(64, 12).pixel_size(0.5);
    for id in 1..=7u32 {
        builder = builder.disk(4 + (id - 1) * 9, 5, 3, id);
    }
    builder.build()
}

#[test]
fn algebra_reg() {
    neurospatial_test::init_tracing();
    let mut rp = RegParams::new("algebra");
    let backend = CpuBackend::new();
    let cells = seven_cells();

    // --- Test 1: Gated sets intersect to two cells ---
    eprintln!("=== Subset and AND ===");
    let a = subset(&backend, &cells, &PositivitySet::from_ids(7, [1, 3, 5])).expect("subset A");
    let b = subset(&backend, &cells, &PositivitySet::from_ids(7, [3, 5, 7])).expect("subset B");
    rp.compare_values(3.0, count_labels(&a) as f64, 0.0);
    rp.compare_values(3.0, count_labels(&b) as f64, 0.0);
    let both = intersect(&backend, &a, &b).expect("intersect");
    rp.compare_values(2.0, count_labels(&both) as f64, 0.0);
    // Old ids 3 and 5 survive, in scan order
    rp.compare_values(1.0, both.get_pixel(22, 5).unwrap_or(0) as f64, 0.0);
    rp.compare_values(2.0, both.get_pixel(40, 5).unwrap_or(0) as f64, 0.0);
    rp.compare_values(0.0, both.get_pixel(4, 5).unwrap_or(0) as f64, 0.0);
    rp.compare_values(0.0, both.get_pixel(58, 5).unwrap_or(0) as f64, 0.0);
    rp.dump_map(&both, "and").expect("dump");

    // --- Test 2: Surviving pixels are exactly the A and B positive pixels ---
    eprintln!("=== Pixel set law ===");
    let mask_a = backend.binarize(&a).expect("binarize A");
    let mask_b = backend.binarize(&b).expect("binarize B");
    let expected = mask_a.and(&mask_b).expect("and");
    let survivors = backend.binarize(&both).expect("binarize AND");
    rp.compare_maps(expected.as_label_map(), survivors.as_label_map());

    // --- Test 3: Touching kept labels merge on relabel ---
    eprintln!("=== Merge on relabel ===");
    let touching = MapBuilder::new(12, 6)
        .rect(1, 1, 3, 3, 1)
        .rect(4, 1, 3, 3, 2)
        .rect(9, 1, 2, 2, 3)
        .build();
    let all = PositivitySet::from_ids(3, [1, 2, 3]);
    let merged = subset(&backend, &touching, &all).expect("subset touching");
    rp.compare_values(2.0, count_labels(&merged) as f64, 0.0);
    rp.compare_values(
        merged.get_pixel(1, 1).unwrap_or(0) as f64,
        merged.get_pixel(6, 3).unwrap_or(0) as f64,
        0.0,
    );

    // --- Test 4: Repeated pairwise AND ---
    eprintln!("=== n-ary AND ===");
    let c = subset(&backend, &cells, &PositivitySet::from_ids(7, [5])).expect("subset C");
    let abc = intersect_all(&backend, &[&a, &b, &c]).expect("intersect_all");
    rp.compare_values(1.0, count_labels(&abc) as f64, 0.0);
    rp.compare_values(1.0, abc.get_pixel(40, 5).unwrap_or(0) as f64, 0.0);

    // --- Test 5: Marker combinations ---
    eprintln!("=== Marker combinations ===");
    let rows = marker_combinations(&backend, &[("A", &a), ("B", &b), ("C", &c)])
        .expect("marker_combinations");
    let counts: Vec<u32> = rows.iter().map(|r| r.count).collect();
    rp.compare_counts(&[2, 1, 1, 1], &counts);
    rp.compare_values(1.0, if rows[3].name() == "A+B+C" { 1.0 } else { 0.0 }, 0.0);

    // --- Test 6: Area filtering ---
    eprintln!("=== Area filter ===");
    // A radius-3 disk has 29 px; at 0.5 um/px that is 7.25 um2
    let small = MapBuilder::new(16, 8)
        .pixel_size(0.5)
        .disk(4, 4, 3, 1)
        .rect(10, 2, 2, 2, 2)
        .build();
    let big = filter_by_area(&backend, &small, 2.0, None).expect("filter min");
    rp.compare_values(1.0, count_labels(&big) as f64, 0.0);
    rp.compare_values(29.0, big.foreground_count() as f64, 0.0);
    let all = filter_by_area(&backend, &cells, 0.0, Some(7.25)).expect("filter max");
    rp.compare_values(7.0, count_labels(&all) as f64, 0.0);

    assert!(rp.cleanup(), "algebra regression test failed");
}
