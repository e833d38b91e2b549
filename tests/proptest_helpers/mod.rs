#![allow(dead_code)]

use std::collections::BTreeMap;
use std::f64::consts::PI;

use geoslim::model::{Coord, Feature, FeatureCollection, Geometry, Properties};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use serde_json::Value;

/// Keys drawn on for generated property maps.
pub const PROPERTY_KEYS: [&str; 6] = [
    "ZIP_CODE",
    "ZCTA5CE10",
    "PO_NAME",
    "STATE",
    "SHAPE_AREA",
    "EXTRA",
];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A position in lon/lat range.
pub fn arb_coord() -> BoxedStrategy<Coord> {
    (-180.0f64..180.0, -90.0f64..90.0)
        .prop_map(|(x, y)| Coord::new(x, y))
        .boxed()
}

/// An open path of up to `max_len` positions (possibly empty).
pub fn arb_ring(max_len: usize) -> BoxedStrategy<Vec<Coord>> {
    proptest::collection::vec(arb_coord(), 0..=max_len).boxed()
}

/// A closed ring: at least 4 positions, first equal to last.
pub fn arb_closed_ring(max_len: usize) -> BoxedStrategy<Vec<Coord>> {
    assert!(max_len >= 4, "max_len must be >= 4");
    proptest::collection::vec(arb_coord(), 3..max_len)
        .prop_map(|mut ring| {
            ring.push(ring[0]);
            ring
        })
        .boxed()
}

/// A path following a noisy line, as digitized boundaries do.
pub fn arb_noisy_line(max_len: usize) -> BoxedStrategy<Vec<Coord>> {
    proptest::collection::vec(-0.01f64..0.01, 2..=max_len)
        .prop_map(|offsets| {
            offsets
                .into_iter()
                .enumerate()
                .map(|(i, dy)| Coord::new(i as f64 * 0.01, dy))
                .collect()
        })
        .boxed()
}

/// Points on a half circle at distinct angles: no three are collinear.
pub fn arb_arc(max_len: usize) -> BoxedStrategy<Vec<Coord>> {
    proptest::collection::btree_set(0u16..3000, 3..=max_len)
        .prop_map(|steps| {
            steps
                .into_iter()
                .map(|step| {
                    let angle = f64::from(step) * PI / 3000.0;
                    Coord::new(100.0 * angle.cos(), 100.0 * angle.sin())
                })
                .collect()
        })
        .boxed()
}

pub fn arb_tolerance() -> BoxedStrategy<f64> {
    prop_oneof![Just(0.0), 0.0f64..0.05, 0.0f64..50.0].boxed()
}

/// A property map over [`PROPERTY_KEYS`] with string values.
pub fn arb_properties() -> BoxedStrategy<Properties> {
    proptest::collection::btree_map(
        proptest::sample::select(PROPERTY_KEYS.to_vec()),
        "[0-9A-Za-z ]{0,8}",
        0..=PROPERTY_KEYS.len(),
    )
    .prop_map(|map: BTreeMap<&str, String>| {
        map.into_iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect()
    })
    .boxed()
}

/// A collection of polygon features with sequential numeric ids.
pub fn arb_polygon_collection(max_features: usize) -> BoxedStrategy<FeatureCollection> {
    proptest::collection::vec(
        (
            proptest::collection::vec(arb_closed_ring(40), 1..3),
            arb_properties(),
        ),
        0..=max_features,
    )
    .prop_map(|features| {
        FeatureCollection::new(
            features
                .into_iter()
                .enumerate()
                .map(|(i, (rings, properties))| {
                    Feature::new(Geometry::polygon(rings))
                        .with_id(i)
                        .with_properties(properties)
                })
                .collect(),
        )
    })
    .boxed()
}

/// True if `sub` can be obtained from `full` by deleting elements.
pub fn is_subsequence(sub: &[Coord], full: &[Coord]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|wanted| rest.any(|c| c == wanted))
}
