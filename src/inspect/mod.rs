//! Read-only inspection of feature collections.
//!
//! Produces an [`InspectReport`] with feature counts, per-kind ring and
//! vertex totals, the overall coordinate extent, and a histogram of the
//! property keys in use. Useful for choosing tolerances and property rules
//! before running a rewrite.

mod report;

pub use report::{
    Extent, GeometrySection, InspectReport, KeyCount, KindStats, PropertiesSection,
    SummarySection,
};

use std::collections::{BTreeMap, HashMap};

use crate::model::{Coord, Coordinates, FeatureCollection};

/// Options for collection inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Number of most frequent property keys to list.
    pub top_keys: usize,
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            top_keys: 10,
            bar_width: 20,
        }
    }
}

/// Inspect a collection and produce a report.
pub fn inspect_collection(collection: &FeatureCollection, opts: &InspectOptions) -> InspectReport {
    InspectReport {
        summary: compute_summary(collection),
        geometry: compute_geometry(collection),
        properties: compute_properties(collection, opts.top_keys),
        bar_width: opts.bar_width,
    }
}

fn compute_summary(collection: &FeatureCollection) -> SummarySection {
    SummarySection {
        features: collection.features.len(),
        without_geometry: collection
            .features
            .iter()
            .filter(|f| f.geometry.is_none())
            .count(),
        without_properties: collection
            .features
            .iter()
            .filter(|f| f.properties.is_none())
            .count(),
        members: collection.members.keys().cloned().collect(),
    }
}

fn compute_geometry(collection: &FeatureCollection) -> GeometrySection {
    let mut by_kind: BTreeMap<String, KindStats> = BTreeMap::new();
    let mut extent: Option<Extent> = None;

    for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
        let stats = by_kind.entry(geometry.kind.name().to_string()).or_default();
        stats.features += 1;

        let Some(coordinates) = &geometry.coordinates else {
            stats.without_coordinates += 1;
            continue;
        };
        stats.rings += coordinates.ring_count();
        stats.vertices += coordinates.vertex_count();

        let mut largest = 0;
        visit_positions(coordinates, |len| largest = largest.max(len), |coord| {
            let e = extent.get_or_insert(Extent {
                min_x: coord.x,
                min_y: coord.y,
                max_x: coord.x,
                max_y: coord.y,
            });
            e.min_x = e.min_x.min(coord.x);
            e.min_y = e.min_y.min(coord.y);
            e.max_x = e.max_x.max(coord.x);
            e.max_y = e.max_y.max(coord.y);
        });
        stats.largest_ring = stats.largest_ring.max(largest);
    }

    GeometrySection { by_kind, extent }
}

/// Calls `on_ring` with the length of every innermost sequence and
/// `on_position` with every position.
fn visit_positions(
    coordinates: &Coordinates,
    mut on_ring: impl FnMut(usize),
    mut on_position: impl FnMut(&Coord),
) {
    if let Coordinates::Point(coord) = coordinates {
        on_position(coord);
        return;
    }

    let mut ring = |positions: &Vec<Coord>| {
        on_ring(positions.len());
        positions.iter().for_each(&mut on_position);
    };
    match coordinates {
        Coordinates::Empty | Coordinates::Point(_) => {}
        Coordinates::Ring(positions) => ring(positions),
        Coordinates::Polygon(rings) => rings.iter().for_each(ring),
        Coordinates::MultiPolygon(polygons) => polygons.iter().flatten().for_each(ring),
    }
}

fn compute_properties(collection: &FeatureCollection, top_n: usize) -> PropertiesSection {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for properties in collection.features.iter().filter_map(|f| f.properties.as_ref()) {
        for key in properties.keys() {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    // Sort by count descending, then by key ascending for deterministic output
    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total_distinct = sorted.len();
    let entries = sorted
        .into_iter()
        .take(top_n)
        .map(|(key, count)| KeyCount {
            key: key.to_string(),
            count,
        })
        .collect();

    PropertiesSection {
        top_n,
        total_distinct,
        features: collection.features.len(),
        entries,
    }
}
