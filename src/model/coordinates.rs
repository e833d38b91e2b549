//! Nested coordinate structures with an explicit nesting level.

use serde::{Serialize, Serializer};

use super::coord::Coord;

/// The `coordinates` member of a geometry, tagged with its nesting level.
///
/// The level is fixed when the geometry is parsed, from its declared type,
/// so a one-point ring is never confused with a bare position.
#[derive(Clone, Debug, PartialEq)]
pub enum Coordinates {
    /// A present but empty `coordinates` array.
    Empty,
    /// A single position (Point).
    Point(Coord),
    /// One sequence of positions (LineString, MultiPoint).
    Ring(Vec<Coord>),
    /// A sequence of rings (Polygon, MultiLineString).
    Polygon(Vec<Vec<Coord>>),
    /// A sequence of polygons (MultiPolygon).
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
}

impl Coordinates {
    /// Total number of positions.
    pub fn vertex_count(&self) -> usize {
        match self {
            Coordinates::Empty => 0,
            Coordinates::Point(_) => 1,
            Coordinates::Ring(ring) => ring.len(),
            Coordinates::Polygon(rings) => rings.iter().map(Vec::len).sum(),
            Coordinates::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(|rings| rings.iter())
                .map(Vec::len)
                .sum(),
        }
    }

    /// Number of innermost position sequences.
    pub fn ring_count(&self) -> usize {
        match self {
            Coordinates::Empty | Coordinates::Point(_) => 0,
            Coordinates::Ring(_) => 1,
            Coordinates::Polygon(rings) => rings.len(),
            Coordinates::MultiPolygon(polygons) => polygons.iter().map(Vec::len).sum(),
        }
    }

    /// Returns true for [`Coordinates::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Coordinates::Empty)
    }

    /// Calls `f` on every innermost position sequence, in document order.
    pub fn for_each_ring_mut(&mut self, mut f: impl FnMut(&mut Vec<Coord>)) {
        match self {
            Coordinates::Empty | Coordinates::Point(_) => {}
            Coordinates::Ring(ring) => f(ring),
            Coordinates::Polygon(rings) => rings.iter_mut().for_each(f),
            Coordinates::MultiPolygon(polygons) => polygons
                .iter_mut()
                .flat_map(|rings| rings.iter_mut())
                .for_each(f),
        }
    }
}

impl Serialize for Coordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Coordinates::Empty => Vec::<Coord>::new().serialize(serializer),
            Coordinates::Point(coord) => coord.serialize(serializer),
            Coordinates::Ring(ring) => ring.serialize(serializer),
            Coordinates::Polygon(rings) => rings.serialize(serializer),
            Coordinates::MultiPolygon(polygons) => polygons.serialize(serializer),
        }
    }
}
