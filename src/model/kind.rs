//! GeoJSON geometry type names.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The `type` of a GeoJSON geometry object.
///
/// Unknown type names are kept as [`GeometryKind::Other`], and a geometry
/// object with no `type` member at all as [`GeometryKind::Untyped`], so that
/// the geometry can be passed through untouched.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Other(String),
    Untyped,
}

impl GeometryKind {
    /// Resolves a GeoJSON type name. Matching is case-sensitive, as in GeoJSON.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Point" => GeometryKind::Point,
            "MultiPoint" => GeometryKind::MultiPoint,
            "LineString" => GeometryKind::LineString,
            "MultiLineString" => GeometryKind::MultiLineString,
            "Polygon" => GeometryKind::Polygon,
            "MultiPolygon" => GeometryKind::MultiPolygon,
            "GeometryCollection" => GeometryKind::GeometryCollection,
            other => GeometryKind::Other(other.to_string()),
        }
    }

    /// The GeoJSON type name.
    pub fn name(&self) -> &str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
            GeometryKind::Other(name) => name,
            GeometryKind::Untyped => "(untyped)",
        }
    }

    /// Number of array levels above a single position in this kind's
    /// `coordinates` member, or `None` if the kind has no coordinates
    /// this crate understands.
    ///
    /// - 0: Point
    /// - 1: LineString, MultiPoint
    /// - 2: Polygon, MultiLineString
    /// - 3: MultiPolygon
    pub fn coordinate_depth(&self) -> Option<usize> {
        match self {
            GeometryKind::Point => Some(0),
            GeometryKind::LineString | GeometryKind::MultiPoint => Some(1),
            GeometryKind::Polygon | GeometryKind::MultiLineString => Some(2),
            GeometryKind::MultiPolygon => Some(3),
            GeometryKind::GeometryCollection
            | GeometryKind::Other(_)
            | GeometryKind::Untyped => None,
        }
    }

    /// Returns true if the innermost coordinate sequences of this kind are
    /// paths, so that line simplification applies to them.
    ///
    /// MultiPoint is excluded: its sequence is a set of points, not a path.
    pub fn is_simplifiable(&self) -> bool {
        matches!(
            self,
            GeometryKind::LineString
                | GeometryKind::MultiLineString
                | GeometryKind::Polygon
                | GeometryKind::MultiPolygon
        )
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for GeometryKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for GeometryKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(GeometryKind::from_name(&name))
    }
}
