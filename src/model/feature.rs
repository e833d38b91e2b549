//! Features, geometries and collections.
//!
//! These types hold a GeoJSON `FeatureCollection` in memory between reading
//! and writing. Members this crate does not interpret are kept verbatim in
//! `members` maps so that they survive the rewrite.

use serde_json::{Map, Value};

use super::coordinates::Coordinates;
use super::kind::GeometryKind;
use super::properties::Properties;

/// A complete GeoJSON feature collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    /// All features, in document order.
    pub features: Vec<Feature>,

    /// Top-level members other than `type` and `features` (e.g. `crs`, `name`).
    pub members: Map<String, Value>,
}

impl FeatureCollection {
    /// Creates a collection from features, with no extra members.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            members: Map::new(),
        }
    }

    /// Sets a top-level member.
    pub fn with_member(mut self, key: impl Into<String>, value: Value) -> Self {
        self.members.insert(key.into(), value);
        self
    }
}

/// A single GeoJSON feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    /// Optional feature identifier (string or number).
    pub id: Option<Value>,

    /// The geometry, if any. `None` covers both a missing and a `null` geometry.
    pub geometry: Option<Geometry>,

    /// The property map, if any. `None` covers both a missing and a `null` member.
    pub properties: Option<Properties>,

    /// Other members of the feature object.
    pub members: Map<String, Value>,
}

impl Feature {
    /// Creates a feature with the given geometry and no properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Default::default()
        }
    }

    /// Sets the property map.
    pub fn with_properties(mut self, properties: impl Into<Properties>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    /// Sets the feature id.
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The geometry kind, if the feature has a geometry.
    pub fn kind(&self) -> Option<&GeometryKind> {
        self.geometry.as_ref().map(|g| &g.kind)
    }
}

/// A geometry object.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    /// The declared `type`.
    pub kind: GeometryKind,

    /// Parsed coordinates. `None` when the member is missing or `null`, and
    /// for kinds without understood coordinates (their raw `coordinates`
    /// then stays in `members`).
    pub coordinates: Option<Coordinates>,

    /// Other members of the geometry object (`bbox`, `geometries`, ...).
    pub members: Map<String, Value>,
}

impl Geometry {
    /// Creates a geometry of the given kind.
    pub fn new(kind: GeometryKind, coordinates: Coordinates) -> Self {
        Self {
            kind,
            coordinates: Some(coordinates),
            members: Map::new(),
        }
    }

    /// Creates a Polygon geometry from its rings.
    pub fn polygon(rings: Vec<Vec<super::Coord>>) -> Self {
        Self::new(GeometryKind::Polygon, Coordinates::Polygon(rings))
    }

    /// Creates a MultiPolygon geometry from its polygons.
    pub fn multi_polygon(polygons: Vec<Vec<Vec<super::Coord>>>) -> Self {
        Self::new(GeometryKind::MultiPolygon, Coordinates::MultiPolygon(polygons))
    }

    /// Total number of positions, zero without coordinates.
    pub fn vertex_count(&self) -> usize {
        self.coordinates
            .as_ref()
            .map_or(0, Coordinates::vertex_count)
    }
}
