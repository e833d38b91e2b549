//! GeoJSON reader and writer.
//!
//! Reading resolves every geometry's coordinate nesting level once, from its
//! declared `type`, and rejects coordinates that do not match it. A single
//! malformed geometry fails the whole read: there is no partial result.
//!
//! The only structural requirement on the top-level object is a `features`
//! array. Neither the collection's nor a feature's `type` is checked, and
//! the writer always emits `FeatureCollection` and `Feature`. A geometry
//! without a `type` is kept raw and written back without one.
//!
//! # Output
//!
//! The writer emits compact JSON by default (no whitespace after `,` and
//! `:`), which is the point of shrinking a dataset for the web. Property
//! keys are written in sorted order, so output is deterministic.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Coord, Coordinates, Feature, FeatureCollection, Geometry, GeometryKind, Properties};
use crate::error::GeoslimError;

/// Whitespace style of written GeoJSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// No insignificant whitespace.
    #[default]
    Compact,
    /// Indented, one member per line.
    Pretty,
}

// ============================================================================
// GeoJSON Schema Types (internal to this module)
// ============================================================================

#[derive(Deserialize)]
struct GeoJsonCollection {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    object_type: Option<String>,

    features: Option<Vec<GeoJsonFeature>>,

    #[serde(flatten)]
    members: Map<String, Value>,
}

#[derive(Deserialize)]
struct GeoJsonFeature {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    object_type: Option<String>,

    #[serde(default)]
    id: Option<Value>,

    #[serde(default)]
    geometry: Option<GeoJsonGeometry>,

    #[serde(default)]
    properties: Option<Properties>,

    #[serde(flatten)]
    members: Map<String, Value>,
}

#[derive(Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type", default)]
    object_type: Option<String>,

    #[serde(default)]
    coordinates: Option<Value>,

    #[serde(flatten)]
    members: Map<String, Value>,
}

#[derive(Serialize)]
struct GeoJsonCollectionOut<'a> {
    #[serde(rename = "type")]
    object_type: &'static str,

    #[serde(flatten)]
    members: &'a Map<String, Value>,

    features: Vec<GeoJsonFeatureOut<'a>>,
}

#[derive(Serialize)]
struct GeoJsonFeatureOut<'a> {
    #[serde(rename = "type")]
    object_type: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a Value>,

    geometry: Option<GeoJsonGeometryOut<'a>>,

    properties: Option<&'a Properties>,

    #[serde(flatten)]
    members: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct GeoJsonGeometryOut<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    object_type: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<&'a Coordinates>,

    #[serde(flatten)]
    members: &'a Map<String, Value>,
}

// ============================================================================
// Public API
// ============================================================================

/// Reads a feature collection from a GeoJSON file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, has no
/// `features` array, or contains a malformed geometry.
pub fn read_geojson(path: &Path) -> Result<FeatureCollection, GeoslimError> {
    let file = File::open(path).map_err(GeoslimError::Io)?;
    let reader = BufReader::new(file);

    let raw: GeoJsonCollection =
        serde_json::from_reader(reader).map_err(|source| GeoslimError::GeoJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let collection = geojson_to_model(raw)?;
    debug!(
        "read {} feature(s) from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}

/// Writes a feature collection to a GeoJSON file and returns the number of
/// bytes written.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_geojson(
    path: &Path,
    collection: &FeatureCollection,
    style: OutputStyle,
) -> Result<u64, GeoslimError> {
    let file = File::create(path).map_err(GeoslimError::Io)?;
    let mut writer = BufWriter::new(file);

    let out = model_to_geojson(collection);
    let written = match style {
        OutputStyle::Compact => serde_json::to_writer(&mut writer, &out),
        OutputStyle::Pretty => serde_json::to_writer_pretty(&mut writer, &out),
    };
    written.map_err(|source| GeoslimError::GeoJsonWrite {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush()?;

    Ok(std::fs::metadata(path)?.len())
}

/// Reads a feature collection from a GeoJSON string.
///
/// Useful for testing without file I/O.
pub fn from_geojson_str(json: &str) -> Result<FeatureCollection, GeoslimError> {
    let raw: GeoJsonCollection = serde_json::from_str(json)?;
    geojson_to_model(raw)
}

/// Reads a feature collection from a GeoJSON byte slice.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation overhead.
pub fn from_geojson_slice(bytes: &[u8]) -> Result<FeatureCollection, GeoslimError> {
    let raw: GeoJsonCollection = serde_json::from_slice(bytes)?;
    geojson_to_model(raw)
}

/// Writes a feature collection to a GeoJSON string.
pub fn to_geojson_string(
    collection: &FeatureCollection,
    style: OutputStyle,
) -> Result<String, serde_json::Error> {
    let out = model_to_geojson(collection);
    match style {
        OutputStyle::Compact => serde_json::to_string(&out),
        OutputStyle::Pretty => serde_json::to_string_pretty(&out),
    }
}

// ============================================================================
// Conversion: GeoJSON -> model
// ============================================================================

fn geojson_to_model(raw: GeoJsonCollection) -> Result<FeatureCollection, GeoslimError> {
    let features = raw.features.ok_or_else(|| {
        GeoslimError::InvalidDocument("top-level object has no 'features' array".to_string())
    })?;

    let features = features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| feature_to_model(index, feature))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        members: raw.members,
    })
}

fn feature_to_model(index: usize, raw: GeoJsonFeature) -> Result<Feature, GeoslimError> {
    let geometry = raw
        .geometry
        .map(|geometry| geometry_to_model(index, geometry))
        .transpose()?;

    Ok(Feature {
        id: raw.id,
        geometry,
        properties: raw.properties,
        members: raw.members,
    })
}

fn geometry_to_model(index: usize, raw: GeoJsonGeometry) -> Result<Geometry, GeoslimError> {
    let kind = raw
        .object_type
        .as_deref()
        .map_or(GeometryKind::Untyped, GeometryKind::from_name);
    let mut members = raw.members;

    let coordinates = match (raw.coordinates, kind.coordinate_depth()) {
        (None | Some(Value::Null), _) => None,
        (Some(value), Some(depth)) => Some(
            parse_coordinates(&value, depth).map_err(|err| err.into_error(index, &kind))?,
        ),
        (Some(value), None) => {
            // Kept raw so that it is written back unchanged
            members.insert("coordinates".to_string(), value);
            None
        }
    };

    match &kind {
        GeometryKind::Other(name) => warn!(
            "feature {}: unknown geometry type '{}' is passed through unchanged",
            index, name
        ),
        GeometryKind::Untyped => debug!(
            "feature {}: geometry without a type is passed through unchanged",
            index
        ),
        _ => {}
    }

    Ok(Geometry {
        kind,
        coordinates,
        members,
    })
}

/// A coordinate parsing failure and where it happened, innermost index first.
struct CoordinateError {
    path: Vec<usize>,
    message: String,
}

impl CoordinateError {
    fn new(message: String) -> Self {
        Self {
            path: Vec::new(),
            message,
        }
    }

    fn at(mut self, index: usize) -> Self {
        self.path.push(index);
        self
    }

    fn into_error(self, feature: usize, kind: &GeometryKind) -> GeoslimError {
        let location: String = self
            .path
            .iter()
            .rev()
            .map(|index| format!("[{}]", index))
            .collect();
        GeoslimError::MalformedGeometry {
            feature,
            message: format!("{} coordinates{}: {}", kind, location, self.message),
        }
    }
}

fn parse_coordinates(value: &Value, depth: usize) -> Result<Coordinates, CoordinateError> {
    if value.as_array().is_some_and(Vec::is_empty) {
        return Ok(Coordinates::Empty);
    }

    match depth {
        0 => parse_position(value).map(Coordinates::Point),
        1 => parse_ring(value).map(Coordinates::Ring),
        2 => parse_list(value, parse_ring).map(Coordinates::Polygon),
        3 => parse_list(value, |polygon| parse_list(polygon, parse_ring))
            .map(Coordinates::MultiPolygon),
        _ => Err(CoordinateError::new(format!(
            "unsupported nesting depth {}",
            depth
        ))),
    }
}

fn parse_list<T>(
    value: &Value,
    parse_item: impl Fn(&Value) -> Result<T, CoordinateError>,
) -> Result<Vec<T>, CoordinateError> {
    let items = value.as_array().ok_or_else(|| {
        CoordinateError::new(format!("expected an array, found {}", describe(value)))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_item(item).map_err(|err| err.at(index)))
        .collect()
}

fn parse_ring(value: &Value) -> Result<Vec<Coord>, CoordinateError> {
    parse_list(value, parse_position)
}

fn parse_position(value: &Value) -> Result<Coord, CoordinateError> {
    let items = value.as_array().ok_or_else(|| {
        CoordinateError::new(format!(
            "expected a position array, found {}",
            describe(value)
        ))
    })?;

    let mut components = [0.0; 3];
    for (index, item) in items.iter().enumerate() {
        let number = item.as_f64().ok_or_else(|| {
            CoordinateError::new(format!("expected a number, found {}", describe(item))).at(index)
        })?;
        if let Some(slot) = components.get_mut(index) {
            *slot = number;
        }
    }

    match items.len() {
        2 => Ok(Coord::new(components[0], components[1])),
        3 => Ok(Coord::with_z(components[0], components[1], components[2])),
        n => Err(CoordinateError::new(format!(
            "a position needs 2 or 3 numbers, found {}",
            n
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Conversion: model -> GeoJSON
// ============================================================================

fn model_to_geojson(collection: &FeatureCollection) -> GeoJsonCollectionOut<'_> {
    let features = collection
        .features
        .iter()
        .map(|feature| GeoJsonFeatureOut {
            object_type: "Feature",
            id: feature.id.as_ref(),
            geometry: feature.geometry.as_ref().map(|geometry| GeoJsonGeometryOut {
                object_type: match geometry.kind {
                    GeometryKind::Untyped => None,
                    ref kind => Some(kind.name()),
                },
                coordinates: geometry.coordinates.as_ref(),
                members: &geometry.members,
            }),
            properties: feature.properties.as_ref(),
            members: &feature.members,
        })
        .collect();

    GeoJsonCollectionOut {
        object_type: "FeatureCollection",
        members: &collection.members,
        features,
    }
}
