use std::path::PathBuf;
use thiserror::Error;

/// The main error type for geoslim operations.
#[derive(Debug, Error)]
pub enum GeoslimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse GeoJSON from {path}: {source}")]
    GeoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write GeoJSON to {path}: {source}")]
    GeoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid GeoJSON document: {0}")]
    InvalidDocument(String),

    #[error("Malformed geometry in feature {feature}: {message}")]
    MalformedGeometry { feature: usize, message: String },

    #[error("Invalid tolerance {value} for {kind}: must be a finite number greater than zero")]
    InvalidTolerance { kind: String, value: f64 },

    #[error("Geometry kind '{0}' cannot be simplified (supported: LineString, MultiLineString, Polygon, MultiPolygon)")]
    UnsupportedToleranceKind(String),

    #[error("Invalid property rule: {0}")]
    InvalidPropertyRule(String),

    #[error("Failed to parse config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
