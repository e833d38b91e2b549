#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

pub const SAMPLE: &str = "tests/fixtures/ca_zips_sample.geojson";
pub const MALFORMED: &str = "tests/fixtures/malformed_coordinates.geojson";
pub const MISSING_FEATURES: &str = "tests/fixtures/missing_features.geojson";
pub const CA_ZIPS_CONFIG: &str = "tests/fixtures/ca_zips.yaml";
pub const ZERO_TOLERANCE_CONFIG: &str = "tests/fixtures/zero_tolerance.yaml";

/// Writes `contents` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, contents).expect("write fixture");
    path
}

/// Reads a written GeoJSON file back as a plain JSON value.
pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read output");
    serde_json::from_str(&text).expect("output is valid JSON")
}

/// Number of positions in each innermost ring of a feature's geometry.
pub fn ring_lengths(feature: &Value) -> Vec<usize> {
    fn walk(value: &Value, out: &mut Vec<usize>) {
        let Some(items) = value.as_array() else {
            return;
        };
        if items.first().is_some_and(|first| first.is_number()) {
            return;
        }
        if items
            .first()
            .and_then(Value::as_array)
            .and_then(|pos| pos.first())
            .is_some_and(Value::is_number)
        {
            out.push(items.len());
            return;
        }
        items.iter().for_each(|item| walk(item, out));
    }

    let mut out = Vec::new();
    walk(&feature["geometry"]["coordinates"], &mut out);
    out
}
