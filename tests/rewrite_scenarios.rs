//! End-to-end scenarios through the library API: read, rewrite, write.

use geoslim::config::Config;
use geoslim::model::io_geojson::{from_geojson_str, to_geojson_string};
use geoslim::model::{Coordinates, OutputStyle};
use geoslim::rewrite::{drop_members, rewrite_collection, RewriteOptions, Tolerances};
use geoslim::GeoslimError;
use serde_json::{json, Value};

const TWO_RING_MULTIPOLYGON: &str = r#"{
  "type": "FeatureCollection",
  "features": [{
    "type": "Feature",
    "properties": {"ZIP_CODE": "90210"},
    "geometry": {
      "type": "MultiPolygon",
      "coordinates": [
        [[[0, 0], [1, 0], [2, 0.01], [3, 0], [4, 0]]],
        [[[0, 5], [1, 5], [2, 5.01], [3, 5], [4, 5]]]
      ]
    }
  }]
}"#;

fn ring_lengths(json: &str, tolerance: f64) -> Vec<usize> {
    let mut collection = from_geojson_str(json).unwrap();
    let options = RewriteOptions {
        tolerances: Tolerances::polygonal(tolerance).unwrap(),
        property_rule: None,
    };
    rewrite_collection(&mut collection, &options).unwrap();

    let geometry = collection.features[0].geometry.as_ref().unwrap();
    match geometry.coordinates.as_ref().unwrap() {
        Coordinates::MultiPolygon(polygons) => polygons.iter().flatten().map(Vec::len).collect(),
        other => panic!("unexpected coordinates {other:?}"),
    }
}

fn zip_config() -> Config {
    Config::from_yaml_str(
        "property_rule: {source: ZIP_CODE, target: ZCTA5CE10, keep: [ZCTA5CE10, PO_NAME, STATE]}",
    )
    .unwrap()
}

fn rewrite_properties(properties: Value) -> Value {
    let json = json!({
        "type": "FeatureCollection",
        "features": [{"type": "Feature", "properties": properties, "geometry": null}]
    });
    let mut collection = from_geojson_str(&json.to_string()).unwrap();
    let options = zip_config().rewrite_options().unwrap();
    rewrite_collection(&mut collection, &options).unwrap();

    let out: Value =
        serde_json::from_str(&to_geojson_string(&collection, OutputStyle::Compact).unwrap())
            .unwrap();
    out["features"][0]["properties"].clone()
}

#[test]
fn outlier_survives_small_tolerance() {
    assert_eq!(ring_lengths(TWO_RING_MULTIPOLYGON, 0.001), vec![5, 5]);
}

#[test]
fn outlier_dropped_at_large_tolerance() {
    assert_eq!(ring_lengths(TWO_RING_MULTIPOLYGON, 0.1), vec![2, 2]);
}

#[test]
fn zip_code_is_renamed_and_extras_dropped() {
    assert_eq!(
        rewrite_properties(json!({"ZIP_CODE": "90210", "EXTRA": "x"})),
        json!({"ZCTA5CE10": "90210"})
    );
}

#[test]
fn properties_without_zip_code_pass_through() {
    assert_eq!(
        rewrite_properties(json!({"PO_NAME": "Beverly Hills"})),
        json!({"PO_NAME": "Beverly Hills"})
    );
}

#[test]
fn other_kinds_and_empty_geometries_pass_through() {
    let json = r#"{
      "type": "FeatureCollection",
      "features": [
        {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1.5, 2.5]}},
        {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": []}},
        {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 0.0001], [2, 0]]}},
        {"type": "Feature", "properties": null, "geometry": {"type": "GeometryCollection", "geometries": []}}
      ]
    }"#;
    let original = from_geojson_str(json).unwrap();
    let mut collection = original.clone();
    let report = rewrite_collection(&mut collection, &zip_config().rewrite_options().unwrap())
        .unwrap();

    assert_eq!(collection, original);
    assert_eq!(report.renamed, 0);
    assert_eq!(report.simplified, 0);
    assert_eq!(report.by_kind["Polygon"].input_vertices, 0);
}

#[test]
fn malformed_coordinates_fail_the_whole_read() {
    let json = r#"{
      "type": "FeatureCollection",
      "features": [
        {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [0, 0]]]}},
        {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[0, 0], [1, 0]]}}
      ]
    }"#;
    let err = from_geojson_str(json).unwrap_err();
    assert!(
        matches!(err, GeoslimError::MalformedGeometry { feature: 1, .. }),
        "{err:?}"
    );
}

#[test]
fn invalid_tolerance_is_rejected_before_rewriting() {
    let config = Config::from_yaml_str("tolerances: {MultiPolygon: -0.5}").unwrap();
    let err = config.rewrite_options().unwrap_err();
    assert!(matches!(err, GeoslimError::InvalidTolerance { .. }));
    assert!(err.to_string().contains("MultiPolygon"));
}

#[test]
fn members_are_dropped_and_others_kept() {
    let json = r#"{
      "type": "FeatureCollection",
      "name": "ca_zips",
      "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}},
      "bbox": [0, 0, 1, 1],
      "features": []
    }"#;
    let mut collection = from_geojson_str(json).unwrap();
    let dropped = drop_members(&mut collection, &Config::default().drop_members);
    assert_eq!(dropped, vec!["crs".to_string(), "name".to_string()]);

    let out = to_geojson_string(&collection, OutputStyle::Compact).unwrap();
    assert_eq!(out, r#"{"type":"FeatureCollection","bbox":[0,0,1,1],"features":[]}"#);
}

#[test]
fn feature_order_and_ids_survive() {
    let features: Vec<Value> = (0..50)
        .map(|i| {
            json!({
                "type": "Feature",
                "id": format!("zip-{i}"),
                "properties": {"ZIP_CODE": format!("{:05}", 90000 + i)},
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [i, 0.5], [2 * i, 0], [0, 0]]]}
            })
        })
        .collect();
    let json = json!({"type": "FeatureCollection", "features": features}).to_string();

    let mut collection = from_geojson_str(&json).unwrap();
    rewrite_collection(&mut collection, &zip_config().rewrite_options().unwrap()).unwrap();

    for (i, feature) in collection.features.iter().enumerate() {
        assert_eq!(feature.id, Some(json!(format!("zip-{i}"))));
        assert_eq!(
            feature.properties.as_ref().unwrap().get("ZCTA5CE10"),
            Some(&json!(format!("{:05}", 90000 + i)))
        );
    }
}
