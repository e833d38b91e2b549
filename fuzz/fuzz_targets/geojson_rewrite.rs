//! Fuzz target for the full read, rewrite, write pipeline.
//!
//! Anything the reader accepts must simplify and serialize without
//! panicking, and simplification must never add positions.

#![no_main]

use geoslim::model::io_geojson::{from_geojson_slice, to_geojson_string};
use geoslim::model::OutputStyle;
use geoslim::rewrite::{rewrite_collection, PropertyRule, RewriteOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(mut collection) = from_geojson_slice(data) else {
        return;
    };

    let options = RewriteOptions {
        property_rule: Some(PropertyRule::new("ZIP_CODE", "ZCTA5CE10", ["PO_NAME"])),
        ..Default::default()
    };
    let report = rewrite_collection(&mut collection, &options).expect("valid options");
    assert!(report.output_vertices() <= report.input_vertices());

    let _ = to_geojson_string(&collection, OutputStyle::Compact);
});
