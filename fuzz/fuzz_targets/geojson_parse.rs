//! Fuzz target for GeoJSON parsing.
//!
//! Feeds arbitrary byte sequences to the GeoJSON reader, checking for
//! panics, crashes, or hangs.

#![no_main]

use geoslim::model::io_geojson::from_geojson_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_geojson_slice(data);
});
