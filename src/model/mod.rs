//! In-memory model of GeoJSON feature collections.
//!
//! This module defines the types that the simplifier and the rewriter work
//! on, and the GeoJSON reader and writer that produce and consume them.
//!
//! # Design Principles
//!
//! 1. **Nesting is a type, not a guess**: a geometry's coordinate nesting
//!    level is resolved once from its declared `type` when it is read, and
//!    carried as a [`Coordinates`] variant from then on.
//!
//! 2. **Pass-through by default**: members and geometry kinds that this
//!    crate does not interpret are kept verbatim and written back out.
//!
//! 3. **All or nothing**: a malformed geometry fails the whole read, so a
//!    rewrite never sees a half-parsed collection.
//!
//! # Example
//!
//! ```
//! use geoslim::model::{Coord, Feature, FeatureCollection, Geometry};
//!
//! let ring = vec![
//!     Coord::new(0.0, 0.0),
//!     Coord::new(1.0, 0.0),
//!     Coord::new(1.0, 1.0),
//!     Coord::new(0.0, 0.0),
//! ];
//! let collection = FeatureCollection::new(vec![
//!     Feature::new(Geometry::polygon(vec![ring])).with_properties(vec![("STATE", "CA")]),
//! ]);
//! assert_eq!(collection.features.len(), 1);
//! ```

mod coord;
mod coordinates;
mod feature;
pub mod io_geojson;
mod kind;
mod properties;

// Re-export core types for convenient access
pub use coord::Coord;
pub use coordinates::Coordinates;
pub use feature::{Feature, FeatureCollection, Geometry};
pub use io_geojson::OutputStyle;
pub use kind::GeometryKind;
pub use properties::Properties;
