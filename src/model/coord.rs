//! Positions as they appear in GeoJSON coordinate arrays.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

/// A 2D or 3D position.
///
/// Only `x` and `y` take part in distance calculations; `z` is carried
/// through unchanged so elevations survive a rewrite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coord {
    /// Creates a 2D coordinate.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a 3D coordinate.
    #[inline]
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Returns true if the planar components coincide.
    #[inline]
    pub fn same_xy(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Planar Euclidean distance to another coordinate.
    #[inline]
    pub fn distance(&self, other: &Coord) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Coord::new(x, y)
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Coord::new(x, y)
    }
}

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A coordinate component as it is written: whole numbers without a
/// fractional part, so `[1, 2]` stays `[1, 2]`.
struct Component(f64);

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        let negative_zero = value == 0.0 && value.is_sign_negative();
        if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER && !negative_zero {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

// GeoJSON positions are bare arrays: [x, y] or [x, y, z]
impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.z.is_some() { 3 } else { 2 };
        let mut tuple = serializer.serialize_tuple(len)?;
        tuple.serialize_element(&Component(self.x))?;
        tuple.serialize_element(&Component(self.y))?;
        if let Some(z) = self.z {
            tuple.serialize_element(&Component(z))?;
        }
        tuple.end()
    }
}
