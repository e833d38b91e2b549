//! Per-geometry-kind simplification tolerances.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::GeoslimError;
use crate::model::GeometryKind;

/// Tolerance used for Polygon and MultiPolygon when nothing else is
/// configured, in degrees (roughly 100 m at the equator).
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// A simplification tolerance: finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Validates a tolerance for the given geometry kind.
    pub fn new(kind: &GeometryKind, value: f64) -> Result<Self, GeoslimError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(GeoslimError::InvalidTolerance {
                kind: kind.to_string(),
                value,
            })
        }
    }

    /// Returns the underlying value.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which geometry kinds get simplified, and how aggressively.
///
/// Kinds without an entry pass through unsimplified.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tolerances {
    by_kind: BTreeMap<GeometryKind, Tolerance>,
}

impl Tolerances {
    /// Creates an empty table: nothing is simplified.
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygon and MultiPolygon at [`DEFAULT_TOLERANCE`].
    pub fn standard() -> Self {
        let by_kind = [GeometryKind::Polygon, GeometryKind::MultiPolygon]
            .into_iter()
            .map(|kind| (kind, Tolerance(DEFAULT_TOLERANCE)))
            .collect();
        Self { by_kind }
    }

    /// The same tolerance for Polygon and MultiPolygon.
    pub fn polygonal(value: f64) -> Result<Self, GeoslimError> {
        let mut tolerances = Self::new();
        tolerances.set(GeometryKind::Polygon, value)?;
        tolerances.set(GeometryKind::MultiPolygon, value)?;
        Ok(tolerances)
    }

    /// Registers a tolerance, replacing any previous one for `kind`.
    ///
    /// # Errors
    /// Fails for kinds that cannot be simplified (points, collections,
    /// unknown types) and for tolerances that are not finite and positive.
    pub fn set(&mut self, kind: GeometryKind, value: f64) -> Result<(), GeoslimError> {
        if !kind.is_simplifiable() {
            return Err(GeoslimError::UnsupportedToleranceKind(kind.to_string()));
        }
        let tolerance = Tolerance::new(&kind, value)?;
        self.by_kind.insert(kind, tolerance);
        Ok(())
    }

    /// Builder form of [`Tolerances::set`].
    pub fn with(mut self, kind: GeometryKind, value: f64) -> Result<Self, GeoslimError> {
        self.set(kind, value)?;
        Ok(self)
    }

    /// The tolerance for `kind`, if it is simplified at all.
    pub fn get(&self, kind: &GeometryKind) -> Option<Tolerance> {
        self.by_kind.get(kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GeometryKind, Tolerance)> {
        self.by_kind.iter().map(|(kind, tolerance)| (kind, *tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        for value in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let err = Tolerance::new(&GeometryKind::Polygon, value).unwrap_err();
            assert!(
                matches!(err, GeoslimError::InvalidTolerance { ref kind, .. } if kind == "Polygon"),
                "{:?}",
                err
            );
        }
        assert_eq!(
            Tolerance::new(&GeometryKind::Polygon, 0.001).unwrap().get(),
            0.001
        );
    }

    #[test]
    fn test_standard_matches_default_tolerance() {
        assert_eq!(
            Tolerances::standard(),
            Tolerances::polygonal(DEFAULT_TOLERANCE).unwrap()
        );
    }

    #[test]
    fn test_polygonal() {
        let tolerances = Tolerances::polygonal(0.01).unwrap();
        assert_eq!(
            tolerances.get(&GeometryKind::MultiPolygon).map(Tolerance::get),
            Some(0.01)
        );
        assert_eq!(tolerances.get(&GeometryKind::LineString), None);
    }

    #[test]
    fn test_rejects_unsimplifiable_kinds() {
        let mut tolerances = Tolerances::new();
        assert!(matches!(
            tolerances.set(GeometryKind::MultiPoint, 0.1),
            Err(GeoslimError::UnsupportedToleranceKind(_))
        ));
        assert!(matches!(
            tolerances.set(GeometryKind::Other("Polygons".into()), 0.1),
            Err(GeoslimError::UnsupportedToleranceKind(_))
        ));
        assert!(tolerances.is_empty());

        tolerances.set(GeometryKind::LineString, 0.1).unwrap();
        assert_eq!(tolerances.iter().count(), 1);
    }
}
