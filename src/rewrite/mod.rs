//! Feature rewriting: per-kind simplification and property remapping.
//!
//! [`rewrite_collection`] applies a [`RewriteOptions`] to every feature of
//! a [`FeatureCollection`] and returns a [`RewriteReport`]. Each feature is
//! rewritten independently; with the `rayon` feature enabled, features are
//! processed in parallel and their outcomes gathered back in input order.

mod report;
mod rule;
mod tolerance;

pub use report::{FeatureOutcome, KindCounts, RewriteReport};
pub use rule::PropertyRule;
pub use tolerance::{Tolerance, Tolerances, DEFAULT_TOLERANCE};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::GeoslimError;
use crate::model::{Feature, FeatureCollection};
use crate::simplify::simplify_in_place;

/// Everything a rewrite needs to know.
#[derive(Clone, Debug, PartialEq)]
pub struct RewriteOptions {
    /// Simplification tolerance per geometry kind.
    pub tolerances: Tolerances,
    /// Optional property rename and allow-list.
    pub property_rule: Option<PropertyRule>,
}

impl Default for RewriteOptions {
    /// Polygon and MultiPolygon at [`DEFAULT_TOLERANCE`], no property rule.
    fn default() -> Self {
        Self {
            tolerances: Tolerances::standard(),
            property_rule: None,
        }
    }
}

impl RewriteOptions {
    /// Checks the options before any feature is touched.
    pub fn validate(&self) -> Result<(), GeoslimError> {
        if let Some(rule) = &self.property_rule {
            rule.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Rewrites one feature in place.
///
/// The geometry is simplified when its kind has a tolerance and it carries
/// coordinates. The property rule, if any, is applied to the property map.
/// Nothing outside `feature` is touched.
pub fn rewrite_feature(feature: &mut Feature, options: &RewriteOptions) -> FeatureOutcome {
    let mut outcome = FeatureOutcome::default();

    if let Some(geometry) = feature.geometry.as_mut() {
        outcome.kind = Some(geometry.kind.clone());

        if let Some(coordinates) = geometry.coordinates.as_mut() {
            outcome.rings = coordinates.ring_count();
            outcome.input_vertices = coordinates.vertex_count();

            if let Some(tolerance) = options.tolerances.get(&geometry.kind) {
                if !coordinates.is_empty() {
                    simplify_in_place(coordinates, tolerance.get());
                    outcome.simplified = true;
                }
            }
            outcome.output_vertices = coordinates.vertex_count();
        }
    }

    if let (Some(rule), Some(properties)) = (&options.property_rule, feature.properties.as_mut()) {
        outcome.renamed = rule.apply(properties);
    }

    log::trace!(
        "feature {:?}: {} -> {} vertices{}",
        outcome.kind.as_ref().map(|k| k.name()),
        outcome.input_vertices,
        outcome.output_vertices,
        if outcome.renamed { ", properties remapped" } else { "" }
    );

    outcome
}

/// Rewrites every feature of `collection` in place.
///
/// Options are validated first; an error leaves the collection untouched.
/// Features keep their order and count.
pub fn rewrite_collection(
    collection: &mut FeatureCollection,
    options: &RewriteOptions,
) -> Result<RewriteReport, GeoslimError> {
    options.validate()?;

    for (kind, tolerance) in options.tolerances.iter() {
        log::debug!("tolerance for {kind}: {tolerance}");
    }
    log::info!("rewriting {} feature(s)", collection.features.len());

    let outcomes = rewrite_features(&mut collection.features, options);
    let report = RewriteReport::from_outcomes(&outcomes);

    for (kind, counts) in &report.by_kind {
        log::debug!(
            "{kind}: {} feature(s), {} ring(s), {} -> {} vertices",
            counts.features,
            counts.rings,
            counts.input_vertices,
            counts.output_vertices
        );
    }
    log::info!(
        "rewrote {} feature(s), {} simplified, {} remapped",
        report.features,
        report.simplified,
        report.renamed
    );

    Ok(report)
}

/// Removes the named top-level members and returns those actually present.
pub fn drop_members(collection: &mut FeatureCollection, names: &[String]) -> Vec<String> {
    let dropped: Vec<String> = names
        .iter()
        .filter(|name| collection.members.remove(name.as_str()).is_some())
        .cloned()
        .collect();
    if !dropped.is_empty() {
        log::debug!("dropped member(s): {}", dropped.join(", "));
    }
    dropped
}

#[cfg(feature = "rayon")]
fn rewrite_features(features: &mut [Feature], options: &RewriteOptions) -> Vec<FeatureOutcome> {
    let mut outcomes = Vec::with_capacity(features.len());
    features
        .par_iter_mut()
        .map(|feature| rewrite_feature(feature, options))
        .collect_into_vec(&mut outcomes);
    outcomes
}

#[cfg(not(feature = "rayon"))]
fn rewrite_features(features: &mut [Feature], options: &RewriteOptions) -> Vec<FeatureOutcome> {
    features
        .iter_mut()
        .map(|feature| rewrite_feature(feature, options))
        .collect()
}
