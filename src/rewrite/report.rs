//! Rewrite report types.
//!
//! A [`RewriteReport`] summarizes what a rewrite did to a collection: how
//! many vertices each geometry kind lost, how many property maps were
//! remapped, which top-level members were dropped, and how much smaller the
//! written file is.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::model::GeometryKind;

/// What happened to a single feature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureOutcome {
    /// Geometry kind, if the feature has a geometry.
    pub kind: Option<GeometryKind>,
    /// Whether the coordinates were simplified.
    pub simplified: bool,
    /// Whether the property rule fired.
    pub renamed: bool,
    /// Number of innermost position sequences.
    pub rings: usize,
    /// Positions before the rewrite.
    pub input_vertices: usize,
    /// Positions after the rewrite.
    pub output_vertices: usize,
}

/// Per-kind totals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub features: usize,
    pub simplified: usize,
    pub rings: usize,
    pub input_vertices: usize,
    pub output_vertices: usize,
}

/// Summary of a collection rewrite.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RewriteReport {
    /// Number of features processed.
    pub features: usize,
    /// Features without a geometry.
    pub without_geometry: usize,
    /// Features whose coordinates were simplified.
    pub simplified: usize,
    /// Features whose properties were remapped.
    pub renamed: usize,
    /// Totals keyed by geometry type name.
    pub by_kind: BTreeMap<String, KindCounts>,
    /// Top-level members removed before writing.
    pub dropped_members: Vec<String>,
    /// Size of the input file, when read from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_bytes: Option<u64>,
    /// Size of the output file, once written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_bytes: Option<u64>,
}

impl RewriteReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a report from per-feature outcomes.
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a FeatureOutcome>) -> Self {
        let mut report = Self::new();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    /// Adds one feature's outcome to the totals.
    pub fn record(&mut self, outcome: &FeatureOutcome) {
        self.features += 1;
        if outcome.renamed {
            self.renamed += 1;
        }

        let Some(kind) = &outcome.kind else {
            self.without_geometry += 1;
            return;
        };

        let counts = self.by_kind.entry(kind.name().to_string()).or_default();
        counts.features += 1;
        counts.rings += outcome.rings;
        counts.input_vertices += outcome.input_vertices;
        counts.output_vertices += outcome.output_vertices;
        if outcome.simplified {
            counts.simplified += 1;
            self.simplified += 1;
        }
    }

    /// Positions across all features before the rewrite.
    pub fn input_vertices(&self) -> usize {
        self.by_kind.values().map(|c| c.input_vertices).sum()
    }

    /// Positions across all features after the rewrite.
    pub fn output_vertices(&self) -> usize {
        self.by_kind.values().map(|c| c.output_vertices).sum()
    }

    /// Share of positions removed, in percent. `None` without any positions.
    pub fn vertex_reduction_percent(&self) -> Option<f64> {
        reduction_percent(self.input_vertices() as f64, self.output_vertices() as f64)
    }

    /// Share of bytes saved on disk, in percent. `None` until both sizes are known.
    pub fn size_reduction_percent(&self) -> Option<f64> {
        match (self.input_bytes, self.output_bytes) {
            (Some(input), Some(output)) => reduction_percent(input as f64, output as f64),
            _ => None,
        }
    }
}

fn reduction_percent(before: f64, after: f64) -> Option<f64> {
    if before > 0.0 {
        Some((1.0 - after / before) * 100.0)
    } else {
        None
    }
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

impl fmt::Display for RewriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rewrote {} feature(s): {} simplified, {} with remapped properties",
            self.features, self.simplified, self.renamed
        )?;
        if self.without_geometry > 0 {
            writeln!(f, "  {} feature(s) without geometry", self.without_geometry)?;
        }

        if !self.by_kind.is_empty() {
            writeln!(f)?;
            writeln!(f, "Vertices by geometry type:")?;
            for (kind, counts) in &self.by_kind {
                writeln!(
                    f,
                    "  {:<16} {:>7} feature(s) {:>10} -> {:>10}",
                    kind, counts.features, counts.input_vertices, counts.output_vertices
                )?;
            }
            if let Some(percent) = self.vertex_reduction_percent() {
                writeln!(
                    f,
                    "  total            {:>10} -> {:>10} ({:.1}% fewer)",
                    self.input_vertices(),
                    self.output_vertices(),
                    percent
                )?;
            }
        }

        if !self.dropped_members.is_empty() {
            writeln!(f)?;
            writeln!(f, "Dropped members: {}", self.dropped_members.join(", "))?;
        }

        if let (Some(input), Some(output)) = (self.input_bytes, self.output_bytes) {
            writeln!(f)?;
            writeln!(f, "Original: {:.1} MB", megabytes(input))?;
            writeln!(f, "Optimized: {:.1} MB", megabytes(output))?;
            if let Some(percent) = self.size_reduction_percent() {
                writeln!(f, "Reduction: {:.1}%", percent)?;
            }
        }

        Ok(())
    }
}
