//! Inspect report types and terminal formatting.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The result of inspecting a feature collection.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Feature and member counts.
    pub summary: SummarySection,
    /// Per-kind geometry statistics.
    pub geometry: GeometrySection,
    /// Property key histogram.
    pub properties: PropertiesSection,
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// Feature and member counts.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummarySection {
    /// Total number of features.
    pub features: usize,
    /// Features whose geometry is missing or `null`.
    pub without_geometry: usize,
    /// Features whose properties are missing or `null`.
    pub without_properties: usize,
    /// Names of top-level members other than `type` and `features`.
    pub members: Vec<String>,
}

/// Geometry statistics.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GeometrySection {
    /// Totals keyed by geometry type name.
    pub by_kind: BTreeMap<String, KindStats>,
    /// Bounding box of every position, if there are any.
    pub extent: Option<Extent>,
}

impl GeometrySection {
    pub fn total_vertices(&self) -> usize {
        self.by_kind.values().map(|s| s.vertices).sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KindStats {
    pub features: usize,
    pub without_coordinates: usize,
    pub rings: usize,
    pub vertices: usize,
    /// Length of the longest single ring.
    pub largest_ring: usize,
}

/// Axis-aligned bounds of all positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Property key section.
#[derive(Clone, Debug, Serialize)]
pub struct PropertiesSection {
    /// How many keys to show.
    pub top_n: usize,
    /// Total distinct keys across all features.
    pub total_distinct: usize,
    /// Number of features, the denominator for key percentages.
    pub features: usize,
    /// Top keys, most frequent first.
    pub entries: Vec<KeyCount>,
}

/// A property key and the number of features carrying it.
#[derive(Clone, Debug, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "╭─────────────────────────────────────────────────────────────╮")?;
        writeln!(f, "│                 GeoJSON Inspection Report                   │")?;
        writeln!(f, "╰─────────────────────────────────────────────────────────────╯")?;
        writeln!(f)?;

        self.fmt_summary(f)?;
        writeln!(f)?;

        self.fmt_geometry(f)?;
        writeln!(f)?;

        self.fmt_properties(f)?;

        Ok(())
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        writeln!(f, "┌─ Summary ─────────────────────────────────────────────────┐")?;
        writeln!(f, "│                                                           │")?;
        writeln!(f, "│   Features:         {:>10}", format_number(s.features))?;
        if s.without_geometry > 0 {
            writeln!(
                f,
                "│   Without geometry: {:>10}  ({})",
                format_number(s.without_geometry),
                fmt_percent(s.without_geometry, s.features)
            )?;
        }
        if s.without_properties > 0 {
            writeln!(
                f,
                "│   Without props:    {:>10}  ({})",
                format_number(s.without_properties),
                fmt_percent(s.without_properties, s.features)
            )?;
        }
        if !s.members.is_empty() {
            writeln!(f, "│   Members:          {}", s.members.join(", "))?;
        }
        writeln!(f, "│                                                           │")?;
        writeln!(f, "└───────────────────────────────────────────────────────────┘")?;

        Ok(())
    }

    fn fmt_geometry(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.geometry;

        writeln!(f, "┌─ Geometry ────────────────────────────────────────────────┐")?;
        writeln!(f, "│                                                           │")?;

        if g.by_kind.is_empty() {
            writeln!(f, "│   No geometries found.                                    │")?;
        } else {
            writeln!(
                f,
                "│   {:<16} {:>9} {:>9} {:>12} {:>8}",
                "type", "features", "rings", "vertices", "largest"
            )?;
            for (kind, stats) in &g.by_kind {
                writeln!(
                    f,
                    "│   {:<16} {:>9} {:>9} {:>12} {:>8}",
                    truncate_label(kind, 16),
                    format_number(stats.features),
                    format_number(stats.rings),
                    format_number(stats.vertices),
                    format_number(stats.largest_ring)
                )?;
            }
            writeln!(f, "│")?;
            writeln!(
                f,
                "│   Total vertices:   {:>10}",
                format_number(g.total_vertices())
            )?;
            if let Some(e) = &g.extent {
                writeln!(
                    f,
                    "│   Extent:           x {:.6} .. {:.6}",
                    e.min_x, e.max_x
                )?;
                writeln!(
                    f,
                    "│                     y {:.6} .. {:.6}",
                    e.min_y, e.max_y
                )?;
            }
        }

        writeln!(f, "│                                                           │")?;
        writeln!(f, "└───────────────────────────────────────────────────────────┘")?;

        Ok(())
    }

    fn fmt_properties(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.properties;

        let header = if p.total_distinct > p.top_n {
            format!("Property keys (top {} of {})", p.top_n, p.total_distinct)
        } else {
            format!("Property keys ({})", p.total_distinct)
        };

        writeln!(
            f,
            "┌─ {} {}┐",
            header,
            "─".repeat(57usize.saturating_sub(header.len()))
        )?;
        writeln!(f, "│                                                           │")?;

        if p.entries.is_empty() {
            writeln!(f, "│   No properties found.                                    │")?;
        } else {
            let max_count = p.entries.iter().map(|e| e.count).max().unwrap_or(1);

            for entry in &p.entries {
                let bar = render_bar(entry.count, max_count, self.bar_width);
                writeln!(
                    f,
                    "│   {:<16} {:>7} {:>6}  {}",
                    truncate_label(&entry.key, 16),
                    format_number(entry.count),
                    fmt_percent(entry.count, p.features),
                    bar
                )?;
            }
        }

        writeln!(f, "│                                                           │")?;
        writeln!(f, "└───────────────────────────────────────────────────────────┘")?;

        Ok(())
    }
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a percentage, handling zero denominators.
fn fmt_percent(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}%", (numerator as f64 / denominator as f64) * 100.0)
    }
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let filled = ((count * width) / max_count).min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Truncate a label to fit in the display column.
fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}
