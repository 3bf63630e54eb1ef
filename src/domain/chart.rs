//! Line and pie series for the dashboard charts.
//!
//! Both series are built from already-filtered `(label, count)` pairs and
//! keep their order. Pie colours are random but distinct within a render.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use super::{Lead, TimeBucket};

/// Series name used for the lead-count line chart.
pub const LEAD_COUNT_SERIES: &str = "Number of Leads";

/// Label used when a lead carries no source label.
pub const UNLABELED_SOURCE: &str = "unlabeled";

/// Slice alpha, so overlapping legend swatches stay readable.
const SLICE_ALPHA: f32 = 0.5;

/// Colours drawn without repeats; past this, the palette cycles.
pub const MAX_DISTINCT_COLORS: usize = 4096;

/// An RGBA display colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ChartColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f32,
}

impl ChartColor {
    /// CSS `rgba(...)` rendering.
    #[must_use]
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One named line series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LineSeries {
    /// Series name shown in the legend.
    pub name: String,
    /// X-axis labels in order.
    pub labels: Vec<String>,
    /// One value per label.
    pub values: Vec<u64>,
}

/// One slice per label.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PieSeries {
    /// Slice labels in order.
    pub labels: Vec<String>,
    /// One value per label.
    pub values: Vec<u64>,
    /// One distinct colour per label.
    pub colors: Vec<ChartColor>,
    /// `colors` rendered as CSS, ready for a chart library.
    pub css_colors: Vec<String>,
}

/// Line and pie series built from the same pairs.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartSeries {
    /// Line chart data.
    pub line: LineSeries,
    /// Pie chart data.
    pub pie: PieSeries,
}

impl ChartSeries {
    /// Builds both series from `buckets`, drawing pie colours from `rng`.
    pub fn build<R: Rng + ?Sized>(name: &str, buckets: &[TimeBucket], rng: &mut R) -> Self {
        let labels: Vec<String> = buckets.iter().map(|b| b.label.clone()).collect();
        let values: Vec<u64> = buckets.iter().map(|b| b.count).collect();
        let colors = distinct_colors(labels.len(), rng);
        let css_colors = colors.iter().map(ChartColor::css).collect();
        Self {
            line: LineSeries {
                name: name.to_string(),
                labels: labels.clone(),
                values: values.clone(),
            },
            pie: PieSeries {
                labels,
                values,
                colors,
                css_colors,
            },
        }
    }
}

/// Draws `n` random colours. The first [`MAX_DISTINCT_COLORS`] never
/// repeat; any beyond that reuse the palette in order.
pub fn distinct_colors<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<ChartColor> {
    colors_up_to(n, MAX_DISTINCT_COLORS, rng)
}

fn colors_up_to<R: Rng + ?Sized>(n: usize, limit: usize, rng: &mut R) -> Vec<ChartColor> {
    let unique = n.min(limit);
    let mut seen = HashSet::with_capacity(unique);
    let mut colors = Vec::with_capacity(n);
    while colors.len() < unique {
        let rgb: (u8, u8, u8) = (rng.r#gen(), rng.r#gen(), rng.r#gen());
        if seen.insert(rgb) {
            colors.push(ChartColor {
                r: rgb.0,
                g: rgb.1,
                b: rgb.2,
                a: SLICE_ALPHA,
            });
        }
    }
    let palette = colors.clone();
    colors.extend(palette.into_iter().cycle().take(n - unique));
    colors
}

/// Counts leads per source label, in first-seen order.
///
/// Drives the admin overview, where leads from every vendor are shown
/// together.
#[must_use]
pub fn count_by_source(leads: &[Lead]) -> Vec<TimeBucket> {
    let mut buckets: Vec<TimeBucket> = Vec::new();
    for lead in leads {
        let label = lead.vendor_label().unwrap_or(UNLABELED_SOURCE);
        match buckets.iter_mut().find(|b| b.label == label) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(TimeBucket {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bucket(label: &str, count: u64) -> TimeBucket {
        TimeBucket {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn series_keep_order_and_values() {
        let mut rng = StdRng::seed_from_u64(7);
        let buckets = [bucket("January 2024", 3), bucket("February 2024", 1)];
        let series = ChartSeries::build(LEAD_COUNT_SERIES, &buckets, &mut rng);
        assert_eq!(series.line.name, "Number of Leads");
        assert_eq!(series.line.labels, ["January 2024", "February 2024"]);
        assert_eq!(series.line.values, [3, 1]);
        assert_eq!(series.pie.labels, series.line.labels);
        assert_eq!(series.pie.values, series.line.values);
        assert_eq!(series.pie.colors.len(), 2);
    }

    #[test]
    fn colors_are_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let colors = distinct_colors(500, &mut rng);
        let unique: HashSet<(u8, u8, u8)> = colors.iter().map(|c| (c.r, c.g, c.b)).collect();
        assert_eq!(unique.len(), 500);
    }

    #[test]
    fn palette_cycles_past_limit() {
        let mut rng = StdRng::seed_from_u64(9);
        let colors = colors_up_to(7, 3, &mut rng);
        assert_eq!(colors.len(), 7);
        let unique: HashSet<(u8, u8, u8)> = colors.iter().map(|c| (c.r, c.g, c.b)).collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(colors.get(3), colors.first());
        assert_eq!(colors.get(6), colors.first());
    }

    #[test]
    fn pie_carries_css_colors() {
        let mut rng = StdRng::seed_from_u64(5);
        let series = ChartSeries::build(LEAD_COUNT_SERIES, &[bucket("a", 1), bucket("b", 2)], &mut rng);
        let expected: Vec<String> = series.pie.colors.iter().map(ChartColor::css).collect();
        assert_eq!(series.pie.css_colors, expected);
        assert!(series.pie.css_colors.iter().all(|c| c.starts_with("rgba(") && c.ends_with(", 0.5)")));
    }

    #[test]
    fn empty_buckets_give_empty_series() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = ChartSeries::build(LEAD_COUNT_SERIES, &[], &mut rng);
        assert!(series.line.labels.is_empty());
        assert!(series.pie.colors.is_empty());
    }

    #[test]
    fn css_rendering() {
        let color = ChartColor {
            r: 1,
            g: 2,
            b: 3,
            a: 0.5,
        };
        assert_eq!(color.css(), "rgba(1, 2, 3, 0.5)");
    }

    #[test]
    fn source_counts_in_first_seen_order() {
        let leads = vec![
            Lead::new("1", "").with_source("beta"),
            Lead::new("2", "").with_source("alpha"),
            Lead::new("3", "").with_source(" beta "),
            Lead::new("4", ""),
        ];
        let counts = count_by_source(&leads);
        assert_eq!(
            counts,
            [bucket("beta", 2), bucket("alpha", 1), bucket(UNLABELED_SOURCE, 1)]
        );
    }
}
