// Chart geometry shared by every drawing surface
// Pie slices, sampled slice areas and bar values, all derived from a Summary

use crate::aggregate::Summary;
use anyhow::Result;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
}

impl ChartKind {
    pub fn title(&self) -> &str {
        match self {
            ChartKind::Pie => "Percentage of Expenses by Category",
            ChartKind::Bar => "Expenses by Category",
        }
    }
}

/// Something that can put a chart in front of the user.
///
/// The terminal front end implements this; the shell only sees the trait.
pub trait ChartSurface {
    fn show(&mut self, kind: ChartKind, summary: &Summary) -> Result<()>;
}

/// Stand-in used when the binary is built without the `tui` feature.
#[derive(Debug, Default)]
pub struct UnavailableCharts;

impl ChartSurface for UnavailableCharts {
    fn show(&mut self, kind: ChartKind, _summary: &Summary) -> Result<()> {
        anyhow::bail!(
            "cannot draw '{}': charts need the `tui` feature (cargo build --features tui)",
            kind.title()
        )
    }
}

// ============================================================================
// PIE GEOMETRY
// ============================================================================

/// One category's wedge. Angles are radians counter-clockwise from the
/// positive x axis, `start < end`, and consecutive slices touch.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub category: String,
    pub amount: f64,
    pub share: f64,
    pub start: f64,
    pub end: f64,
}

pub fn pie_slices(summary: &Summary) -> Vec<PieSlice> {
    let mut slices = Vec::with_capacity(summary.categories.len());
    let mut start = 0.0;

    for entry in &summary.categories {
        let share = summary.share(entry);
        let end = start + share * TAU;
        slices.push(PieSlice {
            category: entry.category.clone(),
            amount: entry.amount,
            share,
            start,
            end,
        });
        start = end;
    }

    // Close the circle exactly; float drift would leave a sliver unpainted.
    if let Some(last) = slices.last_mut() {
        last.end = TAU;
    }

    slices
}

/// Sample the unit disc on a `resolution` x `resolution` grid and bucket
/// each point into the slice covering its angle. Index `i` of the result
/// holds the points of `slices[i]`.
pub fn slice_points(slices: &[PieSlice], resolution: usize) -> Vec<Vec<(f64, f64)>> {
    let mut buckets = vec![Vec::new(); slices.len()];
    if slices.is_empty() || resolution == 0 {
        return buckets;
    }

    let step = 2.0 / resolution as f64;
    for i in 0..=resolution {
        for j in 0..=resolution {
            let x = -1.0 + i as f64 * step;
            let y = -1.0 + j as f64 * step;
            if x * x + y * y > 1.0 {
                continue;
            }

            let angle = y.atan2(x).rem_euclid(TAU);
            let index = slices
                .iter()
                .position(|slice| angle < slice.end)
                .unwrap_or(slices.len() - 1);
            buckets[index].push((x, y));
        }
    }

    buckets
}

pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

// ============================================================================
// BAR VALUES
// ============================================================================

/// Category totals as whole cents, the unit bar heights are scaled in.
pub fn bar_values(summary: &Summary) -> Vec<(String, u64)> {
    summary
        .categories
        .iter()
        .map(|entry| (entry.category.clone(), (entry.amount * 100.0).round() as u64))
        .collect()
}
