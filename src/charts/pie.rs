//! Pie slice geometry shared by the interactive and static renderers.

use crate::data::SelectedTable;
use crate::stats::Summary;
use std::f64::consts::TAU;

/// One country's wedge. Angles are radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub country: String,
    pub impressions: u64,
    pub fraction: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl PieSlice {
    /// Closed polygon on the unit circle (y up), starting at the centre.
    ///
    /// `segments` is the arc resolution of a full circle.
    pub fn outline(&self, segments: usize) -> Vec<[f64; 2]> {
        let steps = ((segments as f64 * self.fraction).ceil() as usize).max(1);
        let mut points = Vec::with_capacity(steps + 2);

        points.push([0.0, 0.0]);
        for i in 0..=steps {
            let angle = self.start_angle + self.sweep * i as f64 / steps as f64;
            points.push([angle.sin(), angle.cos()]);
        }
        points
    }

    /// Unit-circle point halfway along the arc, scaled by `radius`.
    pub fn label_anchor(&self, radius: f64) -> [f64; 2] {
        let mid = self.start_angle + self.sweep / 2.0;
        [radius * mid.sin(), radius * mid.cos()]
    }
}

/// Slices in selection order; empty when nothing (or only zero) is selected.
pub fn pie_slices(selected: &SelectedTable) -> Vec<PieSlice> {
    let summary = Summary::of(selected);
    if summary.value() == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    selected
        .entries()
        .iter()
        .map(|entry| {
            let fraction = summary.share_of(entry.impressions);
            let slice = PieSlice {
                country: entry.country.clone(),
                impressions: entry.impressions,
                fraction,
                start_angle: start,
                sweep: fraction * TAU,
            };
            start += slice.sweep;
            slice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CountryTotal;

    fn selection() -> SelectedTable {
        SelectedTable::new(vec![
            CountryTotal::new("US", 150),
            CountryTotal::new("JP", 30),
            CountryTotal::new("DE", 20),
        ])
    }

    #[test]
    fn test_fractions_cover_circle() {
        let slices = pie_slices(&selection());
        assert_eq!(slices.len(), 3);

        let total: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((slices[0].fraction - 0.75).abs() < 1e-9);

        let last = slices.last().unwrap();
        assert!((last.start_angle + last.sweep - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_slices_are_contiguous() {
        let slices = pie_slices(&selection());
        for pair in slices.windows(2) {
            assert!((pair[0].start_angle + pair[0].sweep - pair[1].start_angle).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_selection_has_no_slices() {
        assert!(pie_slices(&SelectedTable::default()).is_empty());
    }

    #[test]
    fn test_outline_starts_at_centre_and_top() {
        let slices = pie_slices(&selection());
        let outline = slices[0].outline(64);

        assert_eq!(outline[0], [0.0, 0.0]);
        assert!((outline[1][0]).abs() < 1e-12);
        assert!((outline[1][1] - 1.0).abs() < 1e-12);
        // 75% of 64 segments, plus centre and closing arc point
        assert_eq!(outline.len(), 48 + 2);
    }

    #[test]
    fn test_tiny_slice_still_has_an_arc() {
        let selected = SelectedTable::new(vec![
            CountryTotal::new("US", 1_000_000),
            CountryTotal::new("VA", 1),
        ]);
        let slices = pie_slices(&selected);
        assert_eq!(slices[1].outline(64).len(), 3);
    }
}
