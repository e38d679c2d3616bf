//! Static Chart Renderer
//! Draws the selection as an SVG pie chart with a legend, for download.
//!
//! Layout:
//! 1. Title: "Impressions by Country" top-left
//! 2. Pie on the left, square, filling the height below the title
//! 3. Legend to the right: colour box + "country - value (pct%)"

use crate::charts::pie::pie_slices;
use crate::charts::{palette_color, ChartError};
use crate::data::SelectedTable;
use crate::stats::group_thousands;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

const TITLE_H: i32 = 40;
const MARGIN: i32 = 20;
const LEGEND_BOX: i32 = 14;
const LEGEND_ROW_H: i32 = 22;
const ARC_SEGMENTS: usize = 180;

pub struct PieChartRenderer;

impl PieChartRenderer {
    /// Render to an SVG document. An empty selection gives a blank canvas.
    pub fn render_svg(
        selected: &SelectedTable,
        width: u32,
        height: u32,
    ) -> Result<String, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            if !selected.is_empty() {
                Self::draw_chart(&root, selected, width as i32, height as i32)?;
            }

            root.present().map_err(render_err)?;
        }

        debug!(bytes = svg.len(), "rendered SVG chart");
        Ok(svg)
    }

    fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        selected: &SelectedTable,
        width: i32,
        height: i32,
    ) -> Result<(), ChartError> {
        root.draw(&Text::new(
            "Impressions by Country",
            (MARGIN, MARGIN / 2),
            ("sans-serif", 22).into_font().color(&BLACK),
        ))
        .map_err(render_err)?;

        let diameter = (height - TITLE_H - 2 * MARGIN).min(width / 2).max(0);
        let radius = diameter as f64 / 2.0;
        let cx = MARGIN as f64 + radius;
        let cy = (TITLE_H + MARGIN) as f64 + radius;

        let slices = pie_slices(selected);
        for (idx, slice) in slices.iter().enumerate() {
            let (r, g, b) = palette_color(idx);
            let color = RGBColor(r, g, b);

            // SVG y grows downward; the outline is y-up.
            let points: Vec<(i32, i32)> = slice
                .outline(ARC_SEGMENTS)
                .into_iter()
                .map(|[x, y]| ((cx + x * radius).round() as i32, (cy - y * radius).round() as i32))
                .collect();
            root.draw(&Polygon::new(points, color.filled()))
                .map_err(render_err)?;

            let lx = MARGIN * 2 + diameter;
            let ly = TITLE_H + MARGIN + idx as i32 * LEGEND_ROW_H;
            root.draw(&Rectangle::new(
                [(lx, ly), (lx + LEGEND_BOX, ly + LEGEND_BOX)],
                color.filled(),
            ))
            .map_err(render_err)?;
            root.draw(&Text::new(
                format!(
                    "{} - {} ({:.1}%)",
                    slice.country,
                    group_thousands(u128::from(slice.impressions)),
                    slice.fraction * 100.0
                ),
                (lx + LEGEND_BOX + 6, ly),
                ("sans-serif", 14).into_font().color(&BLACK),
            ))
            .map_err(render_err)?;
        }

        Ok(())
    }
}

fn render_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CountryTotal;

    #[test]
    fn test_empty_selection_is_blank_canvas() {
        let svg = PieChartRenderer::render_svg(&SelectedTable::default(), 800, 500).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("800"));
        assert!(!svg.contains("<polygon"));
    }

    #[test]
    fn test_slices_and_legend_are_drawn() {
        let selected = SelectedTable::new(vec![
            CountryTotal::new("US", 150),
            CountryTotal::new("JP", 30),
        ]);
        let svg = PieChartRenderer::render_svg(&selected, 1000, 600).unwrap();

        assert_eq!(svg.matches("<polygon").count(), 2);
        assert!(svg.contains("Impressions by Country"));
        assert!(svg.contains("US - 150 (83.3%)"));
        assert!(svg.contains("JP - 30 (16.7%)"));
    }
}
