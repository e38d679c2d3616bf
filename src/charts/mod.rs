//! Charts module - Proportional chart geometry and rendering

pub mod pie;
mod plotter;
mod renderer;

pub use pie::{pie_slices, PieSlice};
pub use plotter::ChartPlotter;
pub use renderer::PieChartRenderer;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Slice colours, cycled by slice index.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (255, 87, 34),   // Deep Orange
    (96, 125, 139),  // Blue Grey
];

pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}
