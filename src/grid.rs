// grid.rs - Display settings for the percolation grid

use egui::Color32;
use percolation_core::SiteState;

// Defaults used when nothing is given on the command line
pub const DEFAULT_GRID_SIZE: usize = 50;              // Sites per side
pub const MAX_GRID_SIZE: usize = 4096;                // Largest lattice the CLI accepts
pub const DEFAULT_CELL_SIZE: f32 = 10.0;              // Pixels per site
pub const CONTROL_PANEL_WIDTH: f32 = 200.0;           // Room for the controls next to the grid
pub const WINDOW_MARGIN: f32 = 100.0;

pub const FILLED_COLOR: Color32 = Color32::from_rgb(0, 0, 255);
pub const OPEN_COLOR: Color32 = Color32::WHITE;
pub const CLOSED_COLOR: Color32 = Color32::BLACK;
pub const GRID_LINE_COLOR: Color32 = Color32::from_gray(128);

pub fn site_color(state: SiteState) -> Color32 {
    match state {
        SiteState::Filled => FILLED_COLOR,
        SiteState::Open   => OPEN_COLOR,
        SiteState::Closed => CLOSED_COLOR,
    }
}

/// Text rendering used by the terminal runner.
pub fn site_char(state: SiteState) -> char {
    match state {
        SiteState::Filled => '~',
        SiteState::Open   => '.',
        SiteState::Closed => '#',
    }
}
