// ui.rs - Window layout: lattice on the left, controls on the right

use eframe::egui;
use egui::{Rect, Stroke, Vec2};
use percolation_core::{DriverState, MAX_SPEED, MIN_SPEED};

use crate::grid::{self, CONTROL_PANEL_WIDTH, GRID_LINE_COLOR};
use crate::{PercolationApp, SimulationControls};

impl eframe::App for PercolationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Ticks that arrived since the last frame
        self.apply_ticks();

        egui::SidePanel::right("controls")
            .exact_width(CONTROL_PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| self.controls(ui, ctx));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_lattice(ui));
    }
}

impl PercolationApp {
    fn controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical(|ui| {
            ui.label("Speed");
            let mut speed = self.driver.speed();
            let slider = egui::Slider::new(&mut speed, MIN_SPEED..=MAX_SPEED)
                .vertical()
                .suffix(" /s");
            if ui.add(slider).changed() {
                self.change_speed(speed, ctx);
            }

            ui.separator();

            if ui.add_enabled(self.driver.can_start(), egui::Button::new("Start")).clicked() {
                self.start_run(ctx);
            }
            if ui.add_enabled(self.driver.can_stop(), egui::Button::new("Stop")).clicked() {
                self.stop_run();
            }
            let pause_label = if self.driver.is_paused() { "Resume" } else { "Pause" };
            if ui.add_enabled(self.driver.can_pause(), egui::Button::new(pause_label)).clicked() {
                self.toggle_pause();
            }
            if ui.button("Restart").clicked() {
                self.restart_run();
            }

            ui.separator();

            let lattice = self.driver.lattice();
            let state = match self.driver.state() {
                DriverState::Stopped    => "Stopped",
                DriverState::Running    => "Running",
                DriverState::Paused     => "Paused",
                DriverState::Percolated => "Percolates!",
                DriverState::Exhausted  => "No closed sites left",
            };
            ui.label(state);
            ui.label(format!("Steps: {}", self.driver.steps()));
            ui.label(format!("Open sites: {}", lattice.open_count()));
            ui.label(format!("Filled sites: {}", lattice.filled_count()));
            ui.label(format!("Open: {:.1}%", lattice.open_fraction() * 100.0));
        });
    }

    fn draw_lattice(&self, ui: &mut egui::Ui) {
        let lattice = self.driver.lattice();
        let cell = self.cell_size;

        let start_pos = ui.cursor().min;
        let total_size = Vec2::splat(cell * lattice.size() as f32);
        let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

        for (row, sites) in lattice.rows().enumerate() {
            for (col, site) in sites.iter().enumerate() {
                let rect = Rect::from_min_size(
                    egui::pos2(start_pos.x + col as f32 * cell, start_pos.y + row as f32 * cell),
                    Vec2::splat(cell),
                );
                painter.rect_filled(rect, 0.0, grid::site_color(site.state()));
                painter.rect_stroke(rect, 0.0, Stroke::new(0.5, GRID_LINE_COLOR));
            }
        }
    }
}
