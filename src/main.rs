// main.rs - Site percolation simulator
// The driver lives in percolation_core; this crate adds the clock, the window and the terminal runner.

use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::egui;
use log::info;
use percolation_core::{Driver, StepOutcome};
use tokio::sync::mpsc::UnboundedReceiver;

mod clock;     // Tick source
mod config;    // Command line
mod grid;      // Display settings
mod headless;  // Terminal runner
mod ui;        // eframe::App impl

use clock::{Clock, Tick};
use config::Args;
use grid::{CONTROL_PANEL_WIDTH, WINDOW_MARGIN};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.headless {
        return headless::run(&args);
    }

    let app = PercolationApp::new(&args)?;
    let side = args.size as f32 * args.cell_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side + CONTROL_PANEL_WIDTH, side + WINDOW_MARGIN]),
        ..Default::default()
    };

    info!("opening a {0}x{0} lattice window", args.size);
    eframe::run_native(
        "Percolation Simulation",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow!("window closed with an error: {e}"))
}

/// Window state: the driver plus the clock that feeds it.
pub struct PercolationApp {
    pub driver: Driver,
    pub cell_size: f32,
    clock: Clock,
    ticks: UnboundedReceiver<Tick>,
}

impl PercolationApp {
    pub fn new(args: &Args) -> Result<Self> {
        let (clock, ticks) = Clock::new()?;
        Ok(Self {
            driver: args.driver(),
            cell_size: args.cell_size,
            clock,
            ticks,
        })
    }

    /// Step the driver for one tick, unless the tick is from a cancelled registration.
    fn apply_tick(&mut self, tick: Tick) -> usize {
        if !self.clock.is_current(tick) {
            return 0;
        }
        match self.driver.step() {
            StepOutcome::Unchanged => 0,
            StepOutcome::Continue => 1,
            StepOutcome::Percolated => {
                self.clock.cancel();
                1
            }
            StepOutcome::Exhausted => {
                self.clock.cancel();
                0
            }
        }
    }

    fn schedule(&mut self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        self.clock
            .schedule(self.driver.step_interval(), move || ctx.request_repaint());
    }
}

/// Control surface used by the UI module
pub trait SimulationControls {
    fn start_run(&mut self, ctx: &egui::Context);
    fn stop_run(&mut self);
    fn toggle_pause(&mut self);
    fn restart_run(&mut self);
    fn change_speed(&mut self, speed: u32, ctx: &egui::Context);
    fn apply_ticks(&mut self) -> usize;
}

impl SimulationControls for PercolationApp {
    fn start_run(&mut self, ctx: &egui::Context) {
        if self.driver.start() {
            self.schedule(ctx);
        }
    }

    fn stop_run(&mut self) {
        self.clock.cancel();
        self.driver.stop();
    }

    fn toggle_pause(&mut self) {
        self.driver.toggle_pause();
    }

    fn restart_run(&mut self) {
        self.clock.cancel();
        self.driver.restart();
    }

    fn change_speed(&mut self, speed: u32, ctx: &egui::Context) {
        self.driver.set_speed(speed);
        if self.clock.is_active() {
            self.schedule(ctx);
        }
    }

    /// Step once per live tick. Returns how many sites were opened.
    fn apply_ticks(&mut self) -> usize {
        let mut opened = 0;
        while let Ok(tick) = self.ticks.try_recv() {
            opened += self.apply_tick(tick);
        }
        opened
    }
}
