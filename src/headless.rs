// headless.rs - Terminal runner: same driver and clock, no window

use anyhow::Result;
use log::info;
use percolation_core::{Lattice, StepOutcome};

use crate::clock::Clock;
use crate::config::Args;
use crate::grid::site_char;

pub fn run(args: &Args) -> Result<()> {
    let mut driver = args.driver();
    let (mut clock, mut ticks) = Clock::new()?;
    let report_every = args.size as u64;

    driver.start();
    clock.schedule(driver.step_interval(), || {});

    while driver.is_running() {
        let Some(tick) = ticks.blocking_recv() else {
            break;
        };
        if !clock.is_current(tick) {
            continue;
        }
        if driver.step() == StepOutcome::Continue && driver.steps() % report_every == 0 {
            info!(
                "{} steps, {:.1}% open",
                driver.steps(),
                driver.lattice().open_fraction() * 100.0
            );
        }
    }
    clock.cancel();

    let lattice = driver.lattice();
    print!("{}", render(lattice));
    println!(
        "{:?} after {} steps, {:.1}% of sites open",
        driver.state(),
        driver.steps(),
        lattice.open_fraction() * 100.0
    );
    Ok(())
}

/// One line per row: `#` closed, `.` open, `~` filled.
pub fn render(lattice: &Lattice) -> String {
    let mut out = String::with_capacity(lattice.size() * (lattice.size() + 1));
    for sites in lattice.rows() {
        out.extend(sites.iter().map(|site| site_char(site.state())));
        out.push('\n');
    }
    out
}
