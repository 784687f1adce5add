// config.rs - Command line configuration

use clap::Parser;
use percolation_core::{DEFAULT_SPEED, Driver, MAX_SPEED, MIN_SPEED};

use crate::grid::{DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

#[derive(Parser, Debug, Clone)]
#[command(name = "percolation", version, about = "Site percolation on a square lattice")]
pub struct Args {
    /// Sites per side of the lattice
    #[arg(short = 'n', long, default_value_t = DEFAULT_GRID_SIZE, value_parser = parse_size)]
    pub size: usize,

    /// Sites opened per second
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SPEED,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_SPEED)..=i64::from(MAX_SPEED))
    )]
    pub speed: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pixels per site in the window
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE, value_parser = parse_cell_size)]
    pub cell_size: f32,

    /// Run in the terminal instead of opening a window
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    pub fn driver(&self) -> Driver {
        Driver::random(self.size, self.seed).with_speed(self.speed)
    }
}

fn parse_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("lattice size must be at least 1".to_string()),
        Ok(n) if n > MAX_GRID_SIZE => Err(format!("lattice size must be at most {MAX_GRID_SIZE}")),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_cell_size(s: &str) -> Result<f32, String> {
    let size: f32 = s.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if size.is_finite() && size >= 1.0 {
        Ok(size)
    } else {
        Err("cell size must be at least 1 pixel".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["percolation"]).unwrap();
        assert_eq!(args.size, DEFAULT_GRID_SIZE);
        assert_eq!(args.speed, DEFAULT_SPEED);
        assert_eq!(args.seed, None);
        assert!(!args.headless);
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "percolation", "-n", "8", "--speed", "100", "--seed", "3", "--cell-size", "4", "--headless",
        ])
        .unwrap();
        assert_eq!(args.size, 8);
        assert_eq!(args.speed, 100);
        assert_eq!(args.seed, Some(3));
        assert_eq!(args.cell_size, 4.0);
        assert!(args.headless);

        let driver = args.driver();
        assert_eq!(driver.lattice().size(), 8);
        assert_eq!(driver.speed(), 100);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["percolation", "-n", "0"]).is_err());
        assert!(Args::try_parse_from(["percolation", "-n", "5000000000"]).is_err());
        let too_big = (MAX_GRID_SIZE + 1).to_string();
        assert!(Args::try_parse_from(["percolation", "-n", too_big.as_str()]).is_err());
        assert!(Args::try_parse_from(["percolation", "--speed", "0"]).is_err());
        assert!(Args::try_parse_from(["percolation", "--speed", "101"]).is_err());
        assert!(Args::try_parse_from(["percolation", "--cell-size", "0.5"]).is_err());
    }

    #[test]
    fn largest_size_is_accepted() {
        let size = MAX_GRID_SIZE.to_string();
        let args = Args::try_parse_from(["percolation", "-n", size.as_str()]).unwrap();
        assert_eq!(args.size, MAX_GRID_SIZE);
    }
}
