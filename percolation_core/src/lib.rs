//! Site percolation on an `n × n` square lattice.
//!
//! Sites are opened one at a time at random. An opened site in the top row,
//! or next to a filled site, fills and spreads the fill to every open site
//! connected to it. The run ends once a bottom-row site is filled.
//!
//! - [`lattice`]: the grid, fill propagation and the percolation flag
//! - [`driver`]: one random site per step, start/stop/pause/restart
//! - [`source`]: random and scripted sources of candidate sites

pub mod driver;
pub mod lattice;
pub mod source;

pub use driver::{DEFAULT_SPEED, Driver, DriverState, MAX_SPEED, MIN_SPEED, StepOutcome};
pub use lattice::{FillReport, Lattice, Site, SiteState};
pub use source::{RandomSites, ScriptedSites, SiteSource};
