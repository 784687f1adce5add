// source.rs - Where the driver gets its candidate sites from

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies candidate coordinates for the next site to open.
///
/// Draws are not required to be closed or even in range; the driver rejects
/// and redraws.
pub trait SiteSource {
    fn draw(&mut self, n: usize) -> (usize, usize);
}

/// Uniform draws over `[0, n) × [0, n)`.
#[derive(Debug, Clone)]
pub struct RandomSites<R = StdRng> {
    rng: R,
}

impl RandomSites<StdRng> {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSites<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SiteSource for RandomSites<R> {
    fn draw(&mut self, n: usize) -> (usize, usize) {
        (self.rng.gen_range(0..n), self.rng.gen_range(0..n))
    }
}

/// Replays a fixed list of draws, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedSites {
    draws: Vec<(usize, usize)>,
    next: usize,
}

impl ScriptedSites {
    pub fn new(draws: Vec<(usize, usize)>) -> Self {
        assert!(!draws.is_empty(), "Scripted source needs at least one draw");
        Self { draws, next: 0 }
    }

    /// Number of draws handed out so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl SiteSource for ScriptedSites {
    fn draw(&mut self, _n: usize) -> (usize, usize) {
        let site = self.draws[self.next % self.draws.len()];
        self.next += 1;
        site
    }
}
