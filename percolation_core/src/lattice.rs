// lattice.rs - Square lattice of sites for site percolation

//! An `n × n` grid of sites. Sites are opened one at a time and fill spreads
//! from the top row through open 4-neighbours. The lattice percolates once a
//! site in the bottom row is filled.
//!
//! Sites are stored row-major in a flat vector, index `row * n + col`.
//! Every coordinate is checked against `[0, n)`; requests outside that range
//! are ignored.

/// A single lattice site. `filled` implies `open`, and neither flag is ever cleared
/// except by [`Lattice::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Site {
    pub open: bool,
    pub filled: bool,
}

/// What a renderer needs to know about a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteState {
    Closed,
    Open,
    Filled,
}

impl Site {
    pub fn state(&self) -> SiteState {
        match (self.open, self.filled) {
            (_, true) => SiteState::Filled,
            (true, false) => SiteState::Open,
            (false, false) => SiteState::Closed,
        }
    }
}

/// Result of one fill propagation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Sites that went from open to filled during this call.
    pub filled: usize,
    /// Whether any of them lies in the bottom row.
    pub reached_bottom: bool,
}

#[derive(Debug, Clone)]
pub struct Lattice {
    n: usize,
    sites: Vec<Site>,
    open_count: usize,
    percolates: bool,
    // Reused between propagations; each site is pushed at most once, so it never outgrows n².
    worklist: Vec<usize>,
}

impl Lattice {
    /// Create a fully closed `n × n` lattice.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "Lattice size must be at least 1");
        let count = n
            .checked_mul(n)
            .expect("Lattice size overflows the number of sites");
        Self {
            n,
            sites: vec![Site::default(); count],
            open_count: 0,
            percolates: false,
            worklist: Vec::with_capacity(count),
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.n
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.n && col < self.n).then(|| row * self.n + col)
    }

    /// Up, down, left, right. Missing entries are off the lattice.
    fn neighbours(&self, row: usize, col: usize) -> [Option<usize>; 4] {
        [
            row.checked_sub(1).and_then(|r| self.index(r, col)),
            self.index(row + 1, col),
            col.checked_sub(1).and_then(|c| self.index(row, c)),
            self.index(row, col + 1),
        ]
    }

    pub fn site(&self, row: usize, col: usize) -> Option<Site> {
        self.index(row, col).map(|idx| self.sites[idx])
    }

    /// Tri-state read used by renderers. Out-of-range coordinates read as closed.
    pub fn site_state(&self, row: usize, col: usize) -> SiteState {
        self.site(row, col).map_or(SiteState::Closed, |site| site.state())
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.site(row, col).is_some_and(|site| site.open)
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.site(row, col).is_some_and(|site| site.filled)
    }

    /// Open a site. Returns `true` if the site was closed before the call.
    pub fn open(&mut self, row: usize, col: usize) -> bool {
        let Some(idx) = self.index(row, col) else {
            return false;
        };
        let site = &mut self.sites[idx];
        if site.open {
            return false;
        }
        site.open = true;
        self.open_count += 1;
        true
    }

    /// Fill `(row, col)` and every open site connected to it.
    ///
    /// Closed, already filled and out-of-range seeds leave the lattice untouched.
    /// The bottom-row flag of the returned report is folded into the sticky
    /// percolation flag here and nowhere else.
    pub fn propagate_fill(&mut self, row: usize, col: usize) -> FillReport {
        let report = self.flood(row, col);
        self.percolates |= report.reached_bottom;
        report
    }

    fn flood(&mut self, row: usize, col: usize) -> FillReport {
        let mut report = FillReport::default();
        let Some(seed) = self.index(row, col) else {
            return report;
        };

        let mut worklist = std::mem::take(&mut self.worklist);
        worklist.clear();
        if self.mark_filled(seed, &mut report) {
            worklist.push(seed);
        }

        while let Some(idx) = worklist.pop() {
            let (r, c) = (idx / self.n, idx % self.n);
            for next in self.neighbours(r, c).into_iter().flatten() {
                if self.mark_filled(next, &mut report) {
                    worklist.push(next);
                }
            }
        }

        self.worklist = worklist;
        report
    }

    /// Fill one site if it is open and not yet filled.
    fn mark_filled(&mut self, idx: usize, report: &mut FillReport) -> bool {
        let site = &mut self.sites[idx];
        if !site.open || site.filled {
            return false;
        }
        site.filled = true;
        report.filled += 1;
        if idx / self.n == self.n - 1 {
            report.reached_bottom = true;
        }
        true
    }

    /// Whether a freshly opened site should start a fill: top row, or next to a filled site.
    pub fn seeds_fill(&self, row: usize, col: usize) -> bool {
        if self.index(row, col).is_none() {
            return false;
        }
        row == 0
            || self
                .neighbours(row, col)
                .into_iter()
                .flatten()
                .any(|idx| self.sites[idx].filled)
    }

    pub fn percolates(&self) -> bool {
        self.percolates
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    pub fn closed_count(&self) -> usize {
        self.sites.len() - self.open_count
    }

    pub fn filled_count(&self) -> usize {
        self.sites.iter().filter(|site| site.filled).count()
    }

    /// Fraction of sites opened so far.
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.sites.len() as f64
    }

    /// First closed site in row-major order.
    pub fn first_closed(&self) -> Option<(usize, usize)> {
        self.sites
            .iter()
            .position(|site| !site.open)
            .map(|idx| (idx / self.n, idx % self.n))
    }

    /// Rows of sites, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, Site> {
        self.sites.chunks(self.n)
    }

    /// Back to the fully closed state, same size.
    pub fn reset(&mut self) {
        self.sites.fill(Site::default());
        self.open_count = 0;
        self.percolates = false;
    }
}
