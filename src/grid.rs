//! N-by-N percolation grid with incremental connectivity.
//!
//! Sites are addressed by 1-based `(row, col)` and stored row-major in a
//! disjoint set, site `(i, j)` at index `(i - 1) * n + j`. Two extra
//! elements act as virtual boundary nodes:
//!
//! | index    | element             |
//! |----------|---------------------|
//! | `0`      | virtual top node    |
//! | `1..=n²` | grid sites          |
//! | `n² + 1` | virtual bottom node |
//!
//! Every bottom-row site is linked to the bottom node at construction,
//! open or not, so [`Percolation::percolates`] is a single `connected`
//! query between the two virtual nodes.
//!
//! # Backwash
//!
//! With one shared structure, once the grid percolates every open
//! bottom-row site reaches the top node through the bottom node, and
//! [`Percolation::is_full`] reports it full even if no open path leads
//! there from row 1. [`FillTracking::Shared`] keeps that behaviour.
//! [`FillTracking::Separate`] answers `is_full` from a second disjoint set
//! that has a top node but no bottom node, at the cost of twice the unions.

use crate::collections::UnionFind;
use crate::error::{PercolationError, Result};

/// Index of the virtual top node.
const TOP: usize = 0;

/// How [`Percolation::is_full`] is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillTracking {
    /// One disjoint set for both virtual nodes. Open bottom-row sites may
    /// report full after percolation.
    #[default]
    Shared,
    /// A second, top-only disjoint set for fullness. No backwash.
    Separate,
}

/// Percolation model on an `n × n` grid.
///
/// # Examples
/// ```
/// use percolation::grid::Percolation;
///
/// let mut grid = Percolation::new(3).unwrap();
/// grid.open(1, 2).unwrap();
/// grid.open(2, 2).unwrap();
/// assert!(grid.is_full(2, 2).unwrap());
/// assert!(!grid.percolates());
///
/// grid.open(3, 2).unwrap();
/// assert!(grid.percolates());
/// assert_eq!(grid.number_of_open_sites(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    /// Indexed like the disjoint set; slots 0 and n²+1 stay false.
    open: Vec<bool>,
    open_count: usize,
    /// Sites plus both virtual nodes.
    sites: UnionFind,
    /// Sites plus the top node only, present with [`FillTracking::Separate`].
    fill: Option<UnionFind>,
}

impl Percolation {
    /// Creates an `n × n` grid with every site blocked, using
    /// [`FillTracking::Shared`].
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0`.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_fill_tracking(n, FillTracking::Shared)
    }

    /// Creates an `n × n` grid with every site blocked.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0` or `n² + 2`
    /// overflows `usize`.
    pub fn with_fill_tracking(n: usize, tracking: FillTracking) -> Result<Self> {
        let invalid = || PercolationError::InvalidArgument {
            name: "grid size",
            value: i64::try_from(n).unwrap_or(i64::MAX),
        };
        if n == 0 {
            return Err(invalid());
        }
        let site_count = n.checked_mul(n).ok_or_else(invalid)?;
        let bottom = site_count.checked_add(1).ok_or_else(invalid)?;

        let mut sites = UnionFind::new(bottom.checked_add(1).ok_or_else(invalid)?);
        for col in 1..=n {
            sites.union(bottom, index(n, n, col));
        }

        let fill = match tracking {
            FillTracking::Shared => None,
            FillTracking::Separate => Some(UnionFind::new(site_count + 1)),
        };

        Ok(Self {
            n,
            open: vec![false; site_count + 2],
            open_count: 0,
            sites,
            fill,
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Which fullness bookkeeping this grid uses.
    pub fn fill_tracking(&self) -> FillTracking {
        if self.fill.is_some() {
            FillTracking::Separate
        } else {
            FillTracking::Shared
        }
    }

    /// Number of sites opened so far.
    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Opens site `(row, col)` if it is not open already.
    ///
    /// A newly opened site joins the top node when it sits in row 1 or
    /// touches a full site, then joins every open 4-neighbour.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] if the site is outside the grid. The
    /// grid is left untouched in that case.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        self.validate(row, col)?;
        let site = index(self.n, row, col);
        if self.open[site] {
            return Ok(());
        }
        self.open[site] = true;
        self.open_count += 1;

        if row == 1 || self.touches_full(row, col) {
            self.link(TOP, site);
        }
        for (r, c) in neighbours(self.n, row, col) {
            let other = index(self.n, r, c);
            if self.open[other] {
                self.link(site, other);
            }
        }
        Ok(())
    }

    /// Returns whether site `(row, col)` is open.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] if the site is outside the grid.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        self.validate(row, col)?;
        Ok(self.open[index(self.n, row, col)])
    }

    /// Returns whether site `(row, col)` is open and connected to the top
    /// node.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] if the site is outside the grid.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        self.validate(row, col)?;
        Ok(self.site_is_full(index(self.n, row, col)))
    }

    /// Returns whether the top node is connected to the bottom node.
    pub fn percolates(&mut self) -> bool {
        let bottom = self.n * self.n + 1;
        self.sites.connected(TOP, bottom)
    }

    fn validate(&self, row: usize, col: usize) -> Result<()> {
        let n = self.n;
        if (1..=n).contains(&row) && (1..=n).contains(&col) {
            Ok(())
        } else {
            Err(PercolationError::OutOfRange { row, col, n })
        }
    }

    fn site_is_full(&mut self, site: usize) -> bool {
        if !self.open[site] {
            return false;
        }
        match self.fill.as_mut() {
            Some(fill) => fill.connected(TOP, site),
            None => self.sites.connected(TOP, site),
        }
    }

    fn touches_full(&mut self, row: usize, col: usize) -> bool {
        for (r, c) in neighbours(self.n, row, col) {
            if self.site_is_full(index(self.n, r, c)) {
                return true;
            }
        }
        false
    }

    /// Unions `a` and `b` in every structure this grid maintains.
    fn link(&mut self, a: usize, b: usize) {
        self.sites.union(a, b);
        if let Some(fill) = self.fill.as_mut() {
            fill.union(a, b);
        }
    }
}

/// Disjoint-set index of site `(row, col)` on an `n`-wide grid.
fn index(n: usize, row: usize, col: usize) -> usize {
    (row - 1) * n + col
}

/// In-grid 4-neighbourhood of `(row, col)`.
fn neighbours(n: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    [
        (row > 1).then(|| (row - 1, col)),
        (row < n).then(|| (row + 1, col)),
        (col > 1).then(|| (row, col - 1)),
        (col < n).then(|| (row, col + 1)),
    ]
    .into_iter()
    .flatten()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Breadth-first flood from the open top-row sites.
    fn flooded(n: usize, open: &[Vec<bool>]) -> Vec<Vec<bool>> {
        let mut seen = vec![vec![false; n + 1]; n + 1];
        let mut queue = VecDeque::new();
        for c in 1..=n {
            if open[1][c] {
                seen[1][c] = true;
                queue.push_back((1, c));
            }
        }
        while let Some((r, c)) = queue.pop_front() {
            for (nr, nc) in neighbours(n, r, c) {
                if open[nr][nc] && !seen[nr][nc] {
                    seen[nr][nc] = true;
                    queue.push_back((nr, nc));
                }
            }
        }
        seen
    }

    fn grid_and_sites() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1_usize..8).prop_flat_map(|n| {
            let site = (1..=n, 1..=n);
            (Just(n), proptest::collection::vec(site, 0..(n * n + 4)))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn percolates_matches_flood((n, sites) in grid_and_sites()) {
            let mut grid = Percolation::new(n).unwrap();
            let mut open = vec![vec![false; n + 1]; n + 1];
            for (r, c) in sites {
                grid.open(r, c).unwrap();
                open[r][c] = true;
                let seen = flooded(n, &open);
                let expected = (1..=n).any(|c| seen[n][c]);
                prop_assert_eq!(grid.percolates(), expected);
            }
        }

        #[test]
        fn separate_fullness_matches_flood((n, sites) in grid_and_sites()) {
            let mut grid = Percolation::with_fill_tracking(n, FillTracking::Separate).unwrap();
            let mut open = vec![vec![false; n + 1]; n + 1];
            for (r, c) in sites {
                grid.open(r, c).unwrap();
                open[r][c] = true;
            }
            let seen = flooded(n, &open);
            for r in 1..=n {
                for c in 1..=n {
                    prop_assert_eq!(grid.is_full(r, c).unwrap(), seen[r][c]);
                }
            }
        }

        #[test]
        fn full_implies_open_and_monotone((n, sites) in grid_and_sites()) {
            let mut grid = Percolation::new(n).unwrap();
            let mut percolated = false;
            let mut last_count = 0;
            for (r, c) in sites {
                grid.open(r, c).unwrap();
                prop_assert!(grid.number_of_open_sites() >= last_count);
                last_count = grid.number_of_open_sites();

                let now = grid.percolates();
                prop_assert!(now || !percolated, "grid stopped percolating");
                percolated = now;

                for r in 1..=n {
                    for c in 1..=n {
                        if grid.is_full(r, c).unwrap() {
                            prop_assert!(grid.is_open(r, c).unwrap());
                        }
                    }
                }
            }
        }
    }
}
