//! Life-rule evolution over anything exposing the boolean-grid capability

use super::bitplane::{BitPlaneView, PackedValue};
use super::matrix::{BitGrid, GridError, Matrix};
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum live-neighbor count in a Moore neighborhood.
pub const MAX_NEIGHBORS: u8 = 8;

/// A totalistic birth/survival rule.
///
/// `birth` lists the neighbor counts that turn a dead cell live, `survival`
/// the counts that keep a live cell alive; everything else dies. Counts use
/// exact membership, no tolerance. Conway's rule is B3/S23.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub birth: Vec<u8>,
    pub survival: Vec<u8>,
}

impl Rule {
    /// Conway's Game of Life: birth on 3, survival on 2 or 3.
    pub fn conway() -> Self {
        Self {
            birth: vec![3],
            survival: vec![2, 3],
        }
    }

    /// Next state for a cell with the given liveness and neighbor count.
    #[inline]
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survival.contains(&neighbors)
        } else {
            self.birth.contains(&neighbors)
        }
    }

    /// Reject neighbor counts that can never occur.
    pub fn validate(&self) -> Result<()> {
        for &count in self.birth.iter().chain(self.survival.iter()) {
            if count > MAX_NEIGHBORS {
                anyhow::bail!(
                    "neighbor count {} is invalid, a cell has at most {} neighbors",
                    count,
                    MAX_NEIGHBORS
                );
            }
        }
        Ok(())
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

/// Count live Moore neighbors of `(x, y)`, clipping at the grid boundary.
///
/// Candidates outside the grid are omitted from the count, which is
/// equivalent to a border of permanently dead cells. There is no wraparound;
/// a caller who wants a toroidal or mirrored topology supplies a different
/// [`BitGrid`] adapter.
pub fn live_neighbors<G: BitGrid + ?Sized>(grid: &G, x: usize, y: usize) -> u8 {
    let width = grid.width() as isize;
    let height = grid.height() as isize;
    let mut count = 0;

    for dy in [-1, 0, 1] {
        for dx in [-1, 0, 1] {
            if dx == 0 && dy == 0 {
                continue; // the cell itself is not its own neighbor
            }

            let nx = x as isize + dx;
            let ny = y as isize + dy;

            if nx >= 0 && nx < width && ny >= 0 && ny < height && grid.get(nx as usize, ny as usize)
            {
                count += 1;
            }
        }
    }

    count
}

/// The evolution engine: applies a [`Rule`] one whole generation at a time.
///
/// A step is atomic from the caller's point of view. The next generation is
/// materialized in a private buffer read exclusively from the previous
/// generation, then committed cell by cell, so no reader of the grid ever
/// observes a half-advanced state and neighbor counts never mix generations.
#[derive(Debug, Clone)]
pub struct Automaton {
    rule: Rule,
}

impl Automaton {
    pub fn new(rule: Rule) -> Self {
        Self { rule }
    }

    /// Engine running Conway's rule.
    pub fn conway() -> Self {
        Self::new(Rule::conway())
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Advance `grid` by one generation.
    ///
    /// Works on any boolean-grid value: a plain `Matrix<bool>` or a
    /// [`BitPlaneView`] over a packed matrix. Empty grids are a no-op.
    /// The buffer fill is parallelized over rows; it only reads the
    /// previous generation, and the commit below it is sequential.
    pub fn step<G>(&self, grid: &mut G)
    where
        G: BitGrid + Sync,
    {
        let width = grid.width();
        let height = grid.height();
        if width == 0 || height == 0 {
            return;
        }

        let prev: &G = grid;
        let next: Vec<bool> = (0..height)
            .into_par_iter()
            .flat_map(|y| {
                (0..width).into_par_iter().map(move |x| {
                    let neighbors = live_neighbors(prev, x, y);
                    self.rule.next_state(prev.get(x, y), neighbors)
                })
            })
            .collect();

        for y in 0..height {
            for x in 0..width {
                grid.set(x, y, next[y * width + x]);
            }
        }
    }

    /// Advance `grid` by `generations` steps.
    pub fn run<G>(&self, grid: &mut G, generations: usize)
    where
        G: BitGrid + Sync,
    {
        for _ in 0..generations {
            self.step(grid);
        }
    }

    /// Advance the selected bit-planes of a packed matrix by one generation.
    ///
    /// Each plane is stepped to completion before the next one starts, so
    /// the planes evolve independently even though they share storage.
    /// Fails with [`GridError::InvalidBitIndex`] before touching the plane
    /// when a requested index is out of range.
    pub fn step_planes<V, I>(&self, matrix: &mut Matrix<V>, bits: I) -> Result<(), GridError>
    where
        V: PackedValue + Sync,
        I: IntoIterator<Item = u32>,
    {
        for bit in bits {
            let mut view = BitPlaneView::new(matrix, bit)?;
            self.step(&mut view);
        }
        Ok(())
    }

    /// Advance every bit-plane of a packed matrix by one generation.
    pub fn step_all_planes<V>(&self, matrix: &mut Matrix<V>) -> Result<(), GridError>
    where
        V: PackedValue + Sync,
    {
        self.step_planes(matrix, 0..V::BITS)
    }
}
