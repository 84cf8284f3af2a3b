use anyhow::Result;
use itertools::Itertools;

use crate::grid::{block_of, Cell, Grid, Unit, EMPTY};
use crate::logger::SolveLog;

/// Deductive solver. Owns the grid for the duration of solving and applies
/// only rules that admit exactly one placement; it never guesses, so puzzles
/// that need trial-and-error stall at a partial fill and report unsolved.
pub struct Solver {
    pub grid: Grid,
}

impl Solver {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Try to place `digit` somewhere in block `b` by cross-checking rows
    /// and columns: every empty cell of the block is a candidate unless its
    /// row or column already holds `digit`. Places only when a single
    /// candidate survives.
    pub fn cross_check_block(&mut self, b: usize, digit: Cell, log: &mut SolveLog) -> Result<bool> {
        if self.grid.contains(Unit::Block, b, digit) {
            return Ok(false);
        }
        let r0 = (b / 3) * 3;
        let c0 = (b % 3) * 3;
        let block = self.grid.block(b);
        let candidates = block
            .iter()
            .positions(|&v| v == EMPTY)
            .map(|i| (r0 + i / 3, c0 + i % 3))
            .filter(|&(r, c)| {
                !self.grid.contains(Unit::Row, r, digit)
                    && !self.grid.contains(Unit::Col, c, digit)
            })
            .collect_vec();
        self.place_if_sole(candidates, digit, "cross-check block", log)
    }

    /// Try to place `digit` somewhere in row `r` by cross-checking columns
    /// and blocks.
    pub fn cross_check_row(&mut self, r: usize, digit: Cell, log: &mut SolveLog) -> Result<bool> {
        if self.grid.contains(Unit::Row, r, digit) {
            return Ok(false);
        }
        let row = self.grid.row(r);
        let candidates = row
            .iter()
            .positions(|&v| v == EMPTY)
            .map(|c| (r, c))
            .filter(|&(r, c)| {
                !self.grid.contains(Unit::Col, c, digit)
                    && !self.grid.contains(Unit::Block, block_of(r, c), digit)
            })
            .collect_vec();
        self.place_if_sole(candidates, digit, "cross-check row", log)
    }

    /// Try to place `digit` somewhere in column `c` by cross-checking rows
    /// and blocks.
    pub fn cross_check_col(&mut self, c: usize, digit: Cell, log: &mut SolveLog) -> Result<bool> {
        if self.grid.contains(Unit::Col, c, digit) {
            return Ok(false);
        }
        let col = self.grid.col(c);
        let candidates = col
            .iter()
            .positions(|&v| v == EMPTY)
            .map(|r| (r, c))
            .filter(|&(r, c)| {
                !self.grid.contains(Unit::Row, r, digit)
                    && !self.grid.contains(Unit::Block, block_of(r, c), digit)
            })
            .collect_vec();
        self.place_if_sole(candidates, digit, "cross-check col", log)
    }

    /// If the named unit has exactly one empty cell, fill it with the unique
    /// missing digit. Works on a copy of the unit and writes the whole unit
    /// back, keeping the read-modify-write discipline explicit.
    pub fn fill_last_empty(&mut self, n: usize, kind: Unit, log: &mut SolveLog) -> Result<bool> {
        if self.grid.unit_empty(kind, n) != 1 {
            return Ok(false);
        }
        let mut cells = self.grid.unit(kind, n);
        let mut seen = [false; 9];
        let mut hole = 0;
        for (i, &v) in cells.iter().enumerate() {
            if v == EMPTY {
                hole = i;
            } else {
                seen[(v - 1) as usize] = true;
            }
        }
        // seen full despite a hole means the unit holds a duplicate;
        // nothing is deducible then
        let Some(missing) = seen.iter().position(|&s| !s) else {
            return Ok(false);
        };
        cells[hole] = (missing + 1) as Cell;
        self.grid.set_unit(kind, n, cells);
        log.note(
            "last empty cell",
            &format!("placed {} in {kind:?} {n}", missing + 1),
        )?;
        Ok(true)
    }

    /// One full elimination pass: cross-check all blocks, then all rows,
    /// then all columns (digits 1..=9 within each, unit indices ascending),
    /// then the single-empty-cell rule over every unit. Returns whether the
    /// pass changed the grid.
    pub fn run_pass(&mut self, log: &mut SolveLog) -> Result<bool> {
        let snapshot = self.grid.clone();
        for b in 0..9 {
            for d in 1..=9 {
                self.cross_check_block(b, d, log)?;
            }
        }
        for r in 0..9 {
            for d in 1..=9 {
                self.cross_check_row(r, d, log)?;
            }
        }
        for c in 0..9 {
            for d in 1..=9 {
                self.cross_check_col(c, d, log)?;
            }
        }
        for n in 0..9 {
            for kind in [Unit::Row, Unit::Col, Unit::Block] {
                self.fill_last_empty(n, kind, log)?;
            }
        }
        Ok(self.grid != snapshot)
    }

    /// Run passes to a fixed point and report whether the grid ended full.
    /// Terminates because every pass either places at least one digit
    /// (fill count is strictly increasing, bounded by 81) or changes
    /// nothing and the loop exits.
    pub fn solve(&mut self, log: &mut SolveLog) -> Result<bool> {
        while !self.grid.is_full() {
            if !self.run_pass(log)? {
                break;
            }
        }
        Ok(self.grid.is_full())
    }

    fn place_if_sole(
        &mut self,
        candidates: Vec<(usize, usize)>,
        digit: Cell,
        rule: &str,
        log: &mut SolveLog,
    ) -> Result<bool> {
        // zero candidates or several: no deduction, never a guess
        match candidates.into_iter().exactly_one() {
            Ok((r, c)) => {
                self.grid.set_cell(r, c, digit);
                log.note(rule, &format!("placed {digit} at r{r} c{c}"))?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }
}
