use anyhow::{bail, Result};
use itertools::Itertools;
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::fmt;

/// A cell holds a digit `1..=9` or [`EMPTY`].
pub type Cell = i8;

/// Sentinel for an unfilled cell.
pub const EMPTY: Cell = -1;

/// One of the 27 constraint groups: 9 rows, 9 columns, 9 blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Row,
    Col,
    Block,
}

/// Flat indices of the 9 cells of each 3x3 block, row-major within the block.
static BLOCK_CELLS: Lazy<[[usize; 9]; 9]> = Lazy::new(|| {
    let mut table = [[0usize; 9]; 9];
    for (b, cells) in table.iter_mut().enumerate() {
        let r0 = (b / 3) * 3;
        let c0 = (b % 3) * 3;
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = (r0 + i / 3) * 9 + c0 + i % 3;
        }
    }
    table
});

/// Block index of the cell at row `r`, column `c`.
pub fn block_of(r: usize, c: usize) -> usize {
    (r / 3) * 3 + c / 3
}

/// The 81-cell board, row-major (`row * 9 + col`).
///
/// Grid stores whatever its caller writes: it does not validate values and
/// does not reject duplicate digits within a unit. Transient duplicates are
/// exactly what the solver works against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; 81],
}

// serde has no array impls past 32 elements, so Grid serializes as a
// plain 81-element sequence.
#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Cell, Grid};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Grid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.cells.iter())
        }
    }

    impl<'de> Deserialize<'de> for Grid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let cells: [Cell; 81] = Vec::<Cell>::deserialize(deserializer)?
                .try_into()
                .map_err(|v: Vec<Cell>| de::Error::invalid_length(v.len(), &"81 cells"))?;
            Ok(Grid { cells })
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// All 81 cells [`EMPTY`].
    pub fn empty() -> Self {
        Self { cells: [EMPTY; 81] }
    }

    pub fn from_cells(cells: [Cell; 81]) -> Self {
        Self { cells }
    }

    pub fn cell(&self, r: usize, c: usize) -> Cell {
        self.cells[r * 9 + c]
    }

    pub fn set_cell(&mut self, r: usize, c: usize, v: Cell) {
        self.cells[r * 9 + c] = v;
    }

    /// The 9 cells of row `n`, left to right.
    pub fn row(&self, n: usize) -> [Cell; 9] {
        let mut out = [EMPTY; 9];
        out.copy_from_slice(&self.cells[n * 9..n * 9 + 9]);
        out
    }

    /// The 9 cells of column `n`, top to bottom.
    pub fn col(&self, n: usize) -> [Cell; 9] {
        let mut out = [EMPTY; 9];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.cells[i * 9 + n];
        }
        out
    }

    /// The 9 cells of block `n`, row-major within the 3x3 sub-grid.
    /// Block 0 is top-left; blocks run left-to-right, then down.
    pub fn block(&self, n: usize) -> [Cell; 9] {
        let mut out = [EMPTY; 9];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.cells[BLOCK_CELLS[n][i]];
        }
        out
    }

    /// Read the 9 cells of the named unit in canonical order.
    pub fn unit(&self, kind: Unit, n: usize) -> [Cell; 9] {
        match kind {
            Unit::Row => self.row(n),
            Unit::Col => self.col(n),
            Unit::Block => self.block(n),
        }
    }

    /// Overwrite row `n` with `values`, same order as [`Grid::row`].
    pub fn set_row(&mut self, n: usize, values: [Cell; 9]) {
        self.cells[n * 9..n * 9 + 9].copy_from_slice(&values);
    }

    /// Overwrite column `n` with `values`, same order as [`Grid::col`].
    pub fn set_col(&mut self, n: usize, values: [Cell; 9]) {
        for (i, v) in values.into_iter().enumerate() {
            self.cells[i * 9 + n] = v;
        }
    }

    /// Overwrite block `n` with `values`, same order as [`Grid::block`].
    pub fn set_block(&mut self, n: usize, values: [Cell; 9]) {
        for (i, v) in values.into_iter().enumerate() {
            self.cells[BLOCK_CELLS[n][i]] = v;
        }
    }

    /// Overwrite the named unit, same order as [`Grid::unit`].
    pub fn set_unit(&mut self, kind: Unit, n: usize, values: [Cell; 9]) {
        match kind {
            Unit::Row => self.set_row(n, values),
            Unit::Col => self.set_col(n, values),
            Unit::Block => self.set_block(n, values),
        }
    }

    /// Count of non-empty cells across the whole board.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }

    pub fn row_filled(&self, n: usize) -> usize {
        self.row(n).iter().filter(|&&v| v != EMPTY).count()
    }

    pub fn col_filled(&self, n: usize) -> usize {
        self.col(n).iter().filter(|&&v| v != EMPTY).count()
    }

    pub fn block_filled(&self, n: usize) -> usize {
        self.block(n).iter().filter(|&&v| v != EMPTY).count()
    }

    pub fn unit_filled(&self, kind: Unit, n: usize) -> usize {
        match kind {
            Unit::Row => self.row_filled(n),
            Unit::Col => self.col_filled(n),
            Unit::Block => self.block_filled(n),
        }
    }

    pub fn row_empty(&self, n: usize) -> usize {
        9 - self.row_filled(n)
    }

    pub fn col_empty(&self, n: usize) -> usize {
        9 - self.col_filled(n)
    }

    pub fn block_empty(&self, n: usize) -> usize {
        9 - self.block_filled(n)
    }

    pub fn unit_empty(&self, kind: Unit, n: usize) -> usize {
        9 - self.unit_filled(kind, n)
    }

    pub fn is_full(&self) -> bool {
        self.filled() == 81
    }

    pub fn is_row_full(&self, n: usize) -> bool {
        self.row_filled(n) == 9
    }

    pub fn is_col_full(&self, n: usize) -> bool {
        self.col_filled(n) == 9
    }

    /// Whether `digit` appears among the 9 cells of the named unit.
    pub fn contains(&self, kind: Unit, n: usize, digit: Cell) -> bool {
        self.unit(kind, n).contains(&digit)
    }

    /// Compare by fill count only. Deliberately not an `Ord` impl: two
    /// different grids with the same fill count compare `Equal`, so this is
    /// a partial, count-based comparison for ranking boards by progress and
    /// nothing else.
    pub fn cmp_by_filled(&self, other: &Grid) -> Ordering {
        self.filled().cmp(&other.filled())
    }

    /// Parse a whitespace-tokenized board: 81 cells row-major, digits `1..=9`
    /// filled, `_`/`.`/`0`/`-1` empty. Divider tokens (`||` and runs of `=`)
    /// are skipped, so [`Grid::parse`] accepts its own `Display` output.
    /// Any other token, or a cell count other than 81, is an error.
    pub fn parse(s: &str) -> Result<Grid> {
        let tokens = s
            .split_whitespace()
            .filter(|t| *t != "||" && !t.chars().all(|ch| ch == '='))
            .collect_vec();

        let mut cells = [EMPTY; 81];
        let mut count = 0usize;
        for tok in tokens {
            if count == 81 {
                bail!("trailing cell token {tok:?} after 81 cells");
            }
            cells[count] = match tok {
                "_" | "." | "0" | "-1" => EMPTY,
                "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
                    tok.parse::<Cell>()?
                }
                _ => bail!("invalid cell token {tok:?}"),
            };
            count += 1;
        }
        if count < 81 {
            bail!("board has {count} cells, expected 81");
        }
        Ok(Grid { cells })
    }
}

impl fmt::Display for Grid {
    /// 9 rows of space-separated cells with `||` separators after columns
    /// 3 and 6 and a divider line after rows 3 and 6. Empty cells print as
    /// `_` so the output parses back to the same grid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..9 {
            write!(f, " ")?;
            for c in 0..9 {
                if c == 3 || c == 6 {
                    write!(f, "|| ")?;
                }
                let v = self.cell(r, c);
                if v == EMPTY {
                    write!(f, "_")?;
                } else {
                    write!(f, "{v}")?;
                }
                if c != 8 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
            if r == 2 || r == 5 {
                writeln!(f, "{}", "=".repeat(24))?;
            }
        }
        Ok(())
    }
}
