use dedoku::{block_of, Cell, Grid, Unit, EMPTY};
use pretty_assertions::assert_eq;
use std::cmp::Ordering;

/// Grid where every cell holds its own flat index. Not a legal board, but
/// Grid stores values unvalidated, and a unique value per cell is exactly
/// what pins down the addressing math.
fn patterned() -> Grid {
    let mut cells = [EMPTY; 81];
    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = i as Cell;
    }
    Grid::from_cells(cells)
}

/// Digit-domain grid (cell (r, c) holds `(r * 9 + c) % 9 + 1`) for the
/// tests that go through the text form.
fn digits() -> Grid {
    let mut cells = [EMPTY; 81];
    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = (i % 9 + 1) as Cell;
    }
    Grid::from_cells(cells)
}

#[test]
fn cell_agrees_with_every_unit_view() {
    let g = patterned();
    for r in 0..9 {
        for c in 0..9 {
            let v = g.cell(r, c);
            assert_eq!(v, g.row(r)[c]);
            assert_eq!(v, g.col(c)[r]);
            let b = block_of(r, c);
            assert_eq!(v, g.block(b)[(r % 3) * 3 + c % 3]);
        }
    }
}

#[test]
fn unit_setters_round_trip() {
    let values: [Cell; 9] = [9, 1, 8, 2, 7, 3, 6, 4, 5];
    for n in 0..9 {
        let mut g = Grid::empty();
        g.set_row(n, values);
        assert_eq!(g.row(n), values);

        let mut g = Grid::empty();
        g.set_col(n, values);
        assert_eq!(g.col(n), values);

        let mut g = Grid::empty();
        g.set_block(n, values);
        assert_eq!(g.block(n), values);
    }
}

#[test]
fn block_setter_lands_in_the_right_cells() {
    let mut g = Grid::empty();
    // block 4 is the centre 3x3, top-left at (3, 3)
    g.set_block(4, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(g.cell(3, 3), 1);
    assert_eq!(g.cell(3, 5), 3);
    assert_eq!(g.cell(4, 4), 5);
    assert_eq!(g.cell(5, 3), 7);
    assert_eq!(g.cell(5, 5), 9);
    assert_eq!(g.filled(), 9);
}

#[test]
fn fill_counts() {
    let mut g = Grid::empty();
    assert_eq!(g.filled(), 0);
    assert!(!g.is_full());

    g.set_cell(0, 0, 5);
    g.set_cell(4, 7, 2);
    g.set_cell(8, 8, 9);
    assert_eq!(g.filled(), 3);
    assert_eq!(g.row_filled(0), 1);
    assert_eq!(g.row_filled(4), 1);
    assert_eq!(g.col_filled(8), 1);
    assert_eq!(g.block_filled(8), 1);

    for n in 0..9 {
        assert_eq!(g.row_filled(n) + g.row_empty(n), 9);
        assert_eq!(g.col_filled(n) + g.col_empty(n), 9);
        assert_eq!(g.block_filled(n) + g.block_empty(n), 9);
    }

    let full = patterned();
    assert!(full.is_full());
    assert_eq!(full.filled(), 81);
    for n in 0..9 {
        assert!(full.is_row_full(n));
        assert!(full.is_col_full(n));
    }
}

#[test]
fn contains_searches_one_unit_only() {
    let mut g = Grid::empty();
    g.set_cell(2, 7, 4);
    assert!(g.contains(Unit::Row, 2, 4));
    assert!(g.contains(Unit::Col, 7, 4));
    assert!(g.contains(Unit::Block, block_of(2, 7), 4));

    assert!(!g.contains(Unit::Row, 3, 4));
    assert!(!g.contains(Unit::Col, 6, 4));
    assert!(!g.contains(Unit::Block, 0, 4));
    assert!(!g.contains(Unit::Row, 2, 5));
}

#[test]
fn cmp_by_filled_counts_not_contents() {
    let empty = Grid::empty();
    let mut one = Grid::empty();
    one.set_cell(0, 0, 1);
    let mut other = Grid::empty();
    other.set_cell(8, 8, 9);

    assert_eq!(empty.cmp_by_filled(&one), Ordering::Less);
    assert_eq!(one.cmp_by_filled(&empty), Ordering::Greater);
    // same fill count compares Equal even though the grids differ
    assert_eq!(one.cmp_by_filled(&other), Ordering::Equal);
    assert_ne!(one, other);
}

#[test]
fn display_round_trips_through_parse() {
    let mut g = digits();
    g.set_cell(0, 4, EMPTY);
    g.set_cell(6, 1, EMPTY);
    let text = g.to_string();
    assert_eq!(Grid::parse(&text).unwrap(), g);
}

#[test]
fn parse_accepts_sentinel_spellings_and_dividers() {
    // the file format the solver was originally fed: -1 sentinels, ||
    // column separators, = divider lines
    let mut body = String::new();
    for r in 0..9 {
        if r == 3 || r == 6 {
            body.push_str("========================\n");
        }
        for c in 0..9 {
            if c == 3 || c == 6 {
                body.push_str("|| ");
            }
            if r == 0 && c == 0 {
                body.push_str("7 ");
            } else {
                body.push_str("-1 ");
            }
        }
        body.push('\n');
    }
    let g = Grid::parse(&body).unwrap();
    assert_eq!(g.cell(0, 0), 7);
    assert_eq!(g.filled(), 1);

    let dotted = "5 . 0 _ -1 . . . .\n".repeat(9);
    let g = Grid::parse(&dotted).unwrap();
    assert_eq!(g.filled(), 9);
    for r in 0..9 {
        assert_eq!(g.cell(r, 0), 5);
    }
}

#[test]
fn parse_rejects_malformed_input() {
    assert!(Grid::parse("").is_err());
    assert!(Grid::parse("1 2 3").is_err());
    assert!(Grid::parse(&"x ".repeat(81)).is_err());
    assert!(Grid::parse(&"12 ".repeat(81)).is_err());
    assert!(Grid::parse(&"1 ".repeat(82)).is_err());
}
