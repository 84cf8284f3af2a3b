pub mod grid;
pub mod logger;
pub mod solver;

pub use grid::{block_of, Cell, Grid, Unit, EMPTY};
pub use logger::SolveLog;
pub use solver::Solver;
