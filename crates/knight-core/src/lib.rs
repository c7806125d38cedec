//! Knight's Tour search engine.
//!
//! A tour visits every eligible cell of an M×N grid exactly once by knight
//! moves. [`Board`] owns the grid and answers legality and geometry queries;
//! [`TourSolver`] runs the heuristically ordered backtracking search,
//! optionally requiring a closed tour (last cell a knight move from the
//! start) or a magic tour (move numbers form a magic square).

pub mod board;
pub mod solver;

pub use board::{Board, BoardError, Position};
pub use solver::{ProgressReport, SearchStats, SolverConfig, TourSolver};
