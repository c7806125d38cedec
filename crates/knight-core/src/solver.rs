use crate::board::{Board, Position, UNVISITED};
use serde::{Deserialize, Serialize};

/// Dead ends between progress reports in the default configuration.
pub const DEFAULT_REPORT_INTERVAL: u64 = 10_000_000;

/// Configuration for a tour search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Require the final cell to be a knight move from the start.
    pub closed_tour: bool,
    /// Require the solved grid to be a magic square (square boards only;
    /// a non-square board with this set can never succeed).
    pub magic_tour: bool,
    /// Dead ends between progress reports; 0 disables reporting.
    pub report_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            closed_tour: false,
            magic_tour: false,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

/// Counters tracked across one search invocation.
///
/// Reset at the start of every [`TourSolver::run`]; a reused solver reports
/// its most recent run only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Dead ends since the last progress report.
    pub dead_ends: u64,
    /// Progress reports emitted so far.
    pub report_batches: u64,
    /// Times the recursion entered a node four moves past the start.
    pub depth_four_nodes: u64,
    /// Depth-3 lookahead path count from the start, the progress denominator.
    pub lookahead_paths: usize,
}

impl SearchStats {
    /// Approximate search-space coverage as a percentage.
    ///
    /// A heuristic proxy, not an exact fraction: it is non-monotonic and can
    /// exceed 100%. Returns 0 when the start cell has no depth-3
    /// continuations at all.
    pub fn progress_percent(&self) -> f32 {
        if self.lookahead_paths == 0 {
            return 0.0;
        }
        (self.depth_four_nodes as f32 * 100.0) / self.lookahead_paths as f32
    }

    /// Total dead ends over the whole run, given the report interval the
    /// search actually used (`dead_ends` resets at every report).
    pub fn total_dead_ends(&self, report_interval: u64) -> u64 {
        self.report_batches * report_interval + self.dead_ends
    }
}

/// Snapshot handed to the progress callback at each report interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProgressReport {
    /// How many full report intervals of dead ends have been explored.
    pub batches: u64,
    /// See [`SearchStats::progress_percent`].
    pub percent: f32,
}

/// Backtracking Knight's Tour solver with Warnsdorff move ordering.
///
/// The search is exhaustive: Warnsdorff's rule only orders candidates
/// (fewest onward moves first), so a qualifying tour is found whenever one
/// exists. `false` from [`run`] means the whole space was exhausted, a
/// normal negative result.
///
/// [`run`]: TourSolver::run
pub struct TourSolver {
    config: SolverConfig,
    stats: SearchStats,
    on_progress: Option<Box<dyn FnMut(ProgressReport)>>,
}

impl Default for TourSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TourSolver {
    /// Create a solver with default configuration (open tour, no magic
    /// requirement).
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            on_progress: None,
        }
    }

    /// Install a callback invoked at each report interval during long
    /// searches. Reporting is a side effect only; it never alters search
    /// ordering or outcome.
    pub fn on_progress(mut self, callback: impl FnMut(ProgressReport) + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Counters from the most recent [`run`](TourSolver::run).
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search for a tour over `board` from its start cell.
    ///
    /// Returns `true` iff a qualifying tour was found, in which case the
    /// board holds the solution (move order `1..=eligible_count` per cell).
    /// On `false` backtracking has restored the board to its pre-search
    /// state: all eligible cells `0` except the start, which keeps its `1`.
    pub fn run(&mut self, board: &mut Board) -> bool {
        let start = board.start();
        self.stats = SearchStats {
            lookahead_paths: board.lookahead_path_count(start),
            ..SearchStats::default()
        };
        // The start cell already holds move 1.
        self.search(board, start, 2)
    }

    fn search(&mut self, board: &mut Board, pos: Position, move_number: i32) -> bool {
        if move_number == board.eligible_count() as i32 + 1
            && (!self.config.closed_tour || board.closes_tour(pos))
            && (!self.config.magic_tour || board.is_magic())
        {
            return true;
        }

        let mut moves = board.possible_moves(pos, UNVISITED);
        // Warnsdorff's rule: fewest onward moves first. The sort is stable,
        // so ties keep the board's fixed offset-enumeration order.
        moves.sort_by_key(|&m| board.possible_moves(m, UNVISITED).len());

        if move_number == 5 {
            self.stats.depth_four_nodes += 1;
        }

        for next in moves {
            board.set_move_number(next, move_number);
            if self.search(board, next, move_number + 1) {
                return true;
            }
            board.clear_move_number(next);
            self.record_dead_end();
        }

        false
    }

    fn record_dead_end(&mut self) {
        self.stats.dead_ends += 1;
        if self.config.report_interval != 0 && self.stats.dead_ends == self.config.report_interval {
            self.stats.dead_ends = 0;
            self.stats.report_batches += 1;
            let report = ProgressReport {
                batches: self.stats.report_batches,
                percent: self.stats.progress_percent(),
            };
            if let Some(callback) = self.on_progress.as_mut() {
                callback(report);
            }
        }
    }
}
