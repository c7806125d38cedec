use serde::{Deserialize, Serialize};

/// The 8 knight offsets in canonical enumeration order.
///
/// This order is a contract: it is the tie-break order the solver relies on
/// when two candidate moves have equally many onward moves.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Cell value marking a permanently excluded cell.
pub const EXCLUDED: i32 = -1;

/// Cell value marking an unvisited, eligible cell.
pub const UNVISITED: i32 = 0;

/// A 0-based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Invalid board configuration, rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Either dimension is below the 3-cell minimum.
    DimensionsTooSmall { rows: usize, cols: usize },
    /// An excluded cell lies outside the grid.
    ExclusionOutOfBounds(Position),
    /// The start cell lies outside the grid.
    StartOutOfBounds(Position),
    /// The start cell is listed as excluded.
    StartExcluded(Position),
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::DimensionsTooSmall { rows, cols } => {
                write!(f, "board must be at least 3x3, got {}x{}", rows, cols)
            }
            BoardError::ExclusionOutOfBounds(pos) => {
                write!(f, "excluded cell {} is outside the board", pos)
            }
            BoardError::StartOutOfBounds(pos) => {
                write!(f, "start cell {} is outside the board", pos)
            }
            BoardError::StartExcluded(pos) => {
                write!(f, "start cell {} overlaps an excluded cell", pos)
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// The tour grid: per-cell move numbers plus exclusion state.
///
/// Cell values are tri-state-plus-counter: [`EXCLUDED`] (`-1`) for cells the
/// tour may never enter, [`UNVISITED`] (`0`) for eligible cells not yet on
/// the path, and `k >= 1` for the cell visited at move order `k`. The start
/// cell always holds `1`. All mutation goes through [`set_move_number`] and
/// [`clear_move_number`].
///
/// [`set_move_number`]: Board::set_move_number
/// [`clear_move_number`]: Board::clear_move_number
///
/// Serializable for output snapshots only; boards are always built through
/// [`Board::new`] so the validation there cannot be bypassed.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    excluded_count: usize,
    start: Position,
    cells: Vec<Vec<i32>>,
}

impl Board {
    /// Build a board, rejecting invalid geometry up front.
    ///
    /// Duplicate entries in `excluded` collapse to one exclusion.
    pub fn new(
        rows: usize,
        cols: usize,
        excluded: &[Position],
        start: Position,
    ) -> Result<Board, BoardError> {
        if rows < 3 || cols < 3 {
            return Err(BoardError::DimensionsTooSmall { rows, cols });
        }
        if start.row >= rows || start.col >= cols {
            return Err(BoardError::StartOutOfBounds(start));
        }

        let mut cells = vec![vec![UNVISITED; cols]; rows];
        let mut excluded_count = 0;
        for &pos in excluded {
            if pos.row >= rows || pos.col >= cols {
                return Err(BoardError::ExclusionOutOfBounds(pos));
            }
            if pos == start {
                return Err(BoardError::StartExcluded(start));
            }
            if cells[pos.row][pos.col] != EXCLUDED {
                cells[pos.row][pos.col] = EXCLUDED;
                excluded_count += 1;
            }
        }
        cells[start.row][start.col] = 1;

        Ok(Board {
            rows,
            cols,
            excluded_count,
            start,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Number of cells a complete tour must visit (start included).
    pub fn eligible_count(&self) -> usize {
        self.rows * self.cols - self.excluded_count
    }

    /// Raw cell value: `-1` excluded, `0` unvisited, `k >= 1` move order.
    pub fn value(&self, pos: Position) -> i32 {
        self.cells[pos.row][pos.col]
    }

    pub fn is_excluded(&self, pos: Position) -> bool {
        self.cells[pos.row][pos.col] == EXCLUDED
    }

    /// Read-only snapshot of the grid for rendering and serialization.
    pub fn move_numbers(&self) -> &[Vec<i32>] {
        &self.cells
    }

    /// True iff `(row, col)` is on the board and currently holds `lookup`.
    ///
    /// `lookup = 0` probes for unvisited eligible cells during the search;
    /// `lookup = 1` probes for adjacency back to the start cell when testing
    /// tour closure.
    pub fn is_move_valid(&self, row: i32, col: i32, lookup: i32) -> bool {
        if row < 0 || row >= self.rows as i32 || col < 0 || col >= self.cols as i32 {
            return false;
        }
        self.cells[row as usize][col as usize] == lookup
    }

    /// Knight moves from `from` whose target currently holds `lookup`,
    /// in the fixed [`KNIGHT_OFFSETS`] order.
    pub fn possible_moves(&self, from: Position, lookup: i32) -> Vec<Position> {
        let mut moves = Vec::new();
        for &(dr, dc) in KNIGHT_OFFSETS.iter() {
            let row = from.row as i32 + dr;
            let col = from.col as i32 + dc;
            if self.is_move_valid(row, col, lookup) {
                moves.push(Position::new(row as usize, col as usize));
            }
        }
        moves
    }

    /// Count the distinct 3-move continuations from `from` that never
    /// revisit `from` or either intermediate cell.
    ///
    /// This shallow lookahead is only a normalization constant for progress
    /// reporting; it plays no part in tour completion.
    pub fn lookahead_path_count(&self, from: Position) -> usize {
        let mut count = 0;
        for first in self.possible_moves(from, UNVISITED) {
            for second in self.possible_moves(first, UNVISITED) {
                if second == from || second == first {
                    continue;
                }
                count += self
                    .possible_moves(second, UNVISITED)
                    .into_iter()
                    .filter(|&third| third != from && third != first && third != second)
                    .count();
            }
        }
        count
    }

    /// Record that `pos` is visited at move order `n`.
    pub fn set_move_number(&mut self, pos: Position, n: i32) {
        debug_assert!(self.cells[pos.row][pos.col] != EXCLUDED);
        self.cells[pos.row][pos.col] = n;
    }

    /// Undo a visit, returning `pos` to the unvisited pool.
    pub fn clear_move_number(&mut self, pos: Position) {
        debug_assert!(self.cells[pos.row][pos.col] > 0);
        self.cells[pos.row][pos.col] = UNVISITED;
    }

    /// Whether the move-number grid is a magic square.
    ///
    /// Square boards only: the first row's sum is the expected sum, and every
    /// row, every column, and both full diagonals must match it. Excluded
    /// cells contribute their stored `-1`.
    pub fn is_magic(&self) -> bool {
        if self.rows != self.cols {
            return false;
        }

        let expected: i32 = self.cells[0].iter().sum();

        for row in self.cells.iter().skip(1) {
            if row.iter().sum::<i32>() != expected {
                return false;
            }
        }

        for col in 0..self.cols {
            let col_sum: i32 = self.cells.iter().map(|row| row[col]).sum();
            if col_sum != expected {
                return false;
            }
        }

        let diag: i32 = (0..self.rows).map(|i| self.cells[i][i]).sum();
        let anti_diag: i32 = (0..self.rows).map(|i| self.cells[i][self.rows - 1 - i]).sum();

        diag == expected && anti_diag == expected
    }

    /// Whether the start cell is a knight move away from `current`.
    pub fn closes_tour(&self, current: Position) -> bool {
        self.possible_moves(current, 1).contains(&self.start)
    }
}

impl std::fmt::Display for Board {
    /// Bracketed grid, each cell right-justified to the width of the maximum
    /// move index, excluded cells rendered as a fixed-width `X` filler.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.eligible_count().to_string().len();
        let filler = "X".repeat(width);

        for row in &self.cells {
            for &value in row {
                if value == EXCLUDED {
                    write!(f, "[{}]", filler)?;
                } else {
                    write!(f, "[{:>width$}]", value, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_validation() {
        let start = Position::new(0, 0);

        assert!(matches!(
            Board::new(2, 5, &[], start),
            Err(BoardError::DimensionsTooSmall { rows: 2, cols: 5 })
        ));
        assert!(matches!(
            Board::new(5, 5, &[Position::new(5, 0)], start),
            Err(BoardError::ExclusionOutOfBounds(_))
        ));
        assert!(matches!(
            Board::new(5, 5, &[], Position::new(0, 5)),
            Err(BoardError::StartOutOfBounds(_))
        ));
        assert!(matches!(
            Board::new(5, 5, &[Position::new(0, 0)], start),
            Err(BoardError::StartExcluded(_))
        ));
    }

    #[test]
    fn test_initial_state() {
        let excluded = [Position::new(1, 1), Position::new(1, 1), Position::new(2, 3)];
        let board = Board::new(4, 4, &excluded, Position::new(0, 0)).unwrap();

        // Duplicate exclusion collapses
        assert_eq!(board.eligible_count(), 14);
        assert_eq!(board.value(Position::new(0, 0)), 1);
        assert_eq!(board.value(Position::new(1, 1)), EXCLUDED);
        assert!(board.is_excluded(Position::new(2, 3)));
        assert_eq!(board.value(Position::new(3, 3)), UNVISITED);
    }

    #[test]
    fn test_move_validity_bounds() {
        let board = Board::new(3, 3, &[], Position::new(0, 0)).unwrap();

        assert!(!board.is_move_valid(-1, 0, UNVISITED));
        assert!(!board.is_move_valid(0, -2, UNVISITED));
        assert!(!board.is_move_valid(3, 0, UNVISITED));
        assert!(board.is_move_valid(1, 2, UNVISITED));
        // Start cell holds 1, not 0
        assert!(!board.is_move_valid(0, 0, UNVISITED));
        assert!(board.is_move_valid(0, 0, 1));
    }

    #[test]
    fn test_possible_moves_order() {
        // Center of a 5x5 keeps all 8 targets; order must match the offset table.
        let board = Board::new(5, 5, &[], Position::new(0, 0)).unwrap();
        let moves = board.possible_moves(Position::new(2, 2), UNVISITED);

        let expected: Vec<Position> = KNIGHT_OFFSETS
            .iter()
            .map(|&(dr, dc)| Position::new((2 + dr) as usize, (2 + dc) as usize))
            .collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_possible_moves_filters_visited_and_excluded() {
        let mut board =
            Board::new(5, 5, &[Position::new(0, 1)], Position::new(2, 2)).unwrap();
        board.set_move_number(Position::new(4, 3), 2);

        let moves = board.possible_moves(Position::new(2, 2), UNVISITED);
        assert!(!moves.contains(&Position::new(0, 1)));
        assert!(!moves.contains(&Position::new(4, 3)));
        assert_eq!(moves.len(), 6);
    }

    #[test]
    fn test_lookahead_path_count_corner_3x3() {
        // From (0,0) on 3x3: two symmetric 3-move continuations exist
        // ((2,1)->(0,2)->(1,0) and its mirror).
        let board = Board::new(3, 3, &[], Position::new(0, 0)).unwrap();
        assert_eq!(board.lookahead_path_count(Position::new(0, 0)), 2);
    }

    #[test]
    fn test_lookahead_path_count_isolated_center() {
        // The center of a 3x3 has no knight moves at all.
        let board = Board::new(3, 3, &[], Position::new(1, 1)).unwrap();
        assert_eq!(board.lookahead_path_count(Position::new(1, 1)), 0);
    }

    #[test]
    fn test_set_and_clear_move_number() {
        let mut board = Board::new(3, 3, &[], Position::new(0, 0)).unwrap();
        let pos = Position::new(2, 1);

        board.set_move_number(pos, 2);
        assert_eq!(board.value(pos), 2);
        board.clear_move_number(pos);
        assert_eq!(board.value(pos), UNVISITED);
    }

    #[test]
    fn test_is_magic_known_square() {
        // Dürer's 4x4 magic square, all lines summing to 34.
        let mut board = Board::new(4, 4, &[], Position::new(0, 0)).unwrap();
        let values = [
            [16, 3, 2, 13],
            [5, 10, 11, 8],
            [9, 6, 7, 12],
            [4, 15, 14, 1],
        ];
        for (r, row) in values.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                board.set_move_number(Position::new(r, c), v);
            }
        }
        assert!(board.is_magic());

        // Breaking one cell breaks the property.
        board.set_move_number(Position::new(3, 3), 2);
        assert!(!board.is_magic());
    }

    #[test]
    fn test_is_magic_rejects_non_square() {
        let board = Board::new(3, 4, &[], Position::new(0, 0)).unwrap();
        assert!(!board.is_magic());
    }

    #[test]
    fn test_closes_tour() {
        let board = Board::new(5, 5, &[], Position::new(0, 0)).unwrap();
        assert!(board.closes_tour(Position::new(2, 1)));
        assert!(board.closes_tour(Position::new(1, 2)));
        assert!(!board.closes_tour(Position::new(3, 3)));
        assert!(!board.closes_tour(Position::new(0, 0)));
    }

    #[test]
    fn test_display_format() {
        let board = Board::new(3, 4, &[Position::new(0, 2)], Position::new(0, 0)).unwrap();
        let rendered = board.to_string();
        let mut lines = rendered.lines();

        // 11 eligible cells, so 2-wide cells and a 2-wide X filler.
        assert_eq!(lines.next(), Some("[ 1][ 0][XX][ 0]"));
        assert_eq!(lines.next(), Some("[ 0][ 0][ 0][ 0]"));
        assert_eq!(lines.next(), Some("[ 0][ 0][ 0][ 0]"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_board_serializes_snapshot() {
        let board = Board::new(3, 3, &[Position::new(1, 1)], Position::new(0, 0)).unwrap();
        let json: serde_json::Value = serde_json::to_value(&board).unwrap();

        assert_eq!(json["rows"], 3);
        assert_eq!(json["excluded_count"], 1);
        assert_eq!(json["cells"][0][0], 1);
        assert_eq!(json["cells"][1][1], -1);
    }

    #[test]
    fn test_position_serde_roundtrip() {
        let pos = Position::new(3, 7);
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, back);
    }
}
