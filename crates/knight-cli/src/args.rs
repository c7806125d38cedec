use clap::Parser;
use knight_core::Position;

/// A 1-based `ROW,COL` pair as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl std::str::FromStr for Cell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
        let row: usize = row
            .trim()
            .parse()
            .map_err(|_| format!("invalid row '{}'", row.trim()))?;
        let col: usize = col
            .trim()
            .parse()
            .map_err(|_| format!("invalid column '{}'", col.trim()))?;
        if row == 0 || col == 0 {
            return Err("coordinates are 1-based; rows and columns start at 1".to_string());
        }
        Ok(Cell { row, col })
    }
}

impl Cell {
    /// Convert to the core's 0-based coordinates.
    fn to_position(self) -> Position {
        Position::new(self.row - 1, self.col - 1)
    }
}

/// Search for a Knight's Tour: a sequence of knight moves visiting every
/// permitted cell of the board exactly once.
#[derive(Debug, Parser)]
#[command(name = "knight", version)]
pub struct Args {
    /// Number of board rows
    #[arg(long, value_parser = clap::value_parser!(u16).range(3..=100))]
    pub rows: u16,

    /// Number of board columns
    #[arg(long, value_parser = clap::value_parser!(u16).range(3..=100))]
    pub cols: u16,

    /// Starting cell, 1-based ROW,COL
    #[arg(long)]
    pub start: Cell,

    /// Excluded cell, 1-based ROW,COL (repeatable)
    #[arg(long = "exclude", value_name = "CELL")]
    pub excluded: Vec<Cell>,

    /// Require a closed tour (final cell a knight move from the start)
    #[arg(long)]
    pub closed: bool,

    /// Require a magic tour (move numbers form a magic square; square boards only)
    #[arg(long)]
    pub magic: bool,

    /// Emit the result as JSON instead of a rendered board
    #[arg(long)]
    pub json: bool,

    /// Suppress progress reports during long searches
    #[arg(long)]
    pub quiet: bool,
}

/// Validated, 0-based board parameters ready for the core.
#[derive(Debug)]
pub struct BoardSetup {
    pub rows: usize,
    pub cols: usize,
    pub excluded: Vec<Position>,
    pub start: Position,
}

impl Args {
    /// Check cell coordinates against the board geometry and convert
    /// everything to the core's 0-based convention.
    pub fn board_setup(&self) -> Result<BoardSetup, String> {
        let rows = self.rows as usize;
        let cols = self.cols as usize;

        let in_range =
            |cell: &Cell| cell.row >= 1 && cell.row <= rows && cell.col >= 1 && cell.col <= cols;

        for cell in &self.excluded {
            if !in_range(cell) {
                return Err(format!(
                    "excluded cell {},{} is outside the {}x{} board",
                    cell.row, cell.col, rows, cols
                ));
            }
        }
        if !in_range(&self.start) {
            return Err(format!(
                "starting position {},{} is outside the {}x{} board",
                self.start.row, self.start.col, rows, cols
            ));
        }
        if self.excluded.contains(&self.start) {
            return Err(format!(
                "starting position {},{} overlaps an excluded cell",
                self.start.row, self.start.col
            ));
        }
        if self.magic && rows != cols {
            return Err(format!(
                "a magic tour needs a square board, got {}x{}",
                rows, cols
            ));
        }

        Ok(BoardSetup {
            rows,
            cols,
            excluded: self.excluded.iter().map(|c| c.to_position()).collect(),
            start: self.start.to_position(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_cell_parsing() {
        assert_eq!("3,4".parse::<Cell>().unwrap(), Cell { row: 3, col: 4 });
        assert_eq!(" 3 , 4 ".parse::<Cell>().unwrap(), Cell { row: 3, col: 4 });
        assert!("3".parse::<Cell>().is_err());
        assert!("a,4".parse::<Cell>().is_err());
        assert!("0,4".parse::<Cell>().is_err());
    }

    #[test]
    fn test_basic_invocation() {
        let args = parse(&[
            "knight", "--rows", "5", "--cols", "5", "--start", "1,1",
        ]);
        let setup = args.board_setup().unwrap();

        assert_eq!(setup.rows, 5);
        assert_eq!(setup.cols, 5);
        assert_eq!(setup.start, Position::new(0, 0));
        assert!(setup.excluded.is_empty());
        assert!(!args.closed && !args.magic);
    }

    #[test]
    fn test_excludes_convert_to_zero_based() {
        let args = parse(&[
            "knight", "--rows", "4", "--cols", "4", "--start", "1,1",
            "--exclude", "2,2", "--exclude", "3,4",
        ]);
        let setup = args.board_setup().unwrap();

        assert_eq!(setup.excluded, vec![Position::new(1, 1), Position::new(2, 3)]);
    }

    #[test]
    fn test_dimension_range_enforced() {
        assert!(Args::try_parse_from([
            "knight", "--rows", "2", "--cols", "5", "--start", "1,1",
        ])
        .is_err());
        assert!(Args::try_parse_from([
            "knight", "--rows", "5", "--cols", "101", "--start", "1,1",
        ])
        .is_err());
    }

    #[test]
    fn test_setup_rejections() {
        let args = parse(&[
            "knight", "--rows", "4", "--cols", "4", "--start", "5,1",
        ]);
        assert!(args.board_setup().is_err());

        let args = parse(&[
            "knight", "--rows", "4", "--cols", "4", "--start", "1,1",
            "--exclude", "1,5",
        ]);
        assert!(args.board_setup().is_err());

        let args = parse(&[
            "knight", "--rows", "4", "--cols", "4", "--start", "2,2",
            "--exclude", "2,2",
        ]);
        assert!(args.board_setup().is_err());

        let args = parse(&[
            "knight", "--rows", "3", "--cols", "4", "--start", "1,1", "--magic",
        ]);
        assert!(args.board_setup().is_err());
    }
}
