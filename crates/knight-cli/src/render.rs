use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use knight_core::{Board, Position};
use std::io::{self, Write};

/// Render the board in the bracketed grid format: each cell right-justified
/// to the width of the maximum move index, excluded cells as a dimmed `X`
/// filler, the start cell highlighted.
pub fn render_board(stdout: &mut io::Stdout, board: &Board) -> io::Result<()> {
    let width = board.eligible_count().to_string().len();
    let filler = "X".repeat(width);

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            if board.is_excluded(pos) {
                queue!(
                    stdout,
                    Print("["),
                    SetForegroundColor(Color::DarkGrey),
                    Print(filler.as_str()),
                    ResetColor,
                    Print("]"),
                )?;
            } else if pos == board.start() {
                queue!(
                    stdout,
                    Print("["),
                    SetForegroundColor(Color::Green),
                    Print(format!("{:>width$}", board.value(pos))),
                    ResetColor,
                    Print("]"),
                )?;
            } else {
                queue!(stdout, Print(format!("[{:>width$}]", board.value(pos))))?;
            }
        }
        queue!(stdout, Print("\n"))?;
    }
    stdout.flush()
}
