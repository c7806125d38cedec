//! Basic example of using the Knight's Tour engine

use knight_core::{Board, Position, SolverConfig, TourSolver};

fn main() {
    // An open tour on the classic 5x5 board
    println!("Searching a 5x5 board from the top-left corner...\n");
    let mut board = Board::new(5, 5, &[], Position::new(0, 0)).expect("valid board");
    let mut solver = TourSolver::new();

    if solver.run(&mut board) {
        println!("Tour found:");
        println!("{}", board);
    } else {
        println!("No tour exists from this start (unexpected on 5x5!)");
    }

    // Show some stats
    let stats = solver.stats();
    println!("Dead ends explored: {}", stats.dead_ends);
    println!("Depth-4 nodes seen: {}", stats.depth_four_nodes);

    // A closed tour has to return to its starting cell
    println!("\nSearching a 6x6 board for a closed tour...\n");
    let mut board = Board::new(6, 6, &[], Position::new(0, 0)).expect("valid board");
    let mut solver = TourSolver::with_config(SolverConfig {
        closed_tour: true,
        ..SolverConfig::default()
    });

    if solver.run(&mut board) {
        println!("Closed tour found:");
        println!("{}", board);
    }

    // Excluded cells are simply never visited
    println!("\nSearching a 3x3 ring (center excluded)...\n");
    let excluded = [Position::new(1, 1)];
    let mut board = Board::new(3, 3, &excluded, Position::new(0, 0)).expect("valid board");
    let mut solver = TourSolver::new();

    if solver.run(&mut board) {
        println!("Tour found:");
        println!("{}", board);
    }
}
