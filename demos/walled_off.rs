use grid_astar::{AstarSolver, Coord, PathingGrid, SearchConfig};
use std::ops::ControlFlow;

// Shows the progress reported while searching for a goal that is sealed off, and how the
// component precheck answers the same question without expanding a single cell.

const MAP: &str = "
    S.........
    ..........
    ...#####..
    ...#...#..
    ...#.G.#..
    ...#...#..
    ...#####..
    ..........
    ..........
    ..........
";

fn main() {
    let mut pathing_grid: PathingGrid = MAP.parse().unwrap();

    let solver = AstarSolver::new();
    let result = pathing_grid
        .search_with(&solver, |step| {
            println!(
                "step {:>3}: expand {} (g={}, f={}), {} open, {} closed",
                step.iteration,
                step.current,
                step.g,
                step.f,
                step.open_set.len(),
                step.closed_set.len()
            );
            ControlFlow::Continue(())
        })
        .unwrap();
    println!("{:?}\n{}", result, pathing_grid);

    let prechecked = AstarSolver::with_config(SearchConfig::new().with_precheck_components(true));
    let result = pathing_grid.search(&prechecked).unwrap();
    println!("With precheck: {:?}", result);

    // Open the wall and try again.
    pathing_grid.set_passable(Coord::new(4, 3), true).unwrap();
    let result = pathing_grid.search(&prechecked).unwrap();
    println!("{:?}\n{}", result, pathing_grid);
}
