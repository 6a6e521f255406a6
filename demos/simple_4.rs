use grid_astar::{AstarSolver, Coord, PathingGrid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// |# #|
// |  G|
//  ___
// where
// - # marks a barrier
// - S marks the start
// - G marks the goal
//
// Cells have a 4-neighborhood, so the only way through is the gap in the middle.

fn main() {
    let mut pathing_grid = PathingGrid::new(3).unwrap();
    pathing_grid.set_passable(Coord::new(1, 0), false).unwrap();
    pathing_grid.set_passable(Coord::new(1, 2), false).unwrap();
    pathing_grid.set_start(Coord::new(0, 0)).unwrap();
    pathing_grid.set_goal(Coord::new(2, 2)).unwrap();
    println!("{}", pathing_grid);

    let result = pathing_grid.search(&AstarSolver::new()).unwrap();
    println!("{}", pathing_grid);
    println!("Path:");
    for p in result.into_path().unwrap() {
        println!("{}", p);
    }
}
