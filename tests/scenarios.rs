use grid_astar::{
    AstarSolver, CellState, Coord, GridError, PathingGrid, SearchConfig, SearchResult,
};
use std::ops::ControlFlow;

fn c(row: usize, col: usize) -> Coord {
    Coord::new(row, col)
}

#[test]
fn open_five_by_five() {
    let grid = PathingGrid::new(5).unwrap();
    let path = AstarSolver::new()
        .find_path(&grid, c(0, 0), c(4, 4))
        .unwrap()
        .into_path()
        .unwrap();
    assert_eq!(path.len(), 9);
    assert_eq!(path[0], c(0, 0));
    assert_eq!(path[8], c(4, 4));
    for pair in path.windows(2) {
        assert!(pair[0].is_adjacent(&pair[1]));
    }
}

#[test]
fn middle_row_gap() {
    let mut grid = PathingGrid::new(3).unwrap();
    grid.set_passable(c(1, 0), false).unwrap();
    grid.set_passable(c(1, 2), false).unwrap();
    let path = AstarSolver::new()
        .find_path(&grid, c(0, 0), c(2, 0))
        .unwrap()
        .into_path()
        .unwrap();
    assert_eq!(path, vec![c(0, 0), c(0, 1), c(1, 1), c(2, 1), c(2, 0)]);
}

#[test]
fn barrier_ring() {
    let grid: PathingGrid = "
        .......
        .#####.
        .#...#.
        .#.G.#.
        .#...#.
        .#####.
        S......
    "
    .parse()
    .unwrap();
    let result = AstarSolver::new()
        .find_path(&grid, grid.start().unwrap(), grid.goal().unwrap())
        .unwrap();
    assert_eq!(result, SearchResult::NotFound);
}

#[test]
fn trivial_request_skips_search() {
    let grid = PathingGrid::new(4).unwrap();
    let mut calls = 0;
    let result = AstarSolver::new()
        .find_path_with(&grid, c(2, 2), c(2, 2), |_| {
            calls += 1;
            ControlFlow::Continue(())
        })
        .unwrap();
    assert_eq!(result, SearchResult::Found(vec![c(2, 2)]));
    assert_eq!(calls, 0);
}

#[test]
fn final_step_reports_path() {
    let grid = PathingGrid::new(4).unwrap();
    let mut reported = None;
    let result = AstarSolver::new()
        .find_path_with(&grid, c(0, 0), c(3, 0), |step| {
            if let Some(path) = step.path {
                reported = Some(path.to_vec());
            }
            ControlFlow::Continue(())
        })
        .unwrap();
    assert_eq!(result.path(), reported.as_deref());
    assert_eq!(
        reported,
        Some(vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0)])
    );
}

#[test]
fn start_is_never_closed() {
    let grid = PathingGrid::new(6).unwrap();
    let start = c(3, 3);
    AstarSolver::new()
        .find_path_with(&grid, start, c(0, 5), |step| {
            assert!(!step.closed_set.contains(&start));
            if step.current == start {
                assert_eq!(step.closed, None);
                assert_eq!(step.g, 0);
            }
            ControlFlow::Continue(())
        })
        .unwrap();
}

#[test]
fn search_annotates_grid() {
    let mut grid: PathingGrid = "
        S....
        .###.
        ...#.
        .#.#.
        .#..G
    "
    .parse()
    .unwrap();
    let solver = AstarSolver::new();
    let result = grid.search(&solver).unwrap();
    let path = result.into_path().unwrap();
    assert_eq!(path.len(), 9);

    assert_eq!(grid.state(c(0, 0)).unwrap(), CellState::Start);
    assert_eq!(grid.state(c(4, 4)).unwrap(), CellState::Goal);
    for &p in &path[1..path.len() - 1] {
        assert_eq!(grid.state(p).unwrap(), CellState::OnPath);
    }
    assert_eq!(grid.state(c(1, 1)).unwrap(), CellState::Barrier);

    // Progress of the previous run is dropped before the next one.
    grid.set_goal(c(2, 0)).unwrap();
    grid.search(&solver).unwrap();
    assert_eq!(grid.state(c(4, 4)).unwrap(), CellState::Default);
    assert_eq!(grid.state(c(2, 0)).unwrap(), CellState::Goal);
    assert_eq!(grid.state(c(1, 0)).unwrap(), CellState::OnPath);
}

#[test]
fn cancelled_search_leaves_no_progress() {
    let mut grid = PathingGrid::new(8).unwrap();
    grid.set_start(c(0, 0)).unwrap();
    grid.set_goal(c(7, 7)).unwrap();
    let result = grid
        .search_with(&AstarSolver::new(), |step| {
            if step.iteration >= 5 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
    assert_eq!(result, SearchResult::Cancelled);
    assert!(grid.iter().all(|(_, state)| !state.is_progress()));
}

#[test]
fn search_needs_endpoints() {
    let mut grid = PathingGrid::new(3).unwrap();
    assert_eq!(
        grid.search(&AstarSolver::new()),
        Err(GridError::MissingEndpoint("start"))
    );
    grid.set_start(c(0, 0)).unwrap();
    assert_eq!(
        grid.search(&AstarSolver::new()),
        Err(GridError::MissingEndpoint("goal"))
    );
}

#[test]
fn search_refreshes_components() {
    let mut grid: PathingGrid = "
        S.#..
        ..#..
        ..#..
        ..#..
        ..#.G
    "
    .parse()
    .unwrap();
    let solver = AstarSolver::with_config(SearchConfig::new().with_precheck_components(true));
    assert_eq!(grid.search(&solver).unwrap(), SearchResult::NotFound);

    grid.set_passable(c(2, 2), true).unwrap();
    assert!(grid.search(&solver).unwrap().is_found());

    grid.set_passable(c(2, 2), false).unwrap();
    assert!(grid.components_dirty());
    assert_eq!(grid.search(&solver).unwrap(), SearchResult::NotFound);
    assert!(!grid.components_dirty());
}
