//! # grid_astar
//!
//! Shortest paths on a square grid with impassable cells using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Moves are restricted to the four
//! orthogonal neighbours at unit cost and the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) serves as heuristic,
//! which makes the returned paths optimal.
//!
//! Searches are deterministic: the frontier is ordered by f-score and then by insertion
//! order, and neighbours are examined in a fixed order (down, up, right, left unless
//! configured otherwise). Progress can be observed, and the search cancelled, through a
//! per-expansion callback.
//!
//! ```
//! use grid_astar::{AstarSolver, Coord, PathingGrid, SearchResult};
//!
//! let mut grid = PathingGrid::new(3).unwrap();
//! grid.set_passable(Coord::new(1, 0), false).unwrap();
//! grid.set_passable(Coord::new(1, 2), false).unwrap();
//! let result = AstarSolver::new()
//!     .find_path(&grid, Coord::new(0, 0), Coord::new(2, 2))
//!     .unwrap();
//! assert!(matches!(result, SearchResult::Found(ref p) if p.contains(&Coord::new(1, 1))));
//! ```
mod astar;
pub mod config;
pub mod coord;
pub mod error;
pub mod pathing_grid;
pub mod solver;

pub use astar::{SearchResult, SearchStep, EDGE_COST};
pub use config::SearchConfig;
pub use coord::{Coord, Direction};
pub use error::{GridError, RequestProblem, Result};
pub use pathing_grid::{CellState, PathingGrid};
pub use solver::{path_cost, AstarSolver};
