use crate::coord::Coord;

pub mod astar;

pub use astar::AstarSolver;

/// Number of moves along `path`, or [None] if two consecutive cells are not orthogonally
/// adjacent.
pub fn path_cost(path: &[Coord]) -> Option<usize> {
    path.windows(2)
        .map(|w| w[0].is_adjacent(&w[1]).then_some(crate::astar::EDGE_COST))
        .sum()
}
