//! Error types for grid construction, editing and search requests.

use thiserror::Error;

use crate::coord::{Coord, Direction};

/// Why a request touching a specific cell was rejected.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestProblem {
    #[error("start cell is not passable")]
    StartBlocked,
    #[error("goal cell is not passable")]
    GoalBlocked,
    #[error("start and goal cells cannot become barriers")]
    BarrierOnEndpoint,
    #[error("start and goal must be different cells")]
    SharedEndpoint,
}

/// Grid error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid grid size {0}: a grid needs at least one row")]
    InvalidSize(usize),

    #[error("Coordinate {coord} is outside of the {size}x{size} grid")]
    OutOfBounds { coord: Coord, size: usize },

    #[error("Invalid request at {coord}: {reason}")]
    InvalidRequest { coord: Coord, reason: RequestProblem },

    #[error("No {0} cell has been placed on the grid")]
    MissingEndpoint(&'static str),

    #[error("Row {row} has {len} cells, expected {size}")]
    RaggedRow { row: usize, len: usize, size: usize },

    #[error("Unexpected character {ch:?} at {coord}")]
    UnexpectedCell { coord: Coord, ch: char },

    #[error("Second {role} cell at {coord}")]
    DuplicateEndpoint { coord: Coord, role: &'static str },

    #[error("Neighbour order {0:?} does not name every direction exactly once")]
    InvalidNeighborOrder([Direction; 4]),
}

pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_explain_the_problem() {
        let err = GridError::InvalidRequest {
            coord: Coord::new(1, 2),
            reason: RequestProblem::GoalBlocked,
        };
        assert_eq!(
            err.to_string(),
            "Invalid request at (1, 2): goal cell is not passable"
        );
        assert_eq!(
            RequestProblem::SharedEndpoint.to_string(),
            "start and goal must be different cells"
        );
    }
}
