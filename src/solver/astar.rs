use std::ops::ControlFlow;

use log::{debug, info};

use crate::astar::{AstarSearch, SearchResult, SearchStep};
use crate::config::SearchConfig;
use crate::coord::Coord;
use crate::error::{GridError, RequestProblem, Result};
use crate::pathing_grid::PathingGrid;

/// A* over the 4-connected passable cells of a [PathingGrid] with unit edge costs and the
/// Manhattan distance as heuristic. The heuristic is consistent on such grids, so the first
/// path reaching the goal is a shortest one.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    config: SearchConfig,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver::default()
    }

    /// Uses `config`, falling back to the default neighbour order if the given one does not
    /// name every direction exactly once.
    pub fn with_config(config: SearchConfig) -> AstarSolver {
        AstarSolver {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Lower bound on the number of moves between `p1` and `p2`.
    pub fn heuristic(p1: &Coord, p2: &Coord) -> usize {
        p1.manhattan_distance(p2)
    }

    /// Computes a shortest path from `start` to `goal`.
    pub fn find_path(&self, grid: &PathingGrid, start: Coord, goal: Coord) -> Result<SearchResult> {
        self.find_path_with(grid, start, goal, |_| ControlFlow::Continue(()))
    }

    /// Computes a shortest path from `start` to `goal`, calling `on_step` after every
    /// expansion. Returning [ControlFlow::Break] from `on_step` stops the search with
    /// [SearchResult::Cancelled]. When `start == goal` the single-cell path is returned and
    /// `on_step` is never called.
    pub fn find_path_with<F>(
        &self,
        grid: &PathingGrid,
        start: Coord,
        goal: Coord,
        on_step: F,
    ) -> Result<SearchResult>
    where
        F: FnMut(&SearchStep<'_>) -> ControlFlow<()>,
    {
        if !grid.is_passable(start)? {
            return Err(GridError::InvalidRequest {
                coord: start,
                reason: RequestProblem::StartBlocked,
            });
        }
        if !grid.is_passable(goal)? {
            return Err(GridError::InvalidRequest {
                coord: goal,
                reason: RequestProblem::GoalBlocked,
            });
        }
        if start == goal {
            return Ok(SearchResult::Found(vec![start]));
        }
        if self.config.precheck_components() {
            if grid.components_dirty() {
                debug!("Components are dirty, skipping reachability precheck");
            } else if grid.unreachable(start, goal) {
                info!("{} is not reachable from {}", goal, start);
                return Ok(SearchResult::NotFound);
            }
        }
        Ok(AstarSearch::new().run(grid, start, goal, self.config.neighbor_order(), on_step))
    }
}
