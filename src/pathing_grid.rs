use core::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::astar::{SearchResult, SearchStep};
use crate::coord::{Coord, Direction};
use crate::error::{GridError, RequestProblem, Result};
use crate::solver::AstarSolver;

/// What a cell currently represents. [Start](CellState::Start), [Goal](CellState::Goal) and
/// [Barrier](CellState::Barrier) are roles placed by the user and survive searches, while
/// [Open](CellState::Open), [Closed](CellState::Closed) and [OnPath](CellState::OnPath) only
/// report the progress of the latest search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Default,
    Start,
    Goal,
    Barrier,
    Open,
    Closed,
    OnPath,
}

impl CellState {
    pub fn is_passable(self) -> bool {
        self != CellState::Barrier
    }
    pub fn is_role(self) -> bool {
        matches!(self, CellState::Start | CellState::Goal | CellState::Barrier)
    }
    pub fn is_progress(self) -> bool {
        matches!(self, CellState::Open | CellState::Closed | CellState::OnPath)
    }
    /// Character used by the text rendering of a grid.
    pub fn symbol(self) -> char {
        match self {
            CellState::Default => '.',
            CellState::Start => 'S',
            CellState::Goal => 'G',
            CellState::Barrier => '#',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::OnPath => '*',
        }
    }
    pub fn from_symbol(ch: char) -> Option<CellState> {
        let state = match ch {
            '.' => CellState::Default,
            'S' => CellState::Start,
            'G' => CellState::Goal,
            '#' => CellState::Barrier,
            'o' => CellState::Open,
            'x' => CellState::Closed,
            '*' => CellState::OnPath,
            _ => return None,
        };
        Some(state)
    }
}

/// [PathingGrid] is a square grid of [CellState]s stored in row-major order. Adjacency is
/// derived from position on demand, so toggling a cell never touches its neighbours. In
/// addition, connected components are maintained in a [UnionFind] structure so that
/// reachability can be answered without a search.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    size: usize,
    cells: Vec<CellState>,
    start: Option<Coord>,
    goal: Option<Coord>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl PathingGrid {
    /// Builds a `size`x`size` grid of passable cells. Fails for an empty grid and for sizes
    /// whose cell count cannot be represented or allocated.
    pub fn new(size: usize) -> Result<PathingGrid> {
        let count = size
            .checked_mul(size)
            .filter(|&count| count > 0)
            .ok_or(GridError::InvalidSize(size))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(count)
            .map_err(|_| GridError::InvalidSize(size))?;
        cells.resize(count, CellState::Default);
        let mut grid = PathingGrid {
            size,
            cells,
            start: None,
            goal: None,
            components: UnionFind::new(count),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }
    fn check(&self, coord: Coord) -> Result<usize> {
        if self.contains(coord) {
            Ok(self.get_ix(coord))
        } else {
            Err(GridError::OutOfBounds {
                coord,
                size: self.size,
            })
        }
    }
    fn get_ix(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }
    fn coord_of(&self, ix: usize) -> Coord {
        Coord::new(ix / self.size, ix % self.size)
    }

    pub fn state(&self, coord: Coord) -> Result<CellState> {
        self.check(coord).map(|ix| self.cells[ix])
    }
    pub fn is_passable(&self, coord: Coord) -> Result<bool> {
        self.state(coord).map(CellState::is_passable)
    }
    pub fn start(&self) -> Option<Coord> {
        self.start
    }
    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(ix, &state)| (self.coord_of(ix), state))
    }

    /// The passable orthogonal neighbours of `coord` in the order down, up, right, left.
    pub fn neighbors(&self, coord: Coord) -> Result<SmallVec<[Coord; 4]>> {
        self.check(coord)?;
        Ok(self.neighbors_ordered(coord, &Direction::ALL))
    }

    /// Same as [neighbors](Self::neighbors) with a caller-chosen order and without the bounds
    /// check on `coord` itself.
    pub(crate) fn neighbors_ordered(
        &self,
        coord: Coord,
        order: &[Direction; 4],
    ) -> SmallVec<[Coord; 4]> {
        order
            .iter()
            .filter_map(|&dir| coord.step(dir))
            .filter(|&n| self.can_move_to(n))
            .collect()
    }
    fn can_move_to(&self, coord: Coord) -> bool {
        self.contains(coord) && self.cells[self.get_ix(coord)].is_passable()
    }

    /// Makes a cell passable or turns it into a barrier. The start and goal cells cannot be
    /// made impassable; move or reset them first.
    pub fn set_passable(&mut self, coord: Coord, passable: bool) -> Result<()> {
        let ix = self.check(coord)?;
        let state = self.cells[ix];
        if state.is_passable() == passable {
            return Ok(());
        }
        if !passable && matches!(state, CellState::Start | CellState::Goal) {
            return Err(GridError::InvalidRequest {
                coord,
                reason: RequestProblem::BarrierOnEndpoint,
            });
        }
        self.set_blocked(ix, !passable);
        Ok(())
    }

    /// Updates the blocked flag of a cell. Joins newly connected components and flags the
    /// components as dirty if they are (potentially) broken apart into multiple.
    fn set_blocked(&mut self, ix: usize, blocked: bool) {
        let was_blocked = self.cells[ix] == CellState::Barrier;
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
            self.cells[ix] = CellState::Barrier;
        } else {
            self.cells[ix] = CellState::Default;
            if was_blocked {
                let coord = self.coord_of(ix);
                for n in self.neighbors_ordered(coord, &Direction::ALL) {
                    let n_ix = self.get_ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Places the start role on `coord`, replacing any previous start. A barrier on the
    /// target cell is cleared.
    pub fn set_start(&mut self, coord: Coord) -> Result<()> {
        self.place_endpoint(coord, CellState::Start)
    }

    /// Places the goal role on `coord`, replacing any previous goal. A barrier on the
    /// target cell is cleared.
    pub fn set_goal(&mut self, coord: Coord) -> Result<()> {
        self.place_endpoint(coord, CellState::Goal)
    }

    fn place_endpoint(&mut self, coord: Coord, role: CellState) -> Result<()> {
        let ix = self.check(coord)?;
        let (slot, other) = match role {
            CellState::Start => (self.start, self.goal),
            _ => (self.goal, self.start),
        };
        if other == Some(coord) {
            return Err(GridError::InvalidRequest {
                coord,
                reason: RequestProblem::SharedEndpoint,
            });
        }
        if let Some(previous) = slot {
            let prev_ix = self.get_ix(previous);
            self.cells[prev_ix] = CellState::Default;
        }
        self.set_blocked(ix, false);
        self.cells[ix] = role;
        match role {
            CellState::Start => self.start = Some(coord),
            _ => self.goal = Some(coord),
        }
        Ok(())
    }

    /// Returns a cell to the default state, forgetting the start or goal if it held one.
    pub fn reset_cell(&mut self, coord: Coord) -> Result<()> {
        let ix = self.check(coord)?;
        if self.start == Some(coord) {
            self.start = None;
        }
        if self.goal == Some(coord) {
            self.goal = None;
        }
        self.set_blocked(ix, false);
        Ok(())
    }

    /// Clears every role and annotation on the grid.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Default);
        self.start = None;
        self.goal = None;
        self.generate_components();
    }

    /// Drops all [Open](CellState::Open), [Closed](CellState::Closed) and
    /// [OnPath](CellState::OnPath) tags left by a previous search.
    pub fn clear_progress(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_progress()) {
            *cell = CellState::Default;
        }
    }

    /// Tags a cell with search progress. Role tags are never overwritten, in which case
    /// `false` is returned.
    pub fn mark_progress(&mut self, coord: Coord, tag: CellState) -> Result<bool> {
        let ix = self.check(coord)?;
        if !tag.is_progress() || self.cells[ix].is_role() {
            return Ok(false);
        }
        self.cells[ix] = tag;
        Ok(true)
    }

    /// Retrieves the component id a given [Coord] belongs to.
    pub fn get_component(&self, coord: Coord) -> Result<usize> {
        let ix = self.check(coord)?;
        Ok(self.components.find(ix))
    }
    /// Checks if start and goal are passable and on the same component.
    pub fn reachable(&self, start: Coord, goal: Coord) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Only meaningful while the
    /// components are not dirty.
    pub fn unreachable(&self, start: Coord, goal: Coord) -> bool {
        if self.can_move_to(start) && self.can_move_to(goal) {
            let start_ix = self.get_ix(start);
            let goal_ix = self.get_ix(goal);
            if self.components.equiv(start_ix, goal_ix) {
                false
            } else {
                debug!("{} and {} are not in the same component", start, goal);
                true
            }
        } else {
            true
        }
    }
    /// Whether a barrier was placed since the components were last generated. While dirty,
    /// [reachable](Self::reachable) may report cells as connected that no longer are.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up passable neighbours into the same
    /// components.
    pub fn generate_components(&mut self) {
        let n = self.size;
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for row in 0..n {
            for col in 0..n {
                let coord = Coord::new(row, col);
                if !self.can_move_to(coord) {
                    continue;
                }
                let ix = self.get_ix(coord);
                for dir in [Direction::Down, Direction::Right] {
                    if let Some(next) = coord.step(dir).filter(|&p| self.can_move_to(p)) {
                        let next_ix = self.get_ix(next);
                        self.components.union(ix, next_ix);
                    }
                }
            }
        }
    }

    /// Runs `solver` from the placed start to the placed goal and leaves the progress of the
    /// run on the grid.
    pub fn search(&mut self, solver: &AstarSolver) -> Result<SearchResult> {
        self.search_with(solver, |_| ControlFlow::Continue(()))
    }

    /// Like [search](Self::search), forwarding every step to `on_step`. A cancelled search
    /// leaves no progress tags behind.
    pub fn search_with<F>(&mut self, solver: &AstarSolver, mut on_step: F) -> Result<SearchResult>
    where
        F: FnMut(&SearchStep<'_>) -> ControlFlow<()>,
    {
        let start = self.start.ok_or(GridError::MissingEndpoint("start"))?;
        let goal = self.goal.ok_or(GridError::MissingEndpoint("goal"))?;
        self.update();
        self.clear_progress();

        let mut marks: Vec<(Coord, CellState)> = Vec::new();
        let result = solver.find_path_with(self, start, goal, |step| {
            marks.extend(step.opened.iter().map(|&c| (c, CellState::Open)));
            if let Some(closed) = step.closed {
                marks.push((closed, CellState::Closed));
            }
            on_step(step)
        })?;

        match &result {
            SearchResult::Cancelled => return Ok(result),
            SearchResult::Found(path) => {
                marks.extend(path.iter().map(|&c| (c, CellState::OnPath)));
            }
            SearchResult::NotFound => {}
        }
        for (coord, tag) in marks {
            self.mark_progress(coord, tag)?;
        }
        Ok(result)
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line = row.iter().map(|c| c.symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the text rendering produced by [Display](fmt::Display). Blank lines and
/// surrounding whitespace are ignored. At most one start and one goal may appear.
impl FromStr for PathingGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<PathingGrid> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<&str>>();
        let mut grid = PathingGrid::new(rows.len())?;
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != grid.size {
                return Err(GridError::RaggedRow {
                    row,
                    len,
                    size: grid.size,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let coord = Coord::new(row, col);
                let state =
                    CellState::from_symbol(ch).ok_or(GridError::UnexpectedCell { coord, ch })?;
                match state {
                    CellState::Start if grid.start.is_some() => {
                        return Err(GridError::DuplicateEndpoint {
                            coord,
                            role: "start",
                        });
                    }
                    CellState::Goal if grid.goal.is_some() => {
                        return Err(GridError::DuplicateEndpoint {
                            coord,
                            role: "goal",
                        });
                    }
                    CellState::Start => grid.set_start(coord)?,
                    CellState::Goal => grid.set_goal(coord)?,
                    CellState::Barrier => grid.set_passable(coord, false)?,
                    CellState::Default => {}
                    progress => {
                        grid.mark_progress(coord, progress)?;
                    }
                }
            }
        }
        grid.update();
        Ok(grid)
    }
}
