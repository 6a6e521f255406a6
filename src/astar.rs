//! This module implements the A* loop itself. It follows the shape of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! but orders the frontier by `(f, insertion sequence)` so that equal estimates are expanded
//! first-in first-out, and reports every expansion to an observer.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, info, warn};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::ControlFlow;

use crate::coord::{Coord, Direction};
use crate::pathing_grid::PathingGrid;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Every move between adjacent cells costs the same.
pub const EDGE_COST: usize = 1;

/// Outcome of a single search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// Shortest path from start to goal, both included.
    Found(Vec<Coord>),
    /// The frontier ran dry before the goal was reached.
    NotFound,
    /// The observer asked the search to stop.
    Cancelled,
}

impl SearchResult {
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            SearchResult::Found(path) => Some(path),
            _ => None,
        }
    }
    pub fn into_path(self) -> Option<Vec<Coord>> {
        match self {
            SearchResult::Found(path) => Some(path),
            _ => None,
        }
    }
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

/// Snapshot handed to the observer after each expansion, and once more with
/// [path](SearchStep::path) set when the goal has been reached.
#[derive(Clone, Copy, Debug)]
pub struct SearchStep<'a> {
    /// Number of cells expanded so far, counting `current`.
    pub iteration: usize,
    pub current: Coord,
    /// g-score of `current` when it was expanded.
    pub g: usize,
    /// f-score of `current` when it was expanded.
    pub f: usize,
    /// Cells that entered the frontier during this expansion.
    pub opened: &'a [Coord],
    /// `current`, unless it is the start.
    pub closed: Option<Coord>,
    pub open_set: &'a FxHashSet<Coord>,
    pub closed_set: &'a FxHashSet<Coord>,
    pub path: Option<&'a [Coord]>,
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    g: usize,
    f: usize,
    parent: usize,
}

struct FrontierEntry {
    estimated_cost: usize,
    sequence: u64,
    index: usize,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.sequence == other.sequence
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: smallest estimate first, then oldest entry first
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

fn reverse_path(nodes: &FxIndexMap<Coord, SearchNode>, end: usize) -> Vec<Coord> {
    let mut path: Vec<Coord> = itertools::unfold(end, |i| {
        nodes.get_index(*i).map(|(&coord, node)| {
            *i = node.parent;
            coord
        })
    })
    .collect();
    path.reverse();
    path
}

/// Working state of one A* run. Created per search and dropped when it returns.
pub(crate) struct AstarSearch {
    nodes: FxIndexMap<Coord, SearchNode>,
    frontier: BinaryHeap<FrontierEntry>,
    open: FxHashSet<Coord>,
    closed: FxHashSet<Coord>,
    sequence: u64,
}

impl AstarSearch {
    pub(crate) fn new() -> AstarSearch {
        AstarSearch {
            nodes: FxIndexMap::default(),
            frontier: BinaryHeap::new(),
            open: FxHashSet::default(),
            closed: FxHashSet::default(),
            sequence: 0,
        }
    }

    fn push(&mut self, estimated_cost: usize, index: usize) {
        self.frontier.push(FrontierEntry {
            estimated_cost,
            sequence: self.sequence,
            index,
        });
        self.sequence += 1;
    }

    /// Searches from `start` to `goal`, which must be distinct, in-bounds and passable.
    pub(crate) fn run<F>(
        mut self,
        grid: &PathingGrid,
        start: Coord,
        goal: Coord,
        order: &[Direction; 4],
        mut on_step: F,
    ) -> SearchResult
    where
        F: FnMut(&SearchStep<'_>) -> ControlFlow<()>,
    {
        let h = start.manhattan_distance(&goal);
        self.nodes.insert(
            start,
            SearchNode {
                g: 0,
                f: h,
                parent: usize::MAX,
            },
        );
        self.push(h, 0);
        self.open.insert(start);

        let mut iteration = 0;
        while let Some(FrontierEntry {
            estimated_cost,
            index,
            ..
        }) = self.frontier.pop()
        {
            let Some((&current, &node)) = self.nodes.get_index(index) else {
                warn!("Frontier entry {} has no search node", index);
                continue;
            };
            // A cell is pushed again whenever its score improves. Older entries carry a larger
            // estimate or belong to a cell that has already left the frontier.
            if estimated_cost > node.f || !self.open.remove(&current) {
                continue;
            }
            iteration += 1;

            if current == goal {
                let path = reverse_path(&self.nodes, index);
                info!(
                    "Found path of {} moves from {} to {} after {} expansions",
                    node.g, start, goal, iteration
                );
                let _ = on_step(&SearchStep {
                    iteration,
                    current,
                    g: node.g,
                    f: node.f,
                    opened: &[],
                    closed: None,
                    open_set: &self.open,
                    closed_set: &self.closed,
                    path: Some(&path),
                });
                return SearchResult::Found(path);
            }

            let mut opened: SmallVec<[Coord; 4]> = SmallVec::new();
            let tentative_g = node.g + EDGE_COST;
            for neighbor in grid.neighbors_ordered(current, order) {
                let f = tentative_g + neighbor.manhattan_distance(&goal);
                let record = SearchNode {
                    g: tentative_g,
                    f,
                    parent: index,
                };
                let n = match self.nodes.entry(neighbor) {
                    Vacant(e) => {
                        let n = e.index();
                        e.insert(record);
                        n
                    }
                    Occupied(mut e) => {
                        if tentative_g < e.get().g {
                            e.insert(record);
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };
                self.push(f, n);
                if self.open.insert(neighbor) {
                    self.closed.remove(&neighbor);
                    opened.push(neighbor);
                }
            }

            let closed = if current != start {
                self.closed.insert(current);
                Some(current)
            } else {
                None
            };

            let step = SearchStep {
                iteration,
                current,
                g: node.g,
                f: node.f,
                opened: &opened,
                closed,
                open_set: &self.open,
                closed_set: &self.closed,
                path: None,
            };
            if on_step(&step).is_break() {
                info!(
                    "Search from {} to {} cancelled after {} expansions",
                    start, goal, iteration
                );
                return SearchResult::Cancelled;
            }
        }
        debug!(
            "Frontier exhausted after {} expansions: {} is not reachable from {}",
            iteration, goal, start
        );
        SearchResult::NotFound
    }
}
