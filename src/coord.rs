use core::fmt;
use std::ops::Add;

/// Position of a cell on the grid. Rows grow downwards and columns grow to the right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to `other`,
    /// which is the exact move count on an empty 4-connected grid.
    pub fn manhattan_distance(&self, other: &Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether `other` is one of the four orthogonally adjacent positions.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Steps one cell in `dir`. Returns [None] when this would leave the non-negative quadrant;
    /// the upper bound is checked by the grid.
    pub fn step(&self, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        Some(Coord {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Coord {
        Coord { row, col }
    }
}

impl Add<Direction> for Coord {
    type Output = Option<Coord>;

    fn add(self, dir: Direction) -> Option<Coord> {
        self.step(dir)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four von Neumann moves. Diagonals are never adjacent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    /// Canonical enumeration order used for neighbour queries and, by default, for search.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// Whether `order` names every direction exactly once.
    pub fn is_permutation(order: &[Direction; 4]) -> bool {
        Direction::ALL.iter().all(|d| order.contains(d))
    }

    /// `(row, col)` offset of the move.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}
