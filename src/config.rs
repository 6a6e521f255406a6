//! Search configuration.

use log::warn;

use crate::coord::Direction;
use crate::error::GridError;

/// Configuration for [AstarSolver](crate::solver::AstarSolver).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSearchConfig"))]
pub struct SearchConfig {
    /// Order in which the neighbours of an expanded cell are examined. Ties between equal
    /// f-scores are broken by insertion order, so this fixes the exact path returned.
    /// Always a permutation of [Direction::ALL].
    /// Default: down, up, right, left
    neighbor_order: [Direction; 4],

    /// Consult the grid's connected components before searching and answer
    /// `NotFound` straight away when start and goal are in different components.
    /// Only used when the components are up to date.
    /// Default: false
    precheck_components: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            neighbor_order: Direction::ALL,
            precheck_components: false,
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the neighbour order. Orders that do not name every
    /// direction exactly once are rejected and the current order is kept.
    pub fn with_neighbor_order(mut self, order: [Direction; 4]) -> Self {
        if Direction::is_permutation(&order) {
            self.neighbor_order = order;
        } else {
            warn!("Ignoring neighbour order {:?}: not a permutation", order);
        }
        self
    }

    /// Builder-style setter for the component precheck.
    pub fn with_precheck_components(mut self, precheck: bool) -> Self {
        self.precheck_components = precheck;
        self
    }

    pub fn neighbor_order(&self) -> &[Direction; 4] {
        &self.neighbor_order
    }

    pub fn precheck_components(&self) -> bool {
        self.precheck_components
    }

    /// Replaces an order that is not a permutation with the default one.
    pub(crate) fn sanitized(mut self) -> Self {
        if !Direction::is_permutation(&self.neighbor_order) {
            warn!(
                "Neighbour order {:?} is not a permutation, using {:?}",
                self.neighbor_order,
                Direction::ALL
            );
            self.neighbor_order = Direction::ALL;
        }
        self
    }
}

/// Unchecked form of [SearchConfig] as it appears in serialized data.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawSearchConfig {
    neighbor_order: [Direction; 4],
    precheck_components: bool,
}

#[cfg(feature = "serde")]
impl Default for RawSearchConfig {
    fn default() -> Self {
        let config = SearchConfig::default();
        Self {
            neighbor_order: config.neighbor_order,
            precheck_components: config.precheck_components,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawSearchConfig> for SearchConfig {
    type Error = GridError;

    fn try_from(raw: RawSearchConfig) -> Result<Self, GridError> {
        if !Direction::is_permutation(&raw.neighbor_order) {
            return Err(GridError::InvalidNeighborOrder(raw.neighbor_order));
        }
        Ok(SearchConfig {
            neighbor_order: raw.neighbor_order,
            precheck_components: raw.precheck_components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;
    use crate::pathing_grid::PathingGrid;
    use crate::solver::AstarSolver;

    #[test]
    fn rejects_repeated_directions() {
        let config = SearchConfig::new().with_neighbor_order([
            Direction::Up,
            Direction::Up,
            Direction::Left,
            Direction::Right,
        ]);
        assert_eq!(config.neighbor_order(), &Direction::ALL);
    }

    #[test]
    fn accepts_permutation() {
        let order = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        let config = SearchConfig::new()
            .with_neighbor_order(order)
            .with_precheck_components(true);
        assert_eq!(config.neighbor_order(), &order);
        assert!(config.precheck_components());
    }

    /// A degenerate order must not hide moves from the search.
    #[test]
    fn solver_repairs_degenerate_order() {
        let config = SearchConfig {
            neighbor_order: [Direction::Down; 4],
            ..SearchConfig::default()
        };
        let solver = AstarSolver::with_config(config);
        assert_eq!(solver.config().neighbor_order(), &Direction::ALL);

        let grid = PathingGrid::new(3).unwrap();
        let path = solver
            .find_path(&grid, Coord::new(0, 0), Coord::new(0, 1))
            .unwrap()
            .into_path();
        assert_eq!(path, Some(vec![Coord::new(0, 0), Coord::new(0, 1)]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates_order() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"neighbor_order": ["Left", "Right", "Up", "Down"]}"#)
                .unwrap();
        assert_eq!(
            config.neighbor_order(),
            &[
                Direction::Left,
                Direction::Right,
                Direction::Up,
                Direction::Down
            ]
        );
        assert!(!config.precheck_components());

        let bad = serde_json::from_str::<SearchConfig>(
            r#"{"neighbor_order": ["Down", "Down", "Down", "Down"]}"#,
        );
        assert!(bad.is_err());

        let default: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(default, SearchConfig::default());
    }
}
