//! Saves the world.
//!
//! Only the current generation is saved.

use crate::{cells::CellKey, rules::Rules, world::World};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

/// A representation of a living cell which can be easily serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct CellSer {
    x: i32,
    y: i32,

    /// `None` for cells inserted after the last step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    age: Option<u32>,
}

/// A representation of the world which can be easily serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSer {
    /// The rule.
    rules: Rules,

    /// Number of generations since the last clear.
    generation: u64,

    /// Total number of births.
    births: u64,

    /// Total number of deaths.
    deaths: u64,

    /// The living cells, sorted by row and then by column.
    cells: Vec<CellSer>,
}

impl WorldSer {
    /// Restores the world from the `WorldSer`.
    pub fn world(&self) -> World {
        let mut cells = HashSet::with_capacity(self.cells.len());
        let mut ages = HashMap::with_capacity(self.cells.len());
        for cell in &self.cells {
            let key = CellKey::new(cell.x, cell.y);
            cells.insert(key);
            if let Some(age) = cell.age {
                ages.insert(key, age);
            }
        }
        World {
            rules: self.rules.clone(),
            cells: Arc::new(cells),
            ages: Arc::new(ages),
            generation: self.generation,
            births: self.births,
            deaths: self.deaths,
            newborn: Vec::new(),
        }
    }
}

impl World {
    /// Saves the world as a `WorldSer`.
    pub fn ser(&self) -> WorldSer {
        let mut cells: Vec<CellSer> = self
            .cells
            .iter()
            .map(|key| {
                let (x, y) = key.coord();
                CellSer {
                    x,
                    y,
                    age: self.ages.get(key).copied(),
                }
            })
            .collect();
        cells.sort_unstable_by_key(|cell| (cell.y, cell.x));
        WorldSer {
            rules: self.rules.clone(),
            generation: self.generation,
            births: self.births,
            deaths: self.deaths,
            cells,
        }
    }
}
