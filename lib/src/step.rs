//! Advancing the world by one generation.
//!
//! Only living cells and their neighbors are examined: the neighbor counts
//! are accumulated by visiting the eight neighbors of every living cell,
//! so the work is proportional to the population, however large the
//! world is.

use crate::{
    cells::{CellKey, Coord},
    rules::RuleTable,
    world::World,
};
use log::debug;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

/// The next generation, computed from the previous one.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Generation {
    /// The living cells.
    pub(crate) cells: HashSet<CellKey>,
    /// Their ages.
    pub(crate) ages: HashMap<CellKey, u32>,
    /// Cells that were dead and are now alive.
    pub(crate) born: Vec<CellKey>,
    /// Number of cells that were alive and are now dead.
    pub(crate) deaths: u64,
}

/// Computes the next generation. The inputs are not modified.
pub(crate) fn evolve(
    cells: &HashSet<CellKey>,
    ages: &HashMap<CellKey, u32>,
    table: RuleTable,
) -> Generation {
    let mut counts: HashMap<CellKey, u8> = HashMap::with_capacity(cells.len() * 4);
    for &key in cells {
        for neighbor in key.neighbors() {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
    }

    let mut next = HashSet::with_capacity(cells.len());
    let mut born = Vec::new();
    for (&key, &count) in &counts {
        if cells.contains(&key) {
            if table.survives(count) {
                next.insert(key);
            }
        } else if table.is_born(count) {
            next.insert(key);
            born.push(key);
        }
    }

    // Living cells without living neighbors never got a count.
    if table.survives(0) {
        next.extend(cells.iter().filter(|&key| !counts.contains_key(key)));
    }

    let deaths = cells.iter().filter(|&key| !next.contains(key)).count() as u64;

    let next_ages = next
        .iter()
        .map(|&key| {
            let age = if cells.contains(&key) {
                ages.get(&key).copied().unwrap_or(0)
            } else {
                0
            };
            (key, age.saturating_add(1))
        })
        .collect();

    born.sort_unstable_by_key(|key| (key.y(), key.x()));

    Generation {
        cells: next,
        ages: next_ages,
        born,
        deaths,
    }
}

impl World {
    /// Advances the world by one generation.
    ///
    /// Returns the cells born in this generation, which are also available
    /// from [`newborn`](Self::newborn) until the next change.
    pub fn step(&mut self) -> &[Coord] {
        let next = evolve(&self.cells, &self.ages, self.rules.table());
        let births = next.born.len() as u64;

        self.cells = Arc::new(next.cells);
        self.ages = Arc::new(next.ages);
        self.generation += 1;
        self.births += births;
        self.deaths += next.deaths;
        self.newborn = next.born.into_iter().map(CellKey::coord).collect();

        debug!(
            "Generation {}: {} cells, {} born, {} died",
            self.generation,
            self.cells.len(),
            births,
            next.deaths
        );
        &self.newborn
    }

    /// Advances the world by `generations` generations.
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }
}
