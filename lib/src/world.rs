//! The world.

use crate::{
    cells::{in_range, CellKey, Coord},
    error::Error,
    pattern::Pattern,
    rules::Rules,
};
use log::{debug, info, warn};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

/// The world: the living cells, their ages, the rule, and some counters.
///
/// The cell set and the age map are shared with every [`Snapshot`] taken
/// from the world. A change to the world never changes a snapshot; the
/// world copies the data first if it is still shared.
#[derive(Clone, Debug, Default)]
pub struct World {
    /// The rule of the cellular automaton.
    pub(crate) rules: Rules,

    /// The living cells.
    pub(crate) cells: Arc<HashSet<CellKey>>,

    /// Number of generations each living cell has been alive.
    ///
    /// After a step, it has an entry for every living cell and nothing
    /// else. Cells added by [`insert_pattern_at`](Self::insert_pattern_at)
    /// get their age at the next step.
    pub(crate) ages: Arc<HashMap<CellKey, u32>>,

    /// Number of generations since the last [`clear`](Self::clear).
    pub(crate) generation: u64,

    /// Total number of births.
    pub(crate) births: u64,

    /// Total number of deaths.
    pub(crate) deaths: u64,

    /// Cells born in the last step.
    pub(crate) newborn: Vec<Coord>,
}

/// A read-only view of the world at some generation.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// The living cells.
    pub cells: Arc<HashSet<CellKey>>,
    /// Ages of the living cells.
    pub ages: Arc<HashMap<CellKey, u32>>,
    /// The generation.
    pub generation: u64,
}

impl World {
    /// Creates an empty world with the rule `B3/S23`.
    pub fn new() -> Self {
        World::default()
    }

    /// Creates an empty world with the given rule.
    pub fn with_rules(rules: Rules) -> Self {
        let mut world = World::default();
        world.set_rules(rules);
        world
    }

    /// Replaces the rule. It takes effect from the next step.
    pub fn set_rules(&mut self, rules: Rules) {
        if rules.has_b0() {
            warn!(
                "Rule {} contains B0; only cells next to living cells can be born",
                rules
            );
        }
        debug!("Rule set to {}", rules);
        self.rules = rules;
    }

    /// Replaces the rule with the given survival and birth counts.
    pub fn set_rules_from<S, B>(&mut self, survive: S, born: B)
    where
        S: IntoIterator<Item = u8>,
        B: IntoIterator<Item = u8>,
    {
        self.set_rules(Rules::new(survive, born));
    }

    /// Flips the state of a cell.
    ///
    /// A cell made alive gets age 1; a cell made dead loses its age.
    /// The counters are not changed.
    pub fn toggle_cell(&mut self, x: i32, y: i32) {
        let key = CellKey::new(x, y);
        let cells = Arc::make_mut(&mut self.cells);
        let ages = Arc::make_mut(&mut self.ages);
        if cells.remove(&key) {
            ages.remove(&key);
        } else {
            cells.insert(key);
            ages.insert(key, 1);
        }
        self.newborn.clear();
    }

    /// Makes every cell of the pattern alive, with the pattern's `(0, 0)`
    /// at `(ox, oy)`.
    ///
    /// Cells that are already alive stay as they are. Nothing is removed,
    /// and no age is assigned until the next step.
    ///
    /// Cells outside `-32768..=32767` on either axis wrap around.
    pub fn insert_pattern_at(&mut self, pattern: &[Coord], ox: i32, oy: i32) {
        let cells = Arc::make_mut(&mut self.cells);
        let mut aliased = 0;
        for &(dx, dy) in pattern {
            let coord = (ox.wrapping_add(dx), oy.wrapping_add(dy));
            if !in_range(coord) {
                aliased += 1;
            }
            cells.insert(CellKey::from(coord));
        }
        if aliased > 0 {
            warn!(
                "{} cells placed at ({}, {}) are out of range and wrap around",
                aliased, ox, oy
            );
        }
        self.newborn.clear();
    }

    /// Kills every cell and resets all counters.
    pub fn clear(&mut self) {
        self.cells = Arc::default();
        self.ages = Arc::default();
        self.generation = 0;
        self.births = 0;
        self.deaths = 0;
        self.newborn.clear();
    }

    /// Replaces the world with the pattern, centered at `(0, 0)`.
    ///
    /// The rule is kept.
    pub fn load_pattern(&mut self, pattern: &Pattern) {
        self.clear();
        self.insert_pattern_at(pattern, 0, 0);
        info!("Loaded a pattern of {} cells", self.population());
    }

    /// Replaces the world with a pattern read from RLE.
    ///
    /// If the text is not a valid RLE, returns [`Error::FormatError`]
    /// and leaves the world untouched.
    pub fn load_from_text(&mut self, text: &str) -> Result<(), Error> {
        let pattern = Pattern::from_rle(text)?;
        self.load_pattern(&pattern);
        Ok(())
    }

    /// The rule.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The set of living cells.
    pub fn cells(&self) -> &HashSet<CellKey> {
        &self.cells
    }

    /// Ages of the living cells.
    pub fn ages(&self) -> &HashMap<CellKey, u32> {
        &self.ages
    }

    /// Age of the cell at `(x, y)`, if it has one.
    pub fn age(&self, x: i32, y: i32) -> Option<u32> {
        self.ages.get(&CellKey::new(x, y)).copied()
    }

    /// Whether the cell at `(x, y)` is alive.
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&CellKey::new(x, y))
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// Number of generations since the last [`clear`](Self::clear).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total number of cells born since the last [`clear`](Self::clear).
    pub fn births(&self) -> u64 {
        self.births
    }

    /// Total number of cells died since the last [`clear`](Self::clear).
    pub fn deaths(&self) -> u64 {
        self.deaths
    }

    /// Cells born in the last step, sorted by row and then by column.
    ///
    /// Emptied by any other change to the world.
    pub fn newborn(&self) -> &[Coord] {
        &self.newborn
    }

    /// Coordinates of the living cells, in no particular order.
    pub fn live_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().map(|key| key.coord())
    }

    /// The smallest rectangle containing all living cells,
    /// as `(top-left, bottom-right)`.
    pub fn bounding_box(&self) -> Option<(Coord, Coord)> {
        self.pattern().bounding_box()
    }

    /// The living cells as a pattern, at their actual coordinates.
    pub fn pattern(&self) -> Pattern {
        let mut coords: Vec<Coord> = self.live_coords().collect();
        coords.sort_unstable_by_key(|&(x, y)| (y, x));
        Pattern::from(coords)
    }

    /// The living cells in RLE, with the current rule in the header.
    pub fn rle(&self) -> String {
        self.pattern().rle(&self.rules)
    }

    /// The living cells in Plaintext, cropped to the bounding box.
    pub fn plaintext(&self) -> String {
        self.pattern().plaintext()
    }

    /// A read-only view of the current generation.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: Arc::clone(&self.cells),
            ages: Arc::clone(&self.ages),
            generation: self.generation,
        }
    }
}
