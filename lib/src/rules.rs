//! Totalistic Life-like rules.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

use crate::error::Error;
use ca_rules::ParseLife;
use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Life-like rule: the neighbor counts at which a living cell survives,
/// and those at which a dead cell becomes alive.
///
/// Counts outside `0..=8` are kept, but a cell never has more than eight
/// living neighbors, so they never fire.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rules {
    survive: BTreeSet<u8>,
    born: BTreeSet<u8>,
}

impl Rules {
    /// Constructs a new rule from the survival and birth counts.
    pub fn new<S, B>(survive: S, born: B) -> Self
    where
        S: IntoIterator<Item = u8>,
        B: IntoIterator<Item = u8>,
    {
        Rules {
            survive: survive.into_iter().collect(),
            born: born.into_iter().collect(),
        }
    }

    /// Conway's Game of Life, `B3/S23`.
    pub fn conway() -> Self {
        Rules::new([2, 3], [3])
    }

    /// HighLife, `B36/S23`.
    pub fn highlife() -> Self {
        Rules::new([2, 3], [3, 6])
    }

    /// Day & Night, `B3678/S34678`.
    pub fn day_and_night() -> Self {
        Rules::new([3, 4, 6, 7, 8], [3, 6, 7, 8])
    }

    /// Seeds, `B2/S`.
    pub fn seeds() -> Self {
        Rules::new([], [2])
    }

    /// Life without Death, `B3/S012345678`.
    pub fn life_without_death() -> Self {
        Rules::new(0..=8, [3])
    }

    /// Maze, `B3/S12345`.
    pub fn maze() -> Self {
        Rules::new(1..=5, [3])
    }

    /// Replicator, `B1357/S1357`.
    pub fn replicator() -> Self {
        Rules::new([1, 3, 5, 7], [1, 3, 5, 7])
    }

    /// 2x2, `B36/S125`.
    pub fn two_by_two() -> Self {
        Rules::new([1, 2, 5], [3, 6])
    }

    /// The named presets, in the order a front-end should cycle them.
    pub const PRESETS: [(&'static str, fn() -> Rules); 8] = [
        ("Conway", Rules::conway),
        ("HighLife", Rules::highlife),
        ("Day & Night", Rules::day_and_night),
        ("Seeds", Rules::seeds),
        ("Life without Death", Rules::life_without_death),
        ("Maze", Rules::maze),
        ("Replicator", Rules::replicator),
        ("2x2", Rules::two_by_two),
    ];

    /// Neighbor counts at which a living cell stays alive.
    pub fn survive(&self) -> &BTreeSet<u8> {
        &self.survive
    }

    /// Neighbor counts at which a dead cell becomes alive.
    pub fn born(&self) -> &BTreeSet<u8> {
        &self.born
    }

    /// Whether the rule contains `B0`.
    ///
    /// Only dead cells next to a living cell are ever examined, so `B0`
    /// never fills the empty background.
    pub fn has_b0(&self) -> bool {
        self.born.contains(&0)
    }

    /// Lookup tables for a single generation.
    pub(crate) fn table(&self) -> RuleTable {
        let mut table = RuleTable::default();
        for &n in self.survive.iter().filter(|&&n| n <= 8) {
            table.survive[n as usize] = true;
        }
        for &n in self.born.iter().filter(|&&n| n <= 8) {
            table.born[n as usize] = true;
        }
        table
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::conway()
    }
}

/// A parser for the rule.
impl ParseLife for Rules {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Rules::new(s, b)
    }
}

impl FromStr for Rules {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: Rules = ParseLife::parse_rule(input)?;
        Ok(rule)
    }
}

/// Displays the rule in `B/S` notation, e.g. `B3/S23`.
impl Display for Rules {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in &self.born {
            write!(f, "{}", n)?;
        }
        f.write_str("/S")?;
        for n in &self.survive {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

/// The rule as two arrays indexed by neighbor count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RuleTable {
    survive: [bool; 9],
    born: [bool; 9],
}

impl RuleTable {
    /// Whether a living cell with `count` living neighbors stays alive.
    #[inline]
    pub(crate) fn survives(&self, count: u8) -> bool {
        self.survive.get(count as usize).copied().unwrap_or(false)
    }

    /// Whether a dead cell with `count` living neighbors becomes alive.
    #[inline]
    pub(crate) fn is_born(&self, count: u8) -> bool {
        self.born.get(count as usize).copied().unwrap_or(false)
    }
}
