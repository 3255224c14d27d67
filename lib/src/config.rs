//! World configuration.

use crate::{
    error::Error,
    pattern::{Pattern, Preset},
    rules::Rules,
    world::World,
};
use educe::Educe;
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The lowest speed, in generations per second.
pub const MIN_SPEED: u32 = 1;

/// The highest speed, in generations per second.
pub const MAX_SPEED: u32 = 120;

/// A random soup to put in the world.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Soup {
    /// Width.
    #[educe(Default = 16)]
    pub width: u32,

    /// Height.
    #[educe(Default = 16)]
    pub height: u32,

    /// Probability for each cell to be alive.
    #[educe(Default = 0.5)]
    pub density: f64,

    /// Seed of the random number generator.
    ///
    /// `None` means a different soup every time.
    pub seed: Option<u64>,
}

impl Soup {
    /// Sets up a soup of the given size and density.
    pub fn new(width: u32, height: u32, density: f64) -> Self {
        Soup {
            width,
            height,
            density,
            seed: None,
        }
    }

    /// Sets the seed.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// Generates the soup, centered at `(0, 0)`.
    pub fn pattern(&self) -> Result<Pattern, Error> {
        match self.seed {
            Some(seed) => Pattern::soup(
                self.width,
                self.height,
                self.density,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => Pattern::soup(self.width, self.height, self.density, &mut thread_rng()),
        }
    }
}

/// World configuration.
///
/// The world will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// The rule string of the cellular automaton.
    #[educe(Default(expression = "String::from(\"B3/S23\")"))]
    pub rule_string: String,

    /// A pattern in RLE.
    pub pattern: Option<String>,

    /// A well-known pattern.
    pub preset: Option<Preset>,

    /// Where to put the center of the soup, the preset and the pattern.
    pub origin: (i32, i32),

    /// A random soup.
    pub soup: Option<Soup>,

    /// Generations per second when running.
    ///
    /// Front-ends clamp it to [`MIN_SPEED`]`..=`[`MAX_SPEED`].
    #[educe(Default = 10)]
    pub speed: u32,
}

impl Config {
    /// Sets up a new configuration with the given rule string.
    pub fn new<S: ToString>(rule_string: S) -> Self {
        Config {
            rule_string: rule_string.to_string(),
            ..Config::default()
        }
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets the pattern, in RLE.
    pub fn set_pattern<T: Into<Option<String>>>(mut self, pattern: T) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sets the preset.
    pub fn set_preset<T: Into<Option<Preset>>>(mut self, preset: T) -> Self {
        self.preset = preset.into();
        self
    }

    /// Sets the origin.
    pub fn set_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Sets the soup.
    pub fn set_soup<T: Into<Option<Soup>>>(mut self, soup: T) -> Self {
        self.soup = soup.into();
        self
    }

    /// Sets the speed.
    pub fn set_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Parses the rule string.
    pub fn rules(&self) -> Result<Rules, Error> {
        self.rule_string.parse()
    }

    /// Time between two generations when running.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.speed.clamp(MIN_SPEED, MAX_SPEED)
    }

    /// Creates a new world from the configuration.
    ///
    /// The soup, the preset and the pattern are put in this order,
    /// all centered at the origin.
    ///
    /// Returns an error if the rule string, the pattern, the soup or the
    /// speed is invalid.
    pub fn world(&self) -> Result<World, Error> {
        if self.speed == 0 {
            return Err(Error::NonPositiveError);
        }
        let rules = self.rules()?;
        let pattern = self.pattern.as_deref().map(Pattern::from_rle).transpose()?;
        let soup = self.soup.as_ref().map(Soup::pattern).transpose()?;

        let mut world = World::with_rules(rules);
        let (ox, oy) = self.origin;
        if let Some(soup) = soup {
            world.insert_pattern_at(&soup, ox, oy);
        }
        if let Some(preset) = self.preset {
            world.insert_pattern_at(&preset.pattern(), ox, oy);
        }
        if let Some(pattern) = pattern {
            world.insert_pattern_at(&pattern, ox, oy);
        }
        Ok(world)
    }
}
