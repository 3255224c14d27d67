//! __Rlifesim__ simulates Life-like cellular automata on an unbounded grid.
//!
//! Only the living cells are stored, so a pattern can grow in any
//! direction. Each generation examines the living cells and their
//! neighbors, and nothing else.
//!
//! ```rust
//! use rlifesim_lib::{Preset, World};
//!
//! let mut world = World::new();
//! world.insert_pattern_at(&Preset::Blinker.pattern(), 0, 0);
//! world.step();
//! assert!(world.is_alive(0, -1) && world.is_alive(0, 1));
//! assert_eq!(world.generation(), 1);
//! ```

mod cells;
mod config;
mod error;
mod pattern;
mod rules;
#[cfg(feature = "serde")]
mod save;
mod step;
mod world;

pub use cells::{in_range, CellKey, Coord, MAX_COORD, MIN_COORD};
pub use config::{Config, Soup, MAX_SPEED, MIN_SPEED};
pub use error::Error;
pub use pattern::{Pattern, Preset, MAX_RUN};
pub use rules::Rules;
#[cfg(feature = "serde")]
pub use save::WorldSer;
pub use world::{Snapshot, World};
