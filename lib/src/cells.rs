//! Cells and their coordinates.
//!
//! The world is unbounded in principle, but every cell is stored under a
//! 32-bit [`CellKey`]: the x-coordinate in the high 16 bits and the
//! y-coordinate in the low 16 bits. So the coordinates that can be told
//! apart are those in `-32768..=32767` on each axis. Coordinates outside
//! this range are accepted but wrap around modulo `65536`; for example
//! `(32768, 0)` is the same cell as `(-32768, 0)`. Callers doing their own
//! placement arithmetic should keep this in mind.

use std::fmt::{self, Debug, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`. The y-axis points downwards, as in RLE.
pub type Coord = (i32, i32);

/// The smallest coordinate on each axis that does not alias.
pub const MIN_COORD: i32 = i16::MIN as i32;

/// The largest coordinate on each axis that does not alias.
pub const MAX_COORD: i32 = i16::MAX as i32;

/// The eight offsets of the Moore neighborhood.
pub(crate) const NBHD: [Coord; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A packed cell coordinate, used as the element of every cell set and
/// the key of every cell map in this crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct CellKey(pub i32);

impl CellKey {
    /// Encodes a coordinate.
    ///
    /// Each coordinate is truncated to 16 bits, so values outside
    /// [`MIN_COORD`]`..=`[`MAX_COORD`] wrap around.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        CellKey(((x as u32) << 16 | (y as u32 & 0xffff)) as i32)
    }

    /// Decodes the coordinate.
    #[inline]
    pub const fn coord(self) -> Coord {
        (self.0 >> 16, self.0 as i16 as i32)
    }

    /// The x-coordinate.
    #[inline]
    pub const fn x(self) -> i32 {
        self.0 >> 16
    }

    /// The y-coordinate.
    #[inline]
    pub const fn y(self) -> i32 {
        self.0 as i16 as i32
    }

    /// Keys of the eight neighbors of the cell.
    pub fn neighbors(self) -> impl Iterator<Item = CellKey> {
        let (x, y) = self.coord();
        NBHD.iter().map(move |&(dx, dy)| CellKey::new(x + dx, y + dy))
    }
}

/// Whether a coordinate can be encoded without aliasing.
#[inline]
pub fn in_range((x, y): Coord) -> bool {
    (MIN_COORD..=MAX_COORD).contains(&x) && (MIN_COORD..=MAX_COORD).contains(&y)
}

impl From<Coord> for CellKey {
    #[inline]
    fn from((x, y): Coord) -> Self {
        CellKey::new(x, y)
    }
}

impl From<CellKey> for Coord {
    #[inline]
    fn from(key: CellKey) -> Self {
        key.coord()
    }
}

impl Debug for CellKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellKey").field(&self.coord()).finish()
    }
}
