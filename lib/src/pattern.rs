//! Patterns: lists of living cells relative to an origin.
//!
//! Patterns are read from a subset of the
//! [RLE](https://conwaylife.com/wiki/Rle) format. The first line of the
//! form `x = <width>` is the header; everything after it is the body:
//!
//! * a run of digits sets the run length of the next item (default 1);
//! * `o` is a run of living cells, `b` a run of dead cells;
//! * `$` ends a row (a run of them skips rows);
//! * `!` ends the pattern;
//! * everything else is ignored.
//!
//! A run of living cells emits at most [`MAX_RUN`] cells, which is as many
//! as there are distinct columns; the rest of the run only moves the
//! cursor.

use crate::{cells::Coord, error::Error, rules::Rules};
use rand::Rng;
use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
    ops::Deref,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximal length of a line in the RLE output.
const RLE_LINE_WIDTH: usize = 70;

/// Maximal number of cells emitted by a single `o` run, and maximal width
/// and height of a soup: the number of distinct coordinates on an axis.
pub const MAX_RUN: u32 = 1 << 16;

/// A list of living cells, as offsets from an origin.
///
/// Patterns read from RLE are centered: the center of the bounding box
/// is moved to `(0, 0)`, rounding towards negative infinity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    cells: Vec<Coord>,
}

impl Pattern {
    /// Reads a pattern from RLE.
    ///
    /// Returns [`Error::FormatError`] if there is no header line.
    pub fn from_rle(text: &str) -> Result<Self, Error> {
        let mut lines = text.lines();
        lines
            .by_ref()
            .find(|line| is_header(line))
            .ok_or(Error::FormatError)?;
        Ok(Pattern::centered(scan(lines.flat_map(str::chars))))
    }

    /// Reads the body of an RLE without a header. Never fails.
    pub(crate) fn from_body(body: &str) -> Self {
        Pattern::centered(scan(body.chars()))
    }

    /// Moves the center of the bounding box to `(0, 0)`.
    fn centered(mut cells: Vec<Coord>) -> Self {
        if let Some(((min_x, min_y), (max_x, max_y))) = bounding_box(&cells) {
            let center_x = midpoint(min_x, max_x);
            let center_y = midpoint(min_y, max_y);
            for (x, y) in cells.iter_mut() {
                *x = x.wrapping_sub(center_x);
                *y = y.wrapping_sub(center_y);
            }
        }
        Pattern { cells }
    }

    /// A random soup of size `width` × `height`, centered at `(0, 0)`.
    ///
    /// Each cell is alive with probability `density`.
    pub fn soup<R: Rng>(
        width: u32,
        height: u32,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::NonPositiveError);
        }
        if width > MAX_RUN || height > MAX_RUN {
            return Err(Error::SizeError);
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::DensityError);
        }
        let cells = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| (x, y)))
            .filter(|_| rng.gen_bool(density))
            .collect();
        Ok(Pattern::centered(cells))
    }

    /// The offsets of the living cells.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// The smallest rectangle containing all living cells,
    /// as `(top-left, bottom-right)`, both inclusive.
    ///
    /// Returns `None` for an empty pattern.
    pub fn bounding_box(&self) -> Option<(Coord, Coord)> {
        bounding_box(&self.cells)
    }

    /// Writes the pattern in RLE, with the given rule in the header.
    ///
    /// The output can be read back by [`Pattern::from_rle`].
    pub fn rle(&self, rule: &Rules) -> String {
        let ((min_x, min_y), (max_x, max_y)) = match self.bounding_box() {
            Some(bbox) => bbox,
            None => return format!("x = 0, y = 0, rule = {}\n!\n", rule),
        };
        let mut cells = self.cells.clone();
        cells.sort_unstable_by_key(|&(x, y)| (y, x));
        cells.dedup();

        // Widths of caller-built patterns may not fit in an `i32`.
        let (min_x, max_x) = (i64::from(min_x), i64::from(max_x));
        let (min_y, max_y) = (i64::from(min_y), i64::from(max_y));
        let mut tokens = Vec::new();
        let (mut cursor_x, mut cursor_y) = (min_x, min_y);
        let mut alive = 0;
        for (x, y) in cells.into_iter().map(|(x, y)| (i64::from(x), i64::from(y))) {
            if alive > 0 && y == cursor_y && x == cursor_x {
                alive += 1;
                cursor_x += 1;
                continue;
            }
            if alive > 0 {
                tokens.push(run(alive, 'o'));
            }
            if y > cursor_y {
                tokens.push(run(y - cursor_y, '$'));
                cursor_y = y;
                cursor_x = min_x;
            }
            if x > cursor_x {
                tokens.push(run(x - cursor_x, 'b'));
            }
            alive = 1;
            cursor_x = x + 1;
        }
        if alive > 0 {
            tokens.push(run(alive, 'o'));
        }
        tokens.push(String::from("!"));

        let mut str = format!(
            "x = {}, y = {}, rule = {}\n",
            max_x - min_x + 1,
            max_y - min_y + 1,
            rule
        );
        let mut line_len = 0;
        for token in tokens {
            if line_len + token.len() > RLE_LINE_WIDTH {
                str.push('\n');
                line_len = 0;
            }
            line_len += token.len();
            str.push_str(&token);
        }
        str.push('\n');
        str
    }

    /// Displays the pattern in [Plaintext](https://conwaylife.com/wiki/Plaintext)
    /// format, without the header.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o`.
    pub fn plaintext(&self) -> String {
        let ((min_x, min_y), (max_x, max_y)) = match self.bounding_box() {
            Some(bbox) => bbox,
            None => return String::new(),
        };
        let cells: HashSet<Coord> = self.cells.iter().copied().collect();
        let mut str = String::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                str.push(if cells.contains(&(x, y)) { 'o' } else { '.' });
            }
            str.push('\n');
        }
        str
    }
}

/// Whether the line is an RLE header: `x`, optional spaces, `=`,
/// optional spaces, and at least one digit.
fn is_header(line: &str) -> bool {
    line.strip_prefix('x')
        .or_else(|| line.strip_prefix('X'))
        .and_then(|rest| rest.trim_start().strip_prefix('='))
        .is_some_and(|rest| rest.trim_start().starts_with(|c: char| c.is_ascii_digit()))
}

/// Scans the body of an RLE and returns the living cells,
/// with the top-left corner at `(0, 0)`.
fn scan<I: IntoIterator<Item = char>>(body: I) -> Vec<Coord> {
    let mut cells = Vec::new();
    let (mut x, mut y) = (0_i32, 0_i32);
    let mut count: Option<i32> = None;
    for c in body {
        match c {
            '0'..='9' => {
                let digit = c as i32 - '0' as i32;
                count = Some(count.unwrap_or(0).saturating_mul(10).saturating_add(digit));
            }
            'o' => {
                let len = count.take().unwrap_or(1);
                let emitted = len.min(MAX_RUN as i32);
                cells.extend((0..emitted).map(|i| (x.saturating_add(i), y)));
                x = x.saturating_add(len);
            }
            'b' => x = x.saturating_add(count.take().unwrap_or(1)),
            '$' => {
                y = y.saturating_add(count.take().unwrap_or(1));
                x = 0;
            }
            '!' => break,
            _ => (),
        }
    }
    cells
}

fn bounding_box(cells: &[Coord]) -> Option<(Coord, Coord)> {
    let (&(x, y), rest) = cells.split_first()?;
    Some(rest.iter().fold(
        ((x, y), (x, y)),
        |((min_x, min_y), (max_x, max_y)), &(x, y)| {
            ((min_x.min(x), min_y.min(y)), (max_x.max(x), max_y.max(y)))
        },
    ))
}

/// `floor((a + b) / 2)` without overflow.
fn midpoint(a: i32, b: i32) -> i32 {
    (a as i64 + b as i64).div_euclid(2) as i32
}

fn run(n: i64, c: char) -> String {
    if n == 1 {
        c.to_string()
    } else {
        format!("{}{}", n, c)
    }
}

impl Deref for Pattern {
    type Target = [Coord];

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

impl From<Vec<Coord>> for Pattern {
    /// Keeps the offsets as they are, without centering.
    fn from(cells: Vec<Coord>) -> Self {
        Pattern { cells }
    }
}

impl FromIterator<Coord> for Pattern {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Pattern {
            cells: iter.into_iter().collect(),
        }
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::from_rle(s)
    }
}

/// Some well-known patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Preset {
    /// A 2×2 still life.
    Block,
    /// A still life of six cells.
    Beehive,
    /// A still life of seven cells.
    Loaf,
    /// A still life of five cells.
    Boat,
    /// A still life of four cells.
    Tub,
    /// The smallest oscillator, period 2.
    Blinker,
    /// A period 2 oscillator.
    Toad,
    /// A period 2 oscillator made of two blocks.
    Beacon,
    /// A period 3 oscillator.
    Pulsar,
    /// Ten cells in a row, which becomes a pentadecathlon (period 15).
    Pentadecathlon,
    /// The smallest spaceship, moving diagonally.
    Glider,
    /// Lightweight spaceship.
    Lwss,
    /// Middleweight spaceship.
    Mwss,
    /// Heavyweight spaceship.
    Hwss,
    /// A methuselah that stabilizes after 1103 generations.
    RPentomino,
    /// A methuselah that vanishes after 130 generations.
    Diehard,
    /// A methuselah that stabilizes after 5206 generations.
    Acorn,
    /// Bill Gosper's glider gun, period 30.
    GosperGliderGun,
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 18] = [
        Preset::Block,
        Preset::Beehive,
        Preset::Loaf,
        Preset::Boat,
        Preset::Tub,
        Preset::Blinker,
        Preset::Toad,
        Preset::Beacon,
        Preset::Pulsar,
        Preset::Pentadecathlon,
        Preset::Glider,
        Preset::Lwss,
        Preset::Mwss,
        Preset::Hwss,
        Preset::RPentomino,
        Preset::Diehard,
        Preset::Acorn,
        Preset::GosperGliderGun,
    ];

    /// The RLE body of the preset.
    fn body(self) -> &'static str {
        match self {
            Preset::Block => "2o$2o!",
            Preset::Beehive => "b2o$o2bo$b2o!",
            Preset::Loaf => "b2o$o2bo$bobo$2bo!",
            Preset::Boat => "2o$obo$bo!",
            Preset::Tub => "bo$obo$bo!",
            Preset::Blinker => "3o!",
            Preset::Toad => "3o$b3o!",
            Preset::Beacon => "2o$2o$2b2o$2b2o!",
            Preset::Pulsar => {
                "2b3o3b3o2$o4bobo4bo$o4bobo4bo$o4bobo4bo$2b3o3b3o2$\
                 2b3o3b3o$o4bobo4bo$o4bobo4bo$o4bobo4bo2$2b3o3b3o!"
            }
            Preset::Pentadecathlon => "10o!",
            Preset::Glider => "bo$2bo$3o!",
            Preset::Lwss => "bo2bo$o4b$o3bo$4o!",
            Preset::Mwss => "3bo2b$bo3bo$o5b$o4bo$5o!",
            Preset::Hwss => "3b2o2b$bo4bo$o6b$o5bo$6o!",
            Preset::RPentomino => "b2o$2o$bo!",
            Preset::Diehard => "6bob$2o6b$bo3b3o!",
            Preset::Acorn => "bo5b$3bo3b$2o2b3o!",
            Preset::GosperGliderGun => {
                "24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$\
                 2o8bo3bob2o4bobo$10bo5bo7bo$11bo3bo$12b2o!"
            }
        }
    }

    /// The centered pattern.
    pub fn pattern(self) -> Pattern {
        Pattern::from_body(self.body())
    }

    /// The name of the preset, in kebab-case.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Block => "block",
            Preset::Beehive => "beehive",
            Preset::Loaf => "loaf",
            Preset::Boat => "boat",
            Preset::Tub => "tub",
            Preset::Blinker => "blinker",
            Preset::Toad => "toad",
            Preset::Beacon => "beacon",
            Preset::Pulsar => "pulsar",
            Preset::Pentadecathlon => "pentadecathlon",
            Preset::Glider => "glider",
            Preset::Lwss => "lwss",
            Preset::Mwss => "mwss",
            Preset::Hwss => "hwss",
            Preset::RPentomino => "r-pentomino",
            Preset::Diehard => "diehard",
            Preset::Acorn => "acorn",
            Preset::GosperGliderGun => "gosper-glider-gun",
        }
    }

    /// The next preset, wrapping around.
    pub fn next(self) -> Self {
        let index = Preset::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Preset::ALL[(index + 1) % Preset::ALL.len()]
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| String::from("invalid Preset"))
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn single_cell() -> Result<(), Error> {
        let pattern = Pattern::from_rle("x = 3, y = 1\nbob$!")?;
        assert_eq!(pattern.cells(), &[(0, 0)]);
        Ok(())
    }

    #[test]
    fn missing_header() {
        assert_eq!(Pattern::from_rle("bob$!"), Err(Error::FormatError));
        assert_eq!(Pattern::from_rle(" x = 3\nbob!"), Err(Error::FormatError));
        assert_eq!(Pattern::from_rle("x = y\n3o!"), Err(Error::FormatError));
        assert_eq!(Pattern::from_rle(""), Err(Error::FormatError));
    }

    #[test]
    fn header_variants() -> Result<(), Error> {
        let text = "#N Blinker\n#C a comment\nX=3,y=1,rule=B3/S23\r\n3o!\r\n";
        let pattern = Pattern::from_rle(text)?;
        assert_eq!(pattern.cells(), &[(-1, 0), (0, 0), (1, 0)]);
        Ok(())
    }

    #[test]
    fn empty_pattern() -> Result<(), Error> {
        assert!(Pattern::from_rle("x = 0, y = 0\n!")?.is_empty());
        assert!(Pattern::from_rle("x = 5\n5b$3b!")?.is_empty());
        Ok(())
    }

    #[test]
    fn runs_and_rows() -> Result<(), Error> {
        // Top-left at (0, 0) before centering: (0,0) (1,0) (4,2).
        let pattern = Pattern::from_rle("x = 5, y = 3\n2o2$\n4bo!")?;
        assert_eq!(pattern.cells(), &[(-2, -1), (-1, -1), (2, 1)]);
        Ok(())
    }

    #[test]
    fn counts_across_lines() -> Result<(), Error> {
        let pattern = Pattern::from_rle("x = 12\n1\n2o!")?;
        assert_eq!(pattern.len(), 12);
        Ok(())
    }

    #[test]
    fn stops_at_bang() -> Result<(), Error> {
        let pattern = Pattern::from_rle("x = 1\no!oooo")?;
        assert_eq!(pattern.cells(), &[(0, 0)]);
        Ok(())
    }

    #[test]
    fn dangling_count() -> Result<(), Error> {
        let pattern = Pattern::from_rle("x = 2\n2o3")?;
        assert_eq!(pattern.cells(), &[(0, 0), (1, 0)]);
        Ok(())
    }

    #[test]
    fn ignores_other_characters() -> Result<(), Error> {
        let pattern = Pattern::from_rle("x = 3\nO.oB#o")?;
        assert_eq!(pattern.cells(), &[(0, 0), (1, 0)]);
        Ok(())
    }

    #[test]
    fn centering_rounds_down() -> Result<(), Error> {
        // Two cells at x = 0 and x = 3: center floor(3 / 2) = 1.
        let pattern = Pattern::from_rle("x = 4\no2bo!")?;
        assert_eq!(pattern.cells(), &[(-1, 0), (2, 0)]);
        Ok(())
    }

    #[test]
    fn rle_output() -> Result<(), Error> {
        let glider = Preset::Glider.pattern();
        let rle = glider.rle(&Rules::conway());
        assert_eq!(rle, "x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n");
        assert_eq!(Pattern::from_rle(&rle)?, glider);

        let pattern = Pattern::from(vec![(0, 0), (5, 0), (0, 3)]);
        let rle = pattern.rle(&Rules::conway());
        assert_eq!(rle, "x = 6, y = 4, rule = B3/S23\no4bo3$o!\n");
        Ok(())
    }

    #[test]
    fn rle_line_width() -> Result<(), Error> {
        let pattern: Pattern = (0..100).map(|x| (2 * x, 0)).collect();
        let rle = pattern.rle(&Rules::conway());
        assert!(rle.lines().all(|line| line.len() <= RLE_LINE_WIDTH));
        assert_eq!(Pattern::from_rle(&rle)?.len(), 100);
        Ok(())
    }

    #[test]
    fn plaintext() {
        assert_eq!(Preset::Glider.pattern().plaintext(), ".o.\n..o\nooo\n");
        assert_eq!(Pattern::default().plaintext(), "");
    }

    #[test]
    fn presets() {
        for preset in Preset::ALL.iter() {
            assert!(!preset.pattern().is_empty(), "{} is empty", preset);
            assert_eq!(preset.name().parse::<Preset>(), Ok(*preset));
        }
        assert_eq!(Preset::GosperGliderGun.pattern().len(), 36);
        assert_eq!(Preset::Pulsar.pattern().len(), 48);
        assert_eq!(Preset::Hwss.next(), Preset::RPentomino);
        assert_eq!(Preset::GosperGliderGun.next(), Preset::Block);
    }

    #[test]
    fn soup() -> Result<(), Error> {
        let mut rng = StdRng::seed_from_u64(42);
        let full = Pattern::soup(4, 3, 1.0, &mut rng)?;
        assert_eq!(full.len(), 12);
        assert_eq!(full.bounding_box(), Some(((-1, -1), (2, 1))));
        assert!(Pattern::soup(4, 3, 0.0, &mut rng)?.is_empty());
        assert_eq!(Pattern::soup(0, 3, 0.5, &mut rng), Err(Error::NonPositiveError));
        assert_eq!(Pattern::soup(3, 3, 1.5, &mut rng), Err(Error::DensityError));
        assert_eq!(Pattern::soup(3_000_000_000, 1, 0.5, &mut rng), Err(Error::SizeError));
        assert_eq!(Pattern::soup(1, MAX_RUN + 1, 0.5, &mut rng), Err(Error::SizeError));
        Ok(())
    }

    #[test]
    fn long_runs_are_bounded() -> Result<(), Error> {
        let pattern = Pattern::from_rle("x = 1\n99999999999o!")?;
        assert_eq!(pattern.len(), MAX_RUN as usize);

        // The cursor still moves by the whole run.
        let pattern = Pattern::from_rle("x = 1\n70000o3bo!")?;
        assert_eq!(pattern.len(), MAX_RUN as usize + 1);
        let ((min_x, _), (max_x, _)) = pattern.bounding_box().ok_or(Error::FormatError)?;
        assert_eq!(max_x - min_x, 70000 + 3);
        Ok(())
    }

    #[test]
    fn cursor_saturates() {
        let cells = scan("99999999999b2o!".chars());
        assert_eq!(cells, vec![(i32::MAX, 0), (i32::MAX, 0)]);
    }

    #[test]
    fn rle_of_wide_pattern() {
        let pattern = Pattern::from(vec![(i32::MIN, 0), (i32::MAX, 0)]);
        assert_eq!(
            pattern.rle(&Rules::conway()),
            "x = 4294967296, y = 1, rule = B3/S23\no4294967294bo!\n"
        );
    }
}
