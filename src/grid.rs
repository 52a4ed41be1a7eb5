//! Composes the full `HH:MM:SS.mmm` disc grid from a timestamp.

use time::OffsetDateTime;

use crate::bitmap::{Bitmap, DimensionMismatch};
use crate::glyph::UnsupportedCharacter;
use crate::konst;
use crate::patterns::{PatternSet, SizeClass};

/// Size class of each of the twelve template slots, left to right: `HH:MM:SS`
/// in wide cells, then `.mmm` in narrow ones.
const TEMPLATE: [SizeClass; 12] = [
    SizeClass::Time,
    SizeClass::Time,
    SizeClass::Time,
    SizeClass::Time,
    SizeClass::Time,
    SizeClass::Time,
    SizeClass::Time,
    SizeClass::Time,
    SizeClass::Ms,
    SizeClass::Ms,
    SizeClass::Ms,
    SizeClass::Ms,
];

/// One rendered frame: the disc states plus the text they spell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFrame {
    pub grid: Bitmap,
    pub display: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error(transparent)]
    UnsupportedCharacter(#[from] UnsupportedCharacter),

    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),
}

/// Turns timestamps into [`ClockFrame`]s using pre-rasterized glyphs.
pub struct GridBuilder {
    time: PatternSet,
    ms: PatternSet,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self {
            time: PatternSet::new(SizeClass::Time),
            ms: PatternSet::new(SizeClass::Ms),
        }
    }

    /// Renders `timestamp` down to the millisecond. The result is always
    /// [`konst::GRID_COLS`] x [`konst::GRID_ROWS`]: the display text is
    /// zero-padded, so every slot gets a glyph of its class width.
    pub fn build(&self, timestamp: OffsetDateTime) -> Result<ClockFrame, GridError> {
        let display = format!(
            "{:02}:{:02}:{:02}.{:03}",
            timestamp.hour(),
            timestamp.minute(),
            timestamp.second(),
            timestamp.millisecond(),
        );

        let mut grid = Bitmap::blank(1, konst::GRID_ROWS);
        for (character, class) in display.chars().zip(TEMPLATE) {
            let cell = match class {
                SizeClass::Time => self.time.get(character)?,
                SizeClass::Ms => self.ms.get(character)?,
            };
            grid = grid.concat_columns(cell)?;
        }

        let grid = grid.without_first_column().bordered();

        Ok(ClockFrame { grid, display })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn display_text_matches_the_timestamp() {
        let frame = GridBuilder::new()
            .build(datetime!(2024-01-01 09:05:07.123 UTC))
            .unwrap();
        assert_eq!(frame.display, "09:05:07.123");
    }

    #[test]
    fn grid_dimensions_are_fixed() {
        let builder = GridBuilder::new();

        for (hour, minute, second, milli) in [
            (0, 0, 0, 0),
            (9, 5, 7, 123),
            (12, 34, 56, 789),
            (23, 59, 59, 999),
        ] {
            let timestamp = datetime!(2024-01-01 00:00 UTC)
                .replace_time(time::Time::from_hms_milli(hour, minute, second, milli).unwrap());
            let frame = builder.build(timestamp).unwrap();

            assert_eq!(frame.grid.width(), konst::GRID_COLS, "{}", frame.display);
            assert_eq!(frame.grid.height(), konst::GRID_ROWS, "{}", frame.display);
        }
    }

    #[test]
    fn renders_the_morning_example() {
        let frame = GridBuilder::new()
            .build(datetime!(2024-01-01 09:05:07.123 UTC))
            .unwrap();

        insta::assert_snapshot!(frame.grid.to_string(), @r"
        ...###..#####....###..#####....###..#####....#..###.###.
        ..#...#.#...#...#...#.#.......#...#.....#...##....#...#.
        ..#...#.#...#.#.#...#.#.....#.#...#....##....#....#...#.
        ..#...#.#####...#...#.#####...#...#...##.....#..###..##.
        ..#...#.....#.#.#...#.....#.#.#...#..##......#..#.....#.
        ..#...#.....#...#...#.....#...#...#.##.......#..#.....#.
        ...###..#####....###..#####....###..#.....#.###.###.###.
        ");
    }

    #[test]
    fn renders_the_last_millisecond_of_the_day() {
        let frame = GridBuilder::new()
            .build(datetime!(2024-12-31 23:59:59.999 UTC))
            .unwrap();

        insta::assert_snapshot!(frame.grid.to_string(), @r"
        ..#####.#####...#####.#####...#####.#####...###.###.###.
        ......#.....#...#.....#...#...#.....#...#...#.#.#.#.#.#.
        ......#.....#.#.#.....#...#.#.#.....#...#...#.#.#.#.#.#.
        ..#####..####...#####.#####...#####.#####...###.###.###.
        ..#.........#.#.....#.....#.#.....#.....#.....#...#...#.
        ..#.........#.......#.....#.......#.....#.....#...#...#.
        ..#####.#####...#####.#####...#####.#####.#.###.###.###.
        ");
    }

    #[test]
    fn border_columns_stay_blank() {
        let frame = GridBuilder::new()
            .build(datetime!(2024-06-15 18:30:45.500 UTC))
            .unwrap();

        for y in 0..frame.grid.height() {
            assert!(!frame.grid.get(0, y));
            assert!(!frame.grid.get(frame.grid.width() - 1, y));
        }
    }
}
