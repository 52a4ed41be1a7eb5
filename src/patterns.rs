//! Pattern cache for the two cell sizes the clock template uses.
//!
//! Rasterizing a glyph walks its stroke table; the clock does it for twelve
//! cells fifty times a second. The cache renders the whole alphabet once per
//! size class at startup and hands out borrowed bitmaps afterwards.

use std::collections::HashMap;

use crate::bitmap::Bitmap;
use crate::glyph::{self, UnsupportedCharacter};
use crate::konst;

/// The two glyph sizes a template slot can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// Wide digits for hours, minutes and seconds.
    Time,
    /// Narrow digits for the millisecond field.
    Ms,
}

impl SizeClass {
    fn digit_width(self) -> usize {
        match self {
            SizeClass::Time => konst::TIME_DIGIT_WIDTH,
            SizeClass::Ms => konst::MS_DIGIT_WIDTH,
        }
    }
}

/// Every alphabet character pre-rasterized at one size class, padding
/// included. Digits and the dash use the class width, separators their own
/// narrow width, all at the full grid height.
#[derive(Debug)]
pub struct PatternSet {
    patterns: HashMap<char, Bitmap>,
}

impl PatternSet {
    pub fn new(class: SizeClass) -> Self {
        let patterns = glyph::ALPHABET
            .iter()
            .map(|&character| {
                let width = match character {
                    ':' | '.' => konst::SEPARATOR_WIDTH,
                    _ => class.digit_width(),
                };
                let bitmap =
                    glyph::rasterize(character, width, konst::GRID_ROWS, konst::CELL_PADDING)
                        .expect("every alphabet character has a stroke table");
                (character, bitmap)
            })
            .collect();

        Self { patterns }
    }

    pub fn get(&self, character: char) -> Result<&Bitmap, UnsupportedCharacter> {
        self.patterns
            .get(&character)
            .ok_or(UnsupportedCharacter { character })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_the_whole_alphabet() {
        for class in [SizeClass::Time, SizeClass::Ms] {
            let set = PatternSet::new(class);
            for &character in glyph::ALPHABET {
                assert!(set.get(character).is_ok(), "{character} missing");
            }
        }
    }

    #[test]
    fn cell_widths_follow_the_size_class() {
        let time = PatternSet::new(SizeClass::Time);
        let ms = PatternSet::new(SizeClass::Ms);

        for digit in '0'..='9' {
            assert_eq!(
                time.get(digit).unwrap().width(),
                konst::TIME_DIGIT_WIDTH + konst::CELL_PADDING
            );
            assert_eq!(
                ms.get(digit).unwrap().width(),
                konst::MS_DIGIT_WIDTH + konst::CELL_PADDING
            );
        }

        for separator in [':', '.'] {
            for set in [&time, &ms] {
                assert_eq!(
                    set.get(separator).unwrap().width(),
                    konst::SEPARATOR_WIDTH + konst::CELL_PADDING
                );
            }
        }
    }

    #[test]
    fn cells_are_grid_height() {
        let set = PatternSet::new(SizeClass::Time);
        for &character in glyph::ALPHABET {
            assert_eq!(set.get(character).unwrap().height(), konst::GRID_ROWS);
        }
    }

    #[test]
    fn characters_outside_the_alphabet_miss() {
        let set = PatternSet::new(SizeClass::Time);
        let err = set.get('x').unwrap_err();
        assert_eq!(err, UnsupportedCharacter { character: 'x' });
    }
}
