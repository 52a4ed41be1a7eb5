//! Glyph rasterization for the flip-disc alphabet.
//!
//! Each character is described by a stroke table rather than bespoke drawing
//! code: a list of axis-aligned segments, single dots, corner knock-outs and
//! the one staircase that `7` needs. Endpoints are anchored to the edges or
//! the floor-midpoint of the cell, so the same table renders at any requested
//! width and height. [`rasterize`] interprets the table into a [`Bitmap`] and
//! prepends the cell's left padding.

use crate::bitmap::Bitmap;

/// The closed set of characters that have stroke tables.
pub const ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', '.', '-',
];

/// Asked to rasterize a character without a stroke table. The clock template
/// only ever produces digits and separators, so hitting this means the
/// caller's formatting is broken; degrading to an empty cell would corrupt
/// the grid width instead of surfacing that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no glyph strokes for character {character:?}")]
pub struct UnsupportedCharacter {
    pub character: char,
}

/// One coordinate along an axis, anchored to the start, floor-midpoint or end
/// of the axis plus a fixed offset.
#[derive(Debug, Clone, Copy)]
struct Coord {
    anchor: Anchor,
    offset: i32,
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Start,
    Mid,
    End,
}

impl Coord {
    fn resolve(self, size: usize) -> i32 {
        let base = match self.anchor {
            Anchor::Start => 0,
            Anchor::Mid => (size / 2) as i32,
            Anchor::End => size as i32 - 1,
        };
        base + self.offset
    }
}

const fn start(offset: i32) -> Coord {
    Coord {
        anchor: Anchor::Start,
        offset,
    }
}

const fn mid(offset: i32) -> Coord {
    Coord {
        anchor: Anchor::Mid,
        offset,
    }
}

const fn end(offset: i32) -> Coord {
    Coord {
        anchor: Anchor::End,
        offset,
    }
}

/// A point as `(x, y)`; `x` resolves against the width, `y` against the
/// height.
type Point = (Coord, Coord);

#[derive(Debug, Clone, Copy)]
enum Stroke {
    /// Horizontal or vertical run of on cells between two points. If the
    /// points share neither row nor column, only the endpoints are plotted;
    /// the alphabet never needs true diagonals.
    Line(Point, Point),
    /// A single on cell.
    Dot(Point),
    /// A single off cell, for rounding the corners of `0`.
    Clear(Point),
    /// Two-cell runs stepping down-left from the given point to the bottom
    /// row, clamped at the left edge. Draws the slanted tail of `7`.
    Slant(Point),
}

use Stroke::{Clear, Dot, Line, Slant};

const ZERO: &[Stroke] = &[
    Line((start(0), start(0)), (start(0), end(0))),
    Line((start(0), start(0)), (end(0), start(0))),
    Line((start(0), end(0)), (end(0), end(0))),
    Line((end(0), start(0)), (end(0), end(0))),
    Clear((start(0), start(0))),
    Clear((start(0), end(0))),
    Clear((end(0), start(0))),
    Clear((end(0), end(0))),
];

const ONE: &[Stroke] = &[
    Line((mid(0), start(0)), (mid(0), end(0))),
    Dot((mid(-1), start(1))),
    Dot((mid(-1), end(0))),
    Dot((mid(1), end(0))),
];

const TWO: &[Stroke] = &[
    Line((start(0), start(0)), (end(0), start(0))),
    Line((end(0), start(0)), (end(0), mid(0))),
    Line((start(0), mid(0)), (end(0), mid(0))),
    Line((start(0), mid(0)), (start(0), end(0))),
    Line((start(0), end(0)), (end(0), end(0))),
];

const THREE: &[Stroke] = &[
    Line((start(0), start(0)), (end(0), start(0))),
    Line((end(0), start(0)), (end(0), end(0))),
    Line((start(0), end(0)), (end(0), end(0))),
    Line((start(1), mid(0)), (end(0), mid(0))),
];

const FOUR: &[Stroke] = &[
    Line((start(0), start(0)), (start(0), mid(0))),
    Line((end(0), start(0)), (end(0), end(0))),
    Line((start(0), mid(0)), (end(0), mid(0))),
];

const FIVE: &[Stroke] = &[
    Line((start(0), start(0)), (end(0), start(0))),
    Line((start(0), start(0)), (start(0), mid(0))),
    Line((start(0), mid(0)), (end(0), mid(0))),
    Line((end(0), mid(0)), (end(0), end(0))),
    Line((start(0), end(0)), (end(0), end(0))),
];

const SIX: &[Stroke] = &[
    Line((start(0), start(0)), (end(0), start(0))),
    Line((start(0), start(0)), (start(0), mid(0))),
    Line((start(0), mid(0)), (end(0), mid(0))),
    Line((start(0), mid(0)), (start(0), end(0))),
    Line((end(0), mid(0)), (end(0), end(0))),
    Line((start(0), end(0)), (end(0), end(0))),
];

const SEVEN: &[Stroke] = &[
    Line((start(0), start(0)), (end(0), start(0))),
    Dot((end(0), start(1))),
    Slant((end(0), start(2))),
];

const EIGHT: &[Stroke] = &[
    Line((start(0), start(0)), (end(0), start(0))),
    Line((start(0), start(0)), (start(0), mid(0))),
    Line((end(0), start(0)), (end(0), mid(0))),
    Line((start(0), mid(0)), (end(0), mid(0))),
    Line((start(0), mid(0)), (start(0), end(0))),
    Line((end(0), mid(0)), (end(0), end(0))),
    Line((start(0), end(0)), (end(0), end(0))),
];

const NINE: &[Stroke] = &[
    Line((start(0), start(0)), (end(0), start(0))),
    Line((start(0), start(0)), (start(0), mid(0))),
    Line((end(0), start(0)), (end(0), mid(0))),
    Line((start(0), mid(0)), (end(0), mid(0))),
    Line((end(0), mid(0)), (end(0), end(0))),
    Line((start(0), end(0)), (end(0), end(0))),
];

const DASH: &[Stroke] = &[Line((start(0), mid(0)), (end(0), mid(0)))];

const COLON: &[Stroke] = &[Dot((start(0), mid(-1))), Dot((start(0), mid(1)))];

const DOT: &[Stroke] = &[Dot((mid(0), end(0)))];

fn strokes(character: char) -> Option<&'static [Stroke]> {
    Some(match character {
        '0' => ZERO,
        '1' => ONE,
        '2' => TWO,
        '3' => THREE,
        '4' => FOUR,
        '5' => FIVE,
        '6' => SIX,
        '7' => SEVEN,
        '8' => EIGHT,
        '9' => NINE,
        '-' => DASH,
        ':' => COLON,
        '.' => DOT,
        _ => return None,
    })
}

/// Draws `character` onto a fresh `height` × `width` cell matrix and prepends
/// `padding` all-off columns on the left, so the returned bitmap is
/// `width + padding` columns wide.
pub fn rasterize(
    character: char,
    width: usize,
    height: usize,
    padding: usize,
) -> Result<Bitmap, UnsupportedCharacter> {
    let strokes = strokes(character).ok_or(UnsupportedCharacter { character })?;

    let mut bitmap = Bitmap::blank(width, height);
    for stroke in strokes {
        match *stroke {
            Line(from, to) => line(&mut bitmap, resolve(from, width, height), resolve(to, width, height)),
            Dot(at) => {
                let (x, y) = resolve(at, width, height);
                bitmap.set(x, y, true);
            }
            Clear(at) => {
                let (x, y) = resolve(at, width, height);
                bitmap.set(x, y, false);
            }
            Slant(from) => slant(&mut bitmap, resolve(from, width, height), height),
        }
    }

    Ok(bitmap.pad_left(padding))
}

fn resolve((x, y): Point, width: usize, height: usize) -> (i32, i32) {
    (x.resolve(width), y.resolve(height))
}

fn line(bitmap: &mut Bitmap, (x1, y1): (i32, i32), (x2, y2): (i32, i32)) {
    if x1 == x2 {
        for y in y1.min(y2)..=y1.max(y2) {
            bitmap.set(x1, y, true);
        }
    } else if y1 == y2 {
        for x in x1.min(x2)..=x1.max(x2) {
            bitmap.set(x, y1, true);
        }
    } else {
        // Not axis-aligned: plot the endpoints only.
        bitmap.set(x1, y1, true);
        bitmap.set(x2, y2, true);
    }
}

fn slant(bitmap: &mut Bitmap, (start_x, start_y): (i32, i32), height: usize) {
    let mut x = start_x;
    for y in start_y..height as i32 {
        if x > 0 {
            line(bitmap, (x - 1, y), (x, y));
        } else if x == 0 {
            bitmap.set(0, y, true);
        }
        x -= 1;
    }
}
