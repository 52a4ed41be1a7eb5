//! The binary cell matrix that everything else composes.
//!
//! A [`Bitmap`] is a rectangle of disc states, row-major, every row the same
//! length. Glyphs are rasterized into one, the clock grid is folded out of
//! many via [`Bitmap::concat_columns`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    rows: Vec<Vec<bool>>,
}

/// Column-wise concatenation requires equal row counts. Anything else is a
/// template misconfiguration, so this fails the whole composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot concatenate bitmaps column-wise: left has {left} rows, right has {right} rows")]
pub struct DimensionMismatch {
    pub left: usize,
    pub right: usize,
}

impl Bitmap {
    /// An all-off bitmap of the given dimensions.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![false; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Sets one cell. Coordinates outside the bitmap are ignored, which the
    /// glyph strokes rely on near the edges.
    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 {
            return;
        }

        if let Some(cell) = self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = on;
        }
    }

    /// Appends `other` to the right of `self`, row by row.
    pub fn concat_columns(mut self, other: &Bitmap) -> Result<Bitmap, DimensionMismatch> {
        if self.height() != other.height() {
            return Err(DimensionMismatch {
                left: self.height(),
                right: other.height(),
            });
        }

        for (row, other_row) in self.rows.iter_mut().zip(&other.rows) {
            row.extend_from_slice(other_row);
        }

        Ok(self)
    }

    /// Prepends all-off columns. Glyph cells carry their inter-character gap
    /// as left padding.
    pub fn pad_left(mut self, columns: usize) -> Bitmap {
        for row in &mut self.rows {
            row.splice(0..0, std::iter::repeat(false).take(columns));
        }
        self
    }

    /// Drops the leading column that the fold seed leaves behind.
    pub fn without_first_column(mut self) -> Bitmap {
        for row in &mut self.rows {
            if !row.is_empty() {
                row.remove(0);
            }
        }
        self
    }

    /// Adds one all-off column on each side.
    pub fn bordered(mut self) -> Bitmap {
        for row in &mut self.rows {
            row.insert(0, false);
            row.push(false);
        }
        self
    }

    /// All cells as `(x, y, on)`, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, on)| (x, y, *on)))
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for on in row {
                f.write_str(if *on { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: usize, height: usize) -> Bitmap {
        let mut bitmap = Bitmap::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap.set(x as i32, y as i32, true);
            }
        }
        bitmap
    }

    #[test]
    fn blank_has_requested_dimensions() {
        let bitmap = Bitmap::blank(5, 7);
        assert_eq!(bitmap.width(), 5);
        assert_eq!(bitmap.height(), 7);
        assert!(bitmap.iter_cells().all(|(_, _, on)| !on));
    }

    #[test]
    fn concat_sums_widths() {
        let result = Bitmap::blank(3, 7)
            .concat_columns(&Bitmap::blank(5, 7))
            .unwrap()
            .concat_columns(&Bitmap::blank(2, 7))
            .unwrap();

        assert_eq!(result.width(), 10);
        assert_eq!(result.height(), 7);
    }

    #[test]
    fn concat_preserves_row_contents() {
        let result = filled(2, 3).concat_columns(&Bitmap::blank(1, 3)).unwrap();

        for y in 0..3 {
            assert!(result.get(0, y));
            assert!(result.get(1, y));
            assert!(!result.get(2, y));
        }
    }

    #[test]
    fn concat_rejects_mismatched_heights() {
        for (left, right) in [(7, 5), (5, 7), (1, 2), (7, 0)] {
            let err = Bitmap::blank(3, left)
                .concat_columns(&Bitmap::blank(3, right))
                .unwrap_err();
            assert_eq!(err, DimensionMismatch { left, right });
        }
    }

    #[test]
    fn fold_from_seed_keeps_height_and_sums_widths() {
        let cells = [filled(6, 7), filled(2, 7), filled(4, 7)];
        let folded = cells
            .iter()
            .try_fold(Bitmap::blank(1, 7), Bitmap::concat_columns)
            .unwrap();

        assert_eq!(folded.height(), 7);
        assert_eq!(folded.width(), 1 + 6 + 2 + 4);
    }

    #[test]
    fn strip_then_border_replaces_seed_column() {
        let folded = Bitmap::blank(1, 2)
            .concat_columns(&filled(2, 2))
            .unwrap();

        let finished = folded.without_first_column().bordered();

        assert_eq!(finished.width(), 4);
        for y in 0..2 {
            assert!(!finished.get(0, y));
            assert!(finished.get(1, y));
            assert!(finished.get(2, y));
            assert!(!finished.get(3, y));
        }
    }

    #[test]
    fn pad_left_shifts_cells() {
        let mut bitmap = Bitmap::blank(2, 2);
        bitmap.set(0, 0, true);
        let padded = bitmap.pad_left(2);

        assert_eq!(padded.width(), 4);
        assert!(!padded.get(0, 0));
        assert!(!padded.get(1, 0));
        assert!(padded.get(2, 0));
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut bitmap = Bitmap::blank(2, 2);
        bitmap.set(-1, 0, true);
        bitmap.set(0, -1, true);
        bitmap.set(2, 0, true);
        bitmap.set(0, 2, true);
        assert!(bitmap.iter_cells().all(|(_, _, on)| !on));
    }

    #[test]
    fn display_renders_rows() {
        let mut bitmap = Bitmap::blank(3, 2);
        bitmap.set(1, 0, true);
        bitmap.set(2, 1, true);
        assert_eq!(bitmap.to_string(), ".#.\n..#");
    }
}
