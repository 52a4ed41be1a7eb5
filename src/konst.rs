/// Disc rows on the panel chain, and the height every glyph is drawn at.
pub const GRID_ROWS: usize = 7;

/// Stroke width of the six seconds-resolution digits.
pub const TIME_DIGIT_WIDTH: usize = 5;

/// Stroke width of the three millisecond digits.
pub const MS_DIGIT_WIDTH: usize = 3;

/// Stroke width of `:` and `.`.
pub const SEPARATOR_WIDTH: usize = 1;

/// Off columns prepended to every cell so neighbouring glyphs never touch.
pub const CELL_PADDING: usize = 1;

/// Border columns on the outer edges of the finished grid.
pub const BORDER_COLS: usize = 2;

/// Total columns of a rendered `HH:MM:SS.mmm` grid: six wide digits, two
/// colons, the decimal point and three narrow digits, each with its left
/// padding, plus the border. Works out to two chained 28x7 panels.
pub const GRID_COLS: usize = BORDER_COLS
    + 6 * (TIME_DIGIT_WIDTH + CELL_PADDING)
    + 3 * (SEPARATOR_WIDTH + CELL_PADDING)
    + 3 * (MS_DIGIT_WIDTH + CELL_PADDING);

/// Discs on the panel chain.
pub const NUM_CELLS: usize = GRID_COLS * GRID_ROWS;
