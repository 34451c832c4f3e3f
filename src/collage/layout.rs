//! Grid geometry for the collage canvas.
//!
//! Pure integer math, no pixels touched here. [`grid_for`] picks the most
//! compact near-square grid for an item count; [`Grid`] then answers every
//! placement question the renderer has (canvas size, per-cell origin).
//!
//! Geometry constants are fixed: cells are 200px squares separated by a 10px
//! gutter, below an 80px header band.

/// Side length of one thumbnail cell, in pixels.
pub const THUMB: u32 = 200;
/// Gutter between cells and around the canvas edge, in pixels.
pub const PAD: u32 = 10;
/// Height of the title/date-range band above the first row, in pixels.
pub const HEADER_HEIGHT: u32 = 80;

/// Row/column shape of a collage grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

/// Most compact near-square grid holding `items` cells.
///
/// Starts from `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`, then drops
/// rows or columns while the remainder still holds every item. The result
/// never has a fully redundant row or column: `(rows-1)*cols < n` and
/// `rows*(cols-1) < n` for all `n ≥ 1`.
///
/// `grid_for(0)` is the degenerate `0×0` grid; callers reject empty input
/// before any rendering happens.
pub fn grid_for(items: usize) -> Grid {
    if items == 0 {
        return Grid { rows: 0, cols: 0 };
    }
    let n = items as u32;
    let mut cols = (items as f64).sqrt().ceil() as u32;
    let mut rows = n.div_ceil(cols);
    while cols * rows > n && rows > 1 {
        if (cols - 1) * rows >= n {
            cols -= 1;
        } else if cols * (rows - 1) >= n {
            rows -= 1;
        } else {
            break;
        }
    }
    Grid { rows, cols }
}

impl Grid {
    /// Total canvas width: all columns plus gutters on both edges.
    pub fn canvas_width(&self) -> u32 {
        self.cols * (THUMB + PAD) + PAD
    }

    /// Total canvas height: header band plus all rows and gutters.
    pub fn canvas_height(&self) -> u32 {
        self.rows * (THUMB + PAD) + PAD + HEADER_HEIGHT
    }

    /// Number of cells the grid can hold.
    pub fn capacity(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    /// Top-left pixel of the cell for the item at `index` in row-major order.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let row = index as u32 / self.cols;
        let col = index as u32 % self.cols;
        let x = col * (THUMB + PAD) + PAD;
        let y = row * (THUMB + PAD) + PAD + HEADER_HEIGHT;
        (x, y)
    }
}
