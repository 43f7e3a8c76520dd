//! Pure grid-layout calculations for circular portraits on a post canvas.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! A batch of `n` portraits is arranged in a grid of up to `max_per_row`
//! columns. The occupied block is horizontally centered on the canvas and
//! vertically centered with a fixed downward bias (templates carry their
//! headline artwork in the upper third, so portraits sit below the middle).
//!
//! Coordinates are `i64`: a block wider than the canvas yields negative
//! start offsets rather than a panic, and the compositor clips at paste
//! time.

use serde::{Deserialize, Serialize};

/// Grid geometry knobs, taken from `[layout]` in `config.toml`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridParams {
    /// Diameter of each circular portrait, in pixels.
    pub mask_size: u32,
    /// Spacing between adjacent portraits, in pixels.
    pub gap_size: u32,
    /// Maximum portraits per row (also the per-post cap).
    pub max_per_row: u32,
    /// Downward shift of the vertically-centered block, in pixels.
    pub vertical_bias: i64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            mask_size: 150,
            gap_size: 50,
            max_per_row: 5,
            vertical_bias: 100,
        }
    }
}

impl GridParams {
    /// Distance between the top-left corners of adjacent cells.
    pub fn step(&self) -> i64 {
        (self.mask_size + self.gap_size) as i64
    }
}

/// Computed placement for one portrait within a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Position within the batch, row-major.
    pub index: usize,
    pub row: u32,
    pub col: u32,
    /// Top-left corner of the portrait on the canvas.
    pub x: i64,
    pub y: i64,
    /// Horizontal center of the name label (text is centered on this).
    pub label_center_x: i64,
    /// Top edge of the name label.
    pub label_top_y: i64,
}

/// Width and height of the block occupied by `n` portraits.
///
/// The last row may be partial; the extent still spans `min(n, max_per_row)`
/// columns so a short final row stays centered relative to the full block.
pub fn grid_extent(n: usize, params: &GridParams) -> (i64, i64) {
    if n == 0 {
        return (0, 0);
    }
    let cols = (n as i64).min(params.max_per_row as i64);
    let rows = (n as i64 - 1) / params.max_per_row as i64 + 1;
    let gap = params.gap_size as i64;
    (cols * params.step() - gap, rows * params.step() - gap)
}

/// Compute the placement of every portrait in a batch of `n`.
///
/// Offsets use floored division so centering matches for odd remainders
/// regardless of sign. `n` is expected to be at most `max_per_row` (one
/// post's worth); larger values simply wrap onto further rows.
pub fn compute_layout(n: usize, canvas: (u32, u32), params: &GridParams) -> Vec<Cell> {
    if n == 0 {
        return Vec::new();
    }
    let (total_w, total_h) = grid_extent(n, params);
    let start_x = (canvas.0 as i64 - total_w).div_euclid(2);
    let start_y = (canvas.1 as i64 - total_h).div_euclid(2) + params.vertical_bias;

    let step = params.step();
    let mask = params.mask_size as i64;
    let gap = params.gap_size as i64;

    (0..n)
        .map(|index| {
            let row = (index as u32) / params.max_per_row;
            let col = (index as u32) % params.max_per_row;
            let x = start_x + col as i64 * step;
            let y = start_y + row as i64 * step;
            Cell {
                index,
                row,
                col,
                x,
                y,
                label_center_x: x + mask / 2,
                label_top_y: y + mask + gap / 2,
            }
        })
        .collect()
}
