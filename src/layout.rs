//! Per-frame matrix layout with the column-reveal policy.
//!
//! Columns are grouped into blocks of `columns_per_block`. Every `reveal_interval_ms` one more
//! column per block (counting from the block's right edge) stops producing noise. A revealed
//! column `x` shows `target[x - 1]` in the header row, shifted one block to the right, when
//! that char exists. Once only `keep_columns` would remain hidden the layout reports
//! [`Layout::Exhausted`].

use rand::Rng;

use crate::config::AnimationConfig;
use crate::foundation::core::Canvas;
use crate::symbol::{DEFAULT_SYMBOL_OPACITY, Symbol};

/// Matrix dimensions in glyph cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Grid {
    /// Number of rows (row 1 is the header row).
    pub rows: u32,
    /// Number of columns.
    pub cols: u32,
}

impl Grid {
    /// Grid covering `canvas` with square cells of `glyph_size` pixels.
    pub fn for_surface(canvas: Canvas, glyph_size: u32) -> Self {
        let glyph_size = glyph_size.max(1);
        Self {
            rows: canvas.height / glyph_size,
            cols: canvas.width / glyph_size,
        }
    }
}

/// Result of laying out one matrix frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    /// Symbols in paint order.
    Frame(Vec<Symbol>),
    /// Reveal budget spent; the failure banner takes over.
    Exhausted,
}

/// Column-reveal layout engine.
#[derive(Clone, Debug)]
pub struct MatrixLayoutEngine {
    glyph_size: f64,
    reveal_interval_ms: f64,
    columns_per_block: u32,
    keep_columns: u32,
    target: Vec<char>,
}

impl MatrixLayoutEngine {
    /// Build an engine for an already validated config.
    pub fn new(cfg: &AnimationConfig) -> Self {
        Self {
            glyph_size: f64::from(cfg.glyph_size),
            reveal_interval_ms: cfg.reveal_interval_ms,
            columns_per_block: cfg.columns_per_block.max(1),
            keep_columns: cfg.keep_columns,
            target: cfg.target.chars().collect(),
        }
    }

    /// Number of revealed columns per block after `elapsed_ms`.
    pub fn columns_to_reveal(&self, elapsed_ms: f64) -> u64 {
        if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
            return 0;
        }
        (elapsed_ms / self.reveal_interval_ms).floor() as u64
    }

    /// `true` once fewer than `keep_columns` columns would stay hidden.
    pub fn is_exhausted(&self, elapsed_ms: f64) -> bool {
        self.columns_to_reveal(elapsed_ms) + u64::from(self.keep_columns)
            > u64::from(self.columns_per_block)
    }

    /// `true` when column `x` (1-based) is revealed with `columns_to_reveal` per block.
    pub fn is_revealed(&self, x: u32, columns_to_reveal: u64) -> bool {
        if columns_to_reveal == 0 {
            return false;
        }
        let per_block = self.columns_per_block;
        let to_block_edge = x.div_ceil(per_block) * per_block - x;
        u64::from(to_block_edge) < columns_to_reveal
    }

    /// Lay out one frame.
    pub fn layout<R: Rng>(&self, elapsed_ms: f64, grid: Grid, rng: &mut R) -> Layout {
        let mut symbols = Vec::new();
        if self.layout_into(elapsed_ms, grid, rng, &mut symbols) {
            Layout::Frame(symbols)
        } else {
            Layout::Exhausted
        }
    }

    /// Lay out one frame into `out`, reusing its allocation.
    ///
    /// Returns `false` (leaving `out` untouched) when exhausted.
    pub fn layout_into<R: Rng>(
        &self,
        elapsed_ms: f64,
        grid: Grid,
        rng: &mut R,
        out: &mut Vec<Symbol>,
    ) -> bool {
        if self.is_exhausted(elapsed_ms) {
            return false;
        }
        let reveal = self.columns_to_reveal(elapsed_ms);
        let size = self.glyph_size;
        out.clear();
        // Row 1 is the header row; a column is only visited through its remaining rows.
        if grid.rows < 2 {
            return true;
        }

        for x in 1..=grid.cols {
            if self.is_revealed(x, reveal) {
                if let Some(&glyph) = self.target.get((x - 1) as usize) {
                    let header_x = f64::from(x + self.columns_per_block) * size;
                    out.push(Symbol::new(glyph, header_x, size, 1.0));
                }
                continue;
            }

            let px = f64::from(x) * size;
            for y in 2..=grid.rows {
                let py = f64::from(y) * size;
                let background = rng.gen_range(0.0..3.0);
                let mut i = 1u32;
                while f64::from(i) < background {
                    out.push(Symbol::new(random_digit(rng), px, py, 0.5 / f64::from(i)));
                    i += 1;
                }
                out.push(Symbol::new(random_digit(rng), px, py, DEFAULT_SYMBOL_OPACITY));
            }
        }
        true
    }
}

fn random_digit<R: Rng>(rng: &mut R) -> char {
    char::from(b'0' + rng.gen_range(0..10u8))
}

#[cfg(test)]
#[path = "../tests/unit/layout.rs"]
mod tests;
