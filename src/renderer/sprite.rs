//! Pixel-art car sprites
//!
//! Every car is a 4x8 grid: body color, a dark windshield in rows 2-3 of the
//! middle columns and yellow headlights on the outer columns of row 1.

use crate::color::Color;
use crate::consts::{SPRITE_COLS, SPRITE_PIXEL, SPRITE_ROWS};

/// Color of one sprite pixel
pub fn car_pixel(col: usize, row: usize, body: Color) -> Color {
    let inner_col = col == 1 || col == 2;
    let outer_col = col == 0 || col == SPRITE_COLS - 1;

    if (row == 2 || row == 3) && inner_col {
        Color::WINDOW
    } else if row == 1 && outer_col {
        Color::HEADLIGHT
    } else {
        body
    }
}

/// A pixel ready for placement: offset inside the sprite and its color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePixel {
    pub left: f32,
    pub top: f32,
    pub color: Color,
}

/// All pixels of a car, row by row
pub fn car_pixels(body: Color) -> impl Iterator<Item = SpritePixel> {
    (0..SPRITE_ROWS).flat_map(move |row| {
        (0..SPRITE_COLS).map(move |col| SpritePixel {
            left: col as f32 * SPRITE_PIXEL,
            top: row as f32 * SPRITE_PIXEL,
            color: car_pixel(col, row, body),
        })
    })
}
