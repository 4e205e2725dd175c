//! Tiny 3x5 bitmap font for floating score text
//!
//! Covers digits and the handful of symbols the effects use ("+50", "x3").

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use crate::Color;

const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;

/// Rows top to bottom, bit 2 is the leftmost column
fn glyph(c: char) -> Option<[u8; GLYPH_H]> {
    Some(match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        'x' | 'X' => [0b000, 0b101, 0b010, 0b101, 0b000],
        _ => return None,
    })
}

/// Width of `text` in pixels at the given cell size
pub fn measure(text: &str, cell: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        return 0.0;
    }
    (n * (GLYPH_W + 1) - 1) as f32 * cell
}

/// Text centered horizontally on `anchor.x` with its baseline at `anchor.y`.
/// Characters without a glyph render as blanks.
pub fn text(text: &str, anchor: Vec2, cell: f32, color: Color) -> Vec<Vertex> {
    let width = measure(text, cell);
    let top = anchor.y - GLYPH_H as f32 * cell;
    let mut x = anchor.x - width / 2.0;
    let mut vertices = Vec::new();

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        let min = Vec2::new(x + col as f32 * cell, top + row as f32 * cell);
                        vertices.extend(shapes::rect(min, Vec2::splat(cell), color));
                    }
                }
            }
        }
        x += (GLYPH_W + 1) as f32 * cell;
    }

    vertices
}
