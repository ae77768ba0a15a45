//! Canvas renderer: one filled cell per glyph instance.
//!
//! There is no textured atlas yet. The tier picks the palette color and
//! the atlas index nudges the shade so same-tier cells do not read as
//! flat bars.

use sdl2::{pixels::Color, rect::Rect, render::Canvas, video::Window};

use crate::sim::Frame;

/// Edge of one grid cell in window pixels.
pub const CELL: usize = 16;

pub const BACKGROUND_COLOR: Color = Color::RGB(4, 10, 6);

/// Tier-indexed colors, head (tier 0) first.
pub struct Palette {
    pub name: &'static str,
    tiers: [Color; 3],
}

/// Built-in palettes, cycled with the C key.
pub const PALETTES: [Palette; 3] = [
    Palette {
        name: "green",
        tiers: [
            Color::RGB(230, 255, 230),
            Color::RGB(0, 255, 70),
            Color::RGB(0, 140, 50),
        ],
    },
    Palette {
        name: "blue",
        tiers: [
            Color::RGB(210, 240, 255),
            Color::RGB(0, 200, 255),
            Color::RGB(0, 110, 180),
        ],
    },
    Palette {
        name: "amber",
        tiers: [
            Color::RGB(255, 245, 210),
            Color::RGB(255, 180, 0),
            Color::RGB(160, 100, 0),
        ],
    },
];

pub fn next_palette(current: usize) -> usize {
    (current + 1) % PALETTES.len()
}

fn tier_color(palette: &Palette, tier: u8) -> Color {
    // The simulator never produces a tier outside the table, but the
    // renderer does not trust its input; strays land on the dimmest entry.
    let idx = usize::from(tier).min(palette.tiers.len() - 1);
    palette.tiers[idx]
}

fn shade(color: Color, glyph: u8) -> Color {
    let dim = glyph % 24;
    Color::RGB(
        color.r.saturating_sub(dim),
        color.g.saturating_sub(dim),
        color.b.saturating_sub(dim),
    )
}

pub fn draw_frame(canvas: &mut Canvas<Window>, frame: &Frame<'_>, palette: &Palette) {
    for inst in frame.instances() {
        canvas.set_draw_color(shade(tier_color(palette, inst.tier), inst.glyph));
        let [x, y]: [usize; 2] = inst.pos.into();
        let _ = canvas.fill_rect(Rect::new(
            (x * CELL) as i32,
            (y * CELL) as i32,
            CELL as u32,
            CELL as u32,
        ));
    }
}

pub fn clear_canvas_with_color(canvas: &mut Canvas<Window>, color: Color) {
    canvas.set_draw_color(color);
    canvas.clear();
}
