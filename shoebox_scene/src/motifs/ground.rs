// Ground grid: a square lattice of lines on the floor plane, brightest near
// the building and dimming toward the edges.

use glam::Vec3;

use super::{FLOOR_Y, stagger};
use crate::assemble::Layer;
use crate::geometry::{param, sample_line};
use crate::palette::{GRID_LINE, Rgb, STRUCTURE};
use crate::scene::{AnimationTag, Primitive, SceneGroup};

/// Lines per direction is `2 * GRID_HALF_CELLS + 1`.
const GRID_HALF_CELLS: i32 = 8;
const GRID_SPACING: f32 = 1.0;
const GRID_SEGS: usize = 16;
/// The grid sits a hair under the floor so the shell's bottom edges win.
const GRID_DROP: f32 = 0.01;
const GRID_TARGET: f32 = 0.35;

pub fn ground_grid() -> SceneGroup {
    let mut group = SceneGroup::new(Layer::Grid.name());
    let extent = GRID_HALF_CELLS as f32 * GRID_SPACING;
    let y = FLOOR_Y - GRID_DROP;

    let mut index = 0;
    for along_x in [true, false] {
        for k in -GRID_HALF_CELLS..=GRID_HALF_CELLS {
            let across = k as f32 * GRID_SPACING;
            let (start, end) = if along_x {
                (Vec3::new(-extent, y, across), Vec3::new(extent, y, across))
            } else {
                (Vec3::new(across, y, -extent), Vec3::new(across, y, extent))
            };
            let positions = sample_line(&[start, end], GRID_SEGS);
            let colors = grid_colors(across.abs() / extent);
            // Cascade outward from the centre lines.
            let delay = stagger(0.1, 0.015, index) + 0.02 * k.unsigned_abs() as f32;
            let label = format!("grid-{}-{k}", if along_x { "x" } else { "z" });
            group.push(Primitive::line(
                label,
                positions,
                colors,
                AnimationTag::fade(delay, GRID_TARGET),
            ));
            index += 1;
        }
    }
    group
}

/// Colours for one grid line: structure-tinted in the middle of the line,
/// grid-dark at its ends, and darker overall for lines far from centre.
fn grid_colors(offset_fraction: f32) -> Vec<Rgb> {
    (0..=GRID_SEGS)
        .map(|i| {
            let t = param(i, GRID_SEGS);
            let centrality = 1.0 - (2.0 * t - 1.0).abs();
            let strength = centrality * (1.0 - offset_fraction) * 0.6;
            GRID_LINE.rgb.lerp(STRUCTURE.rgb, strength)
        })
        .collect()
}
