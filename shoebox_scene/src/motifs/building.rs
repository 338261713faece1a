// The shoebox itself: wireframe shell with window openings, interior
// partitions, and a slightly oversized glowing halo of the envelope.

use glam::Vec3;

use super::{FLOOR_Y, HALF_X, HALF_Z, ROOF_Y, box_edges, shell_bounds, stagger};
use crate::assemble::Layer;
use crate::geometry::{gradient, rect_xy, rect_xz, rect_yz, sample_line};
use crate::palette::{COOL_ICE, COOL_MID, GLOW, STRUCTURE};
use crate::scene::{AnimationTag, Motion, Primitive, SceneGroup};

const EDGE_SEGS: usize = 24;
const LOOP_SEGS: usize = 40;

const SHELL_TARGET: f32 = 0.85;
const WINDOW_TARGET: f32 = 0.55;
const PARTITION_TARGET: f32 = 0.3;
const GLOW_TARGET: f32 = 0.25;

/// Window openings on the two long faces: (face z, x0, x1, sill y, head y).
const WINDOWS: [(f32, f32, f32, f32, f32); 4] = [
    (HALF_Z, -1.5, -0.5, -0.2, 0.7),
    (HALF_Z, 0.5, 1.5, -0.2, 0.7),
    (-HALF_Z, -1.2, -0.2, -0.1, 0.6),
    (-HALF_Z, 0.6, 1.6, -0.1, 0.6),
];

/// Interior partition walls at these X positions.
const PARTITION_X: [f32; 2] = [-0.7, 0.8];
/// Inset of interior elements from the shell.
const INSET: f32 = 0.05;

/// Glow halo scale relative to the shell.
const GLOW_SCALE: f32 = 1.04;

pub fn building_shell() -> SceneGroup {
    let mut group = SceneGroup::new(Layer::BuildingShell.name());
    let (min, max) = shell_bounds();

    for (i, (a, b)) in box_edges(min, max).into_iter().enumerate() {
        let positions = sample_line(&[a, b], EDGE_SEGS);
        let colors = gradient(STRUCTURE.rgb, COOL_ICE.rgb, positions.len(), 0.35);
        group.push(Primitive::line(
            format!("shell-edge-{i}"),
            positions,
            colors,
            AnimationTag::fade(stagger(0.5, 0.05, i), SHELL_TARGET),
        ));
    }

    for (i, &(z, x0, x1, y0, y1)) in WINDOWS.iter().enumerate() {
        let positions = sample_line(&rect_xy(z, x0, x1, y0, y1), LOOP_SEGS);
        group.push(Primitive::solid_line(
            format!("shell-window-{i}"),
            positions,
            COOL_ICE.rgb.desaturate(0.5),
            AnimationTag::fade(stagger(1.1, 0.06, i), WINDOW_TARGET),
        ));
    }
    group
}

pub fn interior_partitions() -> SceneGroup {
    let mut group = SceneGroup::new(Layer::Interior.name());
    let mut loops: Vec<[Vec3; 5]> = PARTITION_X
        .iter()
        .map(|&x| {
            rect_yz(
                x,
                FLOOR_Y + INSET,
                ROOF_Y - INSET,
                -HALF_Z + INSET,
                HALF_Z - INSET,
            )
        })
        .collect();
    // Occupied-zone outline on the floor.
    loops.push(rect_xz(
        Vec3::new(0.0, FLOOR_Y + 0.01, 0.0),
        HALF_X - 0.8,
        HALF_Z - 0.5,
    ));

    for (i, anchors) in loops.iter().enumerate() {
        let positions = sample_line(anchors, LOOP_SEGS);
        let colors = gradient(STRUCTURE.rgb, COOL_MID.rgb, positions.len(), 0.6);
        group.push(Primitive::line(
            format!("interior-{i}"),
            positions,
            colors,
            AnimationTag::fade(stagger(1.0, 0.08, i), PARTITION_TARGET),
        ));
    }
    group
}

pub fn envelope_glow() -> SceneGroup {
    let mut group = SceneGroup::new(Layer::GlowHalo.name());
    let (min, max) = shell_bounds();

    for (i, (a, b)) in box_edges(min * GLOW_SCALE, max * GLOW_SCALE)
        .into_iter()
        .enumerate()
    {
        let positions = sample_line(&[a, b], EDGE_SEGS);
        let tag = AnimationTag::fade(stagger(0.8, 0.03, i), GLOW_TARGET).with_motion(
            Motion::GlowPulse {
                speed: 0.7,
                phase: i as f32 * 0.45,
                depth: 0.35,
            },
        );
        group.push(Primitive::solid_line(format!("glow-{i}"), positions, GLOW.rgb, tag));
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_has_edges_and_windows() {
        let shell = building_shell();
        assert_eq!(shell.primitive_count(), 12 + WINDOWS.len());
        shell.for_each_primitive(&mut |p| {
            assert!(p.is_consistent());
            assert_eq!(p.tag.motion, Motion::FadeOnly);
        });
    }

    #[test]
    fn shell_vertices_stay_on_the_box() {
        let (min, max) = shell_bounds();
        building_shell().for_each_primitive(&mut |p| {
            for v in &p.positions {
                assert!(v.cmpge(min - Vec3::splat(1e-5)).all());
                assert!(v.cmple(max + Vec3::splat(1e-5)).all());
            }
        });
    }

    #[test]
    fn interior_stays_inside_shell() {
        let (min, max) = shell_bounds();
        interior_partitions().for_each_primitive(&mut |p| {
            for v in &p.positions {
                assert!(v.cmpgt(min).all() && v.cmplt(max).all(), "{v} escapes shell");
            }
        });
    }

    #[test]
    fn glow_halo_pulses_and_encloses_shell() {
        let glow = envelope_glow();
        assert_eq!(glow.primitive_count(), 12);
        glow.for_each_primitive(&mut |p| {
            assert!(matches!(p.tag.motion, Motion::GlowPulse { .. }));
            for v in &p.positions {
                let outside = v.x.abs() > HALF_X || v.y > ROOF_Y || v.y < FLOOR_Y || v.z.abs() > HALF_Z;
                assert!(outside, "{v} inside shell");
            }
        });
    }
}
