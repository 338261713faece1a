// Scan sweeps: one horizontal loop around the building that travels up and
// down, and a few vertical lines that travel across the long faces.
//
// Geometry is built at the sweep's rest position; the driver moves each
// primitive through its `offset` according to the `SweepingScan` motion.

use glam::Vec3;

use super::{FLOOR_Y, HALF_X, HALF_Z, ROOF_Y, stagger};
use crate::assemble::Layer;
use crate::geometry::{gradient, rect_xz, sample_line};
use crate::palette::{COOL_ICE, WARM_SOFT};
use crate::scene::{AnimationTag, Axis, Motion, Primitive, SceneGroup};

const LOOP_SEGS: usize = 64;
/// Clearance between the scan loop and the shell.
const LOOP_MARGIN: f32 = 0.3;

/// Vertical scans: (face z, sweep speed in rad/s).
const VERTICAL_SCANS: [(f32, f32); 3] = [(HALF_Z + 0.05, 0.35), (HALF_Z + 0.05, 0.5), (-HALF_Z - 0.05, 0.7)];
const VERTICAL_SEGS: usize = 16;

pub fn scan_line() -> SceneGroup {
    let mut group = SceneGroup::new(Layer::ScanLine.name());
    let anchors = rect_xz(Vec3::ZERO, HALF_X + LOOP_MARGIN, HALF_Z + LOOP_MARGIN);
    let positions = sample_line(&anchors, LOOP_SEGS);
    let colors = gradient(COOL_ICE.rgb, WARM_SOFT.rgb, positions.len(), 0.2);

    let centre = (FLOOR_Y + ROOF_Y) * 0.5;
    let reach = (ROOF_Y - FLOOR_Y) * 0.5 - 0.05;
    let tag = AnimationTag::fade(2.2, 0.6).with_motion(Motion::SweepingScan {
        axis: Axis::Y,
        base: centre,
        amplitude: reach,
        speed: 0.6,
    });
    group.push(Primitive::line("scan-horizontal", positions, colors, tag));
    group
}

pub fn vertical_scans() -> SceneGroup {
    let mut group = SceneGroup::new(Layer::VerticalScans.name());

    for (i, &(z, speed)) in VERTICAL_SCANS.iter().enumerate() {
        let positions = sample_line(
            &[Vec3::new(0.0, FLOOR_Y, z), Vec3::new(0.0, ROOF_Y, z)],
            VERTICAL_SEGS,
        );
        let colors = gradient(COOL_ICE.rgb, WARM_SOFT.rgb, positions.len(), 0.25);
        let tag = AnimationTag::fade(stagger(2.4, 0.15, i), 0.45).with_motion(Motion::SweepingScan {
            axis: Axis::X,
            base: 0.0,
            amplitude: HALF_X - 0.1,
            speed,
        });
        group.push(Primitive::line(format!("scan-vertical-{i}"), positions, colors, tag));
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_scan_sweeps_vertically_within_the_shell() {
        let group = scan_line();
        assert_eq!(group.primitive_count(), 1);
        let p = group.find_primitive("scan-horizontal").unwrap();
        assert!(p.is_consistent());
        match p.tag.motion {
            Motion::SweepingScan { axis, base, amplitude, .. } => {
                assert_eq!(axis, Axis::Y);
                assert!(base - amplitude >= FLOOR_Y && base + amplitude <= ROOF_Y);
            }
            ref other => panic!("unexpected motion {other:?}"),
        }
    }

    #[test]
    fn vertical_scans_have_independent_speeds() {
        let group = vertical_scans();
        let speeds: Vec<f32> = group
            .primitives()
            .iter()
            .map(|p| match p.tag.motion {
                Motion::SweepingScan { axis, speed, .. } => {
                    assert_eq!(axis, Axis::X);
                    speed
                }
                _ => panic!("{} is not a scan", p.label),
            })
            .collect();
        assert_eq!(speeds.len(), VERTICAL_SCANS.len());
        for (i, a) in speeds.iter().enumerate() {
            for b in &speeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
