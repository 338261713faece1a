// Motif builders, one pure function per visual element.
//
// Each builder returns a `SceneGroup` named after its `Layer`, filled with
// primitives whose `AnimationTag`s carry a staggered `delay` (so a motif
// cascades in rather than popping) and a steady-state `target` opacity.
// Builders read nothing but their arguments and the constant tables in their
// own files; only `field.rs` draws from a `SceneRng`.
//
// Submodules:
// - `ground.rs`:   ground grid.
// - `building.rs`: building shell, interior partitions, envelope glow.
// - `flows.rs`:    heat strings, cold strings, convection arcs.
// - `field.rs`:    ambient particles, connection mesh.
// - `scans.rs`:    horizontal scan line, vertical scans.
// - `rings.rs`:    radiation rings.
//
// The shoebox itself is an axis-aligned box centred on the origin, long
// side on X; the constants below are shared by every motif that hugs it.
//
// See also: `geometry.rs` for the sampling helpers, `assemble.rs` for the
// order the groups are attached in, `animate.rs` for how the tags are read.

mod building;
mod field;
mod flows;
mod ground;
mod rings;
mod scans;

pub use building::{building_shell, envelope_glow, interior_partitions};
pub use field::{ambient_particles, connection_mesh, connection_pairs};
pub use flows::{cold_strings, convection_arcs, heat_strings};
pub use ground::ground_grid;
pub use rings::radiation_rings;
pub use scans::{scan_line, vertical_scans};

use glam::Vec3;

/// Half-extent of the shoebox along X.
pub const HALF_X: f32 = 2.0;
/// Half-extent of the shoebox along Z.
pub const HALF_Z: f32 = 1.3;
/// Floor height of the shoebox.
pub const FLOOR_Y: f32 = -1.1;
/// Roof height of the shoebox.
pub const ROOF_Y: f32 = 1.1;

/// Minimum and maximum corners of the shoebox.
pub fn shell_bounds() -> (Vec3, Vec3) {
    (
        Vec3::new(-HALF_X, FLOOR_Y, -HALF_Z),
        Vec3::new(HALF_X, ROOF_Y, HALF_Z),
    )
}

/// The 12 edges of an axis-aligned box: 4 floor, 4 roof, 4 verticals.
pub(crate) fn box_edges(min: Vec3, max: Vec3) -> [(Vec3, Vec3); 12] {
    let c = |x: bool, y: bool, z: bool| {
        Vec3::new(
            if x { max.x } else { min.x },
            if y { max.y } else { min.y },
            if z { max.z } else { min.z },
        )
    };
    [
        (c(false, false, false), c(true, false, false)),
        (c(true, false, false), c(true, false, true)),
        (c(true, false, true), c(false, false, true)),
        (c(false, false, true), c(false, false, false)),
        (c(false, true, false), c(true, true, false)),
        (c(true, true, false), c(true, true, true)),
        (c(true, true, true), c(false, true, true)),
        (c(false, true, true), c(false, true, false)),
        (c(false, false, false), c(false, true, false)),
        (c(true, false, false), c(true, true, false)),
        (c(true, false, true), c(true, true, true)),
        (c(false, false, true), c(false, true, true)),
    ]
}

/// Fade delay for the `i`-th primitive of a motif.
pub(crate) fn stagger(base: f32, step: f32, i: usize) -> f32 {
    base + step * i as f32
}

/// +1 for even indices, −1 for odd.
pub(crate) fn parity_sign(i: usize) -> f32 {
    if i % 2 == 0 { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_twelve_distinct_axis_aligned_edges() {
        let (min, max) = shell_bounds();
        let edges = box_edges(min, max);
        for (i, (a, b)) in edges.iter().enumerate() {
            let d = (*b - *a).abs();
            let nonzero = [d.x, d.y, d.z].iter().filter(|v| **v > 1e-6).count();
            assert_eq!(nonzero, 1, "edge {i} not axis-aligned");
            for (c, e) in edges.iter().skip(i + 1) {
                let same = (a == c && b == e) || (a == e && b == c);
                assert!(!same, "duplicate edge {i}");
            }
        }
    }

    #[test]
    fn stagger_increases_with_index() {
        assert!(stagger(0.5, 0.1, 3) > stagger(0.5, 0.1, 2));
        assert_eq!(stagger(0.5, 0.1, 0), 0.5);
    }

    #[test]
    fn parity_alternates() {
        assert_eq!(parity_sign(0), 1.0);
        assert_eq!(parity_sign(1), -1.0);
        assert_eq!(parity_sign(4), 1.0);
    }
}
