// Shared line sampling and colour-gradient routines.
//
// Motifs describe themselves as data (anchor points, palette stops, bulge
// amplitudes) and hand that data to the helpers here. Nothing in this module
// knows which motif it is serving.
//
// Conventions:
// - A line with `segs` segments has `segs + 1` vertices. Vertex `i` sits at
//   parametric position `t = i / segs`.
// - Y is up. "Lateral" displacement for organic strings is along
//   `normalize(direction × Y)`, i.e. horizontal and perpendicular to the line.
//
// See also: `motifs/` for the callers, `palette.rs` for the colour stops.

use glam::Vec3;
use shoebox_prng::SceneRng;
use std::f32::consts::{PI, TAU};

use crate::palette::Rgb;

/// Parametric position of vertex `i` on a line of `segs` segments.
pub fn param(i: usize, segs: usize) -> f32 {
    if segs == 0 {
        return 0.0;
    }
    i as f32 / segs as f32
}

/// Sample a polyline through `anchors` into `segs + 1` evenly spaced (in
/// parameter, not arc length) points. Each span between consecutive anchors
/// gets an equal share of the parameter range.
///
/// Fewer than two anchors yields the anchors unchanged.
pub fn sample_line(anchors: &[Vec3], segs: usize) -> Vec<Vec3> {
    if anchors.len() < 2 {
        return anchors.to_vec();
    }
    let spans = (anchors.len() - 1) as f32;
    (0..=segs)
        .map(|i| {
            let s = param(i, segs) * spans;
            let k = (s.floor() as usize).min(anchors.len() - 2);
            anchors[k].lerp(anchors[k + 1], s - k as f32)
        })
        .collect()
}

/// Horizontal unit vector perpendicular to `direction`. Falls back to +X for
/// vertical directions, where the cross product with Y vanishes.
pub fn lateral(direction: Vec3) -> Vec3 {
    let side = direction.cross(Vec3::Y);
    if side.length_squared() < 1e-8 {
        Vec3::X
    } else {
        side.normalize()
    }
}

/// Sample `anchors` like `sample_line`, then bow the result sideways by
/// `sin(t·π) · amplitude` along the lateral of the overall start→end
/// direction. The endpoints stay on their anchors.
///
/// Callers alternate the sign of `amplitude` by string index.
pub fn organic_path(anchors: &[Vec3], segs: usize, amplitude: f32) -> Vec<Vec3> {
    let mut points = sample_line(anchors, segs);
    let (Some(first), Some(last)) = (anchors.first(), anchors.last()) else {
        return points;
    };
    let side = lateral(*last - *first);
    for (i, p) in points.iter_mut().enumerate() {
        let bulge = (param(i, segs) * PI).sin() * amplitude;
        *p += side * bulge;
    }
    points
}

/// Which plane a circle is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    /// Horizontal, normal +Y.
    XZ,
    /// Vertical, normal +Z.
    XY,
    /// Vertical, normal +X.
    YZ,
}

/// Closed circle of `segs` segments (first and last vertex coincide).
pub fn circle(center: Vec3, radius: f32, segs: usize, plane: Plane) -> Vec<Vec3> {
    (0..=segs)
        .map(|i| {
            let a = param(i, segs) * TAU;
            let (s, c) = a.sin_cos();
            let offset = match plane {
                Plane::XZ => Vec3::new(c, 0.0, s),
                Plane::XY => Vec3::new(c, s, 0.0),
                Plane::YZ => Vec3::new(0.0, c, s),
            };
            center + offset * radius
        })
        .collect()
}

/// Axis-aligned rectangle loop in a horizontal plane, as five anchors.
pub fn rect_xz(center: Vec3, half_x: f32, half_z: f32) -> [Vec3; 5] {
    [
        center + Vec3::new(-half_x, 0.0, -half_z),
        center + Vec3::new(half_x, 0.0, -half_z),
        center + Vec3::new(half_x, 0.0, half_z),
        center + Vec3::new(-half_x, 0.0, half_z),
        center + Vec3::new(-half_x, 0.0, -half_z),
    ]
}

/// Axis-aligned rectangle loop in a vertical plane at fixed `x`.
pub fn rect_yz(x: f32, y0: f32, y1: f32, z0: f32, z1: f32) -> [Vec3; 5] {
    [
        Vec3::new(x, y0, z0),
        Vec3::new(x, y0, z1),
        Vec3::new(x, y1, z1),
        Vec3::new(x, y1, z0),
        Vec3::new(x, y0, z0),
    ]
}

/// Axis-aligned rectangle loop in a vertical plane at fixed `z`.
pub fn rect_xy(z: f32, x0: f32, x1: f32, y0: f32, y1: f32) -> [Vec3; 5] {
    [
        Vec3::new(x0, y0, z),
        Vec3::new(x1, y0, z),
        Vec3::new(x1, y1, z),
        Vec3::new(x0, y1, z),
        Vec3::new(x0, y0, z),
    ]
}

/// Per-vertex gradient from `from` to `to` over `count` vertices, each then
/// pulled toward the structure colour by `structure_blend`.
pub fn gradient(from: Rgb, to: Rgb, count: usize, structure_blend: f32) -> Vec<Rgb> {
    let segs = count.saturating_sub(1);
    (0..count)
        .map(|i| from.lerp(to, param(i, segs)).desaturate(structure_blend))
        .collect()
}

/// Uniform-on-sphere sample at a radius in `[radius_min, radius_max)`.
pub fn sphere_point(rng: &mut SceneRng, radius_min: f32, radius_max: f32) -> Vec3 {
    Vec3::from_array(rng.sphere_point(radius_min, radius_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{COOL_DEEP, STRUCTURE, WARM_HOT};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn sample_line_has_segs_plus_one_points() {
        let pts = sample_line(&[Vec3::ZERO, Vec3::X], 16);
        assert_eq!(pts.len(), 17);
        assert!(close(pts[0], Vec3::ZERO));
        assert!(close(pts[16], Vec3::X));
        assert!(close(pts[8], Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn sample_line_passes_through_interior_anchors() {
        let anchors = [Vec3::ZERO, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
        let pts = sample_line(&anchors, 20);
        assert_eq!(pts.len(), 21);
        assert!(close(pts[10], Vec3::Y));
        assert!(close(pts[20], anchors[2]));
    }

    #[test]
    fn sample_line_with_single_anchor_is_passthrough() {
        assert_eq!(sample_line(&[Vec3::ONE], 10), vec![Vec3::ONE]);
    }

    #[test]
    fn organic_path_keeps_endpoints_and_bulges_midpoint() {
        let start = Vec3::ZERO;
        let end = Vec3::new(4.0, 0.0, 0.0);
        let pts = organic_path(&[start, end], 32, 0.5);
        assert!(close(pts[0], start));
        assert!(close(pts[32], end));
        // Direction +X crossed with +Y is +Z.
        let mid = pts[16];
        assert!((mid.z.abs() - 0.5).abs() < 1e-5, "mid = {mid}");
        assert!(mid.y.abs() < 1e-6);
    }

    #[test]
    fn organic_path_sign_flips_side() {
        let a = organic_path(&[Vec3::ZERO, Vec3::X], 16, 0.3);
        let b = organic_path(&[Vec3::ZERO, Vec3::X], 16, -0.3);
        assert!((a[8].z + b[8].z).abs() < 1e-6);
    }

    #[test]
    fn lateral_handles_vertical_direction() {
        assert_eq!(lateral(Vec3::Y), Vec3::X);
    }

    #[test]
    fn circle_is_closed_and_on_radius() {
        let c = Vec3::new(1.0, 2.0, 3.0);
        let pts = circle(c, 0.5, 48, Plane::YZ);
        assert_eq!(pts.len(), 49);
        assert!(close(pts[0], pts[48]));
        for p in &pts {
            assert!(((*p - c).length() - 0.5).abs() < 1e-5);
            assert!((p.x - c.x).abs() < 1e-6);
        }
    }

    #[test]
    fn gradient_runs_between_stops() {
        let g = gradient(WARM_HOT.rgb, COOL_DEEP.rgb, 5, 0.0);
        assert_eq!(g.len(), 5);
        assert_eq!(g[0], WARM_HOT.rgb);
        assert_eq!(g[4], COOL_DEEP.rgb);
    }

    #[test]
    fn gradient_structure_blend_desaturates() {
        let g = gradient(WARM_HOT.rgb, WARM_HOT.rgb, 3, 1.0);
        assert!(g.iter().all(|c| *c == STRUCTURE.rgb));
    }

    #[test]
    fn sphere_point_is_seed_reproducible() {
        let mut a = SceneRng::new(3);
        let mut b = SceneRng::new(3);
        for _ in 0..50 {
            assert_eq!(sphere_point(&mut a, 1.0, 2.0), sphere_point(&mut b, 1.0, 2.0));
        }
    }
}
