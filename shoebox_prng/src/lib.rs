// Seedable pseudo-random source for procedural scene placement.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019), expanded from a single
// `u64` seed with SplitMix64. Only two motifs draw from it: the ambient
// particle cloud and the connection-mesh nodes. Everything else in the scene
// is a pure function of embedded constants.
//
// Placement is allowed to differ between runs (the viewer seeds from the
// clock unless told otherwise), but tests and the headless CLI pass a fixed
// seed so a given seed always yields the same scene.
//
// See also: `shoebox_scene::geometry::sphere_point` and
// `shoebox_scene::motifs::field` for the callers.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Xoshiro256++ generator state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneRng {
    s: [u64; 4],
}

impl SceneRng {
    /// Create a generator from a `u64` seed.
    ///
    /// Two generators built from the same seed produce identical streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform `f32` in [0, 1), built from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform `f32` in `[low, high)`. Returns `low` when the range is empty.
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        low + self.next_f32() * (high - low)
    }

    /// Uniform angle in `[0, 2π)`.
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * TAU
    }

    /// Point uniformly distributed over directions, at a radius drawn
    /// uniformly from `[radius_min, radius_max)`.
    ///
    /// `θ ~ U(0, 2π)`, `φ = acos(2U − 1)`. Returned as `[x, y, z]` with Y up.
    pub fn sphere_point(&mut self, radius_min: f32, radius_max: f32) -> [f32; 3] {
        let theta = self.angle();
        let phi = (2.0 * self.next_f32() - 1.0).clamp(-1.0, 1.0).acos();
        let r = self.range_f32(radius_min, radius_max);
        [
            r * phi.sin() * theta.cos(),
            r * phi.cos(),
            r * phi.sin() * theta.sin(),
        ]
    }
}

/// SplitMix64 step, used only to expand the seed into xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SceneRng::new(42);
        let mut b = SceneRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SceneRng::new(42);
        let mut b = SceneRng::new(43);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn f32_in_unit_range() {
        let mut rng = SceneRng::new(12345);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v), "f32 out of range: {v}");
        }
    }

    #[test]
    fn range_f32_within_bounds() {
        let mut rng = SceneRng::new(777);
        for _ in 0..10_000 {
            let v = rng.range_f32(1.5, 3.5);
            assert!((1.5..3.5).contains(&v), "range_f32 out of range: {v}");
        }
    }

    #[test]
    fn empty_range_returns_low() {
        let mut rng = SceneRng::new(1);
        assert_eq!(rng.range_f32(2.0, 2.0), 2.0);
    }

    #[test]
    fn sphere_points_respect_radius_shell() {
        let mut rng = SceneRng::new(9);
        for _ in 0..5_000 {
            let [x, y, z] = rng.sphere_point(3.0, 6.0);
            let r = (x * x + y * y + z * z).sqrt();
            assert!(r >= 3.0 - 1e-4 && r < 6.0 + 1e-4, "radius {r} outside shell");
        }
    }

    #[test]
    fn sphere_points_cover_both_hemispheres() {
        let mut rng = SceneRng::new(5);
        let above = (0..2_000)
            .filter(|_| rng.sphere_point(1.0, 2.0)[1] > 0.0)
            .count();
        // Roughly half should be above the equator.
        assert!((800..1200).contains(&above), "above = {above}");
    }

    #[test]
    fn serialization_roundtrip_continues_stream() {
        let mut rng = SceneRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: SceneRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}
