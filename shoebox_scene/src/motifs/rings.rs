// Radiation rings: concentric circles around the room's heat emitter,
// hottest and most opaque at the centre.

use glam::Vec3;

use super::{FLOOR_Y, HALF_X, stagger};
use crate::assemble::Layer;
use crate::geometry::{Plane, circle};
use crate::palette::{WARM_HOT, WARM_SOFT};
use crate::scene::{AnimationTag, Primitive, SceneGroup};

/// Emitter position: low on the warm end wall, just inside the shell.
const EMITTER: Vec3 = Vec3::new(-HALF_X + 0.25, FLOOR_Y + 0.5, 0.0);
const RING_RADII: [f32; 4] = [0.2, 0.35, 0.5, 0.65];
const RING_SEGS: usize = 48;

pub fn radiation_rings() -> SceneGroup {
    let mut group = SceneGroup::new(Layer::RadiationRings.name());
    let last = (RING_RADII.len() - 1) as f32;

    for (i, &radius) in RING_RADII.iter().enumerate() {
        let fraction = i as f32 / last;
        let color = WARM_HOT.rgb.lerp(WARM_SOFT.rgb, fraction);
        let target = 0.7 - 0.12 * i as f32;
        group.push(Primitive::solid_line(
            format!("ring-{i}"),
            circle(EMITTER, radius, RING_SEGS, Plane::YZ),
            color,
            AnimationTag::fade(stagger(2.0, 0.12, i), target),
        ));
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_grow_outward_and_dim() {
        let rings = radiation_rings();
        let prims = rings.primitives();
        assert_eq!(prims.len(), RING_RADII.len());
        for pair in prims.windows(2) {
            let r0 = (pair[0].positions[0] - EMITTER).length();
            let r1 = (pair[1].positions[0] - EMITTER).length();
            assert!(r1 > r0);
            assert!(pair[1].tag.target < pair[0].tag.target);
            assert!(pair[1].tag.delay > pair[0].tag.delay);
        }
        assert!(prims.iter().all(|p| p.tag.target > 0.0));
    }
}
