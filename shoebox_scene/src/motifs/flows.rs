// Flow strings: heat gain entering the envelope, heat loss leaving it, and
// convection loops inside.
//
// All three are "organic" strings: sampled between anchors, bowed sideways
// by `sin(t·π)·amplitude`, with the bow direction flipped on odd indices so
// neighbouring strings don't run in lockstep. Each carries a `PulsingFlow`
// motion holding a snapshot of its gradient for the driver's brightness wave.
//
// Heat and cold strings share one parameter-table routine (`flow_set`);
// convection arcs have multi-anchor paths and get their own.

use glam::Vec3;

use super::{FLOOR_Y, HALF_X, ROOF_Y, parity_sign, stagger};
use crate::assemble::Layer;
use crate::geometry::{gradient, organic_path};
use crate::palette::{COOL_DEEP, COOL_ICE, COOL_MID, ColorStop, WARM_HOT, WARM_MID, WARM_SOFT};
use crate::scene::{AnimationTag, Motion, Primitive, SceneGroup};

/// One bundle of flow strings, fanned out between a source and a sink.
///
/// String `i` of `count` gets fan coordinate `u ∈ [-1, 1]` and runs from
/// `source + source_spread·u` to `sink + sink_spread·u`.
struct FlowSet {
    layer: Layer,
    prefix: &'static str,
    count: usize,
    source: Vec3,
    source_spread: Vec3,
    sink: Vec3,
    sink_spread: Vec3,
    from: ColorStop,
    to: ColorStop,
    structure_blend: f32,
    amplitude: f32,
    segs: usize,
    speed: f32,
    speed_step: f32,
    phase_step: f32,
    delay: f32,
    delay_step: f32,
    target: f32,
}

const HEAT: FlowSet = FlowSet {
    layer: Layer::HeatStrings,
    prefix: "heat",
    count: 9,
    source: Vec3::new(-6.5, 2.4, 0.0),
    source_spread: Vec3::new(0.4, 0.6, 2.0),
    sink: Vec3::new(-HALF_X, 0.2, 0.0),
    sink_spread: Vec3::new(0.0, 0.5, 1.0),
    from: WARM_SOFT,
    to: WARM_HOT,
    structure_blend: 0.0,
    amplitude: 0.35,
    segs: 56,
    speed: 0.8,
    speed_step: 0.15,
    phase_step: 0.37,
    delay: 1.2,
    delay_step: 0.06,
    target: 0.9,
};

const COLD: FlowSet = FlowSet {
    layer: Layer::ColdStrings,
    prefix: "cold",
    count: 8,
    source: Vec3::new(HALF_X, -0.2, 0.0),
    source_spread: Vec3::new(0.0, 0.5, 1.0),
    sink: Vec3::new(6.5, -0.8, 0.0),
    sink_spread: Vec3::new(0.4, 0.4, 2.0),
    from: COOL_ICE,
    to: COOL_DEEP,
    structure_blend: 0.1,
    amplitude: 0.3,
    segs: 56,
    speed: 0.7,
    speed_step: 0.12,
    phase_step: 0.41,
    delay: 1.35,
    delay_step: 0.06,
    target: 0.85,
};

/// Vertical stagger of string starts so the fan isn't a flat sheet.
const START_WOBBLE: f32 = 0.2;

pub fn heat_strings() -> SceneGroup {
    flow_set(&HEAT)
}

pub fn cold_strings() -> SceneGroup {
    flow_set(&COLD)
}

fn flow_set(set: &FlowSet) -> SceneGroup {
    let mut group = SceneGroup::new(set.layer.name());
    let spans = set.count.saturating_sub(1).max(1) as f32;

    for i in 0..set.count {
        let u = if set.count > 1 { i as f32 / spans * 2.0 - 1.0 } else { 0.0 };
        let sign = parity_sign(i);
        let start = set.source + set.source_spread * u + Vec3::Y * START_WOBBLE * sign;
        let end = set.sink + set.sink_spread * u;
        let amplitude = set.amplitude * sign * (1.0 + 0.15 * (i % 3) as f32);

        let positions = organic_path(&[start, end], set.segs, amplitude);
        let colors = gradient(set.from.rgb, set.to.rgb, positions.len(), set.structure_blend);
        let tag = AnimationTag::fade(stagger(set.delay, set.delay_step, i), set.target).with_motion(
            Motion::PulsingFlow {
                speed: set.speed + set.speed_step * (i % 3) as f32,
                phase: i as f32 * set.phase_step,
                original: colors.clone(),
            },
        );
        group.push(Primitive::line(format!("{}-{i}", set.prefix), positions, colors, tag));
    }
    group
}

/// Depth positions of the convection loops.
const ARC_Z: [f32; 4] = [-0.8, -0.27, 0.27, 0.8];
const ARC_SEGS: usize = 72;
const ARC_AMPLITUDE: f32 = 0.12;

pub fn convection_arcs() -> SceneGroup {
    let mut group = SceneGroup::new(Layer::Convection.name());

    for (i, &z) in ARC_Z.iter().enumerate() {
        // Rise over the warm side, cross under the roof, sink on the cool side.
        let anchors = [
            Vec3::new(-1.6, FLOOR_Y + 0.2, z),
            Vec3::new(-1.4, ROOF_Y - 0.3, z),
            Vec3::new(1.4, ROOF_Y - 0.3, z),
            Vec3::new(1.6, FLOOR_Y + 0.2, z),
        ];
        let positions = organic_path(&anchors, ARC_SEGS, ARC_AMPLITUDE * parity_sign(i));
        let colors = gradient(WARM_MID.rgb, COOL_MID.rgb, positions.len(), 0.2);
        let tag = AnimationTag::fade(stagger(1.6, 0.1, i), 0.65).with_motion(Motion::PulsingFlow {
            speed: 0.6,
            phase: i as f32 * 0.5,
            original: colors.clone(),
        });
        group.push(Primitive::line(format!("convection-{i}"), positions, colors, tag));
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motifs::{HALF_Z, shell_bounds};

    fn assert_pulsing(group: &SceneGroup) {
        group.for_each_primitive(&mut |p| {
            assert!(p.is_consistent(), "{} inconsistent", p.label);
            match &p.tag.motion {
                Motion::PulsingFlow { original, .. } => {
                    assert_eq!(Some(original), p.colors.as_ref());
                }
                other => panic!("{} has motion {other:?}", p.label),
            }
            assert!((16..=80).contains(&(p.vertex_count() - 1)));
        });
    }

    #[test]
    fn heat_strings_pulse_and_end_on_the_envelope() {
        let heat = heat_strings();
        assert_eq!(heat.primitive_count(), HEAT.count);
        assert_pulsing(&heat);
        heat.for_each_primitive(&mut |p| {
            let end = *p.positions.last().unwrap();
            assert!((end.x + HALF_X).abs() < 1e-5, "{} ends at {end}", p.label);
        });
    }

    #[test]
    fn cold_strings_leave_from_the_envelope() {
        let cold = cold_strings();
        assert_eq!(cold.primitive_count(), COLD.count);
        assert_pulsing(&cold);
        cold.for_each_primitive(&mut |p| {
            assert!((p.positions[0].x - HALF_X).abs() < 1e-5);
        });
    }

    #[test]
    fn neighbouring_strings_bow_opposite_ways() {
        let heat = heat_strings();
        let strings = heat.primitives();
        let bow = |p: &Primitive| {
            let a = p.positions[0];
            let b = *p.positions.last().unwrap();
            let mid = p.positions[p.positions.len() / 2];
            (mid - (a + b) * 0.5).dot(crate::geometry::lateral(b - a))
        };
        assert!(bow(strings[0]) > 0.0);
        assert!(bow(strings[1]) < 0.0);
    }

    #[test]
    fn warm_strings_heat_up_toward_the_building() {
        let heat = heat_strings();
        let first = heat.primitives()[0];
        let colors = first.colors.as_ref().unwrap();
        assert_eq!(colors[0], WARM_SOFT.rgb);
        assert_eq!(*colors.last().unwrap(), WARM_HOT.rgb);
    }

    #[test]
    fn convection_loops_stay_inside() {
        let (min, max) = shell_bounds();
        let arcs = convection_arcs();
        assert_eq!(arcs.primitive_count(), ARC_Z.len());
        assert_pulsing(&arcs);
        arcs.for_each_primitive(&mut |p| {
            for v in &p.positions {
                assert!(v.cmpgt(min).all() && v.cmplt(max).all(), "{v} escapes");
                assert!(v.z.abs() < HALF_Z);
            }
        });
    }
}
