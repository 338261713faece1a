// Randomly placed filler: the ambient particle cloud and the connection mesh.
//
// These are the only motifs that use the `SceneRng`. Both sample points
// uniformly over directions on a spherical shell around the building. The
// particle cloud is one point primitive whose `Drift` motion holds a velocity
// and phase per particle; the connection mesh joins nearby node pairs with
// straight lines, up to a fixed edge cap.

use glam::Vec3;
use shoebox_prng::SceneRng;

use super::stagger;
use crate::assemble::Layer;
use crate::config::{ConnectionParams, ParticleParams};
use crate::geometry::{gradient, sample_line, sphere_point};
use crate::palette::{COOL_ICE, COOL_MID, Rgb, STRUCTURE, WARM_MID, WARM_SOFT};
use crate::scene::{AnimationTag, Motion, ParticleMotion, Primitive, SceneGroup};

const PARTICLE_DELAY: f32 = 1.8;
const PARTICLE_TARGET: f32 = 0.55;

const EDGE_SEGS: usize = 16;
const EDGE_TARGET: f32 = 0.18;
const NODE_TARGET: f32 = 0.3;
const NODE_SIZE: f32 = 0.04;
/// How far edge colours are pulled toward the structure tone.
const EDGE_NEUTRAL_BLEND: f32 = 0.55;

pub fn ambient_particles(rng: &mut SceneRng, params: &ParticleParams) -> SceneGroup {
    let mut positions = Vec::with_capacity(params.count);
    let mut colors = Vec::with_capacity(params.count);
    let mut particles = Vec::with_capacity(params.count);
    let reach = params.radius_max.max(f32::EPSILON);

    for _ in 0..params.count {
        let p = sphere_point(rng, params.radius_min, params.radius_max);
        // Warm above the horizon, cool below.
        let warmth = (p.y / reach * 0.5 + 0.5).clamp(0.0, 1.0);
        colors.push(COOL_ICE.rgb.lerp(WARM_SOFT.rgb, warmth).desaturate(0.3));
        positions.push(p);

        let velocity = Vec3::new(
            rng.range_f32(-1.0, 1.0),
            rng.range_f32(-0.6, 0.6),
            rng.range_f32(-1.0, 1.0),
        ) * params.drift_amplitude;
        particles.push(ParticleMotion {
            velocity,
            phase: rng.angle(),
        });
    }

    let tag = AnimationTag::fade(PARTICLE_DELAY, PARTICLE_TARGET)
        .with_motion(Motion::Drift { particles });
    let mut group = SceneGroup::new(Layer::Particles.name());
    group.push(Primitive::points(
        "particles",
        positions,
        colors,
        params.point_size,
        tag,
    ));
    group
}

/// Index pairs `(i, j)` with `i < j` whose nodes are closer than
/// `threshold`, in lexicographic order, truncated at `max_edges`.
pub fn connection_pairs(nodes: &[Vec3], threshold: f32, max_edges: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..nodes.len() {
        for j in i + 1..nodes.len() {
            if pairs.len() >= max_edges {
                return pairs;
            }
            if nodes[i].distance(nodes[j]) < threshold {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

pub fn connection_mesh(rng: &mut SceneRng, params: &ConnectionParams) -> SceneGroup {
    let nodes: Vec<Vec3> = (0..params.node_count)
        .map(|_| sphere_point(rng, params.radius_min, params.radius_max))
        .collect();

    let mut group = SceneGroup::new(Layer::Connections.name());
    for (k, (i, j)) in connection_pairs(&nodes, params.distance_threshold, params.max_edges)
        .into_iter()
        .enumerate()
    {
        let (a, b) = (nodes[i], nodes[j]);
        let bias = if (a.y + b.y) * 0.5 >= 0.0 { WARM_MID } else { COOL_MID };
        let positions = sample_line(&[a, b], EDGE_SEGS);
        let colors = gradient(bias.rgb, bias.rgb, positions.len(), EDGE_NEUTRAL_BLEND);
        group.push(Primitive::line(
            format!("link-{i}-{j}"),
            positions,
            colors,
            AnimationTag::fade(stagger(0.7, 0.01, k), EDGE_TARGET),
        ));
    }

    let node_colors: Vec<Rgb> = vec![STRUCTURE.rgb; nodes.len()];
    group.push(Primitive::points(
        "link-nodes",
        nodes,
        node_colors,
        NODE_SIZE,
        AnimationTag::fade(0.6, NODE_TARGET),
    ));
    group
}
