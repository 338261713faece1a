// Scene assembly: runs every motif builder once and stacks the results
// under the world root in a fixed back-to-front order.
//
// Layer order only matters for draw order (later layers paint over earlier
// ones in the additive renderer); no logic depends on it. The driver finds
// the layers it animates specifically (the building shell) through
// `World::layer`, which relies on `assemble` pushing exactly one group per
// `Layer` in `Layer::ALL` order.
//
// See also: `motifs/` for the builders, `animate.rs` for the per-frame
// driver that mutates the assembled `World`.

use shoebox_prng::SceneRng;
use tracing::debug;

use crate::config::SceneConfig;
use crate::motifs;
use crate::scene::{SceneGroup, SceneNode};

/// One top-level group per motif, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Grid,
    Connections,
    GlowHalo,
    BuildingShell,
    Interior,
    Convection,
    HeatStrings,
    ColdStrings,
    RadiationRings,
    Particles,
    ScanLine,
    VerticalScans,
}

impl Layer {
    pub const ALL: [Layer; 12] = [
        Layer::Grid,
        Layer::Connections,
        Layer::GlowHalo,
        Layer::BuildingShell,
        Layer::Interior,
        Layer::Convection,
        Layer::HeatStrings,
        Layer::ColdStrings,
        Layer::RadiationRings,
        Layer::Particles,
        Layer::ScanLine,
        Layer::VerticalScans,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Layer::Grid => "grid",
            Layer::Connections => "connections",
            Layer::GlowHalo => "glow-halo",
            Layer::BuildingShell => "building-shell",
            Layer::Interior => "interior",
            Layer::Convection => "convection",
            Layer::HeatStrings => "heat-strings",
            Layer::ColdStrings => "cold-strings",
            Layer::RadiationRings => "radiation-rings",
            Layer::Particles => "particles",
            Layer::ScanLine => "scan-line",
            Layer::VerticalScans => "vertical-scans",
        }
    }
}

/// The root of the scene. The root group's transform is the world's
/// rotation, translation, and scale, rewritten by the driver every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub root: SceneGroup,
}

impl World {
    pub fn layer(&self, layer: Layer) -> Option<&SceneGroup> {
        match self.root.children.get(layer as usize) {
            Some(SceneNode::Group(g)) if g.name == layer.name() => Some(g),
            _ => None,
        }
    }

    pub fn layer_mut(&mut self, layer: Layer) -> Option<&mut SceneGroup> {
        match self.root.children.get_mut(layer as usize) {
            Some(SceneNode::Group(g)) if g.name == layer.name() => Some(g),
            _ => None,
        }
    }

    pub fn primitive_count(&self) -> usize {
        self.root.primitive_count()
    }
}

/// Build the whole scene. Each builder runs exactly once.
pub fn assemble(config: &SceneConfig) -> World {
    let mut rng = SceneRng::new(config.seed);
    // Random motifs draw in a fixed order so a seed pins both of them.
    let mut connections = Some(motifs::connection_mesh(&mut rng, &config.connections));
    let mut particles = Some(motifs::ambient_particles(&mut rng, &config.particles));

    let mut root = SceneGroup::new("world");
    for layer in Layer::ALL {
        let group = match layer {
            Layer::Grid => motifs::ground_grid(),
            Layer::Connections => connections.take().unwrap_or_default(),
            Layer::GlowHalo => motifs::envelope_glow(),
            Layer::BuildingShell => motifs::building_shell(),
            Layer::Interior => motifs::interior_partitions(),
            Layer::Convection => motifs::convection_arcs(),
            Layer::HeatStrings => motifs::heat_strings(),
            Layer::ColdStrings => motifs::cold_strings(),
            Layer::RadiationRings => motifs::radiation_rings(),
            Layer::Particles => particles.take().unwrap_or_default(),
            Layer::ScanLine => motifs::scan_line(),
            Layer::VerticalScans => motifs::vertical_scans(),
        };
        root.push_group(group);
    }

    let world = World { root };
    debug!(
        seed = config.seed,
        primitives = world.primitive_count(),
        vertices = world.root.vertex_count(),
        "scene assembled"
    );
    world
}
