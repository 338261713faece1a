// Data-driven scene configuration.
//
// All tunables the animation driver and the two randomised motifs read live
// in `SceneConfig`, loadable from JSON. Motif shapes themselves (anchor
// points, colours, stagger tables) are embedded constants in `motifs/`; the
// config only covers what a host might reasonably want to tweak without
// recompiling: timing, the random-placement counts and radii, and the camera.
//
// Parameters are grouped into nested sub-structs (`AnimationParams`,
// `ParticleParams`, `ConnectionParams`, `CameraParams`). Every struct carries
// `#[serde(default)]`, so a partial JSON document overrides only the fields
// it names.
//
// See also: `animate.rs` for the driver that reads `AnimationParams`,
// `motifs/field.rs` for the particle and connection builders, `camera.rs`
// for the perspective camera.
//
// The config is never mutated at runtime.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameter groups
// ---------------------------------------------------------------------------

/// Timing and motion constants for the per-frame driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    /// Seconds an entrance fade takes from hidden to settled.
    pub fade_duration: f32,
    /// Global elapsed time (seconds) after which flow strings start pulsing.
    pub pulse_start: f32,
    /// Per-frame exponential smoothing factor applied to the pointer.
    pub pointer_smoothing: f32,
    /// Fraction of the viewport height over which scrolling fades the scene
    /// to nothing.
    pub scroll_fade_fraction: f32,
    /// World units the scene rises per pixel scrolled.
    pub scroll_lift: f32,
    /// Relative amplitude of the building shell's breathing scale.
    pub breathing_amplitude: f32,
    /// Angular speed (rad/s) of the breathing oscillation.
    pub breathing_speed: f32,
    /// Peak idle sway of the world rotation, in radians.
    pub sway_amplitude: f32,
    /// Radians of world rotation per unit of smoothed pointer offset.
    pub parallax_strength: f32,
    /// Constant downward tilt of the whole scene, in radians.
    pub base_tilt: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            fade_duration: 0.9,
            pulse_start: 1.5,
            pointer_smoothing: 0.025,
            scroll_fade_fraction: 0.55,
            scroll_lift: 0.004,
            breathing_amplitude: 0.012,
            breathing_speed: 0.9,
            sway_amplitude: 0.12,
            parallax_strength: 0.25,
            base_tilt: 0.18,
        }
    }
}

/// Ambient particle cloud placement and drift.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleParams {
    pub count: usize,
    /// Inner radius of the spherical shell particles are sampled in.
    pub radius_min: f32,
    /// Outer radius of the spherical shell.
    pub radius_max: f32,
    /// Peak per-frame displacement of a single particle, per axis.
    pub drift_amplitude: f32,
    /// Rendered point size in world units.
    pub point_size: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: 220,
            radius_min: 3.5,
            radius_max: 9.0,
            drift_amplitude: 0.0025,
            point_size: 0.05,
        }
    }
}

/// Connection-mesh node placement and edge selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    pub node_count: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Node pairs closer than this are joined by a line.
    pub distance_threshold: f32,
    /// Hard cap on the number of emitted edges.
    pub max_edges: usize,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            node_count: 40,
            radius_min: 2.8,
            radius_max: 6.0,
            distance_threshold: 2.2,
            max_edges: 80,
        }
    }
}

/// Perspective camera placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Distance from the world origin along +Z.
    pub distance: f32,
    /// Camera height above the world origin.
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            distance: 11.0,
            height: 2.4,
            near: 0.1,
            far: 100.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level scene configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for the particle and connection-node placement.
    pub seed: u64,
    pub animation: AnimationParams,
    pub particles: ParticleParams,
    pub connections: ConnectionParams,
    pub camera: CameraParams,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
