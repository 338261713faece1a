// Scene tree: primitives, their animation tags, and owning groups.
//
// A `Primitive` is one renderable line strip or point cloud: vertex
// positions, an optional per-vertex colour buffer, a live opacity, and an
// `AnimationTag`. The tag holds the entrance-fade timing (`delay`, `target`)
// and a `Motion` variant describing any per-frame mutation beyond the fade.
// Motion-specific state lives inside its variant:
//
//   FadeOnly     : no per-frame mutation besides opacity.
//   PulsingFlow  : flow strings. Owns the immutable `original` colour
//                 snapshot; the live buffer is rebuilt from it every frame.
//   Drift        : particle systems. One `ParticleMotion` per vertex.
//   SweepingScan : scan lines. Moves the primitive's `offset` on one axis.
//   GlowPulse    : envelope glow. Drives the primitive's `glow_mul`.
//
// `SceneGroup` owns its children exclusively. Traversal helpers
// (`for_each_primitive`, `for_each_primitive_mut`, `visit_transformed`)
// walk the tree depth-first in child order, which is also draw order.
//
// Buffer-length agreement (positions vs colours vs motion records) is a
// construction-time invariant checked by `Primitive::is_consistent` in
// tests, not handled at runtime.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::palette::Rgb;

// ---------------------------------------------------------------------------
// Animation metadata
// ---------------------------------------------------------------------------

/// A world axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Per-particle drift record, index-aligned with the point cloud's vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleMotion {
    /// Peak per-frame displacement on each axis.
    pub velocity: Vec3,
    /// Phase offset of this particle's jitter, in radians.
    pub phase: f32,
}

/// Per-frame behaviour beyond the entrance fade.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    FadeOnly,
    PulsingFlow {
        speed: f32,
        phase: f32,
        /// Colour snapshot taken at construction. Never written after.
        original: Vec<Rgb>,
    },
    Drift {
        particles: Vec<ParticleMotion>,
    },
    SweepingScan {
        axis: Axis,
        /// Offset at the centre of the sweep.
        base: f32,
        amplitude: f32,
        /// Angular speed in rad/s.
        speed: f32,
    },
    GlowPulse {
        speed: f32,
        phase: f32,
        /// How far below 1.0 the multiplier dips, in [0, 1].
        depth: f32,
    },
}

/// Entrance-fade timing plus the primitive's motion.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationTag {
    /// Seconds after start before the fade begins. `None` opts the primitive
    /// out of fading and opacity resolution entirely.
    pub delay: Option<f32>,
    /// Steady-state opacity the fade approaches.
    pub target: f32,
    pub motion: Motion,
}

impl AnimationTag {
    pub fn fade(delay: f32, target: f32) -> Self {
        Self {
            delay: Some(delay),
            target,
            motion: Motion::FadeOnly,
        }
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }
}

// ---------------------------------------------------------------------------
// Primitive
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Connected line strip through every vertex in order.
    Line,
    /// Unconnected points.
    Points,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub label: String,
    pub kind: PrimitiveKind,
    pub positions: Vec<Vec3>,
    /// Per-vertex colours. `None` means every vertex uses `base_color`.
    pub colors: Option<Vec<Rgb>>,
    pub base_color: Rgb,
    /// Live material opacity. Starts at 0.
    pub opacity: f32,
    /// Translation applied on top of the parent transform (scan sweeps).
    pub offset: Vec3,
    /// Point size in world units; ignored for lines.
    pub point_size: f32,
    /// Glow multiplier used by opacity resolution. 1.0 unless driven by a
    /// `GlowPulse` motion.
    pub glow_mul: f32,
    pub tag: AnimationTag,
}

impl Primitive {
    /// Line strip with per-vertex colours.
    pub fn line(label: impl Into<String>, positions: Vec<Vec3>, colors: Vec<Rgb>, tag: AnimationTag) -> Self {
        let base_color = colors.first().copied().unwrap_or(Rgb::BLACK);
        Self {
            label: label.into(),
            kind: PrimitiveKind::Line,
            positions,
            colors: Some(colors),
            base_color,
            opacity: 0.0,
            offset: Vec3::ZERO,
            point_size: 0.0,
            glow_mul: 1.0,
            tag,
        }
    }

    /// Line strip in a single colour.
    pub fn solid_line(label: impl Into<String>, positions: Vec<Vec3>, color: Rgb, tag: AnimationTag) -> Self {
        Self {
            label: label.into(),
            kind: PrimitiveKind::Line,
            positions,
            colors: None,
            base_color: color,
            opacity: 0.0,
            offset: Vec3::ZERO,
            point_size: 0.0,
            glow_mul: 1.0,
            tag,
        }
    }

    /// Point cloud with per-vertex colours.
    pub fn points(
        label: impl Into<String>,
        positions: Vec<Vec3>,
        colors: Vec<Rgb>,
        point_size: f32,
        tag: AnimationTag,
    ) -> Self {
        let base_color = colors.first().copied().unwrap_or(Rgb::BLACK);
        Self {
            label: label.into(),
            kind: PrimitiveKind::Points,
            positions,
            colors: Some(colors),
            base_color,
            opacity: 0.0,
            offset: Vec3::ZERO,
            point_size,
            glow_mul: 1.0,
            tag,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn color_at(&self, i: usize) -> Rgb {
        self.colors
            .as_ref()
            .and_then(|c| c.get(i).copied())
            .unwrap_or(self.base_color)
    }

    /// True when every per-vertex buffer matches the position count.
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len();
        let colors_ok = self.colors.as_ref().is_none_or(|c| c.len() == n);
        let motion_ok = match &self.tag.motion {
            Motion::PulsingFlow { original, .. } => {
                original.len() == n && self.colors.is_some()
            }
            Motion::Drift { particles } => particles.len() == n,
            _ => true,
        };
        colors_ok && motion_ok
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Local translation, XYZ Euler rotation (radians), and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Primitive(Primitive),
    Group(SceneGroup),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGroup {
    pub name: String,
    pub transform: Transform,
    pub children: Vec<SceneNode>,
}

impl SceneGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.children.push(SceneNode::Primitive(primitive));
    }

    pub fn push_group(&mut self, group: SceneGroup) {
        self.children.push(SceneNode::Group(group));
    }

    /// Visit every primitive in the subtree, depth-first in child order.
    pub fn for_each_primitive<F: FnMut(&Primitive)>(&self, f: &mut F) {
        for child in &self.children {
            match child {
                SceneNode::Primitive(p) => f(p),
                SceneNode::Group(g) => g.for_each_primitive(f),
            }
        }
    }

    pub fn for_each_primitive_mut<F: FnMut(&mut Primitive)>(&mut self, f: &mut F) {
        for child in &mut self.children {
            match child {
                SceneNode::Primitive(p) => f(p),
                SceneNode::Group(g) => g.for_each_primitive_mut(f),
            }
        }
    }

    /// Visit every primitive together with its accumulated model matrix
    /// (`parent * this group's transform * ... * primitive offset`).
    pub fn visit_transformed<F: FnMut(&Primitive, Mat4)>(&self, parent: Mat4, f: &mut F) {
        let here = parent * self.transform.matrix();
        for child in &self.children {
            match child {
                SceneNode::Primitive(p) => f(p, here * Mat4::from_translation(p.offset)),
                SceneNode::Group(g) => g.visit_transformed(here, f),
            }
        }
    }

    pub fn primitive_count(&self) -> usize {
        let mut n = 0;
        self.for_each_primitive(&mut |_| n += 1);
        n
    }

    pub fn vertex_count(&self) -> usize {
        let mut n = 0;
        self.for_each_primitive(&mut |p| n += p.vertex_count());
        n
    }

    /// First primitive in the subtree whose label matches.
    pub fn find_primitive(&self, label: &str) -> Option<&Primitive> {
        self.children.iter().find_map(|child| match child {
            SceneNode::Primitive(p) if p.label == label => Some(p),
            SceneNode::Primitive(_) => None,
            SceneNode::Group(g) => g.find_primitive(label),
        })
    }

    pub fn primitives(&self) -> Vec<&Primitive> {
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }
}

fn collect<'a>(group: &'a SceneGroup, out: &mut Vec<&'a Primitive>) {
    for child in &group.children {
        match child {
            SceneNode::Primitive(p) => out.push(p),
            SceneNode::Group(g) => collect(g, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{COOL_MID, WARM_HOT};

    fn two_point_line(label: &str) -> Primitive {
        Primitive::line(
            label,
            vec![Vec3::ZERO, Vec3::X],
            vec![WARM_HOT.rgb, COOL_MID.rgb],
            AnimationTag::fade(0.0, 1.0),
        )
    }

    #[test]
    fn new_primitive_starts_invisible() {
        let p = two_point_line("a");
        assert_eq!(p.opacity, 0.0);
        assert_eq!(p.glow_mul, 1.0);
        assert!(p.is_consistent());
    }

    #[test]
    fn color_mismatch_is_inconsistent() {
        let mut p = two_point_line("a");
        p.positions.push(Vec3::Y);
        assert!(!p.is_consistent());
    }

    #[test]
    fn drift_records_must_match_vertices() {
        let mut p = Primitive::points(
            "cloud",
            vec![Vec3::ZERO; 3],
            vec![WARM_HOT.rgb; 3],
            0.05,
            AnimationTag::fade(0.0, 0.5),
        );
        p.tag.motion = Motion::Drift {
            particles: vec![
                ParticleMotion {
                    velocity: Vec3::ZERO,
                    phase: 0.0
                };
                2
            ],
        };
        assert!(!p.is_consistent());
    }

    #[test]
    fn color_at_falls_back_to_base_color() {
        let p = Primitive::solid_line("s", vec![Vec3::ZERO, Vec3::Y], COOL_MID.rgb, AnimationTag::fade(0.0, 1.0));
        assert_eq!(p.color_at(1), COOL_MID.rgb);
        let q = two_point_line("q");
        assert_eq!(q.color_at(1), COOL_MID.rgb);
        assert_eq!(q.color_at(99), WARM_HOT.rgb);
    }

    #[test]
    fn traversal_visits_nested_primitives_in_order() {
        let mut inner = SceneGroup::new("inner");
        inner.push(two_point_line("b"));
        inner.push(two_point_line("c"));
        let mut root = SceneGroup::new("root");
        root.push(two_point_line("a"));
        root.push_group(inner);
        root.push(two_point_line("d"));

        let mut labels = Vec::new();
        root.for_each_primitive(&mut |p| labels.push(p.label.clone()));
        assert_eq!(labels, ["a", "b", "c", "d"]);
        assert_eq!(root.primitive_count(), 4);
        assert_eq!(root.vertex_count(), 8);
        assert!(root.find_primitive("c").is_some());
        assert!(root.find_primitive("z").is_none());
    }

    #[test]
    fn mutable_traversal_reaches_every_primitive() {
        let mut inner = SceneGroup::new("inner");
        inner.push(two_point_line("b"));
        let mut root = SceneGroup::new("root");
        root.push(two_point_line("a"));
        root.push_group(inner);

        root.for_each_primitive_mut(&mut |p| p.opacity = 0.5);
        assert!(root.primitives().iter().all(|p| p.opacity == 0.5));
    }

    #[test]
    fn transforms_compose_through_groups() {
        let mut inner = SceneGroup::new("inner");
        inner.transform.scale = Vec3::splat(2.0);
        let mut p = two_point_line("a");
        p.offset = Vec3::new(0.0, 1.0, 0.0);
        inner.push(p);
        let mut root = SceneGroup::new("root");
        root.transform.position = Vec3::new(10.0, 0.0, 0.0);
        root.push_group(inner);

        let mut seen = None;
        root.visit_transformed(Mat4::IDENTITY, &mut |_, m| {
            seen = Some(m.transform_point3(Vec3::X));
        });
        // (1,0,0) + offset (0,1,0) -> scaled x2 -> translated +10 on X.
        let got = seen.unwrap();
        assert!((got - Vec3::new(12.0, 2.0, 0.0)).length() < 1e-5, "got {got}");
    }
}
