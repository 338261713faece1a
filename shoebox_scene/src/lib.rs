// shoebox_scene: procedural heat-flow scene and its animation driver.
//
// This crate builds a decorative wireframe "shoebox" building surrounded by
// animated lines for heat gain and heat loss, and advances it frame by frame.
// It has no windowing, GPU, or host dependencies: the viewer crate owns the
// event loop and rendering, and calls in here for everything else. All of
// it can be tested headless.
//
// Module overview:
// - `palette.rs`:  Named semantic colour stops (warm, cool, neutral).
// - `geometry.rs`: Line sampling, organic bulges, circles, gradients, sphere sampling.
// - `scene.rs`:    Primitive, AnimationTag/Motion, SceneGroup, tree traversal.
// - `motifs/`:     The 12 motif builders (grid, shell, interior, flows, field, scans, rings, glow).
// - `assemble.rs`: Layer order, `World`, and `assemble()` which runs every builder once.
// - `animate.rs`:  `Animator::update`: fade, pulse, drift, sweep, parallax, scroll, opacity.
// - `input.rs`:    `InputState` written by pointer/scroll/resize adapters.
// - `camera.rs`:   Perspective camera and point projection.
// - `config.rs`:   `SceneConfig`: JSON-loadable timing, placement, and camera tunables.
// - `prng`:        Re-exported from `shoebox_prng`.
//
// Lifecycle: `assemble()` once, then `Animator::update()` once per frame
// with the same `World` and `InputState`. Nothing is allocated or freed
// after assembly.

pub mod animate;
pub mod assemble;
pub mod camera;
pub mod config;
pub mod geometry;
pub mod input;
pub mod motifs;
pub mod palette;
pub use shoebox_prng as prng;
pub mod scene;
