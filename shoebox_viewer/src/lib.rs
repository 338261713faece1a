// shoebox_viewer: host bridge, frame loop, and software renderer.
//
// Connects the headless `shoebox_scene` crate to something that can show it.
// A host supplies pointer/scroll/resize events and a render target; the
// `Visualization` owns the world, the animator, and the camera, and drives
// one frame per call. Rendering capability is probed exactly once at start:
// if it is missing, the mount element is hidden and nothing else runs.
//
// Module overview:
// - `host.rs`:   `Host` trait, `HostEvent`, `ProbeError`, and `HeadlessHost`
//                (a scripted in-memory host used by the CLI and tests).
// - `render.rs`: `RenderTarget` trait and `SoftwareTarget`, an RGBA8
//                framebuffer with additive line/point rasterisation and PPM
//                output.
// - `bridge.rs`: `Visualization` (startup probe, event pumping, per-frame
//                update + draw) and `FrameLoop` pacing.
//
// The `shoebox` binary (`main.rs`) wires these together from command-line
// flags and an optional JSON config file.

pub mod bridge;
pub mod host;
pub mod render;
