// Bridge between a `Host` and the scene: startup probe plus the frame loop.
//
// `Visualization::start` probes the host for rendering support exactly once.
// On failure the mount element is hidden, a warning is logged, and `None` is
// returned; there is no retry and no partial object. On success it assembles
// the world (every motif builder runs once here) and sets up the camera and
// input state.
//
// Each `frame` call then:
//   1. drains host events into `InputState` (pointer, scroll, resize);
//   2. applies a pending resize to the camera aspect and the render target;
//   3. runs `Animator::update` for the given elapsed time;
//   4. draws the world into the render target.
//
// `FrameLoop` decides which elapsed time each frame gets: a fixed step for
// deterministic headless runs, or the wall clock paced to ~60 Hz.
//
// See also: `host.rs` for the event source, `animate.rs` in `shoebox_scene`
// for the per-frame rules.

use std::time::{Duration, Instant};

use shoebox_scene::animate::{Animator, FrameReport};
use shoebox_scene::assemble::{World, assemble};
use shoebox_scene::camera::Camera;
use shoebox_scene::config::SceneConfig;
use shoebox_scene::input::InputState;
use tracing::{debug, info, warn};

use crate::host::{Host, HostEvent};
use crate::render::RenderTarget;

/// Default id of the element the scene mounts into.
pub const DEFAULT_MOUNT: &str = "shoebox-stage";

pub struct Visualization {
    world: World,
    animator: Animator,
    input: InputState,
    camera: Camera,
    target: Box<dyn RenderTarget>,
    frames: u64,
    last_report: Option<FrameReport>,
}

impl Visualization {
    pub fn start(host: &mut dyn Host, mount_id: &str, config: &SceneConfig) -> Option<Self> {
        let viewport = host.viewport();
        let target = match host.acquire_render_context(mount_id, viewport) {
            Ok(target) => target,
            Err(e) => {
                warn!(mount = mount_id, error = %e, "visualization disabled");
                host.hide_element(mount_id);
                return None;
            }
        };

        let world = assemble(config);
        info!(
            mount = mount_id,
            width = viewport.width,
            height = viewport.height,
            primitives = world.primitive_count(),
            "visualization started"
        );
        Some(Self {
            world,
            animator: Animator::new(config.animation.clone()),
            input: InputState::new(viewport),
            camera: Camera::new(&config.camera, viewport),
            target,
            frames: 0,
            last_report: None,
        })
    }

    /// Route queued host events to the input adapters.
    pub fn pump_events(&mut self, host: &mut dyn Host) {
        for event in host.poll_events() {
            match event {
                HostEvent::PointerMove { x, y } => self.input.on_pointer_move(x, y),
                HostEvent::Scroll { y } => self.input.on_scroll(y),
                HostEvent::Resize { width, height } => self.input.on_resize(width, height),
            }
        }
    }

    /// Advance to `elapsed` seconds since start and redraw.
    pub fn frame(&mut self, host: &mut dyn Host, elapsed: f32) -> FrameReport {
        self.pump_events(host);
        if let Some(viewport) = self.input.take_resize() {
            self.camera.set_viewport(viewport);
            self.target.resize(viewport);
            debug!(width = viewport.width, height = viewport.height, "resized");
        }

        let report = self.animator.update(&mut self.world, &mut self.input, elapsed);
        self.target.draw(&self.world, &self.camera);
        self.frames += 1;
        self.last_report = Some(report);
        report
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn target(&self) -> &dyn RenderTarget {
        self.target.as_ref()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Frame pacing
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pacing {
    /// Frame `n` sees elapsed time `n * step`. No sleeping.
    Fixed { step: f32 },
    /// Elapsed time is read from the wall clock; frames are spaced by `interval`.
    Realtime { interval: Duration },
}

impl Pacing {
    pub const SIXTY_HZ: Pacing = Pacing::Fixed { step: 1.0 / 60.0 };
}

pub struct FrameLoop {
    pacing: Pacing,
}

impl FrameLoop {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }

    /// Run `frames` frames, calling `before_frame` with the frame index
    /// ahead of each one (so callers can queue host events). Returns the
    /// last frame's report, or `None` when `frames` is zero.
    pub fn run<H: Host>(
        &self,
        vis: &mut Visualization,
        host: &mut H,
        frames: u64,
        mut before_frame: impl FnMut(u64, &mut H),
    ) -> Option<FrameReport> {
        let started = Instant::now();
        let mut last = None;
        for n in 0..frames {
            before_frame(n, host);
            let elapsed = match self.pacing {
                Pacing::Fixed { step } => n as f32 * step,
                Pacing::Realtime { .. } => started.elapsed().as_secs_f32(),
            };
            last = Some(vis.frame(host, elapsed));

            if let Pacing::Realtime { interval } = self.pacing {
                let due = interval * (n as u32 + 1);
                if let Some(wait) = due.checked_sub(started.elapsed()) {
                    std::thread::sleep(wait);
                }
            }
        }
        last
    }
}
