// Per-frame animation driver.
//
// `Animator::update` is the single unit of work run once per display
// refresh. It reads the plain `InputState` the host adapters wrote, mutates
// the `World` in place, and returns a `FrameReport`. It never allocates
// primitives and never blocks; the host renders once after it returns.
//
// ## Entrance fade
//
// Every primitive with a `delay` runs a three-phase sub-state machine keyed
// only to global elapsed time:
//
//   Hidden   elapsed < delay                      opacity = 0
//   Fading   delay ≤ elapsed < delay + duration   opacity = eased · target
//   Settled  elapsed ≥ delay + duration           opacity resolved in step 9
//
// with `eased = 1 − (1 − p)³`, `p = clamp((elapsed − delay) / duration, 0, 1)`.
// Primitives with no delay are left alone by both the fade and the final
// resolution pass.
//
// ## Frame order
//
//  1. Smooth the pointer toward its target.
//  2. Entrance fade (recursive traversal).
//  3. Flow pulse, once elapsed > `pulse_start`: live colours are rebuilt from
//     each string's original snapshot times a travelling-wave brightness.
//  4. Particle drift: additive sinusoidal jitter, no bounds.
//  5. Scan sweeps.
//  6. World sway plus pointer parallax.
//  7. Building-shell breathing scale.
//  8. Scroll fade and scroll lift.
//  9. Opacity resolution in two explicit phases: every glow multiplier is
//     computed first, then every settled primitive gets
//     `target · scroll_fade · glow_mul`. Nothing in phase B reads a value
//     phase B writes.
//
// Steps 3–5 and 9 all dispatch on the primitive's `Motion` variant.
//
// See also: `scene.rs` for `Motion`, `input.rs` for `InputState`,
// `config.rs` for `AnimationParams`.

use glam::Vec3;
use std::f32::consts::PI;
use tracing::trace;

use crate::assemble::{Layer, World};
use crate::config::AnimationParams;
use crate::geometry::param;
use crate::input::InputState;
use crate::scene::{Motion, Primitive};

// ---------------------------------------------------------------------------
// Pure curves
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadePhase {
    Hidden,
    Fading,
    Settled,
}

pub fn fade_phase(elapsed: f32, delay: f32, duration: f32) -> FadePhase {
    if elapsed < delay {
        FadePhase::Hidden
    } else if elapsed < delay + duration {
        FadePhase::Fading
    } else {
        FadePhase::Settled
    }
}

/// Cubic ease-out on [0, 1]; input is clamped.
pub fn ease_out_cubic(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Entrance-fade opacity before any scroll or glow scaling.
pub fn fade_opacity(elapsed: f32, delay: f32, target: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if elapsed < delay { 0.0 } else { target };
    }
    ease_out_cubic((elapsed - delay) / duration) * target
}

/// Brightness of a flow-string vertex at parametric position `t`.
/// Always within [0.35, 1.0].
pub fn pulse_brightness(t: f32, time: f32, speed: f32, phase: f32) -> f32 {
    let wave = ((t * 8.0 - time * speed * 2.5 + phase) * PI).sin() * 0.5 + 0.5;
    0.35 + wave * 0.65
}

/// Global opacity multiplier from scrolling: 1 at the top, 0 once the page
/// has scrolled `fraction` of a viewport height.
pub fn scroll_fade(scroll_y: f32, viewport_height: f32, fraction: f32) -> f32 {
    let span = viewport_height * fraction;
    if span <= 0.0 {
        return if scroll_y > 0.0 { 0.0 } else { 1.0 };
    }
    (1.0 - scroll_y / span).clamp(0.0, 1.0)
}

/// Slow envelope-glow oscillation, within [1 − depth, 1].
pub fn glow_multiplier(time: f32, speed: f32, phase: f32, depth: f32) -> f32 {
    let depth = depth.clamp(0.0, 1.0);
    1.0 - depth * (0.5 + 0.5 * (time * speed + phase).sin())
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Summary of one update, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub elapsed: f32,
    pub scroll_fade: f32,
    pub hidden: usize,
    pub fading: usize,
    pub settled: usize,
    /// Whether flow strings were re-coloured this frame.
    pub pulsing: bool,
}

#[derive(Clone, Debug)]
pub struct Animator {
    params: AnimationParams,
}

impl Animator {
    pub fn new(params: AnimationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnimationParams {
        &self.params
    }

    /// Advance the world to global time `elapsed` (seconds since start).
    pub fn update(&self, world: &mut World, input: &mut InputState, elapsed: f32) -> FrameReport {
        let p = &self.params;
        let mut report = FrameReport {
            elapsed,
            ..FrameReport::default()
        };

        // 1.
        input.smooth_pointer(p.pointer_smoothing);

        // 2.
        world.root.for_each_primitive_mut(&mut |prim| {
            let Some(delay) = prim.tag.delay else {
                return;
            };
            match fade_phase(elapsed, delay, p.fade_duration) {
                FadePhase::Hidden => {
                    prim.opacity = 0.0;
                    report.hidden += 1;
                }
                FadePhase::Fading => {
                    prim.opacity = fade_opacity(elapsed, delay, prim.tag.target, p.fade_duration);
                    report.fading += 1;
                }
                FadePhase::Settled => {
                    prim.opacity = prim.tag.target;
                    report.settled += 1;
                }
            }
        });

        // 3.
        if elapsed > p.pulse_start {
            report.pulsing = true;
            world.root.for_each_primitive_mut(&mut |prim| pulse_flow(prim, elapsed));
        }

        // 4. and 5.
        world.root.for_each_primitive_mut(&mut |prim| {
            drift_particles(prim, elapsed, p.fade_duration);
            sweep_scan(prim, elapsed);
        });

        // 6.
        let sway = p.sway_amplitude;
        let transform = &mut world.root.transform;
        transform.rotation.y = (elapsed * 0.08).sin() * sway + input.pointer.x * p.parallax_strength;
        transform.rotation.x =
            p.base_tilt + (elapsed * 0.06).sin() * sway * 0.3 - input.pointer.y * p.parallax_strength * 0.5;

        // 7.
        if let Some(shell) = world.layer_mut(Layer::BuildingShell) {
            let breath = 1.0 + (elapsed * p.breathing_speed).sin() * p.breathing_amplitude;
            shell.transform.scale = Vec3::splat(breath);
        }

        // 8.
        let fade = scroll_fade(
            input.scroll_y,
            input.viewport.height as f32,
            p.scroll_fade_fraction,
        );
        report.scroll_fade = fade;
        world.root.transform.position.y = input.scroll_y * p.scroll_lift;

        // 9a.
        world.root.for_each_primitive_mut(&mut |prim| {
            prim.glow_mul = match prim.tag.motion {
                Motion::GlowPulse { speed, phase, depth } => glow_multiplier(elapsed, speed, phase, depth),
                _ => 1.0,
            };
        });

        // 9b.
        world.root.for_each_primitive_mut(&mut |prim| {
            let Some(delay) = prim.tag.delay else {
                return;
            };
            if fade_phase(elapsed, delay, p.fade_duration) == FadePhase::Settled {
                prim.opacity = prim.tag.target * fade * prim.glow_mul;
            }
        });

        trace!(
            elapsed,
            scroll_fade = fade,
            hidden = report.hidden,
            fading = report.fading,
            settled = report.settled,
            "frame"
        );
        report
    }
}

/// Rebuild a flow string's live colours from its snapshot.
fn pulse_flow(prim: &mut Primitive, time: f32) {
    let Motion::PulsingFlow {
        speed,
        phase,
        ref original,
    } = prim.tag.motion
    else {
        return;
    };
    let Some(live) = prim.colors.as_mut() else {
        return;
    };
    let segs = original.len().saturating_sub(1);
    for (i, (dst, src)) in live.iter_mut().zip(original).enumerate() {
        *dst = src.scale(pulse_brightness(param(i, segs), time, speed, phase));
    }
}

/// Jitter every particle of a point cloud. Clouds that haven't started
/// fading in stay at their sampled positions.
fn drift_particles(prim: &mut Primitive, time: f32, fade_duration: f32) {
    let Motion::Drift { ref particles } = prim.tag.motion else {
        return;
    };
    if let Some(delay) = prim.tag.delay {
        if fade_phase(time, delay, fade_duration) == FadePhase::Hidden {
            return;
        }
    }
    for (pos, m) in prim.positions.iter_mut().zip(particles) {
        *pos += Vec3::new(
            m.velocity.x * (time * 0.6 + m.phase).sin(),
            m.velocity.y * (time * 0.45 + m.phase).cos(),
            m.velocity.z * (time * 0.5 + m.phase * 1.3).sin(),
        );
    }
}

fn sweep_scan(prim: &mut Primitive, time: f32) {
    if let Motion::SweepingScan {
        axis,
        base,
        amplitude,
        speed,
    } = prim.tag.motion
    {
        let along = base + (time * speed).sin() * amplitude;
        prim.offset = axis.unit() * along;
    }
}
