// End-to-end scenarios over a fully assembled scene.
//
// Each test assembles the default scene with a fixed seed, drives it through
// `Animator::update` exactly as a host frame loop would, and checks the
// visible state: opacities, pulse colours, particle positions, and how
// scrolling attenuates everything.

use shoebox_scene::animate::{Animator, pulse_brightness};
use shoebox_scene::assemble::{Layer, World, assemble};
use shoebox_scene::config::SceneConfig;
use shoebox_scene::geometry::param;
use shoebox_scene::input::{InputState, Viewport};
use shoebox_scene::scene::{Motion, Primitive};

fn setup() -> (World, Animator, InputState) {
    let config = SceneConfig {
        seed: 2024,
        ..SceneConfig::default()
    };
    let world = assemble(&config);
    let animator = Animator::new(config.animation.clone());
    let input = InputState::new(Viewport::new(800, 600));
    (world, animator, input)
}

fn layer_prims(world: &World, layer: Layer) -> Vec<Primitive> {
    world
        .layer(layer)
        .expect("layer present")
        .primitives()
        .into_iter()
        .cloned()
        .collect()
}

#[test]
fn at_time_zero_everything_is_hidden_and_particles_are_unmoved() {
    let (mut world, animator, mut input) = setup();
    let before = layer_prims(&world, Layer::Particles);

    let report = animator.update(&mut world, &mut input, 0.0);

    assert_eq!(report.fading + report.settled, 0);
    assert_eq!(report.hidden, world.primitive_count());
    world.root.for_each_primitive(&mut |p| assert_eq!(p.opacity, 0.0, "{}", p.label));
    let after = layer_prims(&world, Layer::Particles);
    assert_eq!(before[0].positions, after[0].positions);
}

#[test]
fn at_three_seconds_core_layers_are_settled_at_target() {
    let (mut world, animator, mut input) = setup();
    for frame in 0..=180 {
        animator.update(&mut world, &mut input, frame as f32 / 60.0);
    }

    for layer in [
        Layer::Grid,
        Layer::BuildingShell,
        Layer::HeatStrings,
        Layer::ColdStrings,
        Layer::Convection,
    ] {
        for p in layer_prims(&world, layer) {
            assert!(
                (p.opacity - p.tag.target).abs() < 1e-6,
                "{} opacity {} != target {}",
                p.label,
                p.opacity,
                p.tag.target
            );
        }
    }
}

#[test]
fn flow_strings_follow_the_wave_at_three_seconds() {
    let (mut world, animator, mut input) = setup();
    let time = 3.0;
    let report = animator.update(&mut world, &mut input, time);
    assert!(report.pulsing);

    for layer in [Layer::HeatStrings, Layer::ColdStrings] {
        for p in layer_prims(&world, layer) {
            let Motion::PulsingFlow { speed, phase, ref original } = p.tag.motion else {
                panic!("{} is not a flow string", p.label);
            };
            let live = p.colors.as_ref().unwrap();
            let segs = original.len() - 1;
            for i in [0, segs / 3, segs / 2, segs] {
                let b = pulse_brightness(param(i, segs), time, speed, phase);
                for c in 0..3 {
                    assert!((live[i].0[c] - original[i].0[c] * b).abs() < 1e-6);
                }
            }
        }
    }

    // Half a second later the colours have moved on.
    let before = layer_prims(&world, Layer::HeatStrings)[0].colors.clone();
    animator.update(&mut world, &mut input, time + 0.5);
    let after = layer_prims(&world, Layer::HeatStrings)[0].colors.clone();
    assert_ne!(before, after);
}

#[test]
fn full_scroll_fade_blanks_every_settled_primitive() {
    let (mut world, animator, mut input) = setup();
    input.on_scroll(input.viewport.height as f32 * 0.55);
    let report = animator.update(&mut world, &mut input, 30.0);

    assert_eq!(report.scroll_fade, 0.0);
    assert_eq!(report.settled, world.primitive_count());
    world.root.for_each_primitive(&mut |p| assert_eq!(p.opacity, 0.0, "{}", p.label));
}

#[test]
fn partial_scroll_scales_settled_opacity() {
    let (mut world, animator, mut input) = setup();
    input.on_scroll(600.0 * 0.55 * 0.5);
    let report = animator.update(&mut world, &mut input, 30.0);
    assert!((report.scroll_fade - 0.5).abs() < 1e-5);

    for p in layer_prims(&world, Layer::BuildingShell) {
        assert!((p.opacity - p.tag.target * 0.5).abs() < 1e-5);
    }
    for p in layer_prims(&world, Layer::GlowHalo) {
        assert!(p.opacity <= p.tag.target * 0.5 + 1e-6);
        assert!(p.glow_mul < 1.0 + 1e-6 && p.glow_mul >= 0.65 - 1e-6);
    }
}

#[test]
fn replaying_the_same_times_reproduces_particles() {
    let times: Vec<f32> = (0..400).map(|k| k as f32 / 60.0).collect();
    let run = || {
        let (mut world, animator, mut input) = setup();
        for &t in &times {
            animator.update(&mut world, &mut input, t);
        }
        layer_prims(&world, Layer::Particles)[0].positions.clone()
    };
    let a = run();
    let b = run();
    assert_eq!(a, b);

    let (initial, _, _) = setup();
    assert_ne!(a, layer_prims(&initial, Layer::Particles)[0].positions);
}

#[test]
fn resize_leaves_geometry_untouched() {
    let (mut world, animator, mut input) = setup();
    animator.update(&mut world, &mut input, 1.0);
    let shell_before = layer_prims(&world, Layer::BuildingShell);

    input.on_resize(1600, 900);
    assert_eq!(input.take_resize(), Some(Viewport::new(1600, 900)));
    animator.update(&mut world, &mut input, 1.0);

    let shell_after = layer_prims(&world, Layer::BuildingShell);
    for (a, b) in shell_before.iter().zip(&shell_after) {
        assert_eq!(a.positions, b.positions);
    }
}
