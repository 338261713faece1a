// CLI entry point for the shoebox heat-flow visualization.
//
// Runs the scene against a headless host for a number of frames and
// optionally writes the last frame as a PPM image. Pointer, scroll, and
// resize input can be scripted from the command line so any state of the
// animation can be reproduced offline. Logging goes through `tracing`;
// set `RUST_LOG=shoebox_scene=trace` to see per-frame reports.
//
// Usage:
//   shoebox [OPTIONS]
//     --frames <N>          Frames to run (default: 180)
//     --width <W>           Viewport width (default: 960)
//     --height <H>          Viewport height (default: 540)
//     --seed <N>            Placement seed (default: config seed, else clock)
//     --scroll <Y>          Scroll offset applied before the first frame
//     --pointer <X,Y>       Pointer position applied before the first frame
//     --resize <WxH>        Resize halfway through the run
//     --config <PATH>       JSON scene config
//     --out <PATH>          Write the last frame as binary PPM
//     --realtime            Pace frames to the wall clock at 60 Hz
//     --no-render           Simulate a host without rendering support

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use shoebox_scene::config::SceneConfig;
use shoebox_scene::input::Viewport;
use shoebox_viewer::bridge::{DEFAULT_MOUNT, FrameLoop, Pacing, Visualization};
use shoebox_viewer::host::{HeadlessHost, HostEvent};
use shoebox_viewer::render::save_ppm;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Options {
    frames: u64,
    width: u32,
    height: u32,
    seed: Option<u64>,
    scroll: Option<f32>,
    pointer: Option<(f32, f32)>,
    resize: Option<(u32, u32)>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    realtime: bool,
    no_render: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            frames: 180,
            width: 960,
            height: 540,
            seed: None,
            scroll: None,
            pointer: None,
            resize: None,
            config: None,
            out: None,
            realtime: false,
            no_render: false,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts = parse_args();
    let config = load_config(&opts);

    let mut host = HeadlessHost::new(DEFAULT_MOUNT, Viewport::new(opts.width, opts.height));
    if opts.no_render {
        host = host.without_rendering();
    }

    let Some(mut vis) = Visualization::start(&mut host, DEFAULT_MOUNT, &config) else {
        println!("Rendering unavailable; mount '{DEFAULT_MOUNT}' hidden.");
        return;
    };

    let pacing = if opts.realtime {
        Pacing::Realtime {
            interval: Duration::from_secs_f64(1.0 / 60.0),
        }
    } else {
        Pacing::SIXTY_HZ
    };
    let midpoint = opts.frames / 2;
    let report = FrameLoop::new(pacing).run(&mut vis, &mut host, opts.frames, |n, host| {
        if n == 0 {
            if let Some(y) = opts.scroll {
                host.queue(HostEvent::Scroll { y });
            }
            if let Some((x, y)) = opts.pointer {
                host.queue(HostEvent::PointerMove { x, y });
            }
        }
        if n == midpoint {
            if let Some((width, height)) = opts.resize {
                host.queue(HostEvent::Resize { width, height });
            }
        }
    });

    if let Some(r) = report {
        info!(
            frames = vis.frames(),
            elapsed = r.elapsed,
            settled = r.settled,
            fading = r.fading,
            hidden = r.hidden,
            scroll_fade = r.scroll_fade,
            "run finished"
        );
    }

    if let Some(path) = &opts.out {
        let target = vis.target();
        match save_ppm(path, target.viewport(), &target.rgba8()) {
            Ok(()) => println!("Wrote {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }
}

/// Load the scene config, falling back to defaults if the file is missing
/// or malformed. The seed comes from `--seed`, else the config file, else
/// the clock.
fn load_config(opts: &Options) -> SceneConfig {
    let mut config = SceneConfig::default();
    let mut from_file = false;
    if let Some(path) = &opts.config {
        match std::fs::read_to_string(path) {
            Ok(text) => match SceneConfig::from_json(&text) {
                Ok(c) => {
                    config = c;
                    from_file = true;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "bad scene config, using defaults"),
            },
            Err(e) => warn!(path = %path.display(), error = %e, "cannot read scene config, using defaults"),
        }
    }

    config.seed = match opts.seed {
        Some(seed) => seed,
        None if from_file => config.seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0),
    };
    config
}

/// Parse command-line arguments. Plain `std::env::args()` matching.
fn parse_args() -> Options {
    let mut opts = Options::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                opts.frames = parse_or_exit(args.get(i), "--frames requires a number");
            }
            "--width" => {
                i += 1;
                opts.width = parse_or_exit(args.get(i), "--width requires a number");
            }
            "--height" => {
                i += 1;
                opts.height = parse_or_exit(args.get(i), "--height requires a number");
            }
            "--seed" => {
                i += 1;
                opts.seed = Some(parse_or_exit(args.get(i), "--seed requires a number"));
            }
            "--scroll" => {
                i += 1;
                opts.scroll = Some(parse_or_exit(args.get(i), "--scroll requires a number"));
            }
            "--pointer" => {
                i += 1;
                opts.pointer = Some(
                    args.get(i)
                        .and_then(|s| parse_pair::<f32>(s, ','))
                        .unwrap_or_else(|| exit_with("--pointer requires X,Y")),
                );
            }
            "--resize" => {
                i += 1;
                opts.resize = Some(
                    args.get(i)
                        .and_then(|s| parse_pair::<u32>(s, 'x'))
                        .unwrap_or_else(|| exit_with("--resize requires WxH")),
                );
            }
            "--config" => {
                i += 1;
                opts.config = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| exit_with("--config requires a path")));
            }
            "--out" => {
                i += 1;
                opts.out = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| exit_with("--out requires a path")));
            }
            "--realtime" => opts.realtime = true,
            "--no-render" => opts.no_render = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    opts
}

fn parse_or_exit<T: std::str::FromStr>(arg: Option<&String>, message: &str) -> T {
    arg.and_then(|s| s.parse().ok()).unwrap_or_else(|| exit_with(message))
}

fn parse_pair<T: std::str::FromStr>(s: &str, sep: char) -> Option<(T, T)> {
    let (a, b) = s.split_once(sep)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_usage() {
    println!("Usage: shoebox [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --frames <N>          Frames to run (default: 180)");
    println!("  --width <W>           Viewport width (default: 960)");
    println!("  --height <H>          Viewport height (default: 540)");
    println!("  --seed <N>            Placement seed (default: config seed, else clock)");
    println!("  --scroll <Y>          Scroll offset applied before the first frame");
    println!("  --pointer <X,Y>       Pointer position applied before the first frame");
    println!("  --resize <WxH>        Resize halfway through the run");
    println!("  --config <PATH>       JSON scene config");
    println!("  --out <PATH>          Write the last frame as binary PPM");
    println!("  --realtime            Pace frames to the wall clock at 60 Hz");
    println!("  --no-render           Simulate a host without rendering support");
    println!("  --help, -h            Show this help");
}
