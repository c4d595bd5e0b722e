use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glam::Vec3;
use stagehand_input::{InputEvent, PointerButton};
use stagehand_kernel::{
    CreatureEntity, CubeEntity, Entity, FixedStepScheduler, RealtimeScheduler, Simulation,
    SimulationConfig, SimulationEvent, StopToken,
};
use stagehand_render::{DebugTextBackend, HeadlessSurface, OrbitControls};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stagehand-cli", about = "Headless host for the stagehand runtime")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run a scene for a number of frames and print the last one
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// JSON config file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to run
    #[arg(short, long, default_value = "120")]
    frames: u64,
    /// Frames per second (defaults to the config's frame_rate)
    #[arg(long)]
    fps: Option<f64>,
    /// Number of creatures, placed side by side
    #[arg(long, default_value = "1")]
    creatures: usize,
    /// Also add a spinning cube behind the creatures
    #[arg(long)]
    cube: bool,
    /// Cube spin in degrees per second
    #[arg(long, default_value = "45")]
    spin: f32,
    /// Surface width in logical pixels
    #[arg(long)]
    width: Option<f64>,
    /// Surface height in logical pixels
    #[arg(long)]
    height: Option<f64>,
    /// Device pixel ratio
    #[arg(long)]
    scale: Option<f64>,
    /// Orbit the camera by this many degrees per frame
    #[arg(long)]
    auto_rotate: Option<f32>,
    /// Simulated pointer drag, in pixels, applied before the first frame
    #[arg(long)]
    drag: Option<f32>,
    /// Pace frames with the wall clock instead of a simulated one
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("stagehand-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", stagehand_common::crate_info());
            println!("input: {}", stagehand_input::crate_info());
            println!("scene: {}", stagehand_scene::crate_info());
            println!("render: {}", stagehand_render::crate_info());
            println!("kernel: {}", stagehand_kernel::crate_info());
        }
        Commands::Run(args) => run(args)?,
    }

    Ok(())
}

fn load_config(args: &RunArgs) -> anyhow::Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.frame_rate = fps;
    }
    if let Some(width) = args.width {
        config.surface.width = width;
    }
    if let Some(height) = args.height {
        config.surface.height = height;
    }
    if let Some(scale) = args.scale {
        config.surface.scale_factor = scale;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let surface = HeadlessSurface::new(&config.surface);
    let mut sim = Simulation::from_config(surface, DebugTextBackend::new(), &config)
        .context("starting simulation")?;

    if args.auto_rotate.is_some() || args.drag.is_some() {
        let camera = &config.camera;
        let controls = OrbitControls::new(camera.target, camera.near, camera.far)
            .with_auto_rotate(args.auto_rotate.unwrap_or(0.0));
        sim.set_controller(Box::new(controls));
    }
    if let Some(dx) = args.drag {
        sim.handle_input(&InputEvent::PointerDown(PointerButton::Primary));
        sim.handle_input(&InputEvent::PointerMove { dx, dy: 0.0 });
        sim.handle_input(&InputEvent::PointerUp(PointerButton::Primary));
    }

    let span = args.creatures.saturating_sub(1) as f32 * 2.0;
    for i in 0..args.creatures {
        let id = sim.allocate_id()?;
        let mut creature = CreatureEntity::new(id, &config.creature);
        creature
            .core_mut()
            .set_position(Vec3::new(i as f32 * 2.0 - span / 2.0, 0.0, 0.0));
        if let Err(e) = sim.add_entity(Box::new(creature)) {
            tracing::warn!(error = %e, "skipping creature");
        }
    }
    if args.cube {
        let id = sim.allocate_id()?;
        let mut cube = CubeEntity::new(id).with_spin(args.spin);
        cube.core_mut().set_position(Vec3::new(0.0, 0.0, -2.0));
        if let Err(e) = sim.add_entity(Box::new(cube)) {
            tracing::warn!(error = %e, "skipping cube");
        }
    }

    let stop = StopToken::new();
    let frames = if args.realtime {
        let mut scheduler = RealtimeScheduler::bounded(config.frame_rate, args.frames)?;
        sim.begin(&mut scheduler, &stop)
    } else {
        sim.begin(&mut FixedStepScheduler::bounded(config.frame_rate, args.frames), &stop)
    };

    print!("{}", sim.renderer().backend().last_output());

    for event in sim.drain_events() {
        if let SimulationEvent::FrameFailed { frame, reason } = event {
            println!("frame {frame} failed: {reason}");
        }
    }
    let failed = sim.frames_failed();
    let rendered = sim.frame_count() - failed;
    println!(
        "Ran {frames} frames: {rendered} rendered, {failed} failed, {} entities, {} surface resizes",
        sim.entity_count(),
        sim.renderer().surface().resize_count()
    );

    Ok(())
}
