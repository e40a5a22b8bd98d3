mod camera;
mod display;
mod viewer;

use camera::Camera;
use clap::{Args, Parser, Subcommand};
use glam::DVec3;
use log::info;
use tether_core::config::{NetConfig, RopeConfig, SchedulerConfig, SimulationConfig, SwarmConfig};
use tether_core::diagnostics::format_diagnostics;
use tether_core::forces::ForceModel;
use tether_core::input::InputSnapshot;
use tether_core::scenario;
use tether_core::simulation::{MassSimulation, Simulation};

#[derive(Parser, Debug)]
#[command(name = "tether")]
#[command(about = "Tether - point-mass rope, net and swarm sandbox", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct RunOptions {
    /// Target simulation ticks per second
    #[arg(long, global = true, default_value_t = 60.0)]
    tps: f64,

    /// Ticks run in one loop iteration before falling behind is accepted
    #[arg(long, global = true, default_value_t = 10)]
    max_catch_up: u32,

    /// Run this many ticks without a window and print diagnostics
    #[arg(long, global = true, value_name = "TICKS")]
    headless: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// A chain hanging from an anchor (IJKL moves the anchor)
    Rope {
        /// Number of masses including the anchor
        #[arg(long, default_value_t = 20)]
        points: usize,
        #[arg(long, default_value_t = 1.0)]
        rest_length: f64,
        /// Downward acceleration per tick
        #[arg(long, default_value_t = 0.1)]
        gravity: f64,
        #[arg(long, default_value_t = 0.999)]
        friction: f64,
        /// Share of a stretching impulse passed to the neighbour
        #[arg(long, default_value_t = 0.8)]
        loss_ratio: f64,
        /// Chain straightening coefficient, 0 disables it
        #[arg(long, default_value_t = 1e-4)]
        stiffness: f64,
        /// Energy at which a link snaps; links never break when omitted
        #[arg(long)]
        max_energy: Option<f64>,
    },
    /// A square net with a fixed border (IJKL moves the border)
    Net {
        /// Masses per side
        #[arg(long, default_value_t = 16)]
        size: usize,
        #[arg(long, default_value_t = 80.0)]
        spacing: f64,
        /// Neighbour distance above which the restoring pull engages
        #[arg(long, default_value_t = 60.0)]
        threshold: f64,
        #[arg(long, default_value_t = 0.1)]
        pull: f64,
        #[arg(long, default_value_t = 1.0)]
        gravity: f64,
        #[arg(long, default_value_t = 0.99)]
        friction: f64,
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
    /// Mutually repelling masses inside a sphere
    Swarm {
        #[arg(long, default_value_t = 40)]
        points: usize,
        #[arg(long, default_value_t = 1000.0)]
        radius: f64,
        /// Repulsion constant k in k / d²
        #[arg(long, default_value_t = 1e7)]
        strength: f64,
        #[arg(long, default_value_t = 0.9)]
        friction: f64,
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let opts = cli.run;
    match cli.command {
        Commands::Rope {
            points,
            rest_length,
            gravity,
            friction,
            loss_ratio,
            stiffness,
            max_energy,
        } => {
            let mut simulation = SimulationConfig::new()
                .with_gravity(down(gravity))
                .with_friction(friction)
                .with_rest_length(rest_length)
                .with_tension_loss_ratio(loss_ratio)
                .with_stiffness(stiffness);
            simulation.max_link_energy = max_energy;
            let config = RopeConfig {
                simulation,
                points,
                ..RopeConfig::default()
            };
            let span = points as f64 * rest_length;
            let camera = Camera::new(DVec3::new(-span / 2.0, -span / 4.0, span * 1.5), span / 100.0);
            launch(scenario::rope(&config)?, &opts, camera)
        }
        Commands::Net {
            size,
            spacing,
            threshold,
            pull,
            gravity,
            friction,
            seed,
        } => {
            let defaults = NetConfig::default();
            let config = NetConfig {
                simulation: defaults
                    .simulation
                    .clone()
                    .with_gravity(down(gravity))
                    .with_friction(friction),
                size,
                spacing,
                threshold,
                pull,
                seed,
                ..defaults
            };
            let span = size as f64 * spacing;
            let camera = Camera::new(DVec3::new(0.0, span / 3.0, span * 1.2), span / 100.0)
                .with_pitch(-0.25);
            launch(scenario::net(&config)?, &opts, camera)
        }
        Commands::Swarm {
            points,
            radius,
            strength,
            friction,
            seed,
        } => {
            let defaults = SwarmConfig::default();
            let config = SwarmConfig {
                simulation: defaults.simulation.clone().with_friction(friction),
                points,
                radius,
                strength,
                seed,
                ..defaults
            };
            let camera = Camera::new(DVec3::new(0.0, 0.0, radius * 3.0), radius / 50.0);
            launch(scenario::swarm(&config)?, &opts, camera)
        }
    }
}

/// Gravity of magnitude `g` along -Y.
fn down(g: f64) -> DVec3 {
    DVec3::new(0.0, -g, 0.0)
}

fn launch<F: ForceModel + 'static>(
    mut simulation: MassSimulation<F>,
    opts: &RunOptions,
    camera: Camera,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = SchedulerConfig::new()
        .with_ticks_per_second(opts.tps)
        .with_max_catch_up(opts.max_catch_up);
    config.validate()?;

    match opts.headless {
        Some(ticks) => {
            info!("running {} headless for {ticks} ticks", simulation.name());
            for _ in 0..ticks {
                simulation.tick(&InputSnapshot::empty());
            }
            println!(
                "{} after {} ticks: {}",
                simulation.name(),
                simulation.ticks(),
                format_diagnostics(&simulation.diagnostics())
            );
            Ok(())
        }
        None => {
            viewer::run(Box::new(simulation), config, camera)?;
            Ok(())
        }
    }
}
