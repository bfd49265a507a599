use anyhow::{Context, Result};
use clap::Parser;
use gearphys_core::{hex32, Vec2};
use gearphys_io::{read_vehicle_json, VehicleDesc};
use gearphys_vehicles::{TracingDiagnostics, Vehicle};
use gearphys_world::SandboxWorld;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vehicle_sim", version, about = "Drive a vehicle description over flat ground and print telemetry")]
struct Opts {
    /// Vehicle description (.json). Uses the built-in four-wheel demo when omitted.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Fixed timestep (seconds)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Throttle held from `--drive-from` on, in [-1, 1]
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    throttle: f32,

    /// Steer held from `--drive-from` on, in [-1, 1]
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    steer: f32,

    /// First tick that sends move input (lets the chassis settle first)
    #[arg(long, default_value_t = 120)]
    drive_from: u64,

    /// Print telemetry every N ticks
    #[arg(long, default_value_t = 30)]
    every: u64,

    /// Dump the wheel basis lines of the last tick
    #[arg(long)]
    debug_lines: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opt = Opts::parse();
    let desc = match &opt.file {
        Some(p) => read_vehicle_json(p).with_context(|| format!("loading {}", p.display()))?,
        None => VehicleDesc::demo(),
    };

    let mut world = SandboxWorld::from_desc(&desc.chassis);
    let mounts = desc.mounts()?;
    let mut settings = desc.settings;
    if opt.debug_lines {
        settings.draw_debug = true;
    }
    let mut vehicle = Vehicle::with_diagnostics(&world, &mounts, settings, TracingDiagnostics::new(desc.name.clone()));
    info!(vehicle = %desc.name, wheels = vehicle.wheels().len(), ticks = opt.ticks, dt = opt.dt, "simulation start");

    println!("{:>6} {:>9} {:>9} {:>9} {:>9} {:>5} {:>8}", "tick", "x", "y", "z", "speed", "gnd", "offset");
    for t in 0..opt.ticks {
        // Move input is one-shot, so it is re-sent every tick.
        if t >= opt.drive_from {
            vehicle.on_move(Vec2::new(opt.steer, opt.throttle));
        }
        let stats = vehicle.step(opt.dt, &mut world);
        world.step(opt.dt);

        if opt.every > 0 && (t % opt.every == 0 || t + 1 == opt.ticks) {
            let c = world.chassis();
            let n = vehicle.wheels().len().max(1) as f32;
            let offset = vehicle.wheels().iter().map(|w| w.suspension_offset).sum::<f32>() / n;
            println!(
                "{:>6} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>5} {:>8.3}",
                stats.tick, c.pos.x, c.pos.y, c.pos.z, c.linvel.length(), stats.grounded, offset
            );
        }
    }

    if opt.debug_lines {
        for l in vehicle.debug_lines() {
            let [r, g, b] = l.color.rgb();
            println!(
                "line #{r:02x}{g:02x}{b:02x}  ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})",
                l.start.x, l.start.y, l.start.z, l.end.x, l.end.y, l.end.z
            );
        }
    }

    println!("state hash: {}", hex32(vehicle.state_hash()));
    Ok(())
}
