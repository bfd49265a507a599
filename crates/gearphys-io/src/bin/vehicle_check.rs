use anyhow::{Context, Result};
use clap::Parser;
use gearphys_io::{config_hash, hex32, read_vehicle_json};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vehicle_check", version, about = "Validate a vehicle .json and print its resolved wheels")]
struct Opts {
    /// Vehicle description (.json)
    path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let o = Opts::parse();
    let desc = read_vehicle_json(&o.path).with_context(|| format!("loading {}", o.path.display()))?;
    info!(vehicle = %desc.name, mounts = desc.mounts.len(), "description loaded");

    println!("{:4}  {:<12} {:<12} {:>8} {:>8} {:>6} {:>6}", "#", "mount", "asset", "rest", "torque", "drive", "steer");
    for (i, m) in desc.mounts()?.iter().enumerate() {
        let asset = desc.mounts[i].wheel_data.as_deref().unwrap_or("-");
        match &m.config {
            Some(c) => println!(
                "{:4}  {:<12} {:<12} {:>8.1} {:>8.1} {:>6} {:>6}",
                i, m.name, asset, c.rest_length(), c.torque, c.affected_by_engine, c.affected_by_steering
            ),
            None => println!("{:4}  {:<12} {:<12} (no wheel data, skipped)", i, m.name, asset),
        }
    }
    println!("config hash: {}", hex32(config_hash(&desc)));
    Ok(())
}
