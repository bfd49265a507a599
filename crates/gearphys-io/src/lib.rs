//! Vehicle description files: JSON layout, validation against the wheel data
//! invariants, resolution into [`WheelMount`]s and a stable config hash.

use blake3::Hasher;
use gearphys_core::{vec3, Scalar, Transform, Vec3};
use gearphys_vehicles::{ConfigError, VehicleSettings, WheelConfig, WheelMount};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use thiserror::Error;

pub use gearphys_core::hex32;

/// Current on-disk layout version.
pub const DESC_VERSION: u32 = 1;

/// Why a vehicle description could not be loaded, written or resolved.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem failure on `path`.
    #[error("failed to read or write {path}: {source}")]
    Fs { path: String, #[source] source: std::io::Error },
    /// Malformed JSON or a field of the wrong type.
    #[error("invalid vehicle JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// `version` is not [`DESC_VERSION`].
    #[error("unsupported description version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    /// A mount names an asset missing from `wheel_assets`.
    #[error("mount '{mount}' references unknown wheel asset '{asset}'")]
    UnknownAsset { mount: String, asset: String },
    /// An asset breaks a [`WheelConfig`] invariant.
    #[error("wheel asset '{asset}': {source}")]
    InvalidAsset { asset: String, #[source] source: ConfigError },
}

/// One `wheel_data` slot of the mount list. `wheel_data: null` is allowed and
/// yields a mount without wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountDesc {
    pub name: String,
    #[serde(default)]
    pub wheel_data: Option<String>,
}

/// Chassis body used by the sandbox host. Engines with their own chassis ignore it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChassisDesc {
    pub mass: Scalar,
    /// Box half extents for the inertia estimate.
    pub half_extents: Vec3,
    pub spawn: Transform,
    pub sockets: BTreeMap<String, Transform>,
}

impl Default for ChassisDesc {
    fn default() -> Self {
        Self {
            mass: 1000.0,
            half_extents: vec3(200.0, 90.0, 40.0),
            spawn: Transform::IDENTITY,
            sockets: BTreeMap::new(),
        }
    }
}

/// On-disk vehicle: settings, optional sandbox chassis, wheel assets and mounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDesc {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub settings: VehicleSettings,
    #[serde(default)]
    pub chassis: ChassisDesc,
    /// Named wheel data shared by mounts; each mount gets its own copy.
    pub wheel_assets: BTreeMap<String, WheelConfig>,
    pub mounts: Vec<MountDesc>,
}

impl VehicleDesc {
    /// Check version, asset invariants and that every referenced asset exists.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.version != DESC_VERSION {
            return Err(IoError::Version { found: self.version, expected: DESC_VERSION });
        }
        for (asset, cfg) in &self.wheel_assets {
            cfg.validate().map_err(|source| IoError::InvalidAsset { asset: asset.clone(), source })?;
        }
        for m in &self.mounts {
            if let Some(asset) = &m.wheel_data {
                if !self.wheel_assets.contains_key(asset) {
                    return Err(IoError::UnknownAsset { mount: m.name.clone(), asset: asset.clone() });
                }
            }
        }
        Ok(())
    }

    /// Resolve mounts in file order, copying asset data into each mount.
    pub fn mounts(&self) -> Result<Vec<WheelMount>, IoError> {
        self.validate()?;
        Ok(self
            .mounts
            .iter()
            .map(|m| WheelMount {
                name: m.name.clone(),
                config: m.wheel_data.as_ref().and_then(|a| self.wheel_assets.get(a).copied()),
            })
            .collect())
    }

    /// Four-wheel demo: steered front axle, driven rear axle.
    ///
    /// Damping and wheel mass are tuned down from the wheel defaults so the
    /// chassis stays stable at a 60 Hz explicit step.
    pub fn demo() -> Self {
        let base = WheelConfig { suspension_damping: 3_000.0, wheel_mass: 20.0, ..Default::default() };
        let front = WheelConfig { affected_by_engine: false, ..base };
        let rear = WheelConfig { affected_by_steering: false, torque: 200_000.0, ..base };

        let mut sockets = BTreeMap::new();
        for (name, x, y) in [("FL", 150.0, 80.0), ("FR", 150.0, -80.0), ("RL", -150.0, 80.0), ("RR", -150.0, -80.0)] {
            sockets.insert(name.to_string(), Transform::from_translation(vec3(x, y, -20.0)));
        }

        let mount = |name: &str, asset: &str| MountDesc { name: name.into(), wheel_data: Some(asset.into()) };
        Self {
            version: DESC_VERSION,
            name: "demo".into(),
            settings: VehicleSettings::default().with_draw_debug(false),
            chassis: ChassisDesc {
                spawn: Transform::from_translation(vec3(0.0, 0.0, 100.0)),
                sockets,
                ..Default::default()
            },
            wheel_assets: BTreeMap::from([("front".to_string(), front), ("rear".to_string(), rear)]),
            mounts: vec![mount("FL", "front"), mount("FR", "front"), mount("RL", "rear"), mount("RR", "rear")],
        }
    }
}

/// Read and validate a vehicle description from JSON at `path`.
pub fn read_vehicle_json(path: &Path) -> Result<VehicleDesc, IoError> {
    let s = std::fs::read_to_string(path)
        .map_err(|source| IoError::Fs { path: path.display().to_string(), source })?;
    let desc: VehicleDesc = serde_json::from_str(&s)?;
    desc.validate()?;
    Ok(desc)
}

/// Write description to JSON at `out_path`. If `pretty=true`, pretty-print JSON.
pub fn write_vehicle_json(desc: &VehicleDesc, out_path: &Path, pretty: bool) -> Result<(), IoError> {
    let json = if pretty { serde_json::to_string_pretty(desc)? } else { serde_json::to_string(desc)? };
    std::fs::write(out_path, json).map_err(|source| IoError::Fs { path: out_path.display().to_string(), source })?;
    Ok(())
}

/// Stable blake3 hash of the resolved wheel setup, in mount order.
pub fn config_hash(desc: &VehicleDesc) -> [u8; 32] {
    let mut h = Hasher::new();
    h.update(b"GEARVEHv1\0");
    h.update(&desc.version.to_le_bytes());
    for m in &desc.mounts {
        let n = m.name.as_bytes();
        h.update(&(n.len() as u64).to_le_bytes());
        h.update(n);
        match m.wheel_data.as_ref().and_then(|a| desc.wheel_assets.get(a)) {
            None => { h.update(&[0u8]); }
            Some(c) => {
                h.update(&[1u8]);
                for f in [
                    c.suspension_rest_length, c.wheel_radius, c.suspension_strength, c.suspension_damping,
                    c.torque, c.max_steer_angle, c.wheel_mass, c.slide_friction_min, c.slide_friction_max,
                ] {
                    h.update(&f.to_le_bytes());
                }
                h.update(&[c.affected_by_engine as u8, c.affected_by_steering as u8]);
            }
        }
    }
    *h.finalize().as_bytes()
}
