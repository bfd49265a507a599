//! Shared math and bookkeeping for gearphys.
//!
//! Everything here is engine-agnostic: a `Transform` with the basis helpers the
//! wheel solvers need, the per-tick `StepCtx`, step statistics and a blake3
//! backed `StepHasher` for determinism checks.

pub mod scalar;
pub mod types;
pub mod hash;
pub mod time;
pub mod step_ctx;

pub use scalar::{Scalar, lerp, GRAVITY_COMP};
pub use types::{Vec2, Vec3, Quat, Transform, vec3, AXIS_FORWARD, AXIS_RIGHT, AXIS_UP};
pub use hash::{StepHasher, hash_vec3, hash_quat, hash_transform, hex32};
pub use time::StepStats;
pub use step_ctx::{StepCtx, MIN_DT};
