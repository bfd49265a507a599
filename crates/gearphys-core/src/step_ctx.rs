use crate::Scalar;

/// Smallest timestep the wheel solvers accept. Velocity and lateral grip divide by dt.
pub const MIN_DT: Scalar = 1.0e-6;

/// Per-tick context passed into the wheel solvers.
#[derive(Copy, Clone, Debug)]
pub struct StepCtx {
    pub dt: Scalar,
    pub tick: u64,
}

impl StepCtx {
    /// Returns `None` when `dt` is non-finite or too small to divide by.
    pub fn guarded(dt: Scalar, tick: u64) -> Option<Self> {
        if dt.is_finite() && dt > MIN_DT { Some(Self { dt, tick }) } else { None }
    }

    #[inline] pub fn inv_dt(&self) -> Scalar { 1.0 / self.dt }
}
