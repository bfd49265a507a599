/// Summary of one vehicle tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub tick: u64,
    pub wheels: u32,
    pub grounded: u32,
    pub airborne: u32,
    /// The tick was dropped by the dt guard; no wheel was touched.
    pub skipped: bool,
}
