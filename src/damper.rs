// src/damper.rs

//! # Rate Damping
//!
//! Damping terms pull each measured body rate toward its feed-forward
//! baseline. Gains are divided by dynamic pressure so the surface authority
//! of the damper stays roughly constant across the speed range. Tune them to
//! pilot preference: light fingertip flying or heavy and stable.

/// Per-axis damping terms for one cycle.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DampingTerms {
    /// Roll damping.
    pub roll: f64,
    /// Pitch damping.
    pub pitch: f64,
    /// Yaw damping.
    pub yaw: f64,
}

/// Damping of one axis. `qbar` must come from a floored airspeed.
pub fn damp(measured_rate: f64, baseline_rate: f64, damp_gain: f64, qbar: f64) -> f64 {
    (measured_rate - baseline_rate) * damp_gain / qbar
}
