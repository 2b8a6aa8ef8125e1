// src/composer.rs

//! # Command Composition
//!
//! Sums the allocated, integral and damping terms of each axis and packages
//! the cycle's surface command. Pitch damping is added while roll and yaw
//! damping are subtracted; the asymmetry follows the sign conventions of the
//! airframe axes. Throttle and flap discretes pass through untouched.

use crate::allocation::LateralCommand;
use crate::damper::DampingTerms;
use crate::snapshot::{PilotCommandSnapshot, SurfaceCommandSnapshot};

/// Integral terms of the three axes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntegralTerms {
    /// Roll (aileron) integral.
    pub roll: f64,
    /// Pitch (elevator) integral.
    pub pitch: f64,
    /// Yaw (rudder) integral.
    pub yaw: f64,
}

/// Builds the final surface command of an augmented cycle.
///
/// Elevator trim is zero: the pitch integrator does the trimming.
pub fn compose(
    lateral: LateralCommand,
    raw_elevator: f64,
    integral: &IntegralTerms,
    damping: &DampingTerms,
    pilot: &PilotCommandSnapshot,
) -> SurfaceCommandSnapshot {
    SurfaceCommandSnapshot {
        aileron: lateral.aileron + integral.roll - damping.roll,
        elevator: raw_elevator + integral.pitch + damping.pitch,
        elevator_trim: 0.0,
        rudder: lateral.rudder + integral.yaw - damping.yaw,
        throttle: pilot.throttle,
        flaps_up: pilot.flaps_up,
        flaps_down: pilot.flaps_down,
    }
}
