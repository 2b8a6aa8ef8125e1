// src/stabilizer/flight_stabilizer.rs

//! A module specifying the shared interface for flight stabilizers driven by
//! a fixed-rate control loop. The scheduler calling [`FlightStabilizer::control`]
//! must not overlap cycles; each call reads its snapshots once and returns the
//! command for that tick.

use crate::snapshot::{PilotCommandSnapshot, SurfaceCommandSnapshot, VehicleStateSnapshot};

/// How pilot inputs reach the control surfaces.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Inceptors drive the surfaces directly.
    Direct,
    /// The rate-command control law drives the surfaces.
    #[default]
    Augmented,
}

/// A trait for flight stabilizers that turn a vehicle state snapshot and a
/// pilot command snapshot into a surface command once per control cycle.
pub trait FlightStabilizer {
    /// Runs one control cycle.
    ///
    /// - `vehicle`: sensed vehicle state for this cycle.
    /// - `pilot`: inceptor positions for this cycle.
    ///
    /// Returns the surface command for this cycle.
    fn control(
        &mut self,
        vehicle: &VehicleStateSnapshot,
        pilot: &PilotCommandSnapshot,
    ) -> SurfaceCommandSnapshot;

    /// Clears all state carried between cycles.
    fn reset(&mut self);
}
