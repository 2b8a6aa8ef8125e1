// src/stabilizer/direct.rs

//! # Direct Flight Stabilizer
//!
//! No augmentation at all: every inceptor, elevator trim included, is copied
//! to its actuator. Useful as a fallback and for comparing handling with and
//! without the control law.

use crate::snapshot::{PilotCommandSnapshot, SurfaceCommandSnapshot, VehicleStateSnapshot};
use crate::FlightStabilizer;

/// Stabilizer that passes pilot inputs straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectStabilizer;

impl DirectStabilizer {
    /// Creates a direct stabilizer.
    pub fn new() -> Self {
        Self
    }
}

impl FlightStabilizer for DirectStabilizer {
    fn control(
        &mut self,
        _vehicle: &VehicleStateSnapshot,
        pilot: &PilotCommandSnapshot,
    ) -> SurfaceCommandSnapshot {
        SurfaceCommandSnapshot::direct(pilot)
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The vehicle state has no influence on direct commands.
    #[test]
    fn test_stabilizer_direct_ignores_vehicle() {
        let mut stabilizer = DirectStabilizer::new();
        let pilot = PilotCommandSnapshot {
            aileron: -0.4,
            elevator: 0.2,
            rudder: 0.6,
            throttle: 1.0,
            elevator_trim: -0.1,
            flaps_up: false,
            flaps_down: true,
        };
        let calm = stabilizer.control(&VehicleStateSnapshot::default(), &pilot);
        let rolling = stabilizer.control(
            &VehicleStateSnapshot {
                phi_deg: 45.0,
                p: 1.0,
                vc_mps: 70.0,
                ..Default::default()
            },
            &pilot,
        );

        assert_eq!(calm, rolling);
        assert_eq!(calm, SurfaceCommandSnapshot::direct(&pilot));
    }
}
