// src/snapshot.rs

//! # Cycle Snapshots
//!
//! Plain data read at the start of a control cycle and produced at its end.
//! The producers and consumers (flight-dynamics engine, inceptors, actuators)
//! live outside this crate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sensed vehicle state for one cycle.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleStateSnapshot {
    /// Bank angle in degrees.
    pub phi_deg: f64,
    /// Pitch angle in degrees.
    pub theta_deg: f64,
    /// Body roll rate in rad/s.
    pub p: f64,
    /// Body pitch rate in rad/s.
    pub q: f64,
    /// Body yaw rate in rad/s.
    pub r: f64,
    /// Body x acceleration in m/s^2.
    pub ax: f64,
    /// Body y acceleration in m/s^2.
    pub ay: f64,
    /// Body z acceleration in m/s^2.
    pub az: f64,
    /// Calibrated airspeed in m/s.
    pub vc_mps: f64,
    /// True airspeed in m/s.
    pub vtrue_mps: f64,
    /// Angle of attack from a vane or the simulation model, if available.
    pub alpha_deg: Option<f64>,
    /// Sideslip from a vane or the simulation model, if available.
    pub beta_deg: Option<f64>,
}

/// Pilot (or autopilot) inceptor positions for one cycle.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PilotCommandSnapshot {
    /// Roll stick, -1 (left) to 1 (right).
    pub aileron: f64,
    /// Pitch stick, -1 (back) to 1 (forward).
    pub elevator: f64,
    /// Rudder pedals, -1 to 1.
    pub rudder: f64,
    /// Throttle lever, 0 to 1.
    pub throttle: f64,
    /// Elevator trim wheel, -1 to 1.
    pub elevator_trim: f64,
    /// Flap retract switch.
    pub flaps_up: bool,
    /// Flap extend switch.
    pub flaps_down: bool,
}

/// Actuator commands produced by one cycle.
///
/// Surface units match the units the allocation model was fit in.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceCommandSnapshot {
    /// Aileron command.
    pub aileron: f64,
    /// Elevator command.
    pub elevator: f64,
    /// Elevator trim command.
    pub elevator_trim: f64,
    /// Rudder command.
    pub rudder: f64,
    /// Throttle command, copied from the pilot.
    pub throttle: f64,
    /// Flap retract discrete, copied from the pilot.
    pub flaps_up: bool,
    /// Flap extend discrete, copied from the pilot.
    pub flaps_down: bool,
}

impl SurfaceCommandSnapshot {
    /// Direct mode: every inceptor is copied to its actuator unchanged.
    pub fn direct(pilot: &PilotCommandSnapshot) -> Self {
        Self {
            aileron: pilot.aileron,
            elevator: pilot.elevator,
            elevator_trim: pilot.elevator_trim,
            rudder: pilot.rudder,
            throttle: pilot.throttle,
            flaps_up: pilot.flaps_up,
            flaps_down: pilot.flaps_down,
        }
    }
}
