// src/stabilizer/system.rs

//! # Flight Control System
//!
//! Selects between direct and augmented control. Any mode change
//! re-initialises the control law state, so an augmented law never resumes
//! with integrators or filters left over from an earlier engagement.

use crate::error::ConfigError;
use crate::snapshot::{PilotCommandSnapshot, SurfaceCommandSnapshot, VehicleStateSnapshot};
use crate::stabilizer::{ControlMode, DirectStabilizer, RateStabilizer};
use crate::{FlightControlConfig, FlightStabilizer};

/// Mode-switching front end over the direct and rate stabilizers.
pub struct FlightControlSystem {
    mode: ControlMode,
    direct: DirectStabilizer,
    rate: RateStabilizer,
}

impl FlightControlSystem {
    /// Creates a system in the given mode.
    pub fn with_config(config: FlightControlConfig, mode: ControlMode) -> Result<Self, ConfigError> {
        Ok(Self {
            mode,
            direct: DirectStabilizer::new(),
            rate: RateStabilizer::with_config(config)?,
        })
    }

    /// The active mode.
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// The rate stabilizer, active or not.
    pub fn rate(&self) -> &RateStabilizer {
        &self.rate
    }

    /// Switches mode. Switching to a different mode resets the control law.
    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode == self.mode {
            return;
        }
        info!("Control mode {} -> {}, control law re-initialised", self.mode, mode);
        self.mode = mode;
        self.reset();
    }
}

impl FlightStabilizer for FlightControlSystem {
    fn control(
        &mut self,
        vehicle: &VehicleStateSnapshot,
        pilot: &PilotCommandSnapshot,
    ) -> SurfaceCommandSnapshot {
        match self.mode {
            ControlMode::Direct => self.direct.control(vehicle, pilot),
            ControlMode::Augmented => self.rate.control(vehicle, pilot),
        }
    }

    fn reset(&mut self) {
        self.direct.reset();
        self.rate.reset();
    }
}
