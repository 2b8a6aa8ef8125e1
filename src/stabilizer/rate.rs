// src/stabilizer/rate.rs

//! # Rate-Command Flight Stabilizer
//!
//! Bundles a [`FlightControlLaw`] with the [`ControlLawState`] of a single
//! vehicle so the pair can be driven through the [`FlightStabilizer`] trait.
//! Use the law and state directly when one configuration serves several
//! vehicles.

use crate::error::ConfigError;
use crate::law::{ControlLawState, FlightControlLaw, LawTelemetry};
use crate::snapshot::{PilotCommandSnapshot, SurfaceCommandSnapshot, VehicleStateSnapshot};
use crate::{FlightControlConfig, FlightStabilizer};

/// Struct representing the rate-command flight stabilization controller.
pub struct RateStabilizer {
    law: FlightControlLaw,
    state: ControlLawState,
    telemetry: Option<LawTelemetry>,
}

impl RateStabilizer {
    /// Creates a new controller using the provided configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn with_config(config: FlightControlConfig) -> Result<Self, ConfigError> {
        let law = FlightControlLaw::new(config)?;
        Ok(Self::with_law(law))
    }

    /// Creates a new controller around an already validated law.
    pub fn with_law(law: FlightControlLaw) -> Self {
        let state = law.init_state();
        Self {
            law,
            state,
            telemetry: None,
        }
    }

    /// The control law.
    pub fn law(&self) -> &FlightControlLaw {
        &self.law
    }

    /// The persistent state of the controlled vehicle.
    pub fn state(&self) -> &ControlLawState {
        &self.state
    }

    /// Intermediate values of the most recent cycle, if any ran since the
    /// last reset.
    pub fn telemetry(&self) -> Option<&LawTelemetry> {
        self.telemetry.as_ref()
    }
}

impl FlightStabilizer for RateStabilizer {
    fn control(
        &mut self,
        vehicle: &VehicleStateSnapshot,
        pilot: &PilotCommandSnapshot,
    ) -> SurfaceCommandSnapshot {
        let (command, telemetry) = self
            .law
            .update_with_telemetry(&mut self.state, vehicle, pilot);
        self.telemetry = Some(telemetry);
        command
    }

    fn reset(&mut self) {
        self.state.reset();
        self.telemetry = None;
    }
}
