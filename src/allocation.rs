// src/allocation.rs

//! # Control Allocation Module
//!
//! Maps reference body rates to raw surface deflections through the fitted
//! linear-inverse model of the airframe. Aileron and rudder are solved
//! jointly because the airframe couples them; the elevator is solved alone.
//!
//! Every division is by dynamic pressure or airspeed, and both are computed
//! from an airspeed floored at the configured minimum, so the allocator can
//! never divide by zero whatever the caller passes in.

use crate::config::AllocationModel;
use nalgebra::{Vector1, Vector2, Vector6};
use num_traits::Float;

/// State features the allocation bias terms depend on.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AllocationFeatures {
    /// Body y acceleration, m/s^2.
    pub ay: f64,
    /// Gravity component along body y, m/s^2.
    pub gbody_y: f64,
    /// Filtered calibrated airspeed, m/s.
    pub vc_mps: f64,
    /// Sideslip, degrees.
    pub beta_deg: f64,
}

/// Raw lateral surface commands.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LateralCommand {
    /// Raw aileron command.
    pub aileron: f64,
    /// Raw rudder command.
    pub rudder: f64,
}

/// Model-based control allocator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlAllocator {
    model: AllocationModel,
    air_density: f64,
    airspeed_floor_mps: f64,
}

impl ControlAllocator {
    /// Creates an allocator around a validated model.
    pub fn new(model: AllocationModel, air_density: f64, airspeed_floor_mps: f64) -> Self {
        Self {
            model,
            air_density,
            airspeed_floor_mps,
        }
    }

    /// The allocation model.
    pub fn model(&self) -> &AllocationModel {
        &self.model
    }

    /// Dynamic pressure in Pa from a calibrated airspeed floored at the
    /// configured minimum.
    pub fn dynamic_pressure(&self, vc_mps: f64) -> f64 {
        let vc = self.floored(vc_mps);
        0.5 * self.air_density * vc * vc
    }

    /// Solves aileron and rudder for a reference roll rate and yaw term.
    pub fn lateral(&self, ref_p: f64, ref_r: f64, features: &AllocationFeatures) -> LateralCommand {
        let vc = self.floored(features.vc_mps);
        let reference = Vector2::new(ref_p, ref_r);
        let bias = Vector6::new(
            1.0,
            features.ay,
            features.gbody_y,
            vc,
            1.0 / vc,
            features.beta_deg,
        );
        let y = (self.model.lat_ainv * reference - self.model.lat_bias * bias)
            / self.dynamic_pressure(vc);

        LateralCommand {
            aileron: y[0],
            rudder: y[1],
        }
    }

    /// Solves the elevator for a reference pitch rate.
    pub fn longitudinal(&self, ref_q: f64, features: &AllocationFeatures) -> f64 {
        let vc = self.floored(features.vc_mps);
        let reference = Vector1::new(ref_q);
        let bias = Vector6::new(
            1.0,
            features.ay,
            features.ay.abs(),
            features.gbody_y,
            vc,
            1.0 / vc,
        );
        let y = (self.model.lon_ainv * reference - self.model.lon_bias * bias)
            / self.dynamic_pressure(vc);
        y[0]
    }

    fn floored(&self, vc_mps: f64) -> f64 {
        // NaN compares false, so it is floored too.
        if vc_mps > self.airspeed_floor_mps {
            vc_mps
        } else {
            self.airspeed_floor_mps
        }
    }
}

/// Gravity along the body y axis for the given attitude.
pub fn gravity_body_y(phi_deg: f64, theta_deg: f64, gravity: f64) -> f64 {
    phi_deg.to_radians().sin() * theta_deg.to_radians().cos() * gravity
}
