// src/estimator/air_data.rs

//! # Aerodynamic Angle Estimation
//!
//! Angle of attack and sideslip come from one of three sources, chosen once
//! per cycle from the regime confidence:
//!
//! - **Sensed**: vane or simulation-model angles from the vehicle snapshot.
//! - **Estimated**: a linear regression over dynamic pressure, body
//!   accelerations, body rates and pilot inputs, fit from flight-test data.
//! - **Attitude**: on the ground alpha is taken as the pitch angle and beta as
//!   zero, since neither airdata nor the regression mean much at taxi speed.
//!
//! ## Accuracy Caveat
//!
//! The regression behaves badly at low airspeed and the beta estimate drifts
//! and can get stuck. It is only trusted once the regime confidence says the
//! aircraft is flying, and even then a sensed source is preferred.

use crate::config::AirDataModel;
use crate::snapshot::{PilotCommandSnapshot, VehicleStateSnapshot};
use nalgebra::SVector;

/// Regime confidence above which airdata angles are used at all.
pub const AIR_DATA_CONFIDENCE: f64 = 0.5;

/// Where this cycle's alpha and beta came from.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirDataSource {
    /// Measured by the vehicle (vanes or simulation model).
    Sensed,
    /// Inertial/airdata regression.
    Estimated,
    /// Ground approximation from pitch attitude.
    Attitude,
}

/// Aerodynamic angles for one cycle.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroAngles {
    /// Angle of attack, degrees.
    pub alpha_deg: f64,
    /// Sideslip angle, degrees.
    pub beta_deg: f64,
    /// Source the angles were taken from.
    pub source: AirDataSource,
}

impl AirDataSource {
    /// Picks the source for this cycle.
    ///
    /// Sensed angles are used only when both are present; a half-sensed
    /// snapshot falls back to the regression for both.
    pub fn select(confidence: f64, vehicle: &VehicleStateSnapshot) -> Self {
        if confidence > AIR_DATA_CONFIDENCE {
            match (vehicle.alpha_deg, vehicle.beta_deg) {
                (Some(_), Some(_)) => AirDataSource::Sensed,
                _ => AirDataSource::Estimated,
            }
        } else {
            AirDataSource::Attitude
        }
    }
}

/// Resolves alpha and beta for this cycle.
pub fn aero_angles(
    confidence: f64,
    qbar: f64,
    vehicle: &VehicleStateSnapshot,
    pilot: &PilotCommandSnapshot,
    model: &AirDataModel,
) -> AeroAngles {
    let source = AirDataSource::select(confidence, vehicle);
    let (alpha_deg, beta_deg) = match (source, vehicle.alpha_deg, vehicle.beta_deg) {
        (AirDataSource::Sensed, Some(alpha), Some(beta)) => (alpha, beta),
        (AirDataSource::Attitude, _, _) => (vehicle.theta_deg, 0.0),
        _ => (
            estimate_alpha(model, qbar, vehicle),
            estimate_beta(model, qbar, vehicle, pilot),
        ),
    };

    AeroAngles {
        alpha_deg,
        beta_deg,
        source,
    }
}

/// Regression estimate of angle of attack in degrees.
///
/// `qbar` must come from a floored airspeed.
pub fn estimate_alpha(model: &AirDataModel, qbar: f64, vehicle: &VehicleStateSnapshot) -> f64 {
    let features = SVector::<f64, 8>::from([
        1.0,
        1.0 / qbar,
        vehicle.ax,
        vehicle.ay,
        vehicle.az,
        vehicle.p,
        vehicle.q,
        vehicle.r,
    ]);
    model.alpha.dot(&features)
}

/// Regression estimate of sideslip in degrees.
pub fn estimate_beta(
    model: &AirDataModel,
    qbar: f64,
    vehicle: &VehicleStateSnapshot,
    pilot: &PilotCommandSnapshot,
) -> f64 {
    let features = SVector::<f64, 6>::from([
        1.0,
        vehicle.ay,
        vehicle.r,
        vehicle.ay * qbar,
        pilot.rudder,
        pilot.throttle,
    ]);
    model.beta.dot(&features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn sensed_vehicle() -> VehicleStateSnapshot {
        VehicleStateSnapshot {
            theta_deg: 4.0,
            alpha_deg: Some(3.0),
            beta_deg: Some(-1.0),
            ..Default::default()
        }
    }

    /// In flight, sensed angles win when both are present.
    #[test]
    fn test_air_data_prefers_sensed_in_flight() {
        let model = AirDataModel::reference_airframe();
        let angles = aero_angles(
            0.9,
            2000.0,
            &sensed_vehicle(),
            &PilotCommandSnapshot::default(),
            &model,
        );
        assert_eq!(angles.source, AirDataSource::Sensed);
        assert!(value_close(3.0, angles.alpha_deg));
        assert!(value_close(-1.0, angles.beta_deg));
    }

    /// On the ground alpha is the pitch attitude and beta is zero.
    #[test]
    fn test_air_data_ground_uses_attitude() {
        let model = AirDataModel::reference_airframe();
        let angles = aero_angles(
            0.5,
            500.0,
            &sensed_vehicle(),
            &PilotCommandSnapshot::default(),
            &model,
        );
        assert_eq!(angles.source, AirDataSource::Attitude);
        assert!(value_close(4.0, angles.alpha_deg));
        assert!(value_close(0.0, angles.beta_deg));
    }

    /// Without vanes the regression takes over in flight.
    #[test]
    fn test_air_data_falls_back_to_regression() {
        let model = AirDataModel::reference_airframe();
        let vehicle = VehicleStateSnapshot {
            az: -9.81,
            alpha_deg: Some(3.0),
            beta_deg: None,
            ..Default::default()
        };
        let pilot = PilotCommandSnapshot {
            throttle: 0.5,
            ..Default::default()
        };
        let qbar = 2205.0;
        let angles = aero_angles(0.99, qbar, &vehicle, &pilot, &model);

        let expected_alpha = -6.3792 + 14993.7058 / qbar - 0.3121 * -9.81;
        let expected_beta = -0.3552 + 0.9769 * 0.5;
        assert_eq!(angles.source, AirDataSource::Estimated);
        assert!(value_close(expected_alpha, angles.alpha_deg));
        assert!(value_close(expected_beta, angles.beta_deg));
    }

    /// The roll-rate term of the alpha fit is ignored.
    #[test]
    fn test_air_data_alpha_ignores_roll_rate() {
        let model = AirDataModel::reference_airframe();
        let still = VehicleStateSnapshot::default();
        let rolling = VehicleStateSnapshot {
            p: 1.0,
            ..Default::default()
        };
        assert!(value_close(
            estimate_alpha(&model, 2000.0, &still),
            estimate_alpha(&model, 2000.0, &rolling)
        ));
    }
}
