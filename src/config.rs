// src/config.rs

//! # Control Law Configuration
//!
//! Static tuning, envelope limits and fitted models for the control law.
//! Values are read once when the controller is built and never change for the
//! lifetime of that controller.

use crate::error::ConfigError;
use nalgebra::{Matrix1, Matrix2, Matrix2x6, RowVector6, SVector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-axis tuning for reference shaping, integration and damping.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTuning {
    /// Rate command (rad/s) produced by full stick deflection.
    pub stick_scale: f64,
    /// Lowest reference rate the axis will ever command, rad/s.
    pub min_rate: f64,
    /// Highest reference rate the axis will ever command, rad/s.
    pub max_rate: f64,
    /// Integral gain. The sign follows the airframe axis convention.
    pub integral_gain: f64,
    /// Magnitude limit of the stored integral term.
    pub antiwindup: f64,
    /// Rate commands closer than this to neutral snap to the baseline, rad/s.
    pub neutral_tolerance: f64,
    /// Rate damping gain, divided by dynamic pressure at run time.
    pub damp_gain: f64,
}

/// Airspeed thresholds bracketing the ground/flight transition.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeThresholds {
    /// Below this filtered airspeed the vehicle is certainly on the ground, m/s.
    pub on_ground_for_sure_mps: f64,
    /// Above this filtered airspeed the vehicle is certainly flying, m/s.
    pub flying_for_sure_mps: f64,
}

/// Envelope protection limits and the gains that turn them into rate bounds.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeLimits {
    /// Maximum angle of attack, degrees.
    pub alpha_limit_deg: f64,
    /// Maximum bank angle either side, degrees.
    pub bank_limit_deg: f64,
    /// Never-exceed calibrated airspeed, m/s.
    pub vne_mps: f64,
    /// Roll rate bound per radian of remaining bank margin, 1/s.
    pub bank_rate_gain: f64,
    /// Pitch rate bound per radian of remaining alpha margin, 1/s.
    pub alpha_rate_gain: f64,
    /// Minimum pitch rate per m/s of margin below Vne, rad/m.
    pub overspeed_rate_gain: f64,
}

/// Precomputed linear-inverse surface allocation.
///
/// Lateral: `[aileron, rudder] = (lat_ainv * [p_ref, r_ref] - lat_bias * b) / qbar`
/// with `b = [1, ay, gbody_y, vc, 1/vc, beta_deg]`.
///
/// Longitudinal: `elevator = (lon_ainv * q_ref - lon_bias * b) / qbar`
/// with `b = [1, ay, |ay|, gbody_y, vc, 1/vc]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationModel {
    /// Inverse lateral control effectiveness.
    pub lat_ainv: Matrix2<f64>,
    /// Lateral bias coefficients.
    pub lat_bias: Matrix2x6<f64>,
    /// Inverse longitudinal control effectiveness.
    pub lon_ainv: Matrix1<f64>,
    /// Longitudinal bias coefficients.
    pub lon_bias: RowVector6<f64>,
}

/// Inertial/air-data regression for alpha and beta.
///
/// Alpha features: `[1, 1/qbar, ax, ay, az, p, q, r]`.
/// Beta features: `[1, ay, r, ay*qbar, rudder stick, throttle]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirDataModel {
    /// Alpha regression coefficients, degrees.
    pub alpha: SVector<f64, 8>,
    /// Beta regression coefficients, degrees.
    pub beta: SVector<f64, 6>,
}

/// Complete configuration of a [`FlightControlLaw`](crate::FlightControlLaw).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightControlConfig {
    /// Control period in seconds.
    pub dt: f64,
    /// Floor applied to raw airspeeds before filtering, m/s.
    pub airspeed_floor_mps: f64,
    /// Weight of the newest sample in the airspeed low-pass filter, (0, 1].
    pub airspeed_filter_weight: f64,
    /// Air density used for dynamic pressure, kg/m^3.
    pub air_density: f64,
    /// Gravitational acceleration, m/s^2.
    pub gravity: f64,
    /// Ground/flight blend thresholds.
    pub regime: RegimeThresholds,
    /// Envelope protection.
    pub envelope: EnvelopeLimits,
    /// Roll axis tuning.
    pub roll: AxisTuning,
    /// Pitch axis tuning.
    pub pitch: AxisTuning,
    /// Yaw axis tuning.
    pub yaw: AxisTuning,
    /// Surface allocation model.
    pub allocation: AllocationModel,
    /// Alpha/beta regression model.
    pub air_data: AirDataModel,
}

impl AllocationModel {
    /// Allocation fitted from flight data of the reference light aircraft.
    pub fn reference_airframe() -> Self {
        Self {
            lat_ainv: Matrix2::new(
                5539.387453799963,
                -656.7869385413367,
                -630.2043681682369,
                7844.231440517533,
            ),
            lat_bias: Matrix2x6::new(
                -0.18101905232004417,
                -0.005232046450801025,
                -0.00017122476763947896,
                0.0012871295574104415,
                4.112901593458797,
                -0.012910711892868918,
                -0.28148143506417056,
                0.0027324890386930005,
                -0.011315776036902089,
                0.0026095125404917378,
                7.031756136691342,
                0.011047506105235635,
            ),
            lon_ainv: Matrix1::new(-4996.770491110876),
            lon_bias: RowVector6::new(
                0.1564014979644371,
                -0.0004321270501734243,
                0.015961030118490024,
                -0.00017520759288595846,
                -0.0016056595485786104,
                -5.95754057022715,
            ),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        all_finite("allocation.lat_ainv", self.lat_ainv.iter())?;
        all_finite("allocation.lat_bias", self.lat_bias.iter())?;
        all_finite("allocation.lon_ainv", self.lon_ainv.iter())?;
        all_finite("allocation.lon_bias", self.lon_bias.iter())?;

        let m = &self.lat_ainv;
        let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
        if det == 0.0 || !det.is_finite() {
            return Err(ConfigError::SingularAllocation { field: "lateral" });
        }
        if self.lon_ainv[(0, 0)] == 0.0 {
            return Err(ConfigError::SingularAllocation {
                field: "longitudinal",
            });
        }
        Ok(())
    }
}

impl AirDataModel {
    /// Regression fitted from flight data of the reference light aircraft.
    ///
    /// The roll-rate alpha term is zero: the vane sits on the wing tip and
    /// picks up roll rate, which the fit should not learn.
    pub fn reference_airframe() -> Self {
        Self {
            alpha: SVector::from([-6.3792, 14993.7058, 0.2199, 0.0, -0.3121, 0.0, 5.3980, 0.0]),
            beta: SVector::from([-0.3552, -3.5411, 7.1957, 0.0008, -12.1898, 0.9769]),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        all_finite("air_data.alpha", self.alpha.iter())?;
        all_finite("air_data.beta", self.beta.iter())
    }
}

impl AxisTuning {
    fn validate(&self, axis: &'static str) -> Result<(), ConfigError> {
        for value in [
            self.stick_scale,
            self.min_rate,
            self.max_rate,
            self.integral_gain,
            self.antiwindup,
            self.neutral_tolerance,
            self.damp_gain,
        ] {
            finite(axis, value)?;
        }
        if self.min_rate > self.max_rate {
            return Err(ConfigError::InvertedRange { field: axis });
        }
        for value in [self.antiwindup, self.neutral_tolerance, self.damp_gain] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field: axis });
            }
        }
        Ok(())
    }
}

impl FlightControlConfig {
    /// Creates the representative tuning of the reference airframe.
    ///
    /// Example Usage
    /// ```
    /// use flight_control_law::{FlightControlConfig, FlightControlLaw};
    ///
    /// let mut config = FlightControlConfig::new();
    ///
    /// // Soften the roll damper for lighter fingertip flying.
    /// config.roll.damp_gain = 1000.0;
    ///
    /// // Run the loop at 100 Hz.
    /// config.dt = 0.01;
    ///
    /// let law = FlightControlLaw::new(config).expect("valid tuning");
    /// assert_eq!(law.config().dt, 0.01);
    /// ```
    pub fn new() -> Self {
        Self {
            dt: 0.02,
            airspeed_floor_mps: 25.0,
            airspeed_filter_weight: 0.01,
            air_density: 1.225,
            gravity: 9.81,
            regime: RegimeThresholds {
                on_ground_for_sure_mps: 30.0,
                flying_for_sure_mps: 40.0,
            },
            envelope: EnvelopeLimits {
                alpha_limit_deg: 13.0,
                bank_limit_deg: 60.0,
                vne_mps: 80.0,
                bank_rate_gain: 0.5,
                alpha_rate_gain: 2.0,
                overspeed_rate_gain: 0.1,
            },
            roll: AxisTuning {
                stick_scale: 30.0_f64.to_radians(),
                min_rate: (-45.0_f64).to_radians(),
                max_rate: 45.0_f64.to_radians(),
                integral_gain: 1.0,
                antiwindup: 0.25,
                neutral_tolerance: 0.02,
                damp_gain: 1500.0,
            },
            pitch: AxisTuning {
                stick_scale: 30.0_f64.to_radians(),
                min_rate: (-15.0_f64).to_radians(),
                max_rate: 15.0_f64.to_radians(),
                integral_gain: -4.0,
                antiwindup: 0.5,
                neutral_tolerance: 0.03,
                damp_gain: 1500.0,
            },
            yaw: AxisTuning {
                stick_scale: 20.0_f64.to_radians(),
                min_rate: (-20.0_f64).to_radians(),
                max_rate: 20.0_f64.to_radians(),
                integral_gain: -0.01,
                antiwindup: 0.25,
                neutral_tolerance: 0.02,
                damp_gain: 1500.0,
            },
            allocation: AllocationModel::reference_airframe(),
            air_data: AirDataModel::reference_airframe(),
        }
    }

    /// Checks the configuration for values that would make the law misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("dt", self.dt)?;
        positive("airspeed_floor_mps", self.airspeed_floor_mps)?;
        positive("airspeed_filter_weight", self.airspeed_filter_weight)?;
        if self.airspeed_filter_weight > 1.0 {
            return Err(ConfigError::InvertedRange {
                field: "airspeed_filter_weight",
            });
        }
        positive("air_density", self.air_density)?;
        positive("gravity", self.gravity)?;

        finite("regime.on_ground_for_sure_mps", self.regime.on_ground_for_sure_mps)?;
        finite("regime.flying_for_sure_mps", self.regime.flying_for_sure_mps)?;
        if self.regime.flying_for_sure_mps <= self.regime.on_ground_for_sure_mps {
            return Err(ConfigError::RegimeThresholds);
        }

        positive("envelope.alpha_limit_deg", self.envelope.alpha_limit_deg)?;
        positive("envelope.bank_limit_deg", self.envelope.bank_limit_deg)?;
        positive("envelope.vne_mps", self.envelope.vne_mps)?;
        positive("envelope.bank_rate_gain", self.envelope.bank_rate_gain)?;
        positive("envelope.alpha_rate_gain", self.envelope.alpha_rate_gain)?;
        positive("envelope.overspeed_rate_gain", self.envelope.overspeed_rate_gain)?;

        self.roll.validate("roll")?;
        self.pitch.validate("pitch")?;
        self.yaw.validate("yaw")?;
        self.allocation.validate()?;
        self.air_data.validate()
    }
}

impl Default for FlightControlConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field })
    }
}

fn all_finite<'a>(
    field: &'static str,
    mut values: impl Iterator<Item = &'a f64>,
) -> Result<(), ConfigError> {
    if values.all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}
