// src/pid/integral.rs

//! # Confidence-Scaled Integral Control Module
//!
//! This module provides a compute function and control data structure for an
//! integral-only `piddiy` controller. The integrator soaks up the mismatch
//! between the fitted allocation model and the real airframe (weight and
//! balance, atmosphere, fit limits).
//!
//! The accumulation rate is scaled by the regime confidence so ground
//! handling does not wind the integrator up, and the stored integral is hard
//! clamped to the anti-windup limit every step.

use piddiy::PidController;

/// Control data for the integral compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntegralControlData {
    /// Measured body rate, rad/s.
    pub rate: f64,
    /// Integral gain applied to the rate error.
    pub gain: f64,
    /// Regime confidence in `[0, 1]`, scales the accumulation.
    pub confidence: f64,
    /// The time delta since the last computation.
    pub dt: f64,
    /// Magnitude limit for the stored integral.
    pub antiwindup_limit: f64,
}

/// Integral-only compute callback.
///
/// The set point of the controller is the reference rate. Returns
/// `(error, integral, derivative)` with a zero derivative. A non-finite
/// error (NaN rate sample) leaves the stored error and integral untouched.
pub fn compute_integral(
    pid: &mut PidController<f64, IntegralControlData>,
    data: IntegralControlData,
) -> (f64, f64, f64) {
    let error = pid.set_point - data.rate;
    if !error.is_finite() {
        return (pid.error, pid.integral, 0.0);
    }
    let integral = (pid.integral + data.gain * error * data.confidence * data.dt)
        .clamp(-data.antiwindup_limit, data.antiwindup_limit);

    (error, integral, 0.0)
}

/// Creates a controller whose output is exactly its clamped integral.
pub fn integral_controller() -> PidController<f64, IntegralControlData> {
    let mut pid = PidController::new();
    pid.compute_fn(compute_integral)
        .set_point(0.0)
        .kp(0.0)
        .ki(1.0)
        .kd(0.0);
    pid
}
