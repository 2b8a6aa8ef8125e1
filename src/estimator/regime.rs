// src/estimator/regime.rs

//! # Flight Regime Estimation
//!
//! Ground roll and flight are not separate modes. The control law blends
//! between them with a continuous confidence derived from filtered airspeed,
//! so no command ever jumps when the aircraft lifts off or touches down.

use crate::config::RegimeThresholds;
use num_traits::Float;

/// Confidence in `[0, 1]` that the vehicle is flying rather than rolling on
/// the ground.
///
/// A logistic curve maps the interval between the two thresholds onto
/// `[-5, 5]`, so the result is about 0.007 at `on_ground_for_sure_mps` and
/// about 0.993 at `flying_for_sure_mps`.
pub fn flying_confidence(vc_mps: f64, thresholds: &RegimeThresholds) -> f64 {
    let span = thresholds.flying_for_sure_mps - thresholds.on_ground_for_sure_mps;
    let x = 10.0 * (vc_mps - thresholds.on_ground_for_sure_mps) / span - 5.0;
    sigmoid(x)
}

// Written with exp(-x) so large positive x saturates to 1 instead of inf/inf.
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
