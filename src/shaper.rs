// src/shaper.rs

//! # Rate Reference Shaping Module
//!
//! One [`AxisReferenceState`] per axis turns the pilot's raw rate command
//! into a reference rate the allocator can chase, and owns the axis
//! integrator.
//!
//! Shaping blends the stick toward the feed-forward baseline as the regime
//! confidence drops, snaps small stick noise to the baseline, then applies
//! the envelope bounds supplied for this cycle and finally the fixed tuning
//! range, which no envelope bound can widen. Integration is the only
//! operation that mutates the axis.

use crate::config::AxisTuning;
use crate::pid::{integral_controller, IntegralControlData};
use piddiy::PidController;

/// Control axis, used to label log output.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Roll, about the body x axis.
    Roll,
    /// Pitch, about the body y axis.
    Pitch,
    /// Yaw, about the body z axis.
    Yaw,
}

/// Optional envelope bounds on a reference rate, rad/s.
///
/// A missing side means "no limit on that side".
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateBounds {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
}

impl RateBounds {
    /// No envelope bounds.
    pub const NONE: Self = Self {
        min: None,
        max: None,
    };

    /// Creates bounds from optional sides.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Clamps a value into the bounds.
    ///
    /// The upper bound is applied first, so a lower bound above the upper
    /// bound wins.
    pub fn apply(&self, value: f64) -> f64 {
        let mut value = value;
        if let Some(max) = self.max {
            if value > max {
                value = max;
            }
        }
        if let Some(min) = self.min {
            if value < min {
                value = min;
            }
        }
        value
    }
}

/// Persistent reference-shaping and integrator state of one axis.
pub struct AxisReferenceState {
    axis: Axis,
    tuning: AxisTuning,
    dt: f64,
    pid: PidController<f64, IntegralControlData>,
}

impl AxisReferenceState {
    /// Creates an axis with a zero integral.
    pub fn new(axis: Axis, tuning: AxisTuning, dt: f64) -> Self {
        Self {
            axis,
            tuning,
            dt,
            pid: integral_controller(),
        }
    }

    /// The axis this state belongs to.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The fixed tuning of this axis.
    pub fn tuning(&self) -> &AxisTuning {
        &self.tuning
    }

    /// The stored integral term.
    pub fn integral(&self) -> f64 {
        self.pid.integral
    }

    /// Converts a raw stick rate command into a reference rate.
    ///
    /// - `rate_cmd`: stick-scaled rate request relative to the baseline, rad/s.
    /// - `baseline`: feed-forward rate the axis rests at, rad/s.
    /// - `bounds`: envelope bounds derived this cycle.
    /// - `confidence`: flight regime confidence in `[0, 1]`.
    pub fn shape(&self, rate_cmd: f64, baseline: f64, bounds: RateBounds, confidence: f64) -> f64 {
        let reference = if rate_cmd.abs() < self.tuning.neutral_tolerance {
            baseline
        } else {
            baseline + confidence.clamp(0.0, 1.0) * rate_cmd
        };
        bounds
            .apply(reference)
            .clamp(self.tuning.min_rate, self.tuning.max_rate)
    }

    /// Advances the integrator by one control period and returns the
    /// clamped integral term.
    pub fn integrate(&mut self, reference: f64, measured: f64, confidence: f64) -> f64 {
        let data = IntegralControlData {
            rate: measured,
            gain: self.tuning.integral_gain,
            confidence: confidence.clamp(0.0, 1.0),
            dt: self.dt,
            antiwindup_limit: self.tuning.antiwindup,
        };
        self.pid.set_point(reference);
        let _ = self.pid.compute(data);

        let integral = self.pid.integral;
        if integral.abs() >= self.tuning.antiwindup && self.tuning.antiwindup > 0.0 {
            trace!("{} integrator at anti-windup limit {}", self.axis, integral);
        }
        integral
    }

    /// Clears the integrator.
    pub fn reset(&mut self) {
        self.pid.reset();
        self.pid.set_point(0.0);
    }
}
