// src/estimator/feed_forward.rs

//! # Coordinated Turn Feed-Forward
//!
//! For a steady, level, coordinated turn the turn rate follows from bank
//! angle and airspeed alone. Projecting it onto the body axes gives the pitch
//! and yaw rates the aircraft should hold while banked. These become the
//! baselines the pitch and yaw axes are shaped and damped towards. Roll has
//! no feed-forward term.

use num_traits::Float;

/// Bank angles at or beyond this magnitude produce no feed-forward.
pub const TURN_BANK_GUARD_DEG: f64 = 89.0;

/// Body-axis rates of a steady coordinated level turn.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinatedTurn {
    /// Turn rate about the vertical, rad/s.
    pub turn_rate: f64,
    /// Baseline pitch rate, rad/s.
    pub q: f64,
    /// Baseline yaw rate, rad/s.
    pub r: f64,
}

/// Computes the coordinated-turn baseline rates.
///
/// `vtrue_mps` must already be floored; the tangent singularity at ±90° bank
/// is avoided by returning a zero turn rate at or beyond
/// [`TURN_BANK_GUARD_DEG`].
pub fn coordinated_turn(phi_deg: f64, vtrue_mps: f64, gravity: f64) -> CoordinatedTurn {
    let phi = phi_deg.to_radians();
    let turn_rate = if phi_deg.abs() < TURN_BANK_GUARD_DEG {
        phi.tan() * -gravity / vtrue_mps
    } else {
        0.0
    };

    CoordinatedTurn {
        turn_rate,
        q: phi.sin() * turn_rate,
        r: phi.cos() * turn_rate,
    }
}
