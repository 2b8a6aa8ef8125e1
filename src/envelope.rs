// src/envelope.rs

//! # Envelope Protection
//!
//! Rate bounds recomputed every cycle from the remaining margin to the bank,
//! angle-of-attack and airspeed limits. The closer the aircraft is to a
//! limit, the less rate toward it the shaper may command.

use crate::config::EnvelopeLimits;
use crate::shaper::RateBounds;

/// Roll rate bounds from the bank-angle margin on either side.
pub fn roll_bounds(phi_deg: f64, limits: &EnvelopeLimits) -> RateBounds {
    let max_p = (limits.bank_limit_deg - phi_deg).to_radians() * limits.bank_rate_gain;
    let min_p = (-limits.bank_limit_deg - phi_deg).to_radians() * limits.bank_rate_gain;
    RateBounds::new(Some(min_p), Some(max_p))
}

/// Pitch rate bounds from the alpha margin (upper) and the margin below Vne
/// (lower).
///
/// Beyond Vne the lower bound turns positive and forces the nose up, but
/// never above the alpha bound: stall protection outranks overspeed.
pub fn pitch_bounds(alpha_deg: f64, vc_mps: f64, limits: &EnvelopeLimits) -> RateBounds {
    let max_q = (limits.alpha_limit_deg - alpha_deg).to_radians() * limits.alpha_rate_gain;
    let min_q = (vc_mps - limits.vne_mps) * limits.overspeed_rate_gain;
    RateBounds::new(Some(min_q.min(max_q)), Some(max_q))
}
