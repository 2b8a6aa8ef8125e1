// src/estimator.rs

//! # State Estimation Module
//!
//! Per-cycle estimators evaluated before any reference shaping: ground/flight
//! regime confidence, aerodynamic angles, and the coordinated-turn
//! feed-forward rates.

pub mod air_data;
pub use air_data::*;
pub mod feed_forward;
pub use feed_forward::*;
pub mod regime;
pub use regime::*;
