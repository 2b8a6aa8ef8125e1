// src/stabilizer.rs

//! # Flight Stabilizers
//!
//! Front ends that drive the control law (or bypass it) once per control
//! cycle through the [`FlightStabilizer`] trait.

pub mod direct;
pub use direct::*;
pub mod flight_stabilizer;
pub use flight_stabilizer::*;
pub mod rate;
pub use rate::*;
pub mod system;
pub use system::*;
