// src/lib.rs

//! # Rate-Command Flight Control Law
//!
//! This crate provides a `no_std`, no-alloc fixed-wing flight control law.
//! Pilot stick deflections are treated as body-rate requests. Each control
//! cycle the law blends between ground and flight handling on a continuous
//! regime confidence, protects the bank and angle-of-attack envelope, maps
//! the shaped rate references to surface deflections through a fitted
//! linear-inverse model of the airframe, and adds anti-windup integrators and
//! rate dampers on top.
//!
//! ## Usage
//!
//! ```
//! use flight_control_law::{
//!     FlightControlConfig, FlightControlLaw, PilotCommandSnapshot, VehicleStateSnapshot,
//! };
//!
//! let law = FlightControlLaw::new(FlightControlConfig::new()).expect("valid tuning");
//! let mut state = law.init_state();
//!
//! let vehicle = VehicleStateSnapshot {
//!     vc_mps: 60.0,
//!     vtrue_mps: 61.0,
//!     ..Default::default()
//! };
//! let pilot = PilotCommandSnapshot {
//!     aileron: 0.5,
//!     throttle: 0.6,
//!     ..Default::default()
//! };
//!
//! // Called once per tick by the scheduler.
//! let command = law.update(&mut state, &vehicle, &pilot);
//! assert_eq!(command.throttle, 0.6);
//! ```

#![no_std]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

pub mod allocation;
pub mod composer;
pub mod config;
pub mod damper;
pub mod envelope;
pub mod error;
pub mod estimator;
pub mod law;
pub mod pid;
pub mod shaper;
pub mod snapshot;
pub mod stabilizer;

#[doc(inline)]
pub use config::*;
#[doc(inline)]
pub use error::ConfigError;
#[doc(inline)]
pub use law::*;
#[doc(inline)]
pub use snapshot::*;
#[doc(inline)]
pub use stabilizer::*;

#[cfg(test)]
mod test_utils;
