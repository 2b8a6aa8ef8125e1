// src/pid.rs

//! # PID Control Module
//!
//! This module provides compute functions and control data structures
//! for the `piddiy` controllers that back each axis of the control law.

pub mod integral;
pub use integral::*;
