// src/law.rs

//! # Rate-Command Flight Control Law
//!
//! The closed-loop pipeline run once per control tick. Pilot stick positions
//! are read as body-rate requests; sensed state schedules the blend between
//! ground and flight, bounds the requests to the envelope, and feeds the
//! model-based allocator, integrators and dampers.
//!
//! ## Ownership
//!
//! [`FlightControlLaw`] is immutable after construction and holds the
//! validated configuration. Everything that persists across cycles lives in
//! a [`ControlLawState`] the caller owns and lends to [`FlightControlLaw::update`]
//! exclusively. Several vehicles can share one law with a state each.
//!
//! ## Cycle Order
//!
//! 1. Airspeed filtering, dynamic pressure, regime confidence.
//! 2. Aerodynamic angles and coordinated-turn baselines.
//! 3. Envelope bounds and reference shaping.
//! 4. Allocation, integration and damping.
//! 5. Composition of the surface command.

use crate::allocation::{gravity_body_y, AllocationFeatures, ControlAllocator, LateralCommand};
use crate::composer::{compose, IntegralTerms};
use crate::config::FlightControlConfig;
use crate::damper::{damp, DampingTerms};
use crate::envelope::{pitch_bounds, roll_bounds};
use crate::error::ConfigError;
use crate::estimator::{aero_angles, coordinated_turn, flying_confidence, AirDataSource, CoordinatedTurn};
use crate::shaper::{Axis, AxisReferenceState, RateBounds};
use crate::snapshot::{PilotCommandSnapshot, SurfaceCommandSnapshot, VehicleStateSnapshot};

/// State the control law carries from one cycle to the next.
pub struct ControlLawState {
    floor_mps: f64,
    vc_mps_filt: f64,
    vtrue_mps_filt: f64,
    roll: AxisReferenceState,
    pitch: AxisReferenceState,
    yaw: AxisReferenceState,
    air_data_source: Option<AirDataSource>,
}

impl ControlLawState {
    /// Creates a fresh state: filters at the airspeed floor, integrators at zero.
    pub fn new(config: &FlightControlConfig) -> Self {
        Self {
            floor_mps: config.airspeed_floor_mps,
            vc_mps_filt: config.airspeed_floor_mps,
            vtrue_mps_filt: config.airspeed_floor_mps,
            roll: AxisReferenceState::new(Axis::Roll, config.roll, config.dt),
            pitch: AxisReferenceState::new(Axis::Pitch, config.pitch, config.dt),
            yaw: AxisReferenceState::new(Axis::Yaw, config.yaw, config.dt),
            air_data_source: None,
        }
    }

    /// Returns the state to its freshly initialised values.
    pub fn reset(&mut self) {
        self.vc_mps_filt = self.floor_mps;
        self.vtrue_mps_filt = self.floor_mps;
        self.roll.reset();
        self.pitch.reset();
        self.yaw.reset();
        self.air_data_source = None;
    }

    /// Filtered calibrated airspeed, m/s.
    pub fn vc_mps_filt(&self) -> f64 {
        self.vc_mps_filt
    }

    /// Filtered true airspeed, m/s.
    pub fn vtrue_mps_filt(&self) -> f64 {
        self.vtrue_mps_filt
    }

    /// Roll axis state.
    pub fn roll(&self) -> &AxisReferenceState {
        &self.roll
    }

    /// Pitch axis state.
    pub fn pitch(&self) -> &AxisReferenceState {
        &self.pitch
    }

    /// Yaw axis state.
    pub fn yaw(&self) -> &AxisReferenceState {
        &self.yaw
    }

    /// Integral terms currently stored on the three axes.
    pub fn integrals(&self) -> IntegralTerms {
        IntegralTerms {
            roll: self.roll.integral(),
            pitch: self.pitch.integral(),
            yaw: self.yaw.integral(),
        }
    }
}

/// Intermediate values of one augmented cycle, for the caller to log.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LawTelemetry {
    /// Flight regime confidence.
    pub confidence: f64,
    /// Angle of attack used this cycle, degrees.
    pub alpha_deg: f64,
    /// Sideslip used this cycle, degrees.
    pub beta_deg: f64,
    /// Source of alpha and beta.
    pub air_data_source: AirDataSource,
    /// Filtered calibrated airspeed, m/s.
    pub vc_mps_filt: f64,
    /// Filtered true airspeed, m/s.
    pub vtrue_mps_filt: f64,
    /// Dynamic pressure, Pa.
    pub qbar: f64,
    /// Coordinated-turn baselines.
    pub baseline: CoordinatedTurn,
    /// Shaped roll rate reference, rad/s.
    pub ref_p: f64,
    /// Shaped pitch rate reference, rad/s.
    pub ref_q: f64,
    /// Shaped yaw rate reference, rad/s.
    pub ref_r: f64,
    /// Raw allocated lateral commands.
    pub lateral: LateralCommand,
    /// Raw allocated elevator command.
    pub raw_elevator: f64,
    /// Integral terms after this cycle.
    pub integral: IntegralTerms,
    /// Damping terms.
    pub damping: DampingTerms,
}

/// The rate-command control law with its validated configuration.
#[derive(Debug, Clone)]
pub struct FlightControlLaw {
    config: FlightControlConfig,
    allocator: ControlAllocator,
}

impl FlightControlLaw {
    /// Validates the configuration and builds the law.
    pub fn new(config: FlightControlConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            error!("Rejected flight control configuration: {}", e);
            return Err(e);
        }
        info!(
            "Flight control law ready, dt {} s, regime {}..{} m/s",
            config.dt,
            config.regime.on_ground_for_sure_mps,
            config.regime.flying_for_sure_mps
        );

        let allocator =
            ControlAllocator::new(config.allocation, config.air_density, config.airspeed_floor_mps);
        Ok(Self { config, allocator })
    }

    /// The validated configuration.
    pub fn config(&self) -> &FlightControlConfig {
        &self.config
    }

    /// The control allocator.
    pub fn allocator(&self) -> &ControlAllocator {
        &self.allocator
    }

    /// Creates a fresh state for one vehicle.
    pub fn init_state(&self) -> ControlLawState {
        ControlLawState::new(&self.config)
    }

    /// Runs one control cycle and returns the surface command.
    pub fn update(
        &self,
        state: &mut ControlLawState,
        vehicle: &VehicleStateSnapshot,
        pilot: &PilotCommandSnapshot,
    ) -> SurfaceCommandSnapshot {
        self.update_with_telemetry(state, vehicle, pilot).0
    }

    /// Runs one control cycle and also returns its intermediate values.
    pub fn update_with_telemetry(
        &self,
        state: &mut ControlLawState,
        vehicle: &VehicleStateSnapshot,
        pilot: &PilotCommandSnapshot,
    ) -> (SurfaceCommandSnapshot, LawTelemetry) {
        let config = &self.config;

        // Airspeeds, dynamic pressure, regime.
        state.vc_mps_filt = self.filter_airspeed(state.vc_mps_filt, vehicle.vc_mps);
        state.vtrue_mps_filt = self.filter_airspeed(state.vtrue_mps_filt, vehicle.vtrue_mps);
        let vc = state.vc_mps_filt;
        let qbar = self.allocator.dynamic_pressure(vc);
        let confidence = flying_confidence(vc, &config.regime);

        // Aerodynamic angles and feed-forward.
        let angles = aero_angles(confidence, qbar, vehicle, pilot, &config.air_data);
        if state.air_data_source != Some(angles.source) {
            info!(
                "Air data source {} at {} m/s, confidence {}",
                angles.source,
                vc,
                confidence
            );
            state.air_data_source = Some(angles.source);
        }
        let baseline = coordinated_turn(vehicle.phi_deg, state.vtrue_mps_filt, config.gravity);

        // Pilot rate requests. Stick back is nose up.
        let roll_cmd = pilot.aileron * config.roll.stick_scale;
        let pitch_cmd = -pilot.elevator * config.pitch.stick_scale;
        let yaw_cmd = pilot.rudder * config.yaw.stick_scale;

        let ref_p = state.roll.shape(
            roll_cmd,
            0.0,
            roll_bounds(vehicle.phi_deg, &config.envelope),
            confidence,
        );
        let ref_q = state.pitch.shape(
            pitch_cmd,
            baseline.q,
            pitch_bounds(angles.alpha_deg, vc, &config.envelope),
            confidence,
        );
        let ref_r = state.yaw.shape(yaw_cmd, baseline.r, RateBounds::NONE, confidence);

        // Model-based surface positions for the references.
        let features = AllocationFeatures {
            ay: vehicle.ay,
            gbody_y: gravity_body_y(vehicle.phi_deg, vehicle.theta_deg, config.gravity),
            vc_mps: vc,
            beta_deg: angles.beta_deg,
        };
        let lateral = self.allocator.lateral(ref_p, ref_r, &features);
        let raw_elevator = self.allocator.longitudinal(ref_q, &features);

        // Integrators absorb what the fitted model gets wrong.
        let integral = IntegralTerms {
            roll: state.roll.integrate(ref_p, vehicle.p, confidence),
            pitch: state.pitch.integrate(ref_q, vehicle.q, confidence),
            yaw: state.yaw.integrate(ref_r, vehicle.r, confidence),
        };

        let damping = DampingTerms {
            roll: damp(vehicle.p, 0.0, config.roll.damp_gain, qbar),
            pitch: damp(vehicle.q, baseline.q, config.pitch.damp_gain, qbar),
            yaw: damp(vehicle.r, baseline.r, config.yaw.damp_gain, qbar),
        };

        let command = compose(lateral, raw_elevator, &integral, &damping, pilot);
        let telemetry = LawTelemetry {
            confidence,
            alpha_deg: angles.alpha_deg,
            beta_deg: angles.beta_deg,
            air_data_source: angles.source,
            vc_mps_filt: vc,
            vtrue_mps_filt: state.vtrue_mps_filt,
            qbar,
            baseline,
            ref_p,
            ref_q,
            ref_r,
            lateral,
            raw_elevator,
            integral,
            damping,
        };
        (command, telemetry)
    }

    fn filter_airspeed(&self, filtered: f64, raw: f64) -> f64 {
        let floor = self.config.airspeed_floor_mps;
        // NaN compares false, so it is floored too.
        let sample = if raw > floor { raw } else { floor };
        let weight = self.config.airspeed_filter_weight;
        (1.0 - weight) * filtered + weight * sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    const SETTLE_CYCLES: usize = 3000;

    fn law() -> FlightControlLaw {
        match FlightControlLaw::new(FlightControlConfig::new()) {
            Ok(law) => law,
            Err(e) => panic!("reference tuning rejected: {}", e),
        }
    }

    fn level_cruise() -> VehicleStateSnapshot {
        VehicleStateSnapshot {
            vc_mps: 60.0,
            vtrue_mps: 60.0,
            alpha_deg: Some(2.0),
            beta_deg: Some(0.0),
            ..Default::default()
        }
    }

    fn settle(
        law: &FlightControlLaw,
        state: &mut ControlLawState,
        vehicle: &VehicleStateSnapshot,
        pilot: &PilotCommandSnapshot,
    ) -> (SurfaceCommandSnapshot, LawTelemetry) {
        let mut last = law.update_with_telemetry(state, vehicle, pilot);
        for _ in 1..SETTLE_CYCLES {
            last = law.update_with_telemetry(state, vehicle, pilot);
        }
        last
    }

    /// Construction fails on malformed tuning.
    #[test]
    fn test_law_rejects_invalid_config() {
        let mut config = FlightControlConfig::new();
        config.air_density = -1.0;
        assert_eq!(
            FlightControlLaw::new(config).err(),
            Some(ConfigError::NonPositive {
                field: "air_density"
            })
        );
    }

    /// Level flight with a centred stick needs almost no surface deflection.
    #[test]
    fn test_law_level_flight_settles_near_zero() {
        let law = law();
        let mut state = law.init_state();
        let (command, telemetry) = settle(
            &law,
            &mut state,
            &level_cruise(),
            &PilotCommandSnapshot::default(),
        );

        assert!(value_close(60.0, telemetry.vc_mps_filt));
        assert!(telemetry.confidence > 0.99);
        assert_eq!(telemetry.air_data_source, AirDataSource::Sensed);
        assert!(command.aileron.abs() < 1.0e-3, "Aileron {}", command.aileron);
        assert!(command.elevator.abs() < 1.0e-3, "Elevator {}", command.elevator);
        assert!(command.rudder.abs() < 1.0e-3, "Rudder {}", command.rudder);
    }

    /// Full right stick commands the bounded maximum roll rate and right aileron.
    #[test]
    fn test_law_full_right_roll() {
        let law = law();
        let mut state = law.init_state();
        let pilot = PilotCommandSnapshot {
            aileron: 1.0,
            throttle: 0.7,
            ..Default::default()
        };
        let (command, telemetry) = settle(&law, &mut state, &level_cruise(), &pilot);

        let config = law.config();
        let bank_max = roll_bounds(0.0, &config.envelope).max.unwrap_or(f64::NAN);
        let expected = bank_max.min(config.roll.max_rate);
        assert!(telemetry.ref_p > 0.0);
        assert!(value_close(expected, telemetry.ref_p), "ref_p {}", telemetry.ref_p);
        assert!(telemetry.lateral.aileron > 0.0);
        assert!(command.aileron > 0.0, "Aileron {}", command.aileron);
        assert_eq!(command.throttle, 0.7);
    }

    /// A zero airspeed sample is floored before any division.
    #[test]
    fn test_law_zero_airspeed_uses_floor() {
        let law = law();
        let mut state = law.init_state();
        let vehicle = VehicleStateSnapshot::default();
        let pilot = PilotCommandSnapshot {
            aileron: 1.0,
            elevator: -1.0,
            rudder: 1.0,
            ..Default::default()
        };
        let (command, telemetry) = law.update_with_telemetry(&mut state, &vehicle, &pilot);

        assert!(value_close(0.5 * 1.225 * 25.0 * 25.0, telemetry.qbar));
        assert!(command.aileron.is_finite());
        assert!(command.elevator.is_finite());
        assert!(command.rudder.is_finite());
        assert_eq!(telemetry.air_data_source, AirDataSource::Attitude);
    }

    /// Rates held at baseline in a steady turn leave the integrators still
    /// and the commands constant.
    #[test]
    fn test_law_steady_turn_converges() {
        let law = law();
        let mut state = law.init_state();
        let mut vehicle = VehicleStateSnapshot {
            phi_deg: 30.0,
            ..level_cruise()
        };
        let pilot = PilotCommandSnapshot::default();

        let (_, telemetry) = settle(&law, &mut state, &vehicle, &pilot);
        vehicle.q = telemetry.baseline.q;
        vehicle.r = telemetry.baseline.r;
        let (before, _) = settle(&law, &mut state, &vehicle, &pilot);
        let integrals = state.integrals();
        let after = law.update(&mut state, &vehicle, &pilot);

        assert!(value_close(integrals.roll, state.integrals().roll));
        assert!(value_close(integrals.pitch, state.integrals().pitch));
        assert!(value_close(integrals.yaw, state.integrals().yaw));
        assert!(value_close(before.aileron, after.aileron));
        assert!(value_close(before.elevator, after.elevator));
        assert!(value_close(before.rudder, after.rudder));
    }

    /// A persistent rate error never winds an integrator past its limit.
    #[test]
    fn test_law_integrators_respect_antiwindup() {
        let law = law();
        let mut state = law.init_state();
        let vehicle = VehicleStateSnapshot {
            p: -1.0,
            q: -1.0,
            r: -1.0,
            ..level_cruise()
        };
        let pilot = PilotCommandSnapshot {
            aileron: 1.0,
            elevator: -1.0,
            rudder: 1.0,
            ..Default::default()
        };
        let config = law.config();
        for _ in 0..10_000 {
            let _ = law.update(&mut state, &vehicle, &pilot);
            let integrals = state.integrals();
            assert!(integrals.roll.abs() <= config.roll.antiwindup);
            assert!(integrals.pitch.abs() <= config.pitch.antiwindup);
            assert!(integrals.yaw.abs() <= config.yaw.antiwindup);
        }
        assert!(value_close(config.roll.antiwindup, state.integrals().roll));
    }

    /// During the ground roll the stick barely moves the references and the
    /// integrators stay near zero.
    #[test]
    fn test_law_ground_roll_blends_to_baseline() {
        let law = law();
        let mut state = law.init_state();
        let vehicle = VehicleStateSnapshot {
            vc_mps: 10.0,
            vtrue_mps: 10.0,
            theta_deg: 2.0,
            r: 0.1,
            ..Default::default()
        };
        let pilot = PilotCommandSnapshot {
            rudder: 1.0,
            ..Default::default()
        };
        let (_, telemetry) = settle(&law, &mut state, &vehicle, &pilot);

        assert!(telemetry.confidence < 0.01);
        assert!(telemetry.ref_r.abs() < 0.01 * law.config().yaw.stick_scale);
        assert!(value_close(2.0, telemetry.alpha_deg));
        assert!(state.integrals().yaw.abs() < 1.0e-4);
    }

    /// Far past Vne the pitch reference pulls the nose up but stays inside the
    /// tuning range.
    #[test]
    fn test_law_overspeed_reference_within_tuning_range() {
        let law = law();
        let mut state = law.init_state();
        let vehicle = VehicleStateSnapshot {
            vc_mps: 100.0,
            vtrue_mps: 100.0,
            ..level_cruise()
        };
        let (command, telemetry) =
            settle(&law, &mut state, &vehicle, &PilotCommandSnapshot::default());

        let pitch = &law.config().pitch;
        assert!(telemetry.ref_q > 0.0, "ref_q {}", telemetry.ref_q);
        assert!(telemetry.ref_q <= pitch.max_rate, "ref_q {}", telemetry.ref_q);
        assert!(telemetry.ref_q >= pitch.min_rate, "ref_q {}", telemetry.ref_q);
        assert!(value_close(pitch.max_rate, telemetry.ref_q));
        assert!(command.elevator.is_finite());
    }

    /// One NaN body-rate sample does not poison later cycles.
    #[test]
    fn test_law_nan_rate_sample_recovers() {
        let law = law();
        let mut state = law.init_state();
        let pilot = PilotCommandSnapshot {
            aileron: 1.0,
            ..Default::default()
        };
        let _ = settle(&law, &mut state, &level_cruise(), &pilot);
        let held = state.integrals();

        let glitch = VehicleStateSnapshot {
            p: f64::NAN,
            q: f64::NAN,
            r: f64::NAN,
            ..level_cruise()
        };
        let _ = law.update(&mut state, &glitch, &pilot);
        assert!(value_close(held.roll, state.integrals().roll));
        assert!(value_close(held.pitch, state.integrals().pitch));
        assert!(value_close(held.yaw, state.integrals().yaw));

        let command = law.update(&mut state, &level_cruise(), &pilot);
        assert!(state.integrals().roll.is_finite());
        assert!(command.aileron.is_finite());
        assert!(command.elevator.is_finite());
        assert!(command.rudder.is_finite());
    }

    /// Resetting the state clears integrators and filters.
    #[test]
    fn test_law_state_reset() {
        let law = law();
        let mut state = law.init_state();
        let pilot = PilotCommandSnapshot {
            aileron: 1.0,
            ..Default::default()
        };
        let _ = settle(&law, &mut state, &level_cruise(), &pilot);
        assert!(value_not_close(0.0, state.integrals().roll));

        state.reset();
        assert!(value_close(0.0, state.integrals().roll));
        assert!(value_close(25.0, state.vc_mps_filt()));
        assert!(value_close(25.0, state.vtrue_mps_filt()));
    }

    /// Two states driven by one law do not interfere.
    #[test]
    fn test_law_independent_vehicle_states() {
        let law = law();
        let mut first = law.init_state();
        let mut second = law.init_state();
        let pilot = PilotCommandSnapshot {
            aileron: 1.0,
            ..Default::default()
        };
        let _ = settle(&law, &mut first, &level_cruise(), &pilot);

        assert!(value_not_close(0.0, first.integrals().roll));
        assert!(value_close(0.0, second.integrals().roll));
        assert!(value_close(25.0, second.vc_mps_filt()));
        let _ = law.update(&mut second, &level_cruise(), &PilotCommandSnapshot::default());
    }
}
