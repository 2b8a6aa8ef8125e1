// demos/level_flight.rs

use flight_control_law::{
    ControlMode, FlightControlConfig, FlightControlSystem, FlightStabilizer,
    PilotCommandSnapshot, VehicleStateSnapshot,
};

fn main() {
    let config = FlightControlConfig::new();
    let mut system = match FlightControlSystem::with_config(config, ControlMode::Augmented) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return;
        }
    };

    // Accelerate down the runway, rotate, and settle into level cruise.
    let pilot = PilotCommandSnapshot {
        throttle: 0.8,
        ..Default::default()
    };

    println!("     t,   vc_filt, confidence,   aileron,  elevator,    rudder");
    let dt = config.dt;
    for step in 0..=1500 {
        let t = step as f64 * dt;
        let vc = (10.0 + 2.0 * t).min(60.0);
        let vehicle = VehicleStateSnapshot {
            theta_deg: if vc > 35.0 { 3.0 } else { 0.0 },
            vc_mps: vc,
            vtrue_mps: vc,
            alpha_deg: Some(3.0),
            beta_deg: Some(0.0),
            ..Default::default()
        };

        let command = system.control(&vehicle, &pilot);

        if step % 100 == 0 {
            if let Some(telemetry) = system.rate().telemetry() {
                println!(
                    "{:6.2}, {:9.3}, {:10.4}, {:9.5}, {:9.5}, {:9.5}",
                    t,
                    telemetry.vc_mps_filt,
                    telemetry.confidence,
                    command.aileron,
                    command.elevator,
                    command.rudder
                );
            }
        }
    }
}
