// demos/roll_command.rs

use flight_control_law::{
    FlightControlConfig, FlightControlLaw, PilotCommandSnapshot, VehicleStateSnapshot,
};

fn main() {
    let law = match FlightControlLaw::new(FlightControlConfig::new()) {
        Ok(law) => law,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return;
        }
    };
    let mut state = law.init_state();
    let dt = law.config().dt;

    // Crude roll plant: roll rate lags the commanded aileron.
    let mut vehicle = VehicleStateSnapshot {
        vc_mps: 60.0,
        vtrue_mps: 60.0,
        alpha_deg: Some(2.0),
        beta_deg: Some(0.0),
        ..Default::default()
    };

    // Let the airspeed filter settle before rolling in.
    for _ in 0..1000 {
        let _ = law.update(&mut state, &vehicle, &PilotCommandSnapshot::default());
    }

    println!("     t,    phi_deg,      ref_p,          p,    aileron");
    let mut t = 0.0;
    for step in 0..=500 {
        let aileron = if step < 250 { 1.0 } else { 0.0 };
        let pilot = PilotCommandSnapshot {
            aileron,
            throttle: 0.6,
            ..Default::default()
        };

        let (command, telemetry) = law.update_with_telemetry(&mut state, &vehicle, &pilot);

        vehicle.p += (0.4 * command.aileron - vehicle.p) * 2.0 * dt;
        vehicle.phi_deg += vehicle.p.to_degrees() * dt;

        if step % 25 == 0 {
            println!(
                "{:6.2}, {:10.3}, {:10.4}, {:10.4}, {:10.5}",
                t, vehicle.phi_deg, telemetry.ref_p, vehicle.p, command.aileron
            );
        }
        t += dt;
    }
}
