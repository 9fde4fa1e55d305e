//! Action core demo
//!
//! Builds the default action registry, constructs one action of each kind,
//! attaches a deadzone filter and runs a short synthetic sample script
//! through a mock mapper. All emitted output is logged, nothing touches the
//! OS.

use scc_actions::{
    ActionFlags, ActionRegistry, Axis, ControllerFlags, GyroInput, HapticData, MockMapper,
    Parameter,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    println!("=== scc-actions demo ===");
    println!();

    let registry = ActionRegistry::with_defaults();

    // gyro(ABS_X, None, ABS_Y) - relative rate onto stick axes
    let gyro = registry.construct(
        "gyro",
        &vec![
            Parameter::Int(Axis::ABS_X.id()),
            Parameter::None,
            Parameter::Int(Axis::ABS_Y.id()),
        ],
    )?;

    // gyroabs(REL_X, REL_Y) - absolute orientation as mouse
    let gyroabs = registry.construct(
        "gyroabs",
        &vec![
            Parameter::Int(Axis::REL_X.id()),
            Parameter::Int(Axis::REL_Y.id()),
        ],
    )?;
    gyroabs.borrow_mut().set_haptic(HapticData::new(512, 10000));

    // accel(ABS_RX) with a deadzone child filtering small values
    let accel = registry.construct("accel", &vec![Parameter::Int(Axis::ABS_RX.id())])?;
    let deadzone = registry.construct("deadzone", &vec![Parameter::Int(2000)])?;
    if accel.borrow().flags().contains(ActionFlags::MOD_DEADZONE) {
        accel.borrow_mut().set_deadzone(deadzone);
    }

    for action in [&gyro, &gyroabs, &accel] {
        let action = action.borrow();
        println!("{}:", action.to_source());
        println!("  describe: {:?}", action.describe());
        for name in ["axes", "sensitivity", "haptic"] {
            if let Some(value) = action.get_property(name) {
                println!("  {}: {}", name, serde_json::to_string(&value)?);
            }
        }
    }
    println!();

    let mut mapper = MockMapper::with_flags(ControllerFlags::EUREL_GYROS);
    let script = [
        GyroInput {
            gpitch: 120,
            groll: -40,
            q0: 1000,
            accel_x: 900,
            ..GyroInput::default()
        },
        GyroInput {
            gpitch: -30,
            q0: 4000,
            accel_x: 4500,
            ..GyroInput::default()
        },
        GyroInput {
            q0: 25000,
            accel_x: 15000,
            ..GyroInput::default()
        },
    ];

    println!("Feeding {} synthetic samples...", script.len());
    for input in &script {
        for action in [&gyro, &gyroabs, &accel] {
            action.borrow_mut().gyro(&mut mapper, input);
        }
    }

    println!("Done: {} mapper calls recorded", mapper.calls.len());
    Ok(())
}
