//! Integration tests for registry-built gyro actions

use scc_actions::{
    ActionError, ActionFlags, ActionRegistry, Axis, ControllerFlags, GyroInput, MockMapper,
    Parameter,
};
use std::rc::Rc;

fn registry() -> ActionRegistry {
    // Initialize a simple logger so diagnostics show up with RUST_LOG set
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Info)
        .try_init();

    ActionRegistry::with_defaults()
}

#[test]
fn test_construct_with_partial_axes() {
    let registry = registry();

    // gyro(ABS_X, None, ABS_Y): unset middle slot, missing slots defaulted
    let action = registry
        .construct(
            "gyro",
            &vec![
                Parameter::Int(Axis::ABS_X.id()),
                Parameter::None,
                Parameter::Int(Axis::ABS_Y.id()),
            ],
        )
        .unwrap();

    let axes = action.borrow().get_property("axes").unwrap();
    assert_eq!(
        axes,
        Parameter::Tuple(vec![
            Parameter::Int(Axis::ABS_X.id()),
            Parameter::Int(Axis::NONE.id()),
            Parameter::Int(Axis::ABS_Y.id()),
        ])
    );

    let sensitivity = action.borrow().get_property("sensitivity").unwrap();
    assert_eq!(
        sensitivity,
        Parameter::Tuple(vec![
            Parameter::Float(1.0),
            Parameter::Float(1.0),
            Parameter::Float(1.0),
        ])
    );
}

#[test]
fn test_missing_trailing_axes_default_to_unset() {
    let registry = registry();
    let action = registry
        .construct("gyroabs", &vec![Parameter::Int(Axis::ABS_X.id())])
        .unwrap();

    let axes = action.borrow().get_property("axes").unwrap();
    assert_eq!(
        axes,
        Parameter::Tuple(vec![
            Parameter::Int(Axis::ABS_X.id()),
            Parameter::Int(Axis::NONE.id()),
            Parameter::Int(Axis::NONE.id()),
        ])
    );
}

#[test]
fn test_parameter_count_validation() {
    let registry = registry();

    for keyword in ["gyro", "gyroabs", "accel"] {
        assert!(matches!(
            registry.construct(keyword, &vec![]),
            Err(ActionError::InvalidParameterCount { count: 0, .. })
        ));

        let four = vec![Parameter::Int(0); 4];
        assert!(matches!(
            registry.construct(keyword, &four),
            Err(ActionError::InvalidParameterCount { count: 4, .. })
        ));

        // Lengths 1 through 3 all succeed
        for len in 1..=3 {
            let params = vec![Parameter::Int(0); len];
            assert!(registry.construct(keyword, &params).is_ok());
        }
    }
}

#[test]
fn test_parameter_type_validation_names_the_index() {
    let registry = registry();

    let params = vec![
        Parameter::Int(0),
        Parameter::Str("mouse".into()),
        Parameter::None,
    ];
    match registry.construct("gyro", &params) {
        Err(ActionError::InvalidParameterType { keyword, index, value }) => {
            assert_eq!(keyword, "gyro");
            assert_eq!(index, 1);
            assert_eq!(value, Parameter::Str("mouse".into()));
        }
        other => panic!("expected InvalidParameterType, got {:?}", other.map(|_| ())),
    }

    // Floats are not axis ids either
    assert!(matches!(
        registry.construct("accel", &vec![Parameter::Float(1.5)]),
        Err(ActionError::InvalidParameterType { index: 0, .. })
    ));
}

#[test]
fn test_unknown_action_keyword() {
    let registry = registry();
    assert!(matches!(
        registry.construct("gyromouse", &vec![Parameter::Int(0)]),
        Err(ActionError::UnknownAction { .. })
    ));
}

#[test]
fn test_unknown_property_is_absent_not_error() {
    let registry = registry();
    let action = registry
        .construct("gyro", &vec![Parameter::Int(0)])
        .unwrap();

    // Logged as a diagnostic, returned as absent
    assert!(action.borrow().get_property("turbo").is_none());
    // Distinguishable from a property that is present but None
    assert_eq!(action.borrow().get_property("haptic"), Some(Parameter::None));
}

#[test]
fn test_deadzone_child_replacement_releases_first() {
    let registry = registry();
    let action = registry
        .construct("gyroabs", &vec![Parameter::Int(Axis::ABS_X.id())])
        .unwrap();
    assert!(action.borrow().flags().contains(ActionFlags::MOD_DEADZONE));

    let first = registry.construct("deadzone", &vec![Parameter::Int(500)]).unwrap();
    let second = registry.construct("deadzone", &vec![Parameter::Int(900)]).unwrap();

    action.borrow_mut().set_deadzone(first.clone());
    assert_eq!(Rc::strong_count(&first), 2);

    // Replacement drops the parent's handle on the first child
    action.borrow_mut().set_deadzone(second.clone());
    assert_eq!(Rc::strong_count(&first), 1);
    assert_eq!(Rc::strong_count(&second), 2);
}

#[test]
fn test_drop_releases_deadzone_child() {
    let registry = registry();
    let action = registry
        .construct("accel", &vec![Parameter::Int(Axis::ABS_X.id())])
        .unwrap();
    let child = registry.construct("deadzone", &vec![]).unwrap();

    action.borrow_mut().set_deadzone(child.clone());
    assert_eq!(Rc::strong_count(&child), 2);

    drop(action);
    assert_eq!(Rc::strong_count(&child), 1);
}

#[test]
fn test_deadzone_filters_absolute_output() {
    let registry = registry();
    let action = registry
        .construct("accel", &vec![Parameter::Int(Axis::ABS_X.id())])
        .unwrap();
    let deadzone = registry
        .construct("deadzone", &vec![Parameter::Int(2000)])
        .unwrap();
    action.borrow_mut().set_deadzone(deadzone);

    let mut mapper = MockMapper::new();

    // Below the lower bound: collapsed to zero
    let input = GyroInput {
        accel_x: 500,
        ..GyroInput::default()
    };
    action.borrow_mut().gyro(&mut mapper, &input);
    assert_eq!(mapper.axis_calls(), vec![(Axis::ABS_X, 0)]);

    // Above it: passed through
    let input = GyroInput {
        accel_x: 5000,
        ..GyroInput::default()
    };
    action.borrow_mut().gyro(&mut mapper, &input);
    assert_eq!(mapper.axis_calls()[1], (Axis::ABS_X, 5000));
}

#[test]
fn test_eurel_flag_switches_angle_source() {
    let registry = registry();

    // With EUREL_GYROS the quaternion slots already hold relative angles;
    // identical q0 sequences must produce output either way, but through
    // different conversions.
    for flags in [ControllerFlags::default(), ControllerFlags::EUREL_GYROS] {
        let action = registry
            .construct("gyroabs", &vec![Parameter::Int(Axis::ABS_X.id())])
            .unwrap();
        let mut mapper = MockMapper::with_flags(flags);

        let samples = [
            GyroInput { q0: 1000, q3: 30000, ..GyroInput::default() },
            GyroInput { q0: 3000, q3: 30000, ..GyroInput::default() },
        ];
        for input in &samples {
            action.borrow_mut().gyro(&mut mapper, input);
        }

        let calls = mapper.axis_calls();
        assert_eq!(calls.len(), 2);
        // First sample latches the reference, second one moves
        assert_eq!(calls[0].1, 0);
        assert!(calls[1].1 != 0, "no motion with flags {:?}", flags);
    }
}
