//! Deadzone filter action
//!
//! Attached as a child of `gyroabs`/`accel`, it filters each computed axis
//! value before the value reaches the mapper: magnitudes below `lower`
//! collapse to zero, magnitudes above `upper` clamp to `upper`.

use super::{Action, ActionError, ActionFlags, ActionRef, ActionRegistry};
use crate::axis::AxisValue;
use crate::param::{ParamList, Parameter, TypeMask};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

const KW_DEADZONE: &str = "deadzone";

const DEFAULT_LOWER: AxisValue = 2000;
const DEFAULT_UPPER: AxisValue = 0x7FFF;

pub struct DeadzoneAction {
    params: ParamList,
    lower: AxisValue,
    upper: AxisValue,
}

/// Registers `deadzone`. Called once at process start.
pub fn register(registry: &mut ActionRegistry) {
    registry.register(KW_DEADZONE, constructor);
}

/// `deadzone([lower[, upper]])`, both int.
pub fn constructor(keyword: &str, params: &ParamList) -> Result<ActionRef, ActionError> {
    if params.len() > 2 {
        return Err(ActionError::InvalidParameterCount {
            keyword: keyword.to_string(),
            count: params.len(),
        });
    }
    let mut bounds = [DEFAULT_LOWER as i64, DEFAULT_UPPER as i64];
    for (i, param) in params.iter().enumerate() {
        if !param.is(TypeMask::INT) {
            return Err(ActionError::InvalidParameterType {
                keyword: keyword.to_string(),
                index: i,
                value: param.clone(),
            });
        }
        // Type was just checked
        bounds[i] = param.as_int().unwrap_or(0);
    }

    Ok(Rc::new(RefCell::new(DeadzoneAction {
        params: params.clone(),
        lower: bounds[0] as AxisValue,
        upper: bounds[1] as AxisValue,
    })))
}

impl Action for DeadzoneAction {
    fn keyword(&self) -> &'static str {
        KW_DEADZONE
    }

    fn flags(&self) -> ActionFlags {
        // Pure filter, no primary callback and no modifiers
        ActionFlags::empty()
    }

    fn describe(&self) -> String {
        "Deadzone".to_string()
    }

    fn params(&self) -> &ParamList {
        &self.params
    }

    fn get_property(&self, name: &str) -> Option<Parameter> {
        match name {
            "lower" => Some(Parameter::Int(self.lower as i64)),
            "upper" => Some(Parameter::Int(self.upper as i64)),
            _ => {
                warn!("Requested unknown property '{}' from '{}'", name, KW_DEADZONE);
                None
            }
        }
    }

    fn apply_deadzone(&mut self, value: AxisValue) -> AxisValue {
        if value.abs() < self.lower {
            0
        } else if value.abs() > self.upper {
            self.upper * value.signum()
        } else {
            value
        }
    }
}
