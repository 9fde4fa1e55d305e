//! Gyro, GyroAbs and Accel actions
//!
//! `gyro` feeds *relative* angular velocity into emulated axes, `gyroabs`
//! tracks absolute rotation against a reference orientation, and `accel`
//! maps raw linear acceleration. All three share one struct and one
//! constructor; the keyword picks the behavior and capability flags.

use super::{Action, ActionError, ActionFlags, ActionRef, ActionRegistry};
use crate::axis::{Axis, AxisValue, STICK_PAD_MAX, STICK_PAD_MIN};
use crate::mapper::{ControllerFlags, GyroInput, HapticData, Mapper};
use crate::math::{anglediff, quat2euler};
use crate::param::{ParamList, Parameter, TypeMask};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

const KW_GYRO: &str = "gyro";
const KW_GYROABS: &str = "gyroabs";
const KW_ACCEL: &str = "accel";

// Just random number to put default sensitivity into sane range
const MOUSE_FACTOR: f64 = 0.01;
// (2^15) / PI
const MAGIC: f64 = 10430.378350470453;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GyroMode {
    Rate,
    Absolute,
    Acceleration,
}

/// Shared state of the gyro action family.
pub struct GyroAction {
    keyword: &'static str,
    mode: GyroMode,
    flags: ActionFlags,
    params: ParamList,
    axes: [Axis; 3],
    sensitivity: [f64; 3],
    /// Reference orientation; a component stays 0.0 until the first nonzero
    /// sample latches it.
    ir: [f64; 4],
    was_out_of_range: bool,
    hdata: HapticData,
    deadzone: Option<ActionRef>,
}

/// Registers `gyro`, `gyroabs` and `accel`. Called once at process start.
pub fn register(registry: &mut ActionRegistry) {
    registry.register(KW_GYRO, constructor);
    registry.register(KW_GYROABS, constructor);
    registry.register(KW_ACCEL, constructor);
}

/// Shared constructor for the family.
///
/// Doesn't use a declarative parameter template, as it allows either an axis
/// id or `None` for each of one to three parameters.
pub fn constructor(keyword: &str, params: &ParamList) -> Result<ActionRef, ActionError> {
    if params.is_empty() || params.len() > 3 {
        return Err(ActionError::InvalidParameterCount {
            keyword: keyword.to_string(),
            count: params.len(),
        });
    }

    let mut axes = [Axis::NONE; 3];
    for (i, param) in params.iter().enumerate() {
        if param.is(TypeMask::NONE) {
            continue;
        }
        if !param.is(TypeMask::INT) {
            return Err(ActionError::InvalidParameterType {
                keyword: keyword.to_string(),
                index: i,
                value: param.clone(),
            });
        }
        // from_parameter cannot fail here, the type was just checked
        axes[i] = Axis::from_parameter(param).unwrap_or(Axis::NONE);
    }

    let (keyword, mode, flags) = if keyword == KW_GYRO {
        (
            KW_GYRO,
            GyroMode::Rate,
            ActionFlags::ACTION | ActionFlags::MOD_SENSITIVITY | ActionFlags::MOD_SENS_Z,
        )
    } else if keyword == KW_GYROABS {
        (
            KW_GYROABS,
            GyroMode::Absolute,
            ActionFlags::ACTION
                | ActionFlags::MOD_SENSITIVITY
                | ActionFlags::MOD_SENS_Z
                | ActionFlags::MOD_DEADZONE,
        )
    } else {
        (
            KW_ACCEL,
            GyroMode::Acceleration,
            ActionFlags::ACTION
                | ActionFlags::MOD_SENSITIVITY
                | ActionFlags::MOD_SENS_Z
                | ActionFlags::MOD_DEADZONE,
        )
    };

    Ok(Rc::new(RefCell::new(GyroAction {
        keyword,
        mode,
        flags,
        params: params.clone(),
        axes,
        sensitivity: [1.0; 3],
        ir: [0.0; 4],
        was_out_of_range: false,
        hdata: HapticData::DISABLED,
        deadzone: None,
    })))
}

impl GyroAction {
    /// Relative rate: raw angular velocity scaled onto absolute axes.
    fn rate(&mut self, mapper: &mut dyn Mapper, input: &GyroInput) {
        let pyr = input.rates();
        for i in 0..3 {
            if self.axes[i].is_abs() {
                let v = pyr[i] as f64 * self.sensitivity[i] * -10.0;
                let v = v.clamp(STICK_PAD_MIN as f64, STICK_PAD_MAX as f64);
                mapper.set_axis(self.axes[i], v as AxisValue);
            }
        }
    }

    /// Absolute orientation: angle delta against the reference orientation,
    /// with edge-triggered haptics when the delta leaves the output range.
    fn absolute(&mut self, mapper: &mut dyn Mapper, input: &GyroInput) {
        let mut pyr = if mapper.flags().contains(ControllerFlags::EUREL_GYROS) {
            // Controller already converted orientation to relative angles
            [
                input.q0 as f64 / MAGIC,
                input.q1 as f64 / MAGIC,
                input.q2 as f64 / MAGIC,
            ]
        } else {
            quat2euler(
                input.q0 as f64 / 32768.0,
                input.q1 as f64 / 32768.0,
                input.q2 as f64 / 32768.0,
                input.q3 as f64 / 32768.0,
            )
        };

        for i in 0..3 {
            // An angle of exactly zero counts as "not yet initialized" and
            // is overwritten by the next sample.
            if self.ir[i] == 0.0 {
                self.ir[i] = pyr[i];
            }
            pyr[i] = anglediff(self.ir[i], pyr[i]) * self.sensitivity[i] * MAGIC * 2.0;
        }

        if self.hdata.enabled() {
            let mut out_of_range = false;
            for v in pyr.iter_mut() {
                *v = v.floor();
                if *v > STICK_PAD_MAX as f64 {
                    *v = STICK_PAD_MAX as f64;
                    out_of_range = true;
                } else if *v < STICK_PAD_MIN as f64 {
                    *v = STICK_PAD_MIN as f64;
                    out_of_range = true;
                }
            }
            // One pulse per contiguous out-of-range run, across all three
            // axes combined; the flag re-arms once the sample is back in
            // range.
            if out_of_range {
                if !self.was_out_of_range {
                    mapper.haptic_effect(&self.hdata);
                    self.was_out_of_range = true;
                }
            } else {
                self.was_out_of_range = false;
            }
        } else {
            for v in pyr.iter_mut() {
                *v = v.clamp(STICK_PAD_MIN as f64, STICK_PAD_MAX as f64);
            }
        }

        self.route(mapper, pyr);
    }

    /// Absolute acceleration: raw samples routed directly, no angle math and
    /// never a haptic pulse.
    fn acceleration(&mut self, mapper: &mut dyn Mapper, input: &GyroInput) {
        let xyz = input.accel();
        self.route(mapper, [xyz[0] as f64, xyz[1] as f64, xyz[2] as f64]);
    }

    /// Common output routing for the absolute variants: mouse for relative
    /// axes, deadzone-filtered `set_axis` for absolute ones, unset slots
    /// skipped.
    fn route(&mut self, mapper: &mut dyn Mapper, values: [f64; 3]) {
        for i in 0..3 {
            let axis = self.axes[i];
            if axis == Axis::REL_X {
                let dx = axis.clamp(values[i] * MOUSE_FACTOR * self.sensitivity[i]);
                mapper.move_mouse(dx, 0);
            } else if axis == Axis::REL_Y {
                let dy = axis.clamp(values[i] * MOUSE_FACTOR * self.sensitivity[i]);
                mapper.move_mouse(0, dy);
            } else if axis.is_abs() {
                let mut val = axis.clamp(values[i] * self.sensitivity[i]);
                if let Some(dz) = &self.deadzone {
                    val = dz.borrow_mut().apply_deadzone(val);
                }
                mapper.set_axis(axis, val);
            }
        }
    }
}

impl Action for GyroAction {
    fn keyword(&self) -> &'static str {
        self.keyword
    }

    fn flags(&self) -> ActionFlags {
        self.flags
    }

    fn describe(&self) -> String {
        if self.axes[0].is_rel() {
            return "Mouse".to_string();
        }
        let descs: Vec<&str> = self
            .axes
            .iter()
            .map(|axis| axis.describe())
            .filter(|desc| !desc.is_empty())
            .collect();
        descs.join("\n")
    }

    fn params(&self) -> &ParamList {
        &self.params
    }

    fn get_property(&self, name: &str) -> Option<Parameter> {
        match name {
            "sensitivity" => Some(Parameter::Tuple(
                self.sensitivity.iter().map(|s| Parameter::Float(*s)).collect(),
            )),
            "axes" => Some(Parameter::Tuple(
                self.axes.iter().map(|axis| Parameter::Int(axis.id())).collect(),
            )),
            "haptic" => {
                if self.hdata.enabled() {
                    Some(Parameter::Tuple(vec![
                        Parameter::Int(self.hdata.amplitude as i64),
                        Parameter::Int(self.hdata.period as i64),
                    ]))
                } else {
                    Some(Parameter::None)
                }
            }
            _ => {
                warn!("Requested unknown property '{}' from '{}'", name, self.keyword);
                None
            }
        }
    }

    fn gyro(&mut self, mapper: &mut dyn Mapper, input: &GyroInput) {
        match self.mode {
            GyroMode::Rate => self.rate(mapper, input),
            GyroMode::Absolute => self.absolute(mapper, input),
            GyroMode::Acceleration => self.acceleration(mapper, input),
        }
    }

    fn set_sensitivity(&mut self, x: f64, y: f64, z: f64) {
        self.sensitivity = [x, y, z];
    }

    fn set_haptic(&mut self, hdata: HapticData) {
        self.hdata = hdata;
    }

    fn set_deadzone(&mut self, child: ActionRef) {
        // Replacing drops the previous child's handle
        self.deadzone = Some(child);
    }
}
