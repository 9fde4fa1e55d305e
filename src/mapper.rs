//! Mapper interface - the sink actions emit output into
//!
//! The real mapper (external to this crate) owns the virtual device and the
//! haptic pipeline. Actions only ever talk to it through the [`Mapper`]
//! trait, so tests and the demo binary can substitute [`MockMapper`], which
//! records and logs every call instead of touching the OS.

use crate::axis::{Axis, AxisValue};
use log::info;
use serde::Serialize;

/// Capability flags reported by the controller driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerFlags(pub u32);

impl ControllerFlags {
    /// Controller delivers orientation pre-converted to relative Euler
    /// angles in the quaternion slots of every sample.
    pub const EUREL_GYROS: ControllerFlags = ControllerFlags(0b0001);

    pub fn contains(self, other: ControllerFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ControllerFlags {
    type Output = ControllerFlags;
    fn bitor(self, rhs: ControllerFlags) -> ControllerFlags {
        ControllerFlags(self.0 | rhs.0)
    }
}

/// One motion sample from the driver layer. Every sample carries all three
/// groups; each action reads only the subset it needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct GyroInput {
    /// Angular velocity, pitch/yaw/roll.
    pub gpitch: i16,
    pub gyaw: i16,
    pub groll: i16,
    /// Unit quaternion scaled to i16, or relative Euler angles when the
    /// controller reports [`ControllerFlags::EUREL_GYROS`].
    pub q0: i16,
    pub q1: i16,
    pub q2: i16,
    pub q3: i16,
    /// Linear acceleration per axis.
    pub accel_x: i16,
    pub accel_y: i16,
    pub accel_z: i16,
}

impl GyroInput {
    pub fn rates(&self) -> [i16; 3] {
        [self.gpitch, self.gyaw, self.groll]
    }

    pub fn accel(&self) -> [i16; 3] {
        [self.accel_x, self.accel_y, self.accel_z]
    }
}

/// One-shot haptic pulse description. A record with zero amplitude is
/// disabled: inert but still copyable and storable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HapticData {
    pub amplitude: u16,
    pub period: u16,
}

impl HapticData {
    pub const DISABLED: HapticData = HapticData {
        amplitude: 0,
        period: 0,
    };

    pub fn new(amplitude: u16, period: u16) -> Self {
        Self { amplitude, period }
    }

    pub fn enabled(&self) -> bool {
        self.amplitude != 0
    }
}

impl Default for HapticData {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// Output sink for actions.
pub trait Mapper {
    /// Set a virtual absolute axis to a (pre-clamped) value.
    fn set_axis(&mut self, axis: Axis, value: AxisValue);

    /// Move the pointer by a relative delta.
    fn move_mouse(&mut self, dx: AxisValue, dy: AxisValue);

    /// Fire a one-shot haptic pulse.
    fn haptic_effect(&mut self, hdata: &HapticData);

    /// Controller capability flags.
    fn flags(&self) -> ControllerFlags;
}

/// A single recorded mapper call, for assertions in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapperCall {
    SetAxis(Axis, AxisValue),
    MoveMouse(AxisValue, AxisValue),
    Haptic(HapticData),
}

/// Mock mapper that records calls and logs them at info level.
#[derive(Debug, Default)]
pub struct MockMapper {
    pub calls: Vec<MapperCall>,
    flags: ControllerFlags,
}

impl MockMapper {
    /// Create a new mock mapper with no capability flags set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock mapper reporting the given capability flags.
    pub fn with_flags(flags: ControllerFlags) -> Self {
        Self {
            calls: Vec::new(),
            flags,
        }
    }

    /// Recorded `set_axis` calls only.
    pub fn axis_calls(&self) -> Vec<(Axis, AxisValue)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MapperCall::SetAxis(axis, value) => Some((*axis, *value)),
                _ => None,
            })
            .collect()
    }

    /// Recorded `move_mouse` calls only.
    pub fn mouse_calls(&self) -> Vec<(AxisValue, AxisValue)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MapperCall::MoveMouse(dx, dy) => Some((*dx, *dy)),
                _ => None,
            })
            .collect()
    }

    /// Number of haptic pulses fired so far.
    pub fn haptic_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MapperCall::Haptic(_)))
            .count()
    }
}

impl Mapper for MockMapper {
    fn set_axis(&mut self, axis: Axis, value: AxisValue) {
        info!("[MOCK MAPPER] set_axis: axis={:?}, value={}", axis, value);
        self.calls.push(MapperCall::SetAxis(axis, value));
    }

    fn move_mouse(&mut self, dx: AxisValue, dy: AxisValue) {
        info!("[MOCK MAPPER] move_mouse: dx={}, dy={}", dx, dy);
        self.calls.push(MapperCall::MoveMouse(dx, dy));
    }

    fn haptic_effect(&mut self, hdata: &HapticData) {
        info!(
            "[MOCK MAPPER] haptic_effect: amplitude={}, period={}",
            hdata.amplitude, hdata.period
        );
        self.calls.push(MapperCall::Haptic(*hdata));
    }

    fn flags(&self) -> ControllerFlags {
        self.flags
    }
}
