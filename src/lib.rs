//! scc-actions: execution core of a controller input-mapping daemon
//!
//! Converts raw hardware samples (gyroscope/accelerometer events) into
//! emulated output (virtual axes, relative mouse motion, haptic pulses)
//! through a runtime-configured graph of actions. The profile loader builds
//! the graph once through the [`ActionRegistry`]; at runtime the mapper
//! drives each action synchronously, one sample per call.

pub mod action;
pub mod axis;
pub mod mapper;
pub mod math;
pub mod param;

// Re-export commonly used items
pub use action::{Action, ActionError, ActionFlags, ActionRef, ActionRegistry};
pub use axis::{Axis, AxisValue};
pub use mapper::{ControllerFlags, GyroInput, HapticData, Mapper, MockMapper};
pub use param::{ParamList, Parameter, TypeMask};
