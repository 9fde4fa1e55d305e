//! Action object model - composable units converting input samples to output
//!
//! An action is built once from profile parameters, then driven synchronously
//! by the mapper on every incoming sample. Optional operations are gated by
//! [`ActionFlags`]: callers check the flag before invoking the matching
//! method, the methods themselves perform no runtime check.

pub mod deadzone;
pub mod gyro;
pub mod registry;

pub use deadzone::DeadzoneAction;
pub use gyro::GyroAction;
pub use registry::ActionRegistry;

use crate::axis::AxisValue;
use crate::mapper::{GyroInput, HapticData, Mapper};
use crate::param::{ParamList, Parameter};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Capability flags declaring which optional operations an action supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionFlags(pub u32);

impl ActionFlags {
    /// Has a primary event callback.
    pub const ACTION: ActionFlags = ActionFlags(0b0001);
    /// Accepts `set_sensitivity`.
    pub const MOD_SENSITIVITY: ActionFlags = ActionFlags(0b0010);
    /// Sensitivity applies to the third (Z) component as well.
    pub const MOD_SENS_Z: ActionFlags = ActionFlags(0b0100);
    /// Accepts `set_deadzone`.
    pub const MOD_DEADZONE: ActionFlags = ActionFlags(0b1000);

    pub const fn empty() -> ActionFlags {
        ActionFlags(0)
    }

    pub fn contains(self, other: ActionFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ActionFlags {
    type Output = ActionFlags;
    fn bitor(self, rhs: ActionFlags) -> ActionFlags {
        ActionFlags(self.0 | rhs.0)
    }
}

/// Shared handle to an action. Attaching an action as a child clones the
/// handle; dropping the last handle destroys the action and everything it
/// owns. The whole graph runs on one thread, hence `Rc`.
pub type ActionRef = Rc<RefCell<dyn Action>>;

/// Construction-time failure. Per-sample processing has no error channel;
/// values are clamped, never rejected.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Unknown action '{keyword}'")]
    UnknownAction { keyword: String },

    #[error("Invalid number of parameters for '{keyword}' (got {count})")]
    InvalidParameterCount { keyword: String, count: usize },

    #[error("Invalid parameter {index} for '{keyword}': {value}")]
    InvalidParameterType {
        keyword: String,
        index: usize,
        value: Parameter,
    },
}

/// A composable input-to-output unit.
///
/// Required methods are implemented by every action; provided methods are
/// optional operations whose availability is declared by [`Action::flags`].
/// Calling one whose flag is unset is a caller bug and silently does nothing.
pub trait Action {
    /// Keyword this action was registered under; stable for its lifetime.
    fn keyword(&self) -> &'static str;

    /// Capability flags. Check these before calling any provided method.
    fn flags(&self) -> ActionFlags;

    /// Short human-readable summary for UI display.
    fn describe(&self) -> String;

    /// Parameters the action was constructed from (its own deep copy).
    fn params(&self) -> &ParamList;

    /// Introspect current internal state. Unknown names return `None` and
    /// log a non-fatal diagnostic; a present property may still be
    /// `Parameter::None`, which is a distinct outcome.
    fn get_property(&self, name: &str) -> Option<Parameter>;

    /// Primary callback for gyro-shaped actions: one motion sample in, zero
    /// or more mapper calls out.
    fn gyro(&mut self, mapper: &mut dyn Mapper, input: &GyroInput) {
        let _ = (mapper, input);
    }

    /// Scale subsequent output per component.
    fn set_sensitivity(&mut self, x: f64, y: f64, z: f64) {
        let _ = (x, y, z);
    }

    /// Install a haptic pulse description.
    fn set_haptic(&mut self, hdata: HapticData) {
        let _ = hdata;
    }

    /// Attach a child filter action, taking shared ownership. Replacing an
    /// existing child releases it.
    fn set_deadzone(&mut self, child: ActionRef) {
        let _ = child;
    }

    /// Filter a computed value when this action is attached as a deadzone
    /// child. Identity by default.
    fn apply_deadzone(&mut self, value: AxisValue) -> AxisValue {
        value
    }

    /// Render back to profile syntax, `keyword(p1, p2, ...)`.
    fn to_source(&self) -> String {
        let params: Vec<String> = self.params().iter().map(|p| p.to_string()).collect();
        format!("{}({})", self.keyword(), params.join(", "))
    }
}
