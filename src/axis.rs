//! Emulated output axis identifiers
//!
//! Axes live in one contiguous id space: absolute (stick/trigger/dpad) axes
//! first, then relative (mouse) axes. Range checks, not names, decide how a
//! value is routed, so profile syntax can refer to any axis by its integer id.

use crate::param::Parameter;

/// Value written to an absolute axis or emitted as relative mouse motion.
pub type AxisValue = i32;

/// Full range of a stick or pad axis.
pub const STICK_PAD_MIN: AxisValue = -0x8000;
pub const STICK_PAD_MAX: AxisValue = 0x7FFF;

/// Trigger axes are unsigned bytes.
pub const TRIGGER_MIN: AxisValue = 0;
pub const TRIGGER_MAX: AxisValue = 0xFF;

/// Identifier of an emulated output axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Axis(pub u16);

impl Axis {
    pub const ABS_X: Axis = Axis(0);
    pub const ABS_Y: Axis = Axis(1);
    pub const ABS_Z: Axis = Axis(2);
    pub const ABS_RX: Axis = Axis(3);
    pub const ABS_RY: Axis = Axis(4);
    pub const ABS_RZ: Axis = Axis(5);
    pub const ABS_HAT0X: Axis = Axis(6);
    pub const ABS_HAT0Y: Axis = Axis(7);
    /// One past the last absolute axis, doubling as the "no axis assigned"
    /// sentinel in action slots.
    pub const ABS_CNT: Axis = Axis(8);
    pub const NONE: Axis = Axis::ABS_CNT;

    pub const REL_X: Axis = Axis(16);
    pub const REL_Y: Axis = Axis(17);
    pub const REL_WHEEL: Axis = Axis(18);
    pub const REL_HWHEEL: Axis = Axis(19);
    pub const REL_MAX: Axis = Axis::REL_HWHEEL;

    /// True for a valid absolute axis (sentinel excluded).
    pub fn is_abs(self) -> bool {
        self.0 < Axis::ABS_CNT.0
    }

    /// True for a relative (mouse) axis.
    pub fn is_rel(self) -> bool {
        self.0 >= Axis::REL_X.0 && self.0 <= Axis::REL_MAX.0
    }

    pub fn is_none(self) -> bool {
        self == Axis::NONE
    }

    /// Legal output range for this axis.
    pub fn range(self) -> (AxisValue, AxisValue) {
        match self {
            Axis::ABS_Z | Axis::ABS_RZ => (TRIGGER_MIN, TRIGGER_MAX),
            Axis::ABS_HAT0X | Axis::ABS_HAT0Y => (-1, 1),
            _ => (STICK_PAD_MIN, STICK_PAD_MAX),
        }
    }

    /// Clamps a computed value into this axis' legal range.
    pub fn clamp(self, value: f64) -> AxisValue {
        let (min, max) = self.range();
        (value as i64).clamp(min as i64, max as i64) as AxisValue
    }

    /// Short human-readable label; empty for the sentinel and unknown ids.
    pub fn describe(self) -> &'static str {
        match self {
            Axis::ABS_X => "LStick X",
            Axis::ABS_Y => "LStick Y",
            Axis::ABS_Z => "Left Trigger",
            Axis::ABS_RX => "RStick X",
            Axis::ABS_RY => "RStick Y",
            Axis::ABS_RZ => "Right Trigger",
            Axis::ABS_HAT0X => "DPAD X",
            Axis::ABS_HAT0Y => "DPAD Y",
            Axis::REL_X => "Mouse X",
            Axis::REL_Y => "Mouse Y",
            Axis::REL_WHEEL => "Wheel",
            Axis::REL_HWHEEL => "Horizontal Wheel",
            _ => "",
        }
    }

    /// Reads an axis id out of an `Int` parameter. Ids that fit the id space
    /// are stored verbatim; within it, ids outside every known range simply
    /// never route output. Ids that do not fit become the unset sentinel
    /// rather than wrapping into a valid axis.
    pub fn from_parameter(param: &Parameter) -> Option<Axis> {
        param.as_int().map(|id| match u16::try_from(id) {
            Ok(id) => Axis(id),
            Err(_) => Axis::NONE,
        })
    }

    /// Integer id as used in profile syntax and introspection.
    pub fn id(self) -> i64 {
        self.0 as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_predicates() {
        assert!(Axis::ABS_X.is_abs());
        assert!(Axis::ABS_HAT0Y.is_abs());
        assert!(!Axis::NONE.is_abs());
        assert!(!Axis::REL_X.is_abs());

        assert!(Axis::REL_X.is_rel());
        assert!(Axis::REL_HWHEEL.is_rel());
        assert!(!Axis::ABS_X.is_rel());
        assert!(!Axis::NONE.is_rel());

        assert!(Axis::NONE.is_none());
    }

    #[test]
    fn test_clamp_per_axis() {
        assert_eq!(Axis::ABS_X.clamp(1e9), STICK_PAD_MAX);
        assert_eq!(Axis::ABS_X.clamp(-1e9), STICK_PAD_MIN);
        assert_eq!(Axis::ABS_X.clamp(120.0), 120);

        // Triggers are unsigned bytes
        assert_eq!(Axis::ABS_Z.clamp(1000.0), TRIGGER_MAX);
        assert_eq!(Axis::ABS_Z.clamp(-5.0), TRIGGER_MIN);

        assert_eq!(Axis::ABS_HAT0X.clamp(7.0), 1);
        assert_eq!(Axis::ABS_HAT0X.clamp(-7.0), -1);
    }

    #[test]
    fn test_from_parameter() {
        assert_eq!(Axis::from_parameter(&Parameter::Int(0)), Some(Axis::ABS_X));
        assert_eq!(Axis::from_parameter(&Parameter::Int(16)), Some(Axis::REL_X));
        assert_eq!(Axis::from_parameter(&Parameter::None), None);
    }

    #[test]
    fn test_from_parameter_oversized_id_is_unset() {
        // Must not wrap into the valid range (65536 % 65536 == ABS_X)
        assert_eq!(
            Axis::from_parameter(&Parameter::Int(65536)),
            Some(Axis::NONE)
        );
        assert_eq!(Axis::from_parameter(&Parameter::Int(-1)), Some(Axis::NONE));
        assert_eq!(
            Axis::from_parameter(&Parameter::Int(i64::MAX)),
            Some(Axis::NONE)
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(Axis::REL_X.describe(), "Mouse X");
        assert_eq!(Axis::NONE.describe(), "");
        assert_eq!(Axis(12).describe(), "");
    }
}
