//! Typed parameters used to construct and introspect actions
//!
//! Profiles describe actions as `keyword(param, param, ...)`. The parser
//! (external to this crate) produces a [`ParamList`]; constructors validate
//! it against a [`TypeMask`] and keep a deep copy for later re-serialization.

use serde::Serialize;
use std::fmt;

/// Bitmask of parameter kinds accepted at a given position.
///
/// A single declared mask can accept a union, e.g. "int or none":
/// `TypeMask::INT | TypeMask::NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMask(pub u32);

impl TypeMask {
    pub const NONE: TypeMask = TypeMask(0b0000_0001);
    pub const INT: TypeMask = TypeMask(0b0000_0010);
    pub const FLOAT: TypeMask = TypeMask(0b0000_0100);
    pub const STRING: TypeMask = TypeMask(0b0000_1000);
    pub const TUPLE: TypeMask = TypeMask(0b0001_0000);

    /// True if any kind in `other` is also in `self`.
    pub fn accepts(self, other: TypeMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for TypeMask {
    type Output = TypeMask;
    fn bitor(self, rhs: TypeMask) -> TypeMask {
        TypeMask(self.0 | rhs.0)
    }
}

/// A tagged, immutable parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parameter {
    None,
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Parameter>),
}

impl Parameter {
    /// Kind of this parameter as a mask with exactly one bit set,
    /// except that an int also satisfies a float contract.
    pub fn type_mask(&self) -> TypeMask {
        match self {
            Parameter::None => TypeMask::NONE,
            Parameter::Int(_) => TypeMask::INT | TypeMask::FLOAT,
            Parameter::Float(_) => TypeMask::FLOAT,
            Parameter::Str(_) => TypeMask::STRING,
            Parameter::Tuple(_) => TypeMask::TUPLE,
        }
    }

    /// Membership test against a caller-supplied mask of acceptable kinds.
    pub fn is(&self, mask: TypeMask) -> bool {
        mask.accepts(self.type_mask())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Parameter::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Parameter::Int(v) => Some(*v as f64),
            Parameter::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Parameter::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn tuple(&self) -> Option<&[Parameter]> {
        match self {
            Parameter::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Parameter {
    /// Renders profile syntax: `None`, `42`, `1.5`, `'text'`, `(a, b)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::None => write!(f, "None"),
            Parameter::Int(v) => write!(f, "{}", v),
            // Whole-valued floats keep a trailing .0 so they stay
            // distinguishable from ints when parsed back
            Parameter::Float(v) if v.fract() == 0.0 && v.is_finite() => {
                write!(f, "{:.1}", v)
            }
            Parameter::Float(v) => write!(f, "{}", v),
            Parameter::Str(s) => write!(f, "'{}'", s),
            Parameter::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Ordered parameter list. `clone()` is a deep copy, so an action can own
/// its list independently of the caller's original.
pub type ParamList = Vec<Parameter>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mask_union() {
        let axis_or_none = TypeMask::INT | TypeMask::NONE;

        assert!(Parameter::Int(3).is(axis_or_none));
        assert!(Parameter::None.is(axis_or_none));
        assert!(!Parameter::Float(1.5).is(axis_or_none));
        assert!(!Parameter::Str("x".into()).is(axis_or_none));
    }

    #[test]
    fn test_int_satisfies_float() {
        assert!(Parameter::Int(2).is(TypeMask::FLOAT));
        assert_eq!(Parameter::Int(2).as_float(), Some(2.0));
        assert!(!Parameter::Float(2.0).is(TypeMask::INT));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Parameter::Int(7).as_int(), Some(7));
        assert_eq!(Parameter::Float(0.5).as_int(), None);
        assert_eq!(Parameter::Str("abc".into()).as_str(), Some("abc"));

        let t = Parameter::Tuple(vec![Parameter::Int(1), Parameter::None]);
        assert_eq!(t.tuple().map(|items| items.len()), Some(2));
    }

    #[test]
    fn test_display_profile_syntax() {
        let p = Parameter::Tuple(vec![
            Parameter::Int(1),
            Parameter::None,
            Parameter::Str("mouse".into()),
        ]);
        assert_eq!(p.to_string(), "(1, None, 'mouse')");
        assert_eq!(Parameter::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_display_whole_floats_keep_fraction() {
        // A whole-valued float must not render like an int
        assert_eq!(Parameter::Float(2.0).to_string(), "2.0");
        assert_eq!(Parameter::Float(-3.0).to_string(), "-3.0");
        assert_eq!(Parameter::Int(2).to_string(), "2");
    }

    #[test]
    fn test_deep_copy() {
        let original: ParamList = vec![Parameter::Tuple(vec![Parameter::Int(1)])];
        let copy = original.clone();
        drop(original);
        // Copy remains fully usable after the source is freed
        assert_eq!(copy[0], Parameter::Tuple(vec![Parameter::Int(1)]));
    }
}
