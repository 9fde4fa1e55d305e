//! Keyword-to-constructor registry
//!
//! The profile loader resolves each `keyword(params)` expression through the
//! registry exactly once, at graph-build time. The registry is populated at
//! process start and never mutated afterwards.

use super::{deadzone, gyro, ActionError, ActionRef};
use crate::param::ParamList;
use log::{debug, trace};
use std::collections::HashMap;

/// Validates a parameter list and produces an action, or a typed error.
pub type Constructor = fn(&str, &ParamList) -> Result<ActionRef, ActionError>;

/// Maps action keywords to their constructors.
#[derive(Default)]
pub struct ActionRegistry {
    constructors: HashMap<&'static str, Constructor>,
}

impl ActionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every action kind this crate provides.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        gyro::register(&mut registry);
        deadzone::register(&mut registry);
        registry
    }

    /// Bind a keyword to a constructor. Registering the same keyword twice
    /// overwrites the previous binding, last writer wins.
    pub fn register(&mut self, keyword: &'static str, constructor: Constructor) {
        if self.constructors.insert(keyword, constructor).is_some() {
            debug!("Action '{}' re-registered, previous binding dropped", keyword);
        } else {
            trace!("Registered action '{}'", keyword);
        }
    }

    /// Look up `keyword` and delegate to its constructor.
    pub fn construct(&self, keyword: &str, params: &ParamList) -> Result<ActionRef, ActionError> {
        match self.constructors.get(keyword) {
            Some(constructor) => constructor(keyword, params),
            None => Err(ActionError::UnknownAction {
                keyword: keyword.to_string(),
            }),
        }
    }

    /// Keywords currently registered.
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::Parameter;

    #[test]
    fn test_unknown_keyword() {
        let registry = ActionRegistry::new();
        let result = registry.construct("gyro", &vec![Parameter::Int(0)]);
        assert!(matches!(
            result,
            Err(ActionError::UnknownAction { keyword }) if keyword == "gyro"
        ));
    }

    #[test]
    fn test_defaults_cover_gyro_family() {
        let registry = ActionRegistry::with_defaults();
        let mut keywords: Vec<_> = registry.keywords().collect();
        keywords.sort_unstable();
        assert_eq!(keywords, vec!["accel", "deadzone", "gyro", "gyroabs"]);
    }

    #[test]
    fn test_last_writer_wins() {
        fn failing(keyword: &str, _params: &ParamList) -> Result<ActionRef, ActionError> {
            Err(ActionError::InvalidParameterCount {
                keyword: keyword.to_string(),
                count: 0,
            })
        }

        let mut registry = ActionRegistry::with_defaults();
        registry.register("gyro", failing);

        let result = registry.construct("gyro", &vec![Parameter::Int(0)]);
        assert!(matches!(
            result,
            Err(ActionError::InvalidParameterCount { .. })
        ));
    }
}
