//! Ordered validation rule tables.
//!
//! Each configuration type declares a static slice of [`Rule`]s. The rules are
//! evaluated in declaration order and evaluation stops at the first rule that
//! does not hold, so the reported error is always the same for a given input.

use crate::error::{ConfigError, ConfigResult};
use crate::log::debug;

/// A single validation rule: a predicate over `T` and the error reported when
/// the predicate does not hold.
pub struct Rule<T> {
    /// Short name used in log output.
    pub name: &'static str,
    /// Returns `true` when the subject satisfies the rule.
    pub holds: fn(&T) -> bool,
    /// Builds the error for a subject that violates the rule.
    pub error: fn(&T) -> ConfigError,
}

/// Evaluates `rules` against `subject` in order and returns the error of the
/// first violated rule.
pub fn check<T>(kind: &str, subject: &T, rules: &[Rule<T>]) -> ConfigResult<()> {
    match rules.iter().find(|rule| !(rule.holds)(subject)) {
        None => Ok(()),
        Some(rule) => {
            let err = (rule.error)(subject);
            debug!("{} rejected by rule '{}': {}", kind, rule.name, err);
            Err(err)
        }
    }
}
