// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Configured defaults and per-call overrides
//!
//! Some command parameters (the BPMN process id, FailJob retries) may be
//! fixed in the gateway settings and overridden per invocation. The
//! configured value is a default, never a constraint: a supplied per-call
//! value always wins.

/// Whether a value counts as "supplied" when merging with a default
///
/// Empty strings and non-positive numbers are placeholders for "not set".
pub trait Supplied {
    fn is_supplied(&self) -> bool;
}

impl Supplied for String {
    fn is_supplied(&self) -> bool {
        !self.is_empty()
    }
}

impl Supplied for i64 {
    fn is_supplied(&self) -> bool {
        *self > 0
    }
}

impl Supplied for i32 {
    fn is_supplied(&self) -> bool {
        *self > 0
    }
}

/// `per_call` if supplied, else `configured` if supplied, else `None`
pub fn merge<T: Supplied>(configured: Option<T>, per_call: Option<T>) -> Option<T> {
    per_call
        .filter(|v| v.is_supplied())
        .or_else(|| configured.filter(|v| v.is_supplied()))
}

/// Settings-level defaults consulted by command handlers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDefaults {
    pub bpmn_process_id: Option<String>,
    pub fail_job_retries: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_call_value_wins() {
        assert_eq!(
            merge(Some("P1".to_string()), Some("P2".to_string())),
            Some("P2".to_string())
        );
        assert_eq!(merge(Some(3), Some(5)), Some(5));
    }

    #[test]
    fn test_configured_value_fills_gap() {
        assert_eq!(merge(Some("P1".to_string()), None), Some("P1".to_string()));
        assert_eq!(merge(Some("P1".to_string()), Some(String::new())), Some("P1".to_string()));
        assert_eq!(merge(Some(3), Some(0)), Some(3));
        assert_eq!(merge(Some(3i64), Some(-1)), Some(3));
    }

    #[test]
    fn test_nothing_supplied() {
        assert_eq!(merge::<i32>(None, None), None);
        assert_eq!(merge(Some(0), Some(-2)), None);
        assert_eq!(merge(Some(String::new()), None), None);
    }
}
