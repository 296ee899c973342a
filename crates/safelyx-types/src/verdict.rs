// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Safety verdict returned by every check

use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Range of verdicts that express a safety conclusion, least to most confident
const SAFE_RANGE: RangeInclusive<i32> = 8..=10;

/// Integer safety score reported by the service
///
/// The service only defines `-2` (the subject could not be evaluated) and
/// `8..=10` (increasing confidence that the subject is safe). The raw value is
/// kept as received so that out-of-range scores can be reported with
/// [`Verdict::validate`] instead of being lost during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verdict(i32);

/// A verdict outside the defined value space
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("verdict {value} at `{field}` is outside the defined value space (-2 or 8..=10)")]
pub struct VerdictError {
    /// Path of the offending field in the response, e.g. `analysis.link.result`
    pub field: String,
    /// The value the service sent
    pub value: i32,
}

impl Verdict {
    /// The subject could not be evaluated
    pub const UNEVALUATED: Self = Self(-2);

    /// Wrap a raw score without checking it
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw score as sent by the service
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether the service performed the check but reached no conclusion
    pub const fn is_unevaluated(self) -> bool {
        self.0 == Self::UNEVALUATED.0
    }

    /// Whether the score lies in the defined value space
    pub fn is_defined(self) -> bool {
        self.is_unevaluated() || SAFE_RANGE.contains(&self.0)
    }

    /// Safety confidence on the `8..=10` scale, `None` for any other score
    pub fn confidence(self) -> Option<u8> {
        if SAFE_RANGE.contains(&self.0) {
            u8::try_from(self.0).ok()
        } else {
            None
        }
    }

    /// Check the score against the defined value space
    ///
    /// `field` names where the score was found and ends up in the error.
    pub fn validate(self, field: impl Into<String>) -> Result<Self, VerdictError> {
        if self.is_defined() {
            Ok(self)
        } else {
            Err(VerdictError {
                field: field.into(),
                value: self.0,
            })
        }
    }
}

impl From<i32> for Verdict {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Verdict> for i32 {
    fn from(verdict: Verdict) -> Self {
        verdict.0
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.confidence() {
            Some(level) => write!(f, "{level}/10"),
            None if self.is_unevaluated() => f.write_str("not evaluated"),
            None => write!(f, "undefined ({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_value_space() {
        assert!(Verdict::new(-2).is_defined());
        assert!(Verdict::new(8).is_defined());
        assert!(Verdict::new(9).is_defined());
        assert!(Verdict::new(10).is_defined());

        for value in [-3, -1, 0, 1, 5, 7, 11, 100] {
            assert!(!Verdict::new(value).is_defined(), "{value} should be undefined");
        }
    }

    #[test]
    fn confidence_levels() {
        assert_eq!(Verdict::new(8).confidence(), Some(8));
        assert_eq!(Verdict::new(10).confidence(), Some(10));
        assert_eq!(Verdict::UNEVALUATED.confidence(), None);
        assert_eq!(Verdict::new(3).confidence(), None);
        assert!(Verdict::UNEVALUATED.is_unevaluated());
        assert!(!Verdict::new(9).is_unevaluated());
    }

    #[test]
    fn validation_reports_field() {
        assert_eq!(Verdict::new(9).validate("result"), Ok(Verdict::new(9)));

        let error = Verdict::new(4).validate("analysis.link.result").unwrap_err();
        assert_eq!(error.field, "analysis.link.result");
        assert_eq!(error.value, 4);
        assert!(error.to_string().contains("analysis.link.result"));
    }

    #[test]
    fn serde_transparent() {
        let verdict: Verdict = serde_json::from_str("-2").unwrap();
        assert_eq!(verdict, Verdict::UNEVALUATED);

        // out-of-range scores still decode so they can be reported
        let verdict: Verdict = serde_json::from_str("42").unwrap();
        assert_eq!(verdict.value(), 42);

        assert_eq!(serde_json::to_string(&Verdict::new(10)).unwrap(), "10");
    }

    #[test]
    fn display() {
        assert_eq!(Verdict::new(8).to_string(), "8/10");
        assert_eq!(Verdict::UNEVALUATED.to_string(), "not evaluated");
        assert_eq!(Verdict::new(0).to_string(), "undefined (0)");
    }
}
