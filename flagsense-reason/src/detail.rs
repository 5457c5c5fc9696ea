//! Evaluation Details
//!
//! Couples the value produced by an evaluation with the reason for it.

use crate::EvaluationReason;
use crate::error::EvaluationResult;
use crate::error_kind::ErrorKind;
use flagsense_log::warn;
use serde::{Deserialize, Serialize};

/// Result of evaluating a flag: the value, which variation produced it, and
/// why.
///
/// # Examples
///
/// ```
/// use flagsense_reason::{EvaluationDetail, EvaluationReason, ErrorKind};
///
/// let detail = EvaluationDetail::new(Some(true), Some(1), EvaluationReason::fallthrough());
/// assert!(!detail.is_default_value());
///
/// let missing = EvaluationDetail::error(ErrorKind::FlagNotFound, Some(false));
/// assert_eq!(missing.value, Some(false));
/// assert!(missing.reason.is_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDetail<T> {
    /// Evaluated value, or `None` when no value (not even a default) exists
    pub value: Option<T>,

    /// Index of the variation that produced the value; `None` for defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_index: Option<usize>,

    /// Why this value was produced
    pub reason: EvaluationReason,
}

impl<T> EvaluationDetail<T> {
    /// Detail from its three parts.
    pub fn new(value: Option<T>, variation_index: Option<usize>, reason: EvaluationReason) -> Self {
        Self {
            value,
            variation_index,
            reason,
        }
    }

    /// Detail carrying the caller's default after an in-band error.
    pub fn error(kind: ErrorKind, default: Option<T>) -> Self {
        Self::new(default, None, EvaluationReason::error(kind))
    }

    /// Resolve an evaluation attempt into a detail.
    ///
    /// Abnormal failures fall back to `default` with an `EXCEPTION` reason.
    pub fn from_result(result: EvaluationResult<Self>, default: Option<T>) -> Self {
        match result {
            Ok(detail) => detail,
            Err(err) => {
                warn!(
                    target: "flagsense::evaluation",
                    "Serving default after evaluation failure: {}",
                    err
                );
                Self::error(ErrorKind::Exception, default)
            }
        }
    }

    /// True when no variation was selected and the default was served.
    pub fn is_default_value(&self) -> bool {
        self.variation_index.is_none()
    }

    /// Transform the value, keeping the variation index and reason.
    pub fn map<U, F>(self, f: F) -> EvaluationDetail<U>
    where
        F: FnOnce(T) -> U,
    {
        EvaluationDetail {
            value: self.value.map(f),
            variation_index: self.variation_index,
            reason: self.reason,
        }
    }

    /// The value, or `default` when there is none.
    pub fn value_or(self, default: T) -> T {
        self.value.unwrap_or(default)
    }
}
