//! Evaluation Reasons
//!
//! Describes why a flag evaluation produced its value.
//!
//! Every reason serializes to a JSON object with a `kind` tag plus the
//! fields of that kind only:
//!
//! | Kind | Extra fields |
//! |---|---|
//! | `OFF` | none |
//! | `FALLTHROUGH` | none |
//! | `TARGET_MATCH` | none |
//! | `RULE_MATCH` | `ruleIndex`, `ruleId` |
//! | `PREREQUISITE_FAILED` | `prerequisiteKey` |
//! | `ERROR` | `errorKind` |
//!
//! Field names and tags are a wire contract shared with analytics events.

use crate::error_kind::ErrorKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Explanation of a completed flag evaluation.
///
/// Reasons are immutable values compared structurally. Build them with the
/// factory functions ([`EvaluationReason::rule_match`] and friends) so the
/// payload invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationReason {
    /// The flag was off, so no rules were evaluated.
    Off,

    /// No target or rule matched and the default value was served.
    Fallthrough,

    /// The context key was in an individual target list.
    TargetMatch,

    /// A targeting rule matched.
    RuleMatch {
        /// 0-based position of the rule in the flag's rule list
        #[serde(rename = "ruleIndex")]
        rule_index: usize,

        /// Stable rule identifier, independent of position
        #[serde(rename = "ruleId")]
        rule_id: String,
    },

    /// A prerequisite flag did not return its required variation.
    PrerequisiteFailed {
        /// Key of the first prerequisite that failed
        #[serde(rename = "prerequisiteKey")]
        prerequisite_key: String,
    },

    /// Evaluation completed but could not produce a normal result.
    Error {
        #[serde(rename = "errorKind")]
        error_kind: ErrorKind,
    },
}

impl EvaluationReason {
    /// Shared `OFF` reason.
    pub const OFF: EvaluationReason = EvaluationReason::Off;

    /// Shared `FALLTHROUGH` reason.
    pub const FALLTHROUGH: EvaluationReason = EvaluationReason::Fallthrough;

    /// Shared `TARGET_MATCH` reason.
    pub const TARGET_MATCH: EvaluationReason = EvaluationReason::TargetMatch;

    /// The flag was off.
    pub const fn off() -> Self {
        Self::OFF
    }

    /// No target or rule matched.
    pub const fn fallthrough() -> Self {
        Self::FALLTHROUGH
    }

    /// The context key was individually targeted.
    pub const fn target_match() -> Self {
        Self::TARGET_MATCH
    }

    /// The rule at `rule_index` with identifier `rule_id` matched.
    ///
    /// # Panics
    ///
    /// Panics if `rule_id` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagsense_reason::EvaluationReason;
    ///
    /// let reason = EvaluationReason::rule_match(1, "id");
    /// assert_eq!(reason.to_string(), "RULE_MATCH(1,id)");
    /// ```
    pub fn rule_match(rule_index: usize, rule_id: impl Into<String>) -> Self {
        let rule_id = rule_id.into();
        assert!(!rule_id.is_empty(), "rule id must not be empty");
        Self::RuleMatch {
            rule_index,
            rule_id,
        }
    }

    /// The prerequisite flag `prerequisite_key` failed.
    ///
    /// # Panics
    ///
    /// Panics if `prerequisite_key` is empty.
    pub fn prerequisite_failed(prerequisite_key: impl Into<String>) -> Self {
        let prerequisite_key = prerequisite_key.into();
        assert!(
            !prerequisite_key.is_empty(),
            "prerequisite key must not be empty"
        );
        Self::PrerequisiteFailed { prerequisite_key }
    }

    /// Evaluation completed with an in-band error of the given kind.
    pub const fn error(error_kind: ErrorKind) -> Self {
        Self::Error { error_kind }
    }

    /// Payload-free kind of this reason.
    pub fn kind(&self) -> ReasonKind {
        match self {
            Self::Off => ReasonKind::Off,
            Self::Fallthrough => ReasonKind::Fallthrough,
            Self::TargetMatch => ReasonKind::TargetMatch,
            Self::RuleMatch { .. } => ReasonKind::RuleMatch,
            Self::PrerequisiteFailed { .. } => ReasonKind::PrerequisiteFailed,
            Self::Error { .. } => ReasonKind::Error,
        }
    }

    /// Position of the matched rule, for `RULE_MATCH` only.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            Self::RuleMatch { rule_index, .. } => Some(*rule_index),
            _ => None,
        }
    }

    /// Identifier of the matched rule, for `RULE_MATCH` only.
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Self::RuleMatch { rule_id, .. } => Some(rule_id),
            _ => None,
        }
    }

    /// Key of the failed prerequisite, for `PREREQUISITE_FAILED` only.
    pub fn prerequisite_key(&self) -> Option<&str> {
        match self {
            Self::PrerequisiteFailed { prerequisite_key } => Some(prerequisite_key),
            _ => None,
        }
    }

    /// Error kind, for `ERROR` only.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Error { error_kind } => Some(*error_kind),
            _ => None,
        }
    }

    /// Whether this is an `ERROR` reason.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl fmt::Display for EvaluationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Self::Off | Self::Fallthrough | Self::TargetMatch => f.write_str(kind.as_str()),
            Self::RuleMatch {
                rule_index,
                rule_id,
            } => write!(f, "{}({},{})", kind, rule_index, rule_id),
            Self::PrerequisiteFailed { prerequisite_key } => {
                write!(f, "{}({})", kind, prerequisite_key)
            }
            Self::Error { error_kind } => write!(f, "{}({})", kind, error_kind),
        }
    }
}

/// Decode target mirroring [`EvaluationReason`]; the tag is checked before
/// any payload field is read.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
enum ReasonRepr {
    Off,
    Fallthrough,
    TargetMatch,
    RuleMatch {
        #[serde(rename = "ruleIndex")]
        rule_index: usize,
        #[serde(rename = "ruleId")]
        rule_id: String,
    },
    PrerequisiteFailed {
        #[serde(rename = "prerequisiteKey")]
        prerequisite_key: String,
    },
    Error {
        #[serde(rename = "errorKind")]
        error_kind: ErrorKind,
    },
}

impl From<ReasonRepr> for EvaluationReason {
    // Payload strings are taken as encoded, so every encodable reason
    // decodes back to itself.
    fn from(repr: ReasonRepr) -> Self {
        match repr {
            ReasonRepr::Off => EvaluationReason::Off,
            ReasonRepr::Fallthrough => EvaluationReason::Fallthrough,
            ReasonRepr::TargetMatch => EvaluationReason::TargetMatch,
            ReasonRepr::RuleMatch {
                rule_index,
                rule_id,
            } => EvaluationReason::RuleMatch {
                rule_index,
                rule_id,
            },
            ReasonRepr::PrerequisiteFailed { prerequisite_key } => {
                EvaluationReason::PrerequisiteFailed { prerequisite_key }
            }
            ReasonRepr::Error { error_kind } => EvaluationReason::Error { error_kind },
        }
    }
}

impl<'de> Deserialize<'de> for EvaluationReason {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ReasonRepr::deserialize(deserializer).map(EvaluationReason::from)
    }
}

/// Kind of an [`EvaluationReason`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonKind {
    Off,
    Fallthrough,
    TargetMatch,
    RuleMatch,
    PrerequisiteFailed,
    Error,
}

impl ReasonKind {
    /// Wire tag, as used in the `kind` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonKind::Off => "OFF",
            ReasonKind::Fallthrough => "FALLTHROUGH",
            ReasonKind::TargetMatch => "TARGET_MATCH",
            ReasonKind::RuleMatch => "RULE_MATCH",
            ReasonKind::PrerequisiteFailed => "PREREQUISITE_FAILED",
            ReasonKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for ReasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known reason kind tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reason kind: {0}")]
pub struct UnknownReasonKind(pub String);

impl FromStr for ReasonKind {
    type Err = UnknownReasonKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OFF" => Ok(ReasonKind::Off),
            "FALLTHROUGH" => Ok(ReasonKind::Fallthrough),
            "TARGET_MATCH" => Ok(ReasonKind::TargetMatch),
            "RULE_MATCH" => Ok(ReasonKind::RuleMatch),
            "PREREQUISITE_FAILED" => Ok(ReasonKind::PrerequisiteFailed),
            "ERROR" => Ok(ReasonKind::Error),
            other => Err(UnknownReasonKind(other.to_string())),
        }
    }
}
