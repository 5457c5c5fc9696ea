//! Error kinds carried by `ERROR` evaluation reasons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why an evaluation completed with an in-band error result.
///
/// New kinds may be added in minor releases, so matches outside this crate
/// need a wildcard arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Flag data was not available yet.
    ClientNotReady,
    /// No flag exists for the requested key.
    FlagNotFound,
    /// The stored flag data is internally inconsistent.
    MalformedFlag,
    /// No user or context key was supplied.
    UserNotSpecified,
    /// The flag's value does not have the requested type.
    WrongType,
    /// Evaluation code failed unexpectedly.
    Exception,
}

impl ErrorKind {
    /// Every known kind, in declaration order.
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::ClientNotReady,
        ErrorKind::FlagNotFound,
        ErrorKind::MalformedFlag,
        ErrorKind::UserNotSpecified,
        ErrorKind::WrongType,
        ErrorKind::Exception,
    ];

    /// Wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ClientNotReady => "CLIENT_NOT_READY",
            ErrorKind::FlagNotFound => "FLAG_NOT_FOUND",
            ErrorKind::MalformedFlag => "MALFORMED_FLAG",
            ErrorKind::UserNotSpecified => "USER_NOT_SPECIFIED",
            ErrorKind::WrongType => "WRONG_TYPE",
            ErrorKind::Exception => "EXCEPTION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known error kind tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error kind: {0}")]
pub struct UnknownErrorKind(pub String);

impl FromStr for ErrorKind {
    type Err = UnknownErrorKind;

    /// Tags are matched exactly; `exception` is not `EXCEPTION`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownErrorKind(s.to_string()))
    }
}
