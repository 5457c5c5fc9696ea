//! Evaluation reasons for feature flags
//!
//! Describes *why* a flag evaluated to its value, how that explanation is
//! encoded on the wire, and how abnormal evaluation failures are signalled.
//!
//! # Features
//!
//! - **Closed reason set** - `OFF`, `FALLTHROUGH`, `TARGET_MATCH`,
//!   `RULE_MATCH`, `PREREQUISITE_FAILED` and `ERROR`
//! - **Stable JSON** - `{"kind": ...}` objects shared with analytics events
//! - **Evaluation details** - value, variation index and reason together
//! - **Two failure channels** - in-band `ERROR` reasons and out-of-band
//!   [`EvaluationError`]s
//!
//! # Quick Start
//!
//! ```
//! use flagsense_reason::*;
//!
//! let reason = EvaluationReason::rule_match(1, "id");
//! assert_eq!(reason.to_string(), "RULE_MATCH(1,id)");
//!
//! let json = codec::to_string(&reason).unwrap();
//! let decoded: EvaluationReason = codec::from_str(&json).unwrap();
//! assert_eq!(decoded, reason);
//! ```
//!
//! # Failures
//!
//! ```
//! use flagsense_reason::*;
//!
//! fn evaluate(key: &str) -> EvaluationResult<EvaluationDetail<bool>> {
//!     if key.is_empty() {
//!         return Err(EvaluationError::new("empty flag key"));
//!     }
//!     Ok(EvaluationDetail::error(ErrorKind::FlagNotFound, Some(false)))
//! }
//!
//! // A missing flag is a normal result with an ERROR reason...
//! let detail = evaluate("unknown-flag").unwrap();
//! assert_eq!(detail.reason.to_string(), "ERROR(FLAG_NOT_FOUND)");
//!
//! // ...while an abnormal failure has to be handled by the caller.
//! let detail = EvaluationDetail::from_result(evaluate(""), Some(false));
//! assert_eq!(detail.reason.error_kind(), Some(ErrorKind::Exception));
//! ```

pub mod codec;
mod detail;
mod error;
mod error_kind;
mod reason;

pub use detail::EvaluationDetail;
pub use error::{EvaluationError, EvaluationResult, ReasonError, Result};
pub use error_kind::{ErrorKind, UnknownErrorKind};
pub use reason::{EvaluationReason, ReasonKind, UnknownReasonKind};
