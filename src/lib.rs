// flagsense - evaluation reasons for feature flags
//
// Re-exports the reason types and codec, plus the logging crate when the
// `log` feature is enabled.

// Re-export core functionality
pub use flagsense_reason::*;

#[cfg(feature = "log")]
pub use flagsense_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ErrorKind, EvaluationDetail, EvaluationError, EvaluationReason, EvaluationResult,
        ReasonError, ReasonKind, codec,
    };
}
