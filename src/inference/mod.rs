//! inference — Fisher information and confidence intervals.
//!
//! Purpose
//! -------
//! Quantify the precision of a completed estimation run: the theoretical
//! and observed Fisher information ([`fisher`]) and two-sided confidence
//! intervals by three constructions ([`confidence`]).
//!
//! Conventions
//! -----------
//! - All quantities live in the amplitude domain `[0, 1]`; callers apply
//!   their own post-processing to reported intervals.
//! - Errors travel as [`InfResult<T>`] / `InferenceError`.

pub mod confidence;
pub mod errors;
pub mod fisher;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::confidence::{ConfidenceMethod, apply_post_processing, confidence_interval, fisher_interval};
pub use self::errors::{InfResult, InferenceError};
pub use self::fisher::fisher_information;
