//! estimation::schedule — validated evaluation schedules.
//!
//! Purpose
//! -------
//! Represent the ordered list of amplification powers an estimation run
//! evaluates. A schedule is either supplied explicitly or expanded from an
//! integer into the exponential form `[0, 2^0, 2^1, ..., 2^(m-1)]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A schedule is never empty; [`EvaluationSchedule::from_powers`] rejects
//!   empty input at configuration time.
//! - Powers are unsigned, so negative entries are unrepresentable rather
//!   than a runtime error.
//! - Duplicates are permitted; schedules are typically but not necessarily
//!   strictly increasing.
//! - Schedules are immutable once constructed and owned by the estimator
//!   for the duration of a run.
//!
//! Conventions
//! -----------
//! - `k_max()` is the *last* entry, not the maximum: the default grid
//!   resolution rule is defined in terms of the final scheduled power, and
//!   conventional schedules are increasing.

use crate::estimation::errors::{EstResult, EstimationError};

/// EvaluationSchedule — ordered amplification powers for one run.
///
/// Purpose
/// -------
/// Carry the powers `k_0, k_1, ..., k_{n-1}` applied to the amplification
/// operator before each measurement round, validated once at construction.
///
/// Key behaviors
/// -------------
/// - [`EvaluationSchedule::from_powers`] wraps an explicit power list and
///   rejects empty input.
/// - [`EvaluationSchedule::exponential`] expands an integer `m` into
///   `[0, 2^0, ..., 2^(m-1)]`, the conventional schedule whose sensitivity
///   doubles per round.
/// - Accessors expose the power list, its length, and the last entry used
///   to size the default minimizer grid.
///
/// Invariants
/// ----------
/// - `powers` is non-empty for every constructed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSchedule {
    powers: Vec<u64>,
}

impl EvaluationSchedule {
    /// Build a schedule from an explicit list of amplification powers.
    ///
    /// Errors
    /// ------
    /// - [`EstimationError::EmptySchedule`] when `powers` is empty.
    pub fn from_powers(powers: Vec<u64>) -> EstResult<Self> {
        if powers.is_empty() {
            return Err(EstimationError::EmptySchedule);
        }
        Ok(Self { powers })
    }

    /// Build the exponential schedule `[0, 2^0, 2^1, ..., 2^(m-1)]`.
    ///
    /// `num_powers = 0` yields the single-entry schedule `[0]`, which
    /// measures the unamplified process only.
    pub fn exponential(num_powers: u32) -> Self {
        let mut powers = Vec::with_capacity(num_powers as usize + 1);
        powers.push(0);
        for j in 0..num_powers {
            powers.push(1u64 << j);
        }
        Self { powers }
    }

    /// The ordered amplification powers.
    pub fn powers(&self) -> &[u64] {
        &self.powers
    }

    /// Number of schedule entries.
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    /// Always false: schedules reject empty input at construction.
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// The last scheduled power, which sizes the default minimizer grid.
    pub fn k_max(&self) -> u64 {
        self.powers.last().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Explicit construction and the empty-schedule rejection.
    // - Exponential expansion, including the m = 0 edge.
    // - The k_max convention (last entry, not maximum).
    //
    // They intentionally DO NOT cover:
    // - Downstream use of schedules by the extractor or solver; those are
    //   exercised in their own modules and the integration pipeline.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that an explicit power list is stored in order and exposes
    // the expected accessors.
    //
    // Given
    // -----
    // - The power list [0, 1, 2, 4].
    //
    // Expect
    // ------
    // - `powers()` round-trips, `len()` is 4, `k_max()` is 4.
    fn from_powers_preserves_order_and_reports_k_max() {
        // Arrange & Act
        let schedule = EvaluationSchedule::from_powers(vec![0, 1, 2, 4])
            .expect("non-empty schedule should construct");

        // Assert
        assert_eq!(schedule.powers(), &[0, 1, 2, 4]);
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.k_max(), 4);
        assert!(!schedule.is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Ensure the empty power list is rejected at configuration time.
    //
    // Given
    // -----
    // - An empty `Vec<u64>`.
    //
    // Expect
    // ------
    // - `Err(EstimationError::EmptySchedule)`.
    fn from_powers_rejects_empty_schedule() {
        // Arrange & Act
        let result = EvaluationSchedule::from_powers(Vec::new());

        // Assert
        match result {
            Err(EstimationError::EmptySchedule) => (),
            other => panic!("expected EmptySchedule, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify exponential expansion matches [0, 2^0, ..., 2^(m-1)].
    //
    // Given
    // -----
    // - m = 3 and the degenerate m = 0.
    //
    // Expect
    // ------
    // - [0, 1, 2, 4] for m = 3; [0] for m = 0.
    fn exponential_expands_powers_of_two_with_leading_zero() {
        // Arrange & Act
        let expanded = EvaluationSchedule::exponential(3);
        let degenerate = EvaluationSchedule::exponential(0);

        // Assert
        assert_eq!(expanded.powers(), &[0, 1, 2, 4]);
        assert_eq!(degenerate.powers(), &[0]);
        assert_eq!(degenerate.k_max(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Document the k_max convention: the last entry governs the grid
    // resolution even when it is not the largest power.
    //
    // Given
    // -----
    // - The (unconventional) schedule [4, 1].
    //
    // Expect
    // ------
    // - `k_max()` is 1.
    fn k_max_is_last_entry_not_maximum() {
        // Arrange & Act
        let schedule = EvaluationSchedule::from_powers(vec![4, 1])
            .expect("non-empty schedule should construct");

        // Assert
        assert_eq!(schedule.k_max(), 1);
    }
}
