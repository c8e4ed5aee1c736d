//! Operator stack applied to one attribute value.
//!
//! Contributions are grouped by [`Operation`] and groups are applied strictly
//! in [`Operation::APPLY_ORDER`]:
//! preAssign → preMul → preDiv → modAdd → modSub → postMul → postDiv →
//! postPercent → postAssign
//!
//! Multiplicative groups turn each source value into a delta and apply the
//! stacking penalty to penalized deltas, positive and negative separately.

use crate::config::EngineConfig;
use crate::modifier::Operation;

/// A single resolved source value feeding one operation group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution {
    pub value: f64,
    pub penalized: bool,
}

/// A collection of contributions that will be applied in the correct order.
///
/// # Example
/// ```
/// # use dogma_core::resolve::OperationStack;
/// # use dogma_core::modifier::Operation;
/// let result = OperationStack::new()
///     .with(Operation::ModAdd, 20.0)           // +20
///     .with(Operation::PostPercent, 10.0)      // ×1.10
///     .apply(200.0, true);
/// assert!((result - 242.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OperationStack {
    groups: [Vec<Contribution>; 9],
}

impl OperationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contribution to the group of `operation`.
    pub fn add(&mut self, operation: Operation, value: f64, penalized: bool) {
        self.groups[operation.index()].push(Contribution { value, penalized });
    }

    /// Adds an unpenalized contribution (builder pattern).
    pub fn with(mut self, operation: Operation, value: f64) -> Self {
        self.add(operation, value, false);
        self
    }

    /// Adds a stacking-penalized contribution (builder pattern).
    pub fn with_penalized(mut self, operation: Operation, value: f64) -> Self {
        self.add(operation, value, true);
        self
    }

    /// Applies every group to `base`.
    ///
    /// `high_is_good` decides which candidate an assign group keeps: the
    /// largest when set, else the smallest.
    pub fn apply(&self, base: f64, high_is_good: bool) -> f64 {
        Operation::APPLY_ORDER
            .iter()
            .fold(base, |value, &operation| {
                let group = &self.groups[operation.index()];
                if group.is_empty() {
                    return value;
                }
                match operation {
                    Operation::PreAssign | Operation::PostAssign => {
                        assign(group, high_is_good).unwrap_or(value)
                    }
                    Operation::ModAdd => value + group.iter().map(|c| c.value).sum::<f64>(),
                    Operation::ModSub => value - group.iter().map(|c| c.value).sum::<f64>(),
                    Operation::PreMul
                    | Operation::PreDiv
                    | Operation::PostMul
                    | Operation::PostDiv
                    | Operation::PostPercent => multiply(value, operation, group),
                }
            })
    }
}

fn assign(group: &[Contribution], high_is_good: bool) -> Option<f64> {
    let values = group.iter().map(|c| c.value);
    if high_is_good {
        values.reduce(f64::max)
    } else {
        values.reduce(f64::min)
    }
}

/// Converts a source value into a multiplicative delta.
///
/// Returns `None` for division by zero, which is skipped.
pub fn delta(operation: Operation, value: f64) -> Option<f64> {
    match operation {
        Operation::PreMul | Operation::PostMul => Some(value - 1.0),
        Operation::PreDiv | Operation::PostDiv if value == 0.0 => None,
        Operation::PreDiv | Operation::PostDiv => Some(1.0 / value - 1.0),
        Operation::PostPercent => Some(value / 100.0),
        _ => None,
    }
}

/// Weight of the delta at `rank` (0-based) in a penalized series:
/// `PENALTY_FACTOR^(rank²)`.
pub fn stacking_penalty(rank: usize) -> f64 {
    EngineConfig::PENALTY_FACTOR.powf((rank as f64).powi(2))
}

/// Applies one penalized series, strongest delta first.
pub fn apply_penalized(value: f64, mut deltas: Vec<f64>) -> f64 {
    deltas.sort_by(|a, b| b.abs().total_cmp(&a.abs()));
    deltas
        .iter()
        .enumerate()
        .fold(value, |acc, (rank, delta)| {
            acc * (1.0 + delta * stacking_penalty(rank))
        })
}

fn multiply(value: f64, operation: Operation, group: &[Contribution]) -> f64 {
    let mut result = value;
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for contribution in group {
        let Some(delta) = delta(operation, contribution.value) else {
            tracing::trace!(%operation, "skipping division by zero");
            continue;
        };
        if !contribution.penalized {
            result *= 1.0 + delta;
        } else if delta < 0.0 {
            negative.push(delta);
        } else {
            positive.push(delta);
        }
    }

    result = apply_penalized(result, positive);
    apply_penalized(result, negative)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn full_stack() -> OperationStack {
        OperationStack::new()
            .with(Operation::PreAssign, 100.0)
            .with(Operation::PreMul, 2.0)
            .with(Operation::PreDiv, 4.0)
            .with(Operation::ModAdd, 10.0)
            .with(Operation::ModSub, 5.0)
            .with(Operation::PostMul, 3.0)
            .with(Operation::PostDiv, 2.0)
            .with(Operation::PostPercent, 50.0)
    }

    #[test]
    fn operations_apply_in_fixed_order() {
        // 100 → ×2 → ÷4 → +10 → −5 → ×3 → ÷2 → ×1.5
        // = ((100 × 2 / 4 + 10 − 5) × 3 / 2) × 1.5 = 123.75
        let result = full_stack().apply(1.0, true);
        assert!((result - 123.75).abs() < EPSILON);
    }

    #[test]
    fn post_assign_wins_last() {
        let result = full_stack().with(Operation::PostAssign, 7.0).apply(1.0, true);
        assert_eq!(result, 7.0);
    }

    #[test]
    fn assign_prefers_best_candidate() {
        let stack = OperationStack::new()
            .with(Operation::PostAssign, 3.0)
            .with(Operation::PostAssign, 9.0);
        assert_eq!(stack.apply(0.0, true), 9.0);
        assert_eq!(stack.apply(0.0, false), 3.0);
    }

    #[test]
    fn unpenalized_percent_is_plain_multiplication() {
        let result = OperationStack::new()
            .with(Operation::PostPercent, 10.0)
            .apply(200.0, true);
        assert!((result - 220.0).abs() < EPSILON);
    }

    #[test]
    fn penalized_series_diminishes() {
        let result = OperationStack::new()
            .with_penalized(Operation::PostMul, 1.2)
            .with_penalized(Operation::PostMul, 1.2)
            .apply(100.0, true);
        let expected = 100.0 * 1.2 * (1.0 + 0.2 * EngineConfig::PENALTY_FACTOR);
        assert!((result - expected).abs() < EPSILON);
        assert!(result < 100.0 * 1.44);
    }

    #[test]
    fn penalized_deltas_sorted_by_magnitude() {
        let weak_first = OperationStack::new()
            .with_penalized(Operation::PostPercent, 5.0)
            .with_penalized(Operation::PostPercent, 30.0)
            .apply(100.0, true);
        let expected = 100.0 * 1.30 * (1.0 + 0.05 * EngineConfig::PENALTY_FACTOR);
        assert!((weak_first - expected).abs() < EPSILON);
    }

    #[test]
    fn positive_and_negative_series_are_independent() {
        let result = OperationStack::new()
            .with_penalized(Operation::PostPercent, 20.0)
            .with_penalized(Operation::PostPercent, -10.0)
            .apply(100.0, true);
        // Each sign starts its own series at rank 0.
        let expected = 100.0 * 1.20 * 0.90;
        assert!((result - expected).abs() < EPSILON);
    }

    #[test]
    fn division_delta_and_zero_divisor() {
        assert_eq!(delta(Operation::PostDiv, 2.0), Some(-0.5));
        assert_eq!(delta(Operation::PreDiv, 0.0), None);
        let result = OperationStack::new()
            .with(Operation::PostDiv, 0.0)
            .apply(50.0, true);
        assert_eq!(result, 50.0);
    }

    #[test]
    fn penalty_weights_follow_square_law() {
        assert_eq!(stacking_penalty(0), 1.0);
        assert!((stacking_penalty(1) - 0.869_119_980_8).abs() < 1e-9);
        assert!((stacking_penalty(2) - EngineConfig::PENALTY_FACTOR.powi(4)).abs() < 1e-15);
    }

    #[test]
    fn penalty_weight_vanishes_for_deep_ranks() {
        let deep = stacking_penalty(50_000);
        assert!((0.0..1e-300).contains(&deep));
        assert!(stacking_penalty(46_341) <= stacking_penalty(46_340));
    }

    #[test]
    fn additive_groups_sum() {
        let result = OperationStack::new()
            .with(Operation::ModAdd, 3.0)
            .with(Operation::ModAdd, 4.0)
            .with(Operation::ModSub, 2.0)
            .apply(10.0, true);
        assert_eq!(result, 15.0);
    }
}
