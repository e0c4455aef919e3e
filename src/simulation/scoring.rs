// src/simulation/scoring.rs

//! Deadline-proximity scoring shared by every optimizer.
//!
//! An order finished at turn `t` is worth `((deadline - t) / deadline) * 100`.
//! Unfinished orders are worth nothing.

use crate::simulation::config::LateCompletionPolicy;

/// Score of one order completed at `turn`.
pub fn order_score(deadline: u32, turn: u32, policy: LateCompletionPolicy) -> f64 {
    if deadline == 0 {
        return 0.0;
    }
    let portion = (deadline as f64 - turn as f64) / deadline as f64;
    let score = portion * 100.0;
    match policy {
        LateCompletionPolicy::Penalize => score,
        LateCompletionPolicy::Clamp => score.max(0.0),
    }
}

/// Sum of `order_score` over completed orders.
pub fn schedule_score(
    deadline: u32,
    completions: &[Option<u32>],
    policy: LateCompletionPolicy,
) -> f64 {
    completions
        .iter()
        .flatten()
        .map(|&turn| order_score(deadline, turn, policy))
        .sum()
}

/// Rounded-up per-order score used by the genetic fitness. Completions
/// outside `[0, deadline]` are ignored.
pub fn ceiled_order_score(deadline: u32, turn: u32) -> u32 {
    if deadline == 0 || turn > deadline {
        return 0;
    }
    let portion = (deadline - turn) as f64 / deadline as f64;
    (portion * 100.0).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_completion_scores_higher() {
        let deadline = 160;
        let mut previous = f64::INFINITY;
        for turn in 0..=deadline {
            let score = order_score(deadline, turn, LateCompletionPolicy::Penalize);
            assert!(score < previous);
            previous = score;
        }
        assert_eq!(order_score(deadline, 0, LateCompletionPolicy::Penalize), 100.0);
        assert_eq!(order_score(deadline, deadline, LateCompletionPolicy::Penalize), 0.0);
    }

    #[test]
    fn late_policy_controls_negative_scores() {
        assert!(order_score(100, 150, LateCompletionPolicy::Penalize) < 0.0);
        assert_eq!(order_score(100, 150, LateCompletionPolicy::Clamp), 0.0);
    }

    #[test]
    fn schedule_score_skips_unfinished_orders() {
        let completions = [Some(10), None, Some(60)];
        let total = schedule_score(100, &completions, LateCompletionPolicy::Penalize);
        assert!((total - 130.0).abs() < 1e-9);
    }

    #[test]
    fn ceiled_score_rounds_up_and_ignores_late() {
        assert_eq!(ceiled_order_score(3, 1), 67);
        assert_eq!(ceiled_order_score(100, 100), 0);
        assert_eq!(ceiled_order_score(100, 101), 0);
        assert_eq!(ceiled_order_score(0, 0), 0);
    }
}
