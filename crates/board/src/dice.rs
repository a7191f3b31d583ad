//! Two-dice roll distribution.

/// Probability of rolling a total of `n` with two fair six-sided dice.
///
/// Returns `0.0` outside `2..=12`.
pub fn dice_roll_prob(n: usize) -> f64 {
    match n {
        2..=7 => (n - 1) as f64 / 36.0,
        8..=12 => (13 - n) as f64 / 36.0,
        _ => 0.0,
    }
}

/// Probability of rolling the same face on both dice three turns running.
pub const THREE_DOUBLES_PROB: f64 = 1.0 / 216.0;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn probabilities() {
        let expected = [
            (2, 1.0),
            (3, 2.0),
            (4, 3.0),
            (5, 4.0),
            (6, 5.0),
            (7, 6.0),
            (8, 5.0),
            (9, 4.0),
            (10, 3.0),
            (11, 2.0),
            (12, 1.0),
        ];
        for (n, ways) in expected {
            assert_abs_diff_eq!(dice_roll_prob(n), ways / 36.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn out_of_bounds() {
        for n in [0, 1, 13, 20] {
            assert_eq!(dice_roll_prob(n), 0.0);
        }
    }

    #[test]
    fn sums_to_one() {
        let total: f64 = (2..=12).map(dice_roll_prob).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    }
}
