/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```should_panic
/// # use rnn_q::assert_interval;
/// let value = 2.0;
/// assert_interval!(value, 0.0, 1.0);
/// ```
/// This will panic with the message "Invalid value for \`value\`. Must be in the interval \[0.0, 1.0\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Euclidean norm of a vector
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_norm_functional() {
        assert_eq!(l2_norm(&[]), 0.0);
        assert_eq!(l2_norm(&[0.0; 4]), 0.0);
        assert_eq!(l2_norm(&[3.0, 4.0]), 5.0);
        assert_eq!(l2_norm(&[-1.0, 1.0, -1.0, 1.0]), 2.0);
    }

    #[test]
    fn assert_interval_accepts_bounds() {
        let lo = 0.0;
        let hi = 1.0;
        assert_interval!(lo, 0.0, 1.0);
        assert_interval!(hi, 0.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "Invalid value for `x`")]
    fn assert_interval_rejects_outside() {
        let x = 1.5;
        assert_interval!(x, 0.0, 1.0);
    }
}
