//! Trend strength: how well a straight line explains recent closes.

use crate::stats::r_squared;

/// R² of a least-squares line through the last `window` closes, clamped to
/// [0, 1]. 0 when fewer than `window` closes exist or the window is flat.
pub fn trend_strength(closes: &[f64], window: usize) -> f64 {
    if window < 2 || closes.len() < window {
        return 0.0;
    }
    let r2 = r_squared(&closes[closes.len() - window..]);
    if r2.is_nan() {
        0.0
    } else {
        r2.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_line_is_one() {
        let closes: Vec<f64> = (0..30).map(|i| 50.0 + 2.0 * i as f64).collect();
        assert!((trend_strength(&closes, 20) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn flat_is_zero() {
        assert_eq!(trend_strength(&[42.0; 25], 20), 0.0);
    }

    #[test]
    fn too_short_is_zero() {
        assert_eq!(trend_strength(&[1.0, 2.0, 3.0], 20), 0.0);
    }

    #[test]
    fn only_tail_counts() {
        let mut closes: Vec<f64> = vec![1000.0, 1.0, 500.0];
        closes.extend((0..20).map(|i| 10.0 + i as f64));
        assert!((trend_strength(&closes, 20) - 1.0).abs() < 1e-12);
    }
}
