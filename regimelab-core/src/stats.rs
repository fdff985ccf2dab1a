//! Small descriptive-statistics helpers shared by the regime measures.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with `ddof` degrees of freedom removed (0 = population,
/// 1 = sample). NaN when there are not enough values.
pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    if values.len() <= ddof {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - ddof) as f64).sqrt()
}

/// Least-squares line through (x, y): `(slope, intercept)`.
///
/// `None` when the inputs differ in length, hold fewer than two points, or
/// all x are equal.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let (mx, my) = (mean(x), mean(y));
    let sxx: f64 = x.iter().map(|a| (a - mx) * (a - mx)).sum();
    if sxx == 0.0 || !sxx.is_finite() {
        return None;
    }
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}

/// Coefficient of determination of a straight-line fit of `y` against its
/// index. 0 when `y` has no variance.
pub fn r_squared(y: &[f64]) -> f64 {
    let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
    let Some((slope, intercept)) = linear_fit(&x, y) else {
        return 0.0;
    };
    let my = mean(y);
    let ss_tot: f64 = y.iter().map(|v| (v - my) * (v - my)).sum();
    if ss_tot == 0.0 || !ss_tot.is_finite() {
        return 0.0;
    }
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| {
            let e = yi - (slope * xi + intercept);
            e * e
        })
        .sum();
    1.0 - ss_res / ss_tot
}
