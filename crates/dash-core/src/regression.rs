// File: crates/dash-core/src/regression.rs
// Summary: Ordinary least squares for one predictor (slope, intercept, r-squared).

/// Result of a least-squares fit. Fields are non-finite when the input is degenerate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl Fit {
    pub const NAN: Self = Self { slope: f64::NAN, intercept: f64::NAN, r_squared: f64::NAN };

    /// True when every coefficient is a finite number, i.e. the trend is worth drawing.
    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite() && self.r_squared.is_finite()
    }

    /// Pearson correlation magnitude, `sqrt(r_squared)`.
    pub fn correlation(&self) -> f64 {
        self.r_squared.sqrt()
    }

    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `y = slope * x + intercept` over index-paired series.
///
/// Preconditions: equal lengths, at least two points and non-zero variance in both
/// series. Violations do not panic; they yield NaN or infinite coefficients which the
/// caller should treat as "no meaningful trend".
pub fn fit(x_series: &[f64], y_series: &[f64]) -> Fit {
    if x_series.len() != y_series.len() || x_series.is_empty() {
        log::debug!(
            "regression input unusable (x: {}, y: {} points)",
            x_series.len(),
            y_series.len()
        );
        return Fit::NAN;
    }

    let n = x_series.len() as f64;
    let x_bar = x_series.iter().sum::<f64>() / n;
    let y_bar = y_series.iter().sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (&x, &y) in x_series.iter().zip(y_series) {
        let dx = x - x_bar;
        let dy = y - y_bar;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    let slope = ss_xy / ss_xx;
    Fit {
        slope,
        intercept: y_bar - slope * x_bar,
        r_squared: (ss_xy * ss_xy) / (ss_xx * ss_yy),
    }
}
