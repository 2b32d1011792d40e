// File: crates/dash-core/src/format.rs
// Summary: Number formatting for axes and tooltips.

/// Integer with comma thousands separators, e.g. `1234567.4` -> `1,234,567`.
pub fn thousands(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dollars expressed in thousands, e.g. `52_400` -> `$52k`.
pub fn currency(v: f64) -> String {
    format!("${}k", thousands(v / 1000.0))
}

/// Rate already expressed in percent, e.g. `5.63` -> `5.6%`.
pub fn percent(v: f64) -> String {
    format!("{v:.1}%")
}

/// Plain number without a trailing `.0`.
pub fn identity(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}
