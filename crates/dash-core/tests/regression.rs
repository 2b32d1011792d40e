// File: crates/dash-core/tests/regression.rs
// Purpose: Least-squares coefficients on exact and degenerate inputs.

use dash_core::fit;

#[test]
fn exact_line_has_unit_r_squared() {
    let f = fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
    assert!((f.slope - 2.0).abs() < 1e-12);
    assert!(f.intercept.abs() < 1e-12);
    assert!((f.r_squared - 1.0).abs() < 1e-12);
    assert!((f.predict(10.0) - 20.0).abs() < 1e-9);
}

#[test]
fn noisy_fit_matches_hand_computation() {
    let xs = [1.0, 2.0, 3.0];
    let ys = [1.0, 3.0, 2.0];
    let f = fit(&xs, &ys);
    assert!((f.slope - 0.5).abs() < 1e-12);
    assert!((f.intercept - 1.0).abs() < 1e-12);
    // ss_xy = 1, ss_xx = 2, ss_yy = 2 -> r^2 = 1 / 4
    assert!((f.r_squared - 0.25).abs() < 1e-12);
    assert!((f.correlation() - 0.5).abs() < 1e-12);
}

#[test]
fn constant_x_is_not_finite() {
    let f = fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]);
    assert!(!f.is_finite());
}

#[test]
fn mismatched_or_empty_input_is_not_finite() {
    assert!(!fit(&[], &[]).is_finite());
    assert!(!fit(&[1.0, 2.0], &[1.0]).is_finite());
}
