//! # Pin Pile Equilibrium Formulas
//!
//! Closed-form pieces of the pin pile embedment analysis. A pile retains a
//! slide mass above a slip surface at depth `H`; the slide mass drives a
//! resultant thrust `T` (per unit pile width) acting at depth `z̄`. Below the
//! slip surface the intact soil resists with a lateral stress that grows
//! linearly with depth `y` below the slip surface:
//!
//! ```text
//!   σ(y) = σ_ds + σ_avg · y
//! ```
//!
//! The pile rotates about a pivot at depth `d1` below the slip surface.
//! Above the pivot the soil pushes back against the thrust (force `F1`);
//! below it the soil pushes the other way (force `F2`).
//!
//! ```text
//!        ground ─────────────┬──────────
//!                            │  T → at z̄
//!   slip surface ────────────┼────────── y = 0
//!                        F1 ←│
//!                     pivot ─┼─ y = d1
//!                            │→ F2
//!                            ┴ y = D
//! ```
//!
//! ## Notation
//!
//! - `σ_ds` = Lateral stress at the slip surface (psf)
//! - `σ_avg` = Gradient of lateral stress below the slip surface (psf/ft)
//! - `T` = Thrust of the slide mass per unit width (lb/ft)
//! - `arm` = Distance from the thrust to the slip surface, `H − z̄` (ft)
//! - `D` = Trial embedment below the slip surface (ft)

/// Resisting force over the first `depth` feet below the slip surface.
///
/// # Formula
/// F = σ_ds·D + σ_avg·D²/2
#[inline]
pub fn resisting_force(sigma_ds: f64, sigma_avg: f64, depth: f64) -> f64 {
    sigma_ds * depth + sigma_avg * depth.powi(2) / 2.0
}

/// Depth below the slip surface at which the resisting force equals the thrust.
///
/// This is both the shallowest embedment that can carry `T` and the depth
/// of zero shear in the pile.
///
/// # Formula
/// σ_avg·x²/2 + σ_ds·x − T = 0  →  x = (−σ_ds + √(σ_ds² + 2·σ_avg·T)) / σ_avg
#[inline]
pub fn thrust_balance_depth(sigma_ds: f64, sigma_avg: f64, thrust: f64) -> f64 {
    (-sigma_ds + (sigma_ds.powi(2) + 2.0 * sigma_avg * thrust).sqrt()) / sigma_avg
}

/// Pivot depth `d1` from horizontal force equilibrium at trial depth `D`.
///
/// # Formula
/// F1 − F2 = T and F1 + F2 = F(D) give F1 = (T + F(D)) / 2, so
/// σ_avg·d1²/2 + σ_ds·d1 = (T + F(D)) / 2
#[inline]
pub fn pivot_depth(sigma_ds: f64, sigma_avg: f64, thrust: f64, depth: f64) -> f64 {
    let k = thrust + resisting_force(sigma_ds, sigma_avg, depth);
    (-sigma_ds + (sigma_ds.powi(2) + sigma_avg * k).sqrt()) / sigma_avg
}

/// Moment about the thrust line of the soil reaction above the pivot (F1·L1).
pub fn upper_reaction_moment(sigma_ds: f64, sigma_avg: f64, d1: f64, arm: f64) -> f64 {
    sigma_ds * d1 * (arm + d1 / 2.0) + (sigma_avg / 2.0) * d1.powi(2) * (arm + 2.0 * d1 / 3.0)
}

/// Moment about the thrust line of the soil reaction below the pivot (F2·L2).
pub fn lower_reaction_moment(sigma_ds: f64, sigma_avg: f64, d1: f64, depth: f64, arm: f64) -> f64 {
    let below = depth - d1;
    (sigma_ds + sigma_avg * d1) * below * (arm + d1 + below / 2.0)
        + (sigma_avg / 2.0) * below.powi(2) * (arm + d1 + 2.0 * below / 3.0)
}

/// Pile bending moment at depth `x` below the slip surface (lb-ft per ft).
///
/// # Formula
/// M = T·(x + arm) − σ_avg·x³/6 − σ_ds·x²/2
#[inline]
pub fn bending_moment_at(sigma_ds: f64, sigma_avg: f64, thrust: f64, arm: f64, x: f64) -> f64 {
    thrust * (x + arm) - sigma_avg * x.powi(3) / 6.0 - sigma_ds * x.powi(2) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_thrust_balance_depth() {
        let (s, g, t) = (200.0, 150.0, 4000.0);
        let x = thrust_balance_depth(s, g, t);
        assert!(approx_eq(resisting_force(s, g, x), t, 1e-6));
    }

    #[test]
    fn test_pivot_satisfies_force_balance() {
        let (s, g, t, d) = (200.0, 150.0, 4000.0, 9.0);
        let d1 = pivot_depth(s, g, t, d);
        let f1 = resisting_force(s, g, d1);
        let f2 = resisting_force(s, g, d) - f1;
        assert!(approx_eq(f1 - f2, t, 1e-6));
        assert!(d1 > 0.0 && d1 < d);
    }

    #[test]
    fn test_pivot_at_minimum_depth() {
        // At the shallowest embedment the whole pile is above the pivot
        let (s, g, t) = (200.0, 150.0, 4000.0);
        let d_min = thrust_balance_depth(s, g, t);
        let d1 = pivot_depth(s, g, t, d_min);
        assert!(approx_eq(d1, d_min, 1e-9));
        assert!(approx_eq(lower_reaction_moment(s, g, d1, d_min, 1.0), 0.0, 1e-6));
    }

    #[test]
    fn test_lower_moment_dominates_when_deep() {
        let (s, g, t, arm) = (200.0, 150.0, 4000.0, 2.0);
        let d = 60.0;
        let d1 = pivot_depth(s, g, t, d);
        assert!(lower_reaction_moment(s, g, d1, d, arm) > upper_reaction_moment(s, g, d1, arm));
    }

    #[test]
    fn test_moment_is_stationary_at_zero_shear() {
        let (s, g, t, arm) = (200.0, 150.0, 4000.0, 2.0);
        let x = thrust_balance_depth(s, g, t);
        let m = bending_moment_at(s, g, t, arm, x);
        assert!(m >= bending_moment_at(s, g, t, arm, x - 0.01));
        assert!(m >= bending_moment_at(s, g, t, arm, x + 0.01));
    }
}
