//! # Earth Pressure and Bearing Coefficients
//!
//! Empirical coefficient functions of friction angle φ (degrees).
//!
//! ## Notation
//!
//! - `φ` = Soil friction angle (degrees)
//! - `x` = Normalized depth z/b (depth over pile width)
//! - `Nq` = Bearing capacity factor for the overburden term
//! - `Kp` = Rankine passive earth pressure coefficient
//! - `Kq` = Lateral resistance coefficient, overburden component
//! - `Kc` = Lateral resistance coefficient, cohesion component
//!
//! ## Bands
//!
//! `Kq` and `Kc` are curve fits over ten 5° friction-angle bands centered on
//! 5°, 10°, ... 45°. The band boundaries are exclusive below and inclusive
//! above: φ = 42.5 falls in the 37.5–42.5° band. Below 2.5° and above 47.5°
//! the functions take their bounding values. Both functions shift the
//! normalized depth by +0.1 before evaluation so the logarithmic fits stay
//! finite at the ground surface.
//!
//! The fits are evaluated as written at any depth. The quadratic bands turn
//! over past roughly z/b = 20 and go negative much deeper, so callers that
//! need a resistance gradient take it from the coefficients at a single
//! normalized depth rather than differencing the fit over a long interval.

/// Shift applied to the normalized depth before evaluating Kq/Kc
pub const NORMALIZED_DEPTH_OFFSET: f64 = 0.1;

#[inline]
fn shifted_depth(normalized_depth: f64) -> f64 {
    normalized_depth + NORMALIZED_DEPTH_OFFSET
}

/// Bearing capacity factor Nq = 0.3359·e^(0.1247·φ)
///
/// # Arguments
/// * `phi_deg` - Friction angle (degrees)
///
/// # Example
/// ```rust
/// use pile_core::equations::coefficients::bearing_factor_nq;
///
/// let nq = bearing_factor_nq(30.0);
/// assert!((nq - 14.16).abs() < 0.01);
/// ```
#[inline]
pub fn bearing_factor_nq(phi_deg: f64) -> f64 {
    0.3359 * (0.1247 * phi_deg).exp()
}

/// Rankine passive pressure coefficient Kp = (1 + sin φ) / (1 − sin φ)
///
/// # Arguments
/// * `phi_deg` - Friction angle (degrees), must be below 90
#[inline]
pub fn passive_coefficient_kp(phi_deg: f64) -> f64 {
    let s = phi_deg.to_radians().sin();
    (1.0 + s) / (1.0 - s)
}

/// Overburden lateral resistance coefficient Kq(φ, z/b)
///
/// # Arguments
/// * `phi_deg` - Friction angle (degrees)
/// * `normalized_depth` - Depth divided by pile width
pub fn lateral_coefficient_kq(phi_deg: f64, normalized_depth: f64) -> f64 {
    let x = shifted_depth(normalized_depth);
    if phi_deg > 47.5 {
        222.0
    } else if phi_deg > 42.5 {
        -0.0298 * x.powi(2) + 3.3082 * x + 18.456
    } else if phi_deg > 37.5 {
        -0.0305 * x.powi(2) + 1.8933 * x + 11.695
    } else if phi_deg > 32.5 {
        -0.0263 * x.powi(2) + 1.2454 * x + 7.997
    } else if phi_deg > 27.5 {
        -0.0215 * x.powi(2) + 0.8025 * x + 5.3649
    } else if phi_deg > 22.5 {
        0.001 * x.powi(3) - 0.039 * x.powi(2) + 0.6159 * x + 3.7461
    } else if phi_deg > 17.5 {
        0.0005 * x.powi(3) - 0.0216 * x.powi(2) + 0.3756 * x + 2.4859
    } else if phi_deg > 12.5 {
        0.0004 * x.powi(3) - 0.0174 * x.powi(2) + 0.2452 * x + 1.6662
    } else if phi_deg > 7.5 {
        0.0002 * x.powi(3) - 0.0087 * x.powi(2) + 0.1264 * x + 1.0113
    } else if phi_deg > 2.5 {
        -0.0008 * x.powi(2) + 0.0279 * x + 0.4913
    } else {
        0.0
    }
}

/// Cohesion lateral resistance coefficient Kc(φ, z/b)
///
/// # Arguments
/// * `phi_deg` - Friction angle (degrees)
/// * `normalized_depth` - Depth divided by pile width
pub fn lateral_coefficient_kc(phi_deg: f64, normalized_depth: f64) -> f64 {
    let x = shifted_depth(normalized_depth);
    if phi_deg > 47.5 {
        759.0
    } else if phi_deg > 42.5 {
        -0.5208 * x.powi(2) + 27.815 * x + 16.123
    } else if phi_deg > 37.5 {
        -0.38 * x.powi(2) + 15.569 * x + 17.044
    } else if phi_deg > 32.5 {
        0.0114 * x.powi(3) - 0.5662 * x.powi(2) + 11.083 * x + 11.353
    } else if phi_deg > 27.5 {
        0.014 * x.powi(3) - 0.5459 * x.powi(2) + 7.7909 * x + 8.6346
    } else if phi_deg > 22.5 {
        7.0512 * x.ln() + 13.073
    } else if phi_deg > 17.5 {
        4.4885 * x.ln() + 10.248
    } else if phi_deg > 12.5 {
        3.0067 * x.ln() + 8.2786
    } else if phi_deg > 7.5 {
        1.9716 * x.ln() + 7.1678
    } else if phi_deg > 2.5 {
        1.5053 * x.ln() + 5.7476
    } else {
        0.0019 * x.powi(3) - 0.073 * x.powi(2) + 0.9069 * x + 4.0468
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_nq_at_thirty_degrees() {
        // 0.3359 * e^(3.741) = 14.155
        assert!(approx_eq(bearing_factor_nq(30.0), 14.155, 0.01));
    }

    #[test]
    fn test_nq_strictly_increasing() {
        let mut prev = bearing_factor_nq(0.1);
        for i in 1..=500 {
            let phi = 0.1 + i as f64 * 0.1;
            let nq = bearing_factor_nq(phi);
            assert!(nq > prev, "Nq not increasing at phi = {}", phi);
            prev = nq;
        }
    }

    #[test]
    fn test_kp_values() {
        assert!(approx_eq(passive_coefficient_kp(0.0), 1.0, 1e-12));
        assert!(approx_eq(passive_coefficient_kp(30.0), 3.0, 1e-9));
    }

    #[test]
    fn test_forty_degree_band() {
        // x = 5 + 0.1 = 5.1
        let x: f64 = 5.1;
        let kq_expected = -0.0305 * x * x + 1.8933 * x + 11.695;
        let kc_expected = -0.38 * x * x + 15.569 * x + 17.044;
        assert!(approx_eq(lateral_coefficient_kq(40.0, 5.0), kq_expected, 1e-12));
        assert!(approx_eq(lateral_coefficient_kc(40.0, 5.0), kc_expected, 1e-12));

        // Neighbouring bands give different values
        assert!(!approx_eq(lateral_coefficient_kq(45.0, 5.0), kq_expected, 0.1));
        assert!(!approx_eq(lateral_coefficient_kq(35.0, 5.0), kq_expected, 0.1));
        assert!(!approx_eq(lateral_coefficient_kc(45.0, 5.0), kc_expected, 0.1));
        assert!(!approx_eq(lateral_coefficient_kc(35.0, 5.0), kc_expected, 0.1));
    }

    #[test]
    fn test_band_boundaries() {
        // 42.5 belongs to the 37.5-42.5 band, 42.6 to the next one up
        assert_eq!(lateral_coefficient_kq(42.5, 2.0), lateral_coefficient_kq(40.0, 2.0));
        assert_ne!(lateral_coefficient_kq(42.6, 2.0), lateral_coefficient_kq(40.0, 2.0));
    }

    #[test]
    fn test_bounding_cases() {
        assert_eq!(lateral_coefficient_kq(50.0, 3.0), 222.0);
        assert_eq!(lateral_coefficient_kc(50.0, 3.0), 759.0);
        assert_eq!(lateral_coefficient_kq(0.0, 3.0), 0.0);

        // Undrained clay (φ = 0) still mobilizes cohesion
        let x: f64 = 3.1;
        let kc = 0.0019 * x.powi(3) - 0.073 * x.powi(2) + 0.9069 * x + 4.0468;
        assert!(approx_eq(lateral_coefficient_kc(0.0, 3.0), kc, 1e-12));
    }

    #[test]
    fn test_deep_points_use_band_fit() {
        // z/b = 34 on a 3.5 in pile is about 10 ft down
        let x: f64 = 34.1;
        let kq = -0.0215 * x.powi(2) + 0.8025 * x + 5.3649;
        assert!(approx_eq(lateral_coefficient_kq(30.0, 34.0), kq, 1e-12));
        assert!(approx_eq(kq, 7.73, 0.01));

        let x: f64 = 45.1;
        let kc = -0.38 * x.powi(2) + 15.569 * x + 17.044;
        assert!(approx_eq(lateral_coefficient_kc(40.0, 45.0), kc, 1e-12));
        assert_ne!(lateral_coefficient_kq(35.0, 60.0), lateral_coefficient_kq(35.0, 20.0));
    }

    #[test]
    fn test_log_fit_finite_at_surface() {
        let kc = lateral_coefficient_kc(20.0, 0.0);
        assert!(kc.is_finite());
        assert!(approx_eq(kc, 4.4885 * 0.1_f64.ln() + 10.248, 1e-12));
    }
}
