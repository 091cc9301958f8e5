//! # Shaft Section Formulas
//!
//! Stiffness of round steel shafts embedded in soil.
//!
//! ## Notation
//!
//! - `E` = Elastic modulus of the shaft (psi)
//! - `I` = Moment of inertia (in⁴)
//! - `k_h` = Coefficient of horizontal subgrade reaction
//! - `D` = Outside diameter (in)

/// Relative stiffness factor of a shaft on an elastic subgrade
///
/// # Formula
/// R = (E·I / (k_h·D))^¼
#[inline]
pub fn relative_stiffness(e_psi: f64, i_in4: f64, k_h: f64, diameter_in: f64) -> f64 {
    ((e_psi * i_in4) / (k_h * diameter_in)).powf(0.25)
}
