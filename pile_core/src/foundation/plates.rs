//! Helical plate bearing area.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Inches, SqFt, SqIn};
use crate::warnings::DesignWarning;

/// Plates below this diameter give little bearing on large shafts (in)
pub const MIN_EFFECTIVE_PLATE_DIAMETER_IN: f64 = 12.0;

/// Shafts above this diameter trigger the small plate check (in)
pub const LARGE_SHAFT_DIAMETER_IN: f64 = 5.0;

/// Net bearing area of a plate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateArea {
    /// Σ(plate area) − n·(shaft area) (ft²)
    pub net_area_sqft: f64,

    /// Small plate advisory, if any
    pub warnings: Vec<DesignWarning>,
}

/// Compute the net bearing area of helical plates around a shaft.
///
/// # Formula
/// A = Σ π·dᵢ²/4 − n·π·D²/4, converted from in² to ft²
///
/// # Arguments
/// * `shaft_diameter_in` - Shaft outside diameter D
/// * `plate_diameters_in` - Plate diameters dᵢ; each must exceed D
///
/// # Example
/// ```rust
/// use pile_core::foundation::plates::net_bearing_area;
///
/// let area = net_bearing_area(2.875, &[10.0, 12.0, 14.0]).unwrap();
/// assert!(area.net_area_sqft > 2.0);
/// ```
pub fn net_bearing_area(shaft_diameter_in: f64, plate_diameters_in: &[f64]) -> CalcResult<PlateArea> {
    if !(shaft_diameter_in > 0.0) || !shaft_diameter_in.is_finite() {
        return Err(CalcError::invalid_input(
            "shaft_diameter_in",
            shaft_diameter_in.to_string(),
            "Shaft diameter must be positive",
        ));
    }

    if let Some(bad) = plate_diameters_in
        .iter()
        .find(|&&d| !(d > shaft_diameter_in) || !d.is_finite())
    {
        return Err(CalcError::configuration(
            "plate configuration",
            format!(
                "Plate diameter {} in must exceed the {} in shaft diameter",
                bad, shaft_diameter_in
            ),
        ));
    }

    let shaft = SqIn::circle(Inches(shaft_diameter_in));
    let net = plate_diameters_in
        .iter()
        .map(|&d| SqIn::circle(Inches(d)) - shaft)
        .fold(SqIn(0.0), |acc, a| acc + a);
    let net_sqft: SqFt = net.into();

    let mut warnings = Vec::new();
    if shaft_diameter_in > LARGE_SHAFT_DIAMETER_IN {
        let smallest = plate_diameters_in.iter().copied().fold(f64::INFINITY, f64::min);
        if smallest < MIN_EFFECTIVE_PLATE_DIAMETER_IN {
            warnings.push(DesignWarning::SmallPlates {
                shaft_diameter_in,
                smallest_plate_in: smallest,
            });
        }
    }

    Ok(PlateArea {
        net_area_sqft: net_sqft.value(),
        warnings,
    })
}
