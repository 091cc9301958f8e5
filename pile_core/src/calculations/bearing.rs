//! # Bearing Depth Search
//!
//! Finds the shallowest depth at which a helical pier develops a required
//! axial capacity. Each candidate stratum is sampled on a depth grid and the
//! allowable plate bearing capacity is evaluated at every point:
//!
//! ```text
//! Q(d) = (A·c·Nc + A·Nq·γ·d) / FS        Nc = 9
//! ```
//!
//! The search starts at the first suitable layer (see
//! [`SoilProfile::first_suitable_layer`]) and moves down layer by layer,
//! skipping hazard layers. Within a layer the reported depth is the
//! shallowest grid point from which the capacity stays at or above the
//! requirement for the rest of the layer.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::calculations::bearing::find_bearing_depth;
//! use pile_core::foundation::FoundationElement;
//! use pile_core::settings::DesignSettings;
//! use pile_core::soil::{SoilProfile, SoilProperties};
//!
//! let mut profile = SoilProfile::new();
//! profile.insert(SoilProperties::new(120.0, 34.0, 0.0), 0.0).unwrap();
//! profile.terminate(30.0).unwrap();
//!
//! let pier = FoundationElement::helical_pier("HP-1", 2.875, vec![10.0, 12.0, 14.0]).unwrap();
//! let result = find_bearing_depth(&profile, &pier, 20_000.0, 2.0, &DesignSettings::default()).unwrap();
//! assert!(result.bearing.is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::foundation::{torque_estimate, FoundationElement};
use crate::settings::{DesignSettings, COHESIVE_BEARING_FACTOR};
use crate::soil::{SoilLayer, SoilProfile};
use crate::warnings::DesignWarning;

/// Depth at which the requirement is met
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingPoint {
    /// Depth below ground surface (ft)
    pub depth_ft: f64,

    /// Index of the bearing stratum
    pub layer_index: usize,

    /// Allowable capacity at this depth (lb)
    pub capacity_lb: f64,
}

/// Outcome of a bearing depth search.
///
/// A search that finds no depth is not an error: `bearing` is `None` and
/// the warnings explain why. Use [`into_result`](Self::into_result) to
/// treat that case as a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// Capacity the element must develop (lb)
    pub required_capacity_lb: f64,

    /// Safety factor applied to ultimate capacity
    pub safety_factor: f64,

    /// Shallowest depth meeting the requirement, if any
    pub bearing: Option<BearingPoint>,

    /// Installation torque to verify the required capacity in the field (ft-lb)
    pub torque_estimate_ftlb: Option<f64>,

    /// Deepest depth sampled (ft)
    pub searched_to_ft: f64,

    /// Hazards passed over, non-monotonic capacity, or shortfall
    pub warnings: Vec<DesignWarning>,
}

impl CapacityResult {
    /// Whether a bearing depth was found
    pub fn passes(&self) -> bool {
        self.bearing.is_some()
    }

    /// The bearing point, or a `NoSuitableBearingMedium` error
    pub fn into_result(self) -> CalcResult<BearingPoint> {
        match self.bearing {
            Some(point) => Ok(point),
            None => Err(CalcError::no_suitable_bearing(
                self.warnings
                    .last()
                    .map(|w| w.to_string())
                    .unwrap_or_else(|| "No depth meets the required capacity".to_string()),
            )),
        }
    }
}

/// Allowable plate bearing capacity at a depth within a stratum (lb)
#[inline]
pub fn allowable_capacity(area_sqft: f64, layer: &SoilLayer, depth_ft: f64, safety_factor: f64) -> f64 {
    let cohesive = area_sqft * layer.cohesion() * COHESIVE_BEARING_FACTOR;
    let overburden = area_sqft * layer.nq() * layer.gamma() * depth_ft;
    (cohesive + overburden) / safety_factor
}

/// Find the shallowest depth at which a helical pier carries a required capacity.
///
/// # Arguments
/// * `profile` - Soil profile to search
/// * `element` - Helical pier; its net plate area is the bearing area
/// * `required_capacity_lb` - Allowable capacity the pier must develop
/// * `safety_factor` - Applied to ultimate capacity (typically 2.0)
/// * `settings` - Grid step and open-layer thickness
pub fn find_bearing_depth(
    profile: &SoilProfile,
    element: &FoundationElement,
    required_capacity_lb: f64,
    safety_factor: f64,
    settings: &DesignSettings,
) -> CalcResult<CapacityResult> {
    if !element.is_helical_pier() || !(element.bearing_area_sqft > 0.0) {
        return Err(CalcError::configuration(
            "bearing area",
            format!("'{}' has no plate bearing area", element.label),
        ));
    }
    search_bearing_depth(profile, element.bearing_area_sqft, required_capacity_lb, safety_factor, settings)
}

/// Bearing depth search for a known net bearing area (ft²).
pub fn search_bearing_depth(
    profile: &SoilProfile,
    area_sqft: f64,
    required_capacity_lb: f64,
    safety_factor: f64,
    settings: &DesignSettings,
) -> CalcResult<CapacityResult> {
    if !(area_sqft > 0.0) || !area_sqft.is_finite() {
        return Err(CalcError::configuration(
            "bearing area",
            format!("Net bearing area must be positive, got {} ft²", area_sqft),
        ));
    }
    if !(required_capacity_lb > 0.0) || !required_capacity_lb.is_finite() {
        return Err(CalcError::invalid_input(
            "required_capacity_lb",
            required_capacity_lb.to_string(),
            "Required capacity must be positive",
        ));
    }
    if !(safety_factor > 0.0) || !safety_factor.is_finite() {
        return Err(CalcError::invalid_input(
            "safety_factor",
            safety_factor.to_string(),
            "Safety factor must be positive",
        ));
    }
    settings.validate()?;

    let scan = profile.first_suitable_layer()?;
    let mut warnings = scan.warnings;
    let mut result = CapacityResult {
        required_capacity_lb,
        safety_factor,
        bearing: None,
        torque_estimate_ftlb: None,
        searched_to_ft: 0.0,
        warnings: Vec::new(),
    };

    let Some(start) = scan.first_suitable else {
        result.warnings = warnings;
        return Ok(result);
    };

    for (index, layer) in profile.layers().enumerate().skip(start) {
        if layer.is_hazard() {
            warnings.push(DesignWarning::HazardLayer {
                layer_index: index,
                top_depth_ft: layer.top_depth_ft,
                bottom_depth_ft: layer.bottom_depth_ft(),
            });
            continue;
        }

        let depths = depth_grid(layer, settings)?;
        let capacities: Vec<f64> = depths
            .iter()
            .map(|&d| allowable_capacity(area_sqft, layer, d, safety_factor))
            .collect();
        if let Some(&last) = depths.last() {
            result.searched_to_ft = last;
        }

        if let Some((i, monotonic)) = bearing_index(&capacities, required_capacity_lb) {
            if !monotonic {
                warnings.push(DesignWarning::NonMonotonicCapacity {
                    layer_index: index,
                    depth_ft: depths[i],
                });
            }
            result.bearing = Some(BearingPoint {
                depth_ft: depths[i],
                layer_index: index,
                capacity_lb: capacities[i],
            });
            result.torque_estimate_ftlb = Some(torque_estimate(required_capacity_lb));
            result.warnings = warnings;
            return Ok(result);
        }
    }

    warnings.push(DesignWarning::CapacityNotAchievable {
        required_capacity_lb,
        deepest_depth_ft: result.searched_to_ft,
    });
    result.warnings = warnings;
    Ok(result)
}

/// Most grid points sampled in one stratum
pub const MAX_GRID_POINTS: usize = 100_000;

/// Grid from the top of a stratum down to (excluding) its bottom.
///
/// The open-ended deepest layer is sampled over the terminal thickness.
/// Every layer yields at least its top depth.
fn depth_grid(layer: &SoilLayer, settings: &DesignSettings) -> CalcResult<Vec<f64>> {
    let top = layer.top_depth_ft;
    let thickness = layer.thickness_ft.unwrap_or(settings.terminal_layer_thickness_ft);
    let step = settings.bearing_grid_step_ft;
    let points = ((thickness / step) - 1e-9).ceil().max(1.0);
    if !(points <= MAX_GRID_POINTS as f64) {
        return Err(CalcError::configuration(
            "bearing grid",
            format!(
                "{:.1} ft of stratum at {} ft spacing exceeds {} grid points",
                thickness, step, MAX_GRID_POINTS
            ),
        ));
    }
    Ok((0..points as usize).map(|i| top + i as f64 * step).collect())
}

/// Index of the reported bearing point, and whether the capacity stays met
/// from that point to the bottom of the layer.
fn bearing_index(capacities: &[f64], required: f64) -> Option<(usize, bool)> {
    let first_met = capacities.iter().position(|&q| q >= required)?;
    match capacities.iter().rposition(|&q| q < required) {
        None => Some((first_met, true)),
        Some(last_short) if last_short + 1 < capacities.len() => Some((last_short + 1, true)),
        Some(_) => Some((first_met, false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::{SoilProperties, UscsSymbol};

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn sand_profile(bottom_ft: f64) -> SoilProfile {
        let mut profile = SoilProfile::new();
        profile.insert(SoilProperties::new(115.0, 30.0, 0.0), 0.0).unwrap();
        profile.terminate(bottom_ft).unwrap();
        profile
    }

    #[test]
    fn test_bearing_depth_in_uniform_sand() {
        // Q(d) = 1.2 × 14.155 × 115 × d / 2 ≈ 976.7·d, so 20 000 lb needs d ≥ 20.48 ft
        let settings = DesignSettings::default();
        let result = search_bearing_depth(&sand_profile(30.0), 1.2, 20_000.0, 2.0, &settings).unwrap();
        let point = result.bearing.unwrap();
        assert!(approx_eq(point.depth_ft, 20.5, 1e-9));
        assert_eq!(point.layer_index, 0);
        assert!(point.capacity_lb >= 20_000.0);
        assert!(result.warnings.is_empty());
        // Torque to verify the required capacity, not the factored one
        assert!(approx_eq(result.torque_estimate_ftlb.unwrap(), 20_000.0 / 9.0, 1e-9));
    }

    #[test]
    fn test_requirement_out_of_reach() {
        // The same sand cut off at 20 ft never reaches 20 000 lb
        let settings = DesignSettings::default();
        let result = search_bearing_depth(&sand_profile(20.0), 1.2, 20_000.0, 2.0, &settings).unwrap();
        assert!(!result.passes());
        assert_eq!(result.torque_estimate_ftlb, None);
        assert_eq!(result.warnings.last().unwrap().code(), "CAPACITY_NOT_ACHIEVABLE");
        assert!(approx_eq(result.searched_to_ft, 19.5, 1e-9));

        let err = result.into_result().unwrap_err();
        assert_eq!(err.error_code(), "NO_SUITABLE_BEARING_MEDIUM");
    }

    #[test]
    fn test_cohesive_term() {
        let mut profile = SoilProfile::new();
        profile.insert(SoilProperties::new(110.0, 0.0, 1000.0).with_uscs(UscsSymbol::CL), 0.0).unwrap();
        let layer = profile.layer(0).unwrap();
        // φ = 0 still carries Nq = 0.3359
        let q = allowable_capacity(1.0, layer, 10.0, 2.0);
        let expected = (9000.0 + 0.3359 * 110.0 * 10.0) / 2.0;
        assert!(approx_eq(q, expected, 1e-9));
    }

    #[test]
    fn test_hazard_layers_skipped() {
        let mut profile = SoilProfile::new();
        profile.insert(SoilProperties::new(90.0, 5.0, 100.0).with_uscs(UscsSymbol::OH), 0.0).unwrap();
        profile.insert(SoilProperties::new(120.0, 36.0, 0.0), 8.0).unwrap();
        profile.terminate(40.0).unwrap();

        let result = search_bearing_depth(&profile, 1.5, 10_000.0, 2.0, &DesignSettings::default()).unwrap();
        let point = result.bearing.unwrap();
        assert_eq!(point.layer_index, 1);
        assert!(point.depth_ft >= 8.0);
        assert_eq!(result.warnings[0].code(), "HAZARD_LAYER");
    }

    #[test]
    fn test_all_hazards() {
        let mut profile = SoilProfile::new();
        profile
            .insert(SoilProperties::new(70.0, 0.0, 50.0).with_uscs(UscsSymbol::PT), 0.0)
            .unwrap();
        let result = search_bearing_depth(&profile, 1.5, 10_000.0, 2.0, &DesignSettings::default()).unwrap();
        assert!(result.bearing.is_none());
        assert_eq!(result.warnings, vec![DesignWarning::NoSuitableBearingMedium]);
    }

    #[test]
    fn test_open_tail_uses_terminal_thickness() {
        let mut profile = SoilProfile::new();
        profile.insert(SoilProperties::new(115.0, 30.0, 0.0), 0.0).unwrap();
        let settings = DesignSettings::default();
        let result = search_bearing_depth(&profile, 1.2, 1_000_000.0, 2.0, &settings).unwrap();
        assert!(approx_eq(result.searched_to_ft, 9.5, 1e-9));
    }

    #[test]
    fn test_capacity_met_at_layer_top() {
        let mut profile = SoilProfile::new();
        profile.insert(SoilProperties::new(110.0, 20.0, 0.0), 0.0).unwrap();
        profile.insert(SoilProperties::new(125.0, 40.0, 0.0), 5.0).unwrap();
        profile.terminate(15.0).unwrap();
        let result = search_bearing_depth(&profile, 1.0, 5_000.0, 2.0, &DesignSettings::default()).unwrap();
        let point = result.bearing.unwrap();
        assert_eq!(point.layer_index, 1);
        assert!(approx_eq(point.depth_ft, 5.0, 1e-12));
    }

    #[test]
    fn test_bearing_index_policy() {
        assert_eq!(bearing_index(&[1.0, 2.0, 3.0], 5.0), None);
        assert_eq!(bearing_index(&[6.0, 7.0], 5.0), Some((0, true)));
        assert_eq!(bearing_index(&[1.0, 6.0, 4.0, 6.0, 7.0], 5.0), Some((3, true)));
        // Met, then lost at the bottom of the layer
        assert_eq!(bearing_index(&[1.0, 6.0, 4.0], 5.0), Some((1, false)));
    }

    #[test]
    fn test_depth_grid() {
        let settings = DesignSettings::default();
        let profile = sand_profile(2.0);
        let grid = depth_grid(profile.layer(0).unwrap(), &settings).unwrap();
        assert_eq!(grid, vec![0.0, 0.5, 1.0, 1.5]);

        // A layer thinner than one step is still sampled at its top
        let mut thin = SoilProfile::new();
        thin.insert(SoilProperties::new(115.0, 30.0, 0.0), 0.0).unwrap();
        thin.terminate(0.2).unwrap();
        assert_eq!(depth_grid(thin.layer(0).unwrap(), &settings).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_absurd_boring_depth_rejected() {
        let settings = DesignSettings::default();
        let err = search_bearing_depth(&sand_profile(1e12), 1.2, 20_000.0, 2.0, &settings).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");

        // 50 000 ft at 0.5 ft spacing is the largest grid allowed
        let grid = depth_grid(sand_profile(50_000.0).layer(0).unwrap(), &settings).unwrap();
        assert_eq!(grid.len(), MAX_GRID_POINTS);
    }

    #[test]
    fn test_pin_pile_has_no_bearing_area() {
        let pile = FoundationElement::pin_pile("PP-1", 3.5, 3.0).unwrap();
        let err = find_bearing_depth(&sand_profile(30.0), &pile, 10_000.0, 2.0, &DesignSettings::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_invalid_requirement() {
        let settings = DesignSettings::default();
        assert!(search_bearing_depth(&sand_profile(30.0), 1.2, 0.0, 2.0, &settings).is_err());
        assert!(search_bearing_depth(&sand_profile(30.0), 1.2, 1000.0, 0.0, &settings).is_err());
        assert_eq!(
            search_bearing_depth(&SoilProfile::new(), 1.2, 1000.0, 2.0, &settings),
            Err(CalcError::EmptyProfile)
        );
    }
}
