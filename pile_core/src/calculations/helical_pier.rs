//! # Helical Pier Design
//!
//! Complete design check of one helical pier against a site profile:
//!
//! - bearing depth search for the required capacity
//! - passive lateral capacity of the bearing stratum
//! - buckling check of every hazard layer the shaft passes through
//!
//! ## Example
//!
//! ```rust
//! use pile_core::calculations::helical_pier::{design_helical_pier, CapacityDemand, HelicalPierInput};
//! use pile_core::foundation::{ElementDefinition, ElementKind, StructuralSpecs};
//! use pile_core::settings::DesignSettings;
//! use pile_core::soil::{SoilProfile, SoilProperties};
//!
//! let mut profile = SoilProfile::new();
//! profile.insert(SoilProperties::new(120.0, 34.0, 0.0), 0.0).unwrap();
//! profile.terminate(30.0).unwrap();
//!
//! let input = HelicalPierInput {
//!     element: ElementDefinition {
//!         label: "HP-1".to_string(),
//!         shaft_diameter_in: 2.875,
//!         kind: ElementKind::HelicalPier { plate_diameters_in: vec![10.0, 12.0, 14.0] },
//!         structural_specs: StructuralSpecs::new(),
//!     },
//!     demand: CapacityDemand::PerPier { capacity_lb: 20_000.0 },
//!     safety_factor: None,
//!     batter_angle_deg: None,
//! };
//!
//! let design = design_helical_pier(&profile, &input, &DesignSettings::default()).unwrap();
//! assert!(design.capacity.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::foundation::{required_pier_capacity, ElementDefinition, FoundationElement};
use crate::settings::DesignSettings;
use crate::soil::SoilProfile;
use crate::warnings::DesignWarning;

use super::bearing::{find_bearing_depth, CapacityResult};
use super::lateral::{buckling_check, lateral_capacity, BucklingCheck, LateralCapacity};

/// Axial demand on a pier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CapacityDemand {
    /// Capacity each pier must carry (lb)
    PerPier { capacity_lb: f64 },
    /// Design load shared by a group of identical piers
    GroupLoad { load_lb: f64, piers_in_group: u32 },
}

impl CapacityDemand {
    /// Capacity required of one pier (lb)
    pub fn required_capacity(&self, safety_factor: f64) -> CalcResult<f64> {
        match *self {
            CapacityDemand::PerPier { capacity_lb } => Ok(capacity_lb),
            CapacityDemand::GroupLoad { load_lb, piers_in_group } => {
                required_pier_capacity(load_lb, safety_factor, piers_in_group)
            }
        }
    }
}

/// Input parameters for a helical pier design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "element": {
///     "label": "HP-1",
///     "shaft_diameter_in": 2.875,
///     "kind": { "type": "HelicalPier", "plate_diameters_in": [10.0, 12.0, 14.0] }
///   },
///   "demand": { "type": "PerPier", "capacity_lb": 20000.0 },
///   "safety_factor": 2.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelicalPierInput {
    pub element: ElementDefinition,

    pub demand: CapacityDemand,

    /// Overrides the project default safety factor
    #[serde(default)]
    pub safety_factor: Option<f64>,

    /// Overrides the project default batter angle (degrees)
    #[serde(default)]
    pub batter_angle_deg: Option<f64>,
}

impl HelicalPierInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if let Some(fs) = self.safety_factor {
            if !(fs > 0.0) || !fs.is_finite() {
                return Err(CalcError::invalid_input(
                    "safety_factor",
                    fs.to_string(),
                    "Safety factor must be positive",
                ));
            }
        }
        if let CapacityDemand::GroupLoad { load_lb, .. } = self.demand {
            if !(load_lb > 0.0) || !load_lb.is_finite() {
                return Err(CalcError::invalid_input(
                    "load_lb",
                    load_lb.to_string(),
                    "Design load must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Results of a helical pier design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelicalPierDesign {
    /// The element as built, with resolved area and structural capacity
    pub element: FoundationElement,

    /// Bearing depth search
    pub capacity: CapacityResult,

    /// Lateral capacity of the bearing stratum, when a bearing depth was found
    pub bearing_lateral: Option<LateralCapacity>,

    /// Buckling checks of hazard layers above the bearing depth
    pub buckling_checks: Vec<BucklingCheck>,

    /// Every warning from the design, in the order raised
    pub warnings: Vec<DesignWarning>,
}

impl HelicalPierDesign {
    /// Bearing found and no buckling risk
    pub fn passes(&self) -> bool {
        self.capacity.passes() && self.buckling_checks.iter().all(|c| c.passes())
    }
}

/// Design a helical pier against a profile.
pub fn design_helical_pier(
    profile: &SoilProfile,
    input: &HelicalPierInput,
    settings: &DesignSettings,
) -> CalcResult<HelicalPierDesign> {
    input.validate()?;
    settings.validate()?;

    let element = input.element.build()?;
    let safety_factor = input.safety_factor.unwrap_or(settings.default_safety_factor);
    let batter = input.batter_angle_deg.unwrap_or(settings.batter_angle_deg);
    let required = input.demand.required_capacity(safety_factor)?;

    let capacity = find_bearing_depth(profile, &element, required, safety_factor, settings)?;

    let bearing_lateral = match capacity.bearing {
        Some(point) => {
            let stratum = profile.layer(point.layer_index).ok_or_else(|| CalcError::Internal {
                message: format!("bearing layer {} not in profile", point.layer_index),
            })?;
            Some(lateral_capacity(&element, stratum, batter, settings)?)
        }
        None => None,
    };

    let shaft_bottom = capacity.bearing.map(|p| p.depth_ft);
    let mut buckling_checks = Vec::new();
    for layer in profile.layers() {
        let traversed = shaft_bottom.map_or(true, |bottom| layer.top_depth_ft < bottom);
        if layer.is_hazard() && traversed {
            buckling_checks.push(buckling_check(&element, layer, settings)?);
        }
    }

    let mut warnings = element.advisories.clone();
    warnings.extend(capacity.warnings.iter().cloned());
    warnings.extend(buckling_checks.iter().filter_map(|c| c.warning.clone()));

    Ok(HelicalPierDesign {
        element,
        capacity,
        bearing_lateral,
        buckling_checks,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ElementKind, StructuralSpecs};
    use crate::soil::{SoilProperties, UscsSymbol};

    fn input(demand: CapacityDemand) -> HelicalPierInput {
        HelicalPierInput {
            element: ElementDefinition {
                label: "HP-1".to_string(),
                shaft_diameter_in: 2.875,
                kind: ElementKind::HelicalPier {
                    plate_diameters_in: vec![10.0, 12.0, 14.0],
                },
                structural_specs: StructuralSpecs::new(),
            },
            demand,
            safety_factor: None,
            batter_angle_deg: None,
        }
    }

    /// Fill over peat over dense sand
    fn profile() -> SoilProfile {
        let mut profile = SoilProfile::new();
        profile.insert(SoilProperties::new(110.0, 28.0, 0.0).with_uscs(UscsSymbol::SM), 0.0).unwrap();
        profile.insert(SoilProperties::new(70.0, 0.0, 50.0).with_uscs(UscsSymbol::PT), 3.0).unwrap();
        profile.insert(SoilProperties::new(125.0, 36.0, 0.0).with_uscs(UscsSymbol::SP), 8.0).unwrap();
        profile.terminate(35.0).unwrap();
        profile
    }

    #[test]
    fn test_pier_through_peat() {
        let design = design_helical_pier(
            &profile(),
            &input(CapacityDemand::PerPier { capacity_lb: 20_000.0 }),
            &DesignSettings::default(),
        )
        .unwrap();

        let point = design.capacity.bearing.unwrap();
        assert_eq!(point.layer_index, 2);
        assert!(matches!(design.bearing_lateral, Some(LateralCapacity::Passive(_))));

        // 5 ft of peat gives far less than the 13 000 lb structural capacity
        assert_eq!(design.buckling_checks.len(), 1);
        assert!(!design.passes());

        let codes: Vec<&str> = design.warnings.iter().map(|w| w.code()).collect();
        assert_eq!(codes, vec!["HAZARD_LAYER", "BUCKLING_RISK"]);
    }

    #[test]
    fn test_group_load_demand() {
        let demand = CapacityDemand::GroupLoad {
            load_lb: 80_000.0,
            piers_in_group: 2,
        };
        assert_eq!(demand.required_capacity(2.0).unwrap(), 20_000.0);

        let design = design_helical_pier(&profile(), &input(demand), &DesignSettings::default()).unwrap();
        assert_eq!(design.capacity.required_capacity_lb, 20_000.0);
    }

    #[test]
    fn test_explicit_safety_factor() {
        let mut pier = input(CapacityDemand::PerPier { capacity_lb: 40_000.0 });
        pier.safety_factor = Some(3.0);
        let strict = design_helical_pier(&profile(), &pier, &DesignSettings::default()).unwrap();
        let normal = design_helical_pier(
            &profile(),
            &input(CapacityDemand::PerPier { capacity_lb: 40_000.0 }),
            &DesignSettings::default(),
        )
        .unwrap();
        assert!(strict.capacity.bearing.unwrap().depth_ft > normal.capacity.bearing.unwrap().depth_ft);

        pier.safety_factor = Some(0.0);
        assert!(design_helical_pier(&profile(), &pier, &DesignSettings::default()).is_err());
    }

    #[test]
    fn test_no_bearing_checks_every_hazard() {
        let mut profile = SoilProfile::new();
        profile.insert(SoilProperties::new(95.0, 5.0, 100.0).with_uscs(UscsSymbol::OL), 0.0).unwrap();
        profile.insert(SoilProperties::new(70.0, 0.0, 50.0).with_uscs(UscsSymbol::PT), 4.0).unwrap();
        profile.terminate(12.0).unwrap();

        let design = design_helical_pier(
            &profile,
            &input(CapacityDemand::PerPier { capacity_lb: 20_000.0 }),
            &DesignSettings::default(),
        )
        .unwrap();
        assert!(design.capacity.bearing.is_none());
        assert!(design.bearing_lateral.is_none());
        assert_eq!(design.buckling_checks.len(), 2);
    }

    #[test]
    fn test_input_json() {
        let json = r#"{
            "element": {
                "label": "HP-1",
                "shaft_diameter_in": 2.875,
                "kind": { "type": "HelicalPier", "plate_diameters_in": [10.0, 12.0, 14.0] }
            },
            "demand": { "type": "GroupLoad", "load_lb": 80000.0, "piers_in_group": 2 }
        }"#;
        let parsed: HelicalPierInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.safety_factor, None);
        assert!(parsed.validate().is_ok());
    }
}
