//! # Lateral Capacity
//!
//! Lateral behavior of a pier shaft within one stratum. Stable soil is
//! checked for passive resistance against a battered shaft; hazard soil
//! provides no dependable support, so the shaft is checked for buckling
//! over the unsupported thickness instead.
//!
//! ## Buckling (hazard stratum)
//!
//! ```text
//! R      = ((E·I) / (k_h·D))^¼          relative stiffness (in)
//! i_max  = L / R                        L = stratum thickness (in)
//! P_ult  = 3·E·I·i_max / R²
//! P_all  = P_ult / 2
//! ```
//!
//! ## Passive resistance (stable stratum)
//!
//! ```text
//! Kp     = (1 + sin φ) / (1 − sin φ)
//! P_ult  = Kp·D³·γ                      D in ft
//! H      = P_ult·tan(β)                 β = batter angle
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{passive_coefficient_kp, relative_stiffness};
use crate::errors::{CalcError, CalcResult};
use crate::foundation::FoundationElement;
use crate::settings::DesignSettings;
use crate::soil::SoilLayer;
use crate::units::{Degrees, Feet, Inches};
use crate::warnings::DesignWarning;

/// Buckling check of a shaft through an unsupportive stratum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucklingCheck {
    /// Top of the stratum (ft)
    pub top_depth_ft: f64,

    /// Bottom of the stratum (ft)
    pub bottom_depth_ft: f64,

    /// Subgrade reaction coefficient k_h
    pub subgrade_coefficient: f64,

    /// Relative stiffness R (in)
    pub relative_stiffness_in: f64,

    /// Unsupported length over relative stiffness
    pub i_max: f64,

    /// Ultimate buckling capacity (lb)
    pub ultimate_capacity_lb: f64,

    /// Allowable buckling capacity (lb)
    pub allowable_capacity_lb: f64,

    /// Structural lateral capacity of the shaft (lb)
    pub structural_capacity_lb: f64,

    /// Buckling warning when the allowable falls short of the structural capacity
    pub warning: Option<DesignWarning>,
}

impl BucklingCheck {
    /// Structural capacity minus allowable capacity, zero when adequate (lb)
    pub fn shortfall_lb(&self) -> f64 {
        (self.structural_capacity_lb - self.allowable_capacity_lb).max(0.0)
    }

    /// Whether the stratum supports the shaft
    pub fn passes(&self) -> bool {
        self.warning.is_none()
    }
}

/// Passive lateral resistance of a stable stratum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveCapacity {
    /// Rankine passive coefficient
    pub kp: f64,

    /// Ultimate passive capacity (lb)
    pub ultimate_capacity_lb: f64,

    /// Batter angle from vertical (degrees)
    pub batter_angle_deg: f64,

    /// Horizontal component of the ultimate capacity (lb)
    pub horizontal_component_lb: f64,
}

/// Lateral check outcome for one stratum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum LateralCapacity {
    Buckling(BucklingCheck),
    Passive(PassiveCapacity),
}

impl LateralCapacity {
    /// Warning raised by the check, if any
    pub fn warning(&self) -> Option<&DesignWarning> {
        match self {
            LateralCapacity::Buckling(check) => check.warning.as_ref(),
            LateralCapacity::Passive(_) => None,
        }
    }
}

/// Evaluate the lateral capacity of an element within a stratum.
///
/// # Arguments
/// * `element` - Pier or pile providing shaft diameter and structural specs
/// * `stratum` - Soil layer the shaft passes through or bears in
/// * `batter_angle_deg` - Installation angle from vertical (degrees)
/// * `settings` - Subgrade coefficient, steel modulus, open-layer thickness
pub fn lateral_capacity(
    element: &FoundationElement,
    stratum: &SoilLayer,
    batter_angle_deg: f64,
    settings: &DesignSettings,
) -> CalcResult<LateralCapacity> {
    if !(0.0..90.0).contains(&batter_angle_deg) {
        return Err(CalcError::invalid_input(
            "batter_angle_deg",
            batter_angle_deg.to_string(),
            "Batter angle must be in [0, 90) degrees",
        ));
    }

    if stratum.is_hazard() {
        buckling_check(element, stratum, settings).map(LateralCapacity::Buckling)
    } else {
        Ok(LateralCapacity::Passive(passive_capacity(element, stratum, batter_angle_deg)))
    }
}

/// Buckling check over the full thickness of a stratum.
pub fn buckling_check(
    element: &FoundationElement,
    stratum: &SoilLayer,
    settings: &DesignSettings,
) -> CalcResult<BucklingCheck> {
    let k_h = settings.subgrade_coefficient;
    if !(k_h > 0.0) {
        return Err(CalcError::invalid_input(
            "subgrade_coefficient",
            k_h.to_string(),
            "Subgrade coefficient must be positive",
        ));
    }

    let thickness_ft = stratum
        .thickness_ft
        .unwrap_or(settings.terminal_layer_thickness_ft);
    let length_in = Inches::from(Feet(thickness_ft)).value();

    let e = settings.steel_modulus_psi;
    let i = element.structural.moment_of_inertia_in4;
    let r = relative_stiffness(e, i, k_h, element.shaft_diameter_in);
    let i_max = length_in / r;
    let ultimate = 3.0 * e * i * i_max / r.powi(2);
    let allowable = ultimate / 2.0;
    let structural = element.structural.ultimate_lateral_lb;

    let top = stratum.top_depth_ft;
    let bottom = top + thickness_ft;
    let warning = (allowable < structural).then(|| DesignWarning::BucklingRisk {
        top_depth_ft: top,
        bottom_depth_ft: bottom,
        allowable_capacity_lb: allowable,
        required_capacity_lb: structural,
    });

    Ok(BucklingCheck {
        top_depth_ft: top,
        bottom_depth_ft: bottom,
        subgrade_coefficient: k_h,
        relative_stiffness_in: r,
        i_max,
        ultimate_capacity_lb: ultimate,
        allowable_capacity_lb: allowable,
        structural_capacity_lb: structural,
        warning,
    })
}

/// Passive resistance of a stable stratum against a battered shaft.
pub fn passive_capacity(element: &FoundationElement, stratum: &SoilLayer, batter_angle_deg: f64) -> PassiveCapacity {
    let kp = passive_coefficient_kp(stratum.phi());
    let d = element.width_ft();
    let ultimate = kp * d.powi(3) * stratum.gamma();
    PassiveCapacity {
        kp,
        ultimate_capacity_lb: ultimate,
        batter_angle_deg,
        horizontal_component_lb: ultimate * Degrees(batter_angle_deg).radians().tan(),
    }
}
