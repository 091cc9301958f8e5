//! # Design Settings
//!
//! Tunable parameters shared by the design engines. Every field has a
//! default, so a project file may specify only the values it changes:
//!
//! ```json
//! { "default_safety_factor": 2.5, "batter_angle_deg": 5.0 }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Bearing capacity factor used for the cohesive term (Nc for deep plates)
pub const COHESIVE_BEARING_FACTOR: f64 = 9.0;

/// Installation torque correlation factor Kt (ft⁻¹)
pub const TORQUE_FACTOR_PER_FT: f64 = 9.0;

/// Global design settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Depth increment of the bearing capacity grid (ft)
    pub bearing_grid_step_ft: f64,

    /// Safety factor applied to ultimate bearing capacity
    pub default_safety_factor: f64,

    /// Thickness assumed for the deepest layer when the boring depth is unknown (ft)
    pub terminal_layer_thickness_ft: f64,

    /// Installation batter angle from vertical (degrees)
    pub batter_angle_deg: f64,

    /// Subgrade reaction coefficient for buckling checks in sensitive soil.
    /// The acceptable range is [0.1, 0.2]; 0.2 is the conservative end.
    pub subgrade_coefficient: f64,

    /// Elastic modulus of the steel shaft (psi)
    pub steel_modulus_psi: f64,

    /// Number of grid points across the slide mass
    pub slide_grid_points: usize,

    /// Trial depth increment of the embedment search (ft)
    pub embedment_step_ft: f64,

    /// Relative tolerance on the moment ratio F1L1 / F2L2
    pub embedment_tolerance: f64,

    /// Iteration bound of the embedment search
    pub max_iterations: usize,

    /// Multiplier applied to the converged embedment depth
    pub depth_safety_factor: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            bearing_grid_step_ft: 0.5,
            default_safety_factor: 2.0,
            terminal_layer_thickness_ft: 10.0,
            batter_angle_deg: 10.0,
            subgrade_coefficient: 0.2,
            steel_modulus_psi: 29_000_000.0,
            slide_grid_points: 5,
            embedment_step_ft: 0.01,
            embedment_tolerance: 0.01,
            max_iterations: 200_000,
            depth_safety_factor: 1.3,
        }
    }
}

impl DesignSettings {
    /// Validate settings before a design run.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("bearing_grid_step_ft", self.bearing_grid_step_ft),
            ("default_safety_factor", self.default_safety_factor),
            ("terminal_layer_thickness_ft", self.terminal_layer_thickness_ft),
            ("subgrade_coefficient", self.subgrade_coefficient),
            ("steel_modulus_psi", self.steel_modulus_psi),
            ("embedment_step_ft", self.embedment_step_ft),
            ("embedment_tolerance", self.embedment_tolerance),
            ("depth_safety_factor", self.depth_safety_factor),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be a positive number",
                ));
            }
        }
        if !(0.0..90.0).contains(&self.batter_angle_deg) {
            return Err(CalcError::invalid_input(
                "batter_angle_deg",
                self.batter_angle_deg.to_string(),
                "Batter angle must be in [0, 90) degrees",
            ));
        }
        if self.slide_grid_points < 2 {
            return Err(CalcError::invalid_input(
                "slide_grid_points",
                self.slide_grid_points.to_string(),
                "At least two grid points are needed to integrate the slide mass",
            ));
        }
        if self.max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "max_iterations",
                "0",
                "Iteration bound must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DesignSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: DesignSettings =
            serde_json::from_str(r#"{ "default_safety_factor": 2.5 }"#).unwrap();
        assert_eq!(settings.default_safety_factor, 2.5);
        assert_eq!(settings.bearing_grid_step_ft, 0.5);
        assert_eq!(settings.max_iterations, 200_000);
    }

    #[test]
    fn test_invalid_batter() {
        let settings = DesignSettings {
            batter_angle_deg: 95.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_step_rejected() {
        let settings = DesignSettings {
            embedment_step_ft: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CalcError::InvalidInput { .. })
        ));
    }
}
