//! Soil strata and their engineering properties.

use serde::{Deserialize, Serialize};

use crate::equations::bearing_factor_nq;
use crate::errors::{CalcError, CalcResult};

use super::uscs::UscsSymbol;

/// Engineering properties of a soil stratum, as read from a boring log.
///
/// ## JSON Example
///
/// ```json
/// {
///   "unit_weight_pcf": 115.0,
///   "friction_angle_deg": 32.0,
///   "cohesion_psf": 0.0,
///   "uscs": "SP",
///   "hazard": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProperties {
    /// Total unit weight γ (pcf)
    pub unit_weight_pcf: f64,

    /// Friction angle φ (degrees)
    pub friction_angle_deg: f64,

    /// Cohesion c (psf)
    pub cohesion_psf: f64,

    /// USCS group symbol, if classified
    #[serde(default)]
    pub uscs: Option<UscsSymbol>,

    /// Explicit hazard designation (weak, sensitive, or otherwise unsuitable)
    #[serde(default)]
    pub hazard: bool,
}

impl SoilProperties {
    /// Create unclassified, non-hazard soil properties
    pub fn new(unit_weight_pcf: f64, friction_angle_deg: f64, cohesion_psf: f64) -> Self {
        SoilProperties {
            unit_weight_pcf,
            friction_angle_deg,
            cohesion_psf,
            uscs: None,
            hazard: false,
        }
    }

    /// Builder: set the USCS group symbol
    pub fn with_uscs(mut self, uscs: UscsSymbol) -> Self {
        self.uscs = Some(uscs);
        self
    }

    /// Builder: flag the stratum as a hazard
    pub fn with_hazard(mut self, hazard: bool) -> Self {
        self.hazard = hazard;
        self
    }

    /// Validate property ranges.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.unit_weight_pcf > 0.0) || !self.unit_weight_pcf.is_finite() {
            return Err(CalcError::invalid_input(
                "unit_weight_pcf",
                self.unit_weight_pcf.to_string(),
                "Unit weight must be positive",
            ));
        }
        if !(0.0..90.0).contains(&self.friction_angle_deg) {
            return Err(CalcError::invalid_input(
                "friction_angle_deg",
                self.friction_angle_deg.to_string(),
                "Friction angle must be in [0, 90) degrees",
            ));
        }
        if !(self.cohesion_psf >= 0.0) || !self.cohesion_psf.is_finite() {
            return Err(CalcError::invalid_input(
                "cohesion_psf",
                self.cohesion_psf.to_string(),
                "Cohesion cannot be negative",
            ));
        }
        Ok(())
    }
}

/// A stratum placed in a [`SoilProfile`](super::SoilProfile).
///
/// Layers are only created by the profile. The thickness stays unresolved
/// until a deeper layer is inserted below it or the profile is terminated
/// at the bottom of the boring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Engineering properties
    pub properties: SoilProperties,

    /// Depth from the ground surface to the top of the stratum (ft)
    pub top_depth_ft: f64,

    /// Stratum thickness (ft), `None` while this is the open-ended deepest layer
    pub thickness_ft: Option<f64>,
}

impl SoilLayer {
    pub(crate) fn new(properties: SoilProperties, top_depth_ft: f64) -> Self {
        SoilLayer {
            properties,
            top_depth_ft,
            thickness_ft: None,
        }
    }

    /// Unit weight γ (pcf)
    pub fn gamma(&self) -> f64 {
        self.properties.unit_weight_pcf
    }

    /// Friction angle φ (degrees)
    pub fn phi(&self) -> f64 {
        self.properties.friction_angle_deg
    }

    /// Cohesion c (psf)
    pub fn cohesion(&self) -> f64 {
        self.properties.cohesion_psf
    }

    /// USCS group symbol
    pub fn uscs(&self) -> Option<UscsSymbol> {
        self.properties.uscs
    }

    /// Hazard if explicitly flagged or organic. An explicit `false` never
    /// clears an organic classification.
    pub fn is_hazard(&self) -> bool {
        self.properties.hazard || self.properties.uscs.is_some_and(|u| u.is_organic())
    }

    /// Bearing capacity factor Nq for this stratum
    pub fn nq(&self) -> f64 {
        bearing_factor_nq(self.phi())
    }

    /// Depth to the bottom of the stratum, if resolved (ft)
    pub fn bottom_depth_ft(&self) -> Option<f64> {
        self.thickness_ft.map(|t| self.top_depth_ft + t)
    }

    /// Short description for reports, e.g. "SP (115 pcf, φ=32°, c=0 psf)"
    pub fn describe(&self) -> String {
        let class = self
            .uscs()
            .map(|u| u.code().to_string())
            .unwrap_or_else(|| "Soil".to_string());
        format!(
            "{} ({:.0} pcf, φ={:.0}°, c={:.0} psf)",
            class,
            self.gamma(),
            self.phi(),
            self.cohesion()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organic_overrides_false_flag() {
        let layer = SoilLayer::new(
            SoilProperties::new(95.0, 5.0, 100.0)
                .with_uscs(UscsSymbol::OL)
                .with_hazard(false),
            0.0,
        );
        assert!(layer.is_hazard());
    }

    #[test]
    fn test_explicit_flag() {
        let layer = SoilLayer::new(
            SoilProperties::new(110.0, 0.0, 250.0)
                .with_uscs(UscsSymbol::CL)
                .with_hazard(true),
            0.0,
        );
        assert!(layer.is_hazard());

        let sound = SoilLayer::new(SoilProperties::new(120.0, 34.0, 0.0), 0.0);
        assert!(!sound.is_hazard());
    }

    #[test]
    fn test_validation() {
        assert!(SoilProperties::new(115.0, 30.0, 0.0).validate().is_ok());
        assert!(SoilProperties::new(0.0, 30.0, 0.0).validate().is_err());
        assert!(SoilProperties::new(115.0, 90.0, 0.0).validate().is_err());
        assert!(SoilProperties::new(115.0, 30.0, -10.0).validate().is_err());
        assert!(SoilProperties::new(f64::NAN, 30.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_bottom_depth() {
        let mut layer = SoilLayer::new(SoilProperties::new(115.0, 30.0, 0.0), 4.0);
        assert_eq!(layer.bottom_depth_ft(), None);
        layer.thickness_ft = Some(6.0);
        assert_eq!(layer.bottom_depth_ft(), Some(10.0));
    }

    #[test]
    fn test_properties_json_defaults() {
        let props: SoilProperties = serde_json::from_str(
            r#"{ "unit_weight_pcf": 120.0, "friction_angle_deg": 0.0, "cohesion_psf": 800.0 }"#,
        )
        .unwrap();
        assert_eq!(props.uscs, None);
        assert!(!props.hazard);
    }
}
