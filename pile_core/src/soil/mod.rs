//! # Soil Profile
//!
//! A simplified boring log: soil strata ordered by depth from the ground
//! surface down. The profile owns its layers in a flat arena; the layer
//! underlying layer `i` is layer `i + 1`.
//!
//! ## Structure
//!
//! ```text
//! SoilProfile
//! ├── [0] SP  top 0.0 ft   thickness 4.0
//! ├── [1] OL  top 4.0 ft   thickness 6.0   (hazard)
//! └── [2] SM  top 10.0 ft  thickness open until terminated
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pile_core::soil::{SoilProfile, SoilProperties, UscsSymbol};
//!
//! let mut profile = SoilProfile::new();
//! profile.insert(SoilProperties::new(110.0, 28.0, 0.0).with_uscs(UscsSymbol::SP), 0.0).unwrap();
//! profile.insert(SoilProperties::new(95.0, 5.0, 150.0).with_uscs(UscsSymbol::OL), 4.0).unwrap();
//! profile.insert(SoilProperties::new(120.0, 34.0, 0.0).with_uscs(UscsSymbol::SM), 10.0).unwrap();
//! profile.terminate(30.0).unwrap();
//!
//! let scan = profile.first_suitable_layer().unwrap();
//! assert_eq!(scan.first_suitable, Some(2));
//! ```

pub mod layer;
pub mod uscs;

pub use layer::{SoilLayer, SoilProperties};
pub use uscs::UscsSymbol;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::warnings::DesignWarning;

/// Depth-ordered, append-only sequence of soil layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ProfileDefinition", into = "ProfileDefinition")]
pub struct SoilProfile {
    layers: Vec<SoilLayer>,
}

/// Outcome of the hazard scan over a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardScan {
    /// Index of the first layer that may serve as a bearing medium,
    /// `None` when every layer is a hazard
    pub first_suitable: Option<usize>,

    /// Hazards passed over, settlement risks below, or the no-medium finding
    pub warnings: Vec<DesignWarning>,
}

impl SoilProfile {
    /// Create an empty profile
    pub fn new() -> Self {
        SoilProfile { layers: Vec::new() }
    }

    /// Insert a new deepest layer whose top is at `depth_ft`.
    ///
    /// The first layer must start at the ground surface. Every later layer
    /// must start below the current deepest layer's top; the previous
    /// deepest layer's thickness is resolved to the gap between the two.
    ///
    /// Returns the index of the new layer.
    pub fn insert(&mut self, properties: SoilProperties, depth_ft: f64) -> CalcResult<usize> {
        properties.validate()?;
        if !depth_ft.is_finite() {
            return Err(CalcError::invalid_input(
                "depth_ft",
                depth_ft.to_string(),
                "Layer depth must be finite",
            ));
        }

        match self.layers.last_mut() {
            None => {
                if depth_ft != 0.0 {
                    return Err(CalcError::invalid_input(
                        "depth_ft",
                        depth_ft.to_string(),
                        "The first layer must start at the ground surface (0 ft)",
                    ));
                }
            }
            Some(tail) => {
                if depth_ft <= tail.top_depth_ft {
                    return Err(CalcError::ordering(depth_ft, tail.top_depth_ft));
                }
                tail.thickness_ft = Some(depth_ft - tail.top_depth_ft);
            }
        }

        self.layers.push(SoilLayer::new(properties, depth_ft));
        Ok(self.layers.len() - 1)
    }

    /// Resolve the deepest layer's thickness at the bottom of the boring.
    pub fn terminate(&mut self, boring_depth_ft: f64) -> CalcResult<()> {
        let tail = self.layers.last_mut().ok_or(CalcError::EmptyProfile)?;
        if !(boring_depth_ft > tail.top_depth_ft) || !boring_depth_ft.is_finite() {
            return Err(CalcError::ordering(boring_depth_ft, tail.top_depth_ft));
        }
        tail.thickness_ft = Some(boring_depth_ft - tail.top_depth_ft);
        Ok(())
    }

    /// Layers from the surface downward
    pub fn layers(&self) -> std::slice::Iter<'_, SoilLayer> {
        self.layers.iter()
    }

    /// Layer by index
    pub fn layer(&self, index: usize) -> Option<&SoilLayer> {
        self.layers.get(index)
    }

    /// The layer directly below `index`
    pub fn underlying(&self, index: usize) -> Option<&SoilLayer> {
        self.layers.get(index + 1)
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the profile has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Depth to the bottom of the deepest layer, if the profile is terminated
    pub fn bottom_depth_ft(&self) -> Option<f64> {
        self.layers.last().and_then(|l| l.bottom_depth_ft())
    }

    /// Index of the layer containing `depth_ft`.
    ///
    /// The deepest layer is treated as continuing downward, so any depth at
    /// or below its top maps to it.
    pub fn layer_index_at(&self, depth_ft: f64) -> Option<usize> {
        if depth_ft < 0.0 {
            return None;
        }
        self.layers
            .iter()
            .rposition(|layer| depth_ft >= layer.top_depth_ft)
    }

    /// Total vertical stress at `depth_ft` (psf).
    pub fn overburden_pressure(&self, depth_ft: f64) -> f64 {
        let n = self.layers.len();
        self.layers
            .iter()
            .enumerate()
            .take_while(|(_, layer)| layer.top_depth_ft < depth_ft)
            .map(|(i, layer)| {
                let bottom = if i + 1 == n {
                    depth_ft
                } else {
                    layer.bottom_depth_ft().unwrap_or(depth_ft).min(depth_ft)
                };
                layer.gamma() * (bottom - layer.top_depth_ft)
            })
            .sum()
    }

    /// Indices of hazard layers below `index`
    pub fn hazards_below(&self, index: usize) -> Vec<usize> {
        self.layers
            .iter()
            .enumerate()
            .skip(index + 1)
            .filter(|(_, layer)| layer.is_hazard())
            .map(|(i, _)| i)
            .collect()
    }

    /// Find the shallowest layer that can start a bearing search.
    ///
    /// The selected layer heads the deepest contiguous run of non-hazard
    /// layers: it is never a hazard and no untraversed hazard lies between it
    /// and the deepest hazard above it. With no hazards this is the surface
    /// layer; with only hazards there is no suitable layer.
    pub fn first_suitable_layer(&self) -> CalcResult<HazardScan> {
        if self.layers.is_empty() {
            return Err(CalcError::EmptyProfile);
        }

        let mut warnings = Vec::new();
        let deepest_sound = self.layers.iter().rposition(|layer| !layer.is_hazard());

        let Some(run_end) = deepest_sound else {
            warnings.push(DesignWarning::NoSuitableBearingMedium);
            return Ok(HazardScan {
                first_suitable: None,
                warnings,
            });
        };

        let mut start = run_end;
        while start > 0 && !self.layers[start - 1].is_hazard() {
            start -= 1;
        }

        for (i, layer) in self.layers.iter().enumerate().take(start) {
            if layer.is_hazard() {
                warnings.push(DesignWarning::HazardLayer {
                    layer_index: i,
                    top_depth_ft: layer.top_depth_ft,
                    bottom_depth_ft: layer.bottom_depth_ft(),
                });
            }
        }

        let below = self.hazards_below(run_end);
        if !below.is_empty() {
            warnings.push(DesignWarning::SensitiveSoilBelow {
                bearing_layer: start,
                hazard_layers: below,
            });
        }

        Ok(HazardScan {
            first_suitable: Some(start),
            warnings,
        })
    }
}

// =============================================================================
// SERIALIZED FORM
// =============================================================================

/// One boring log entry: properties plus the depth to the top of the stratum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDefinition {
    /// Depth to the top of the stratum (ft)
    pub top_depth_ft: f64,

    /// Engineering properties
    #[serde(flatten)]
    pub properties: SoilProperties,
}

/// Serialized profile. Deserializing replays every insertion, so a profile
/// read from JSON satisfies the same ordering rules as one built in code.
///
/// ```json
/// {
///   "layers": [
///     { "top_depth_ft": 0.0, "unit_weight_pcf": 110.0, "friction_angle_deg": 28.0, "cohesion_psf": 0.0, "uscs": "SP" },
///     { "top_depth_ft": 6.0, "unit_weight_pcf": 120.0, "friction_angle_deg": 34.0, "cohesion_psf": 0.0 }
///   ],
///   "boring_depth_ft": 25.0
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDefinition {
    /// Layers from the surface down
    pub layers: Vec<LayerDefinition>,

    /// Bottom of the boring (ft)
    #[serde(default)]
    pub boring_depth_ft: Option<f64>,
}

impl TryFrom<ProfileDefinition> for SoilProfile {
    type Error = CalcError;

    fn try_from(def: ProfileDefinition) -> Result<Self, Self::Error> {
        let mut profile = SoilProfile::new();
        for layer in def.layers {
            profile.insert(layer.properties, layer.top_depth_ft)?;
        }
        if let Some(depth) = def.boring_depth_ft {
            profile.terminate(depth)?;
        }
        Ok(profile)
    }
}

impl From<SoilProfile> for ProfileDefinition {
    fn from(profile: SoilProfile) -> Self {
        let boring_depth_ft = profile.bottom_depth_ft();
        ProfileDefinition {
            layers: profile
                .layers
                .into_iter()
                .map(|layer| LayerDefinition {
                    top_depth_ft: layer.top_depth_ft,
                    properties: layer.properties,
                })
                .collect(),
            boring_depth_ft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sand() -> SoilProperties {
        SoilProperties::new(115.0, 32.0, 0.0).with_uscs(UscsSymbol::SP)
    }

    fn organic() -> SoilProperties {
        SoilProperties::new(95.0, 5.0, 100.0).with_uscs(UscsSymbol::OL)
    }

    fn profile_of(layers: &[(SoilProperties, f64)]) -> SoilProfile {
        let mut profile = SoilProfile::new();
        for (props, depth) in layers {
            profile.insert(props.clone(), *depth).unwrap();
        }
        profile
    }

    #[test]
    fn test_insert_resolves_thickness() {
        let profile = profile_of(&[(sand(), 0.0), (sand(), 4.0), (sand(), 10.0)]);
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.layer(0).unwrap().thickness_ft, Some(4.0));
        assert_eq!(profile.layer(1).unwrap().thickness_ft, Some(6.0));
        assert_eq!(profile.layer(2).unwrap().thickness_ft, None);
    }

    #[test]
    fn test_insert_out_of_order() {
        let mut profile = profile_of(&[(sand(), 0.0), (sand(), 5.0)]);
        let err = profile.insert(sand(), 5.0).unwrap_err();
        assert_eq!(err.error_code(), "ORDERING_ERROR");
        assert!(profile.insert(sand(), 3.0).is_err());
        // Failed inserts leave the profile unchanged
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.layer(1).unwrap().thickness_ft, None);
    }

    #[test]
    fn test_first_layer_at_surface() {
        let mut profile = SoilProfile::new();
        assert!(profile.insert(sand(), 2.0).is_err());
        assert!(profile.insert(sand(), 0.0).is_ok());
    }

    #[test]
    fn test_terminate() {
        let mut profile = SoilProfile::new();
        assert_eq!(profile.terminate(10.0), Err(CalcError::EmptyProfile));
        profile.insert(sand(), 0.0).unwrap();
        profile.insert(sand(), 8.0).unwrap();
        assert!(profile.terminate(8.0).is_err());
        profile.terminate(20.0).unwrap();
        assert_eq!(profile.bottom_depth_ft(), Some(20.0));
    }

    #[test]
    fn test_layers_restartable() {
        let profile = profile_of(&[(sand(), 0.0), (organic(), 3.0), (sand(), 7.0)]);
        let first: Vec<f64> = profile.layers().map(|l| l.top_depth_ft).collect();
        let second: Vec<f64> = profile.layers().map(|l| l.top_depth_ft).collect();
        assert_eq!(first, vec![0.0, 3.0, 7.0]);
        assert_eq!(first, second);
        assert_eq!(profile.underlying(0).unwrap().top_depth_ft, 3.0);
        assert!(profile.underlying(2).is_none());
    }

    #[test]
    fn test_empty_profile_scan() {
        let profile = SoilProfile::new();
        assert_eq!(profile.first_suitable_layer(), Err(CalcError::EmptyProfile));
    }

    #[test]
    fn test_no_hazards_returns_surface() {
        let profile = profile_of(&[(sand(), 0.0), (sand(), 5.0), (sand(), 12.0)]);
        let scan = profile.first_suitable_layer().unwrap();
        assert_eq!(scan.first_suitable, Some(0));
        assert!(scan.warnings.is_empty());
    }

    #[test]
    fn test_all_hazards() {
        let profile = profile_of(&[(organic(), 0.0), (organic(), 5.0)]);
        let scan = profile.first_suitable_layer().unwrap();
        assert_eq!(scan.first_suitable, None);
        assert_eq!(scan.warnings, vec![DesignWarning::NoSuitableBearingMedium]);
    }

    #[test]
    fn test_organic_surface_layer_skipped() {
        let profile = profile_of(&[(organic(), 0.0), (sand(), 6.0)]);
        let scan = profile.first_suitable_layer().unwrap();
        assert_eq!(scan.first_suitable, Some(1));
        assert_eq!(scan.warnings.len(), 1);
        assert_eq!(scan.warnings[0].code(), "HAZARD_LAYER");
    }

    #[test]
    fn test_sound_layer_above_hazard_not_selected() {
        // Sand, then peat, then sand: the upper sand still has a hazard below it
        let peat = SoilProperties::new(70.0, 0.0, 50.0).with_uscs(UscsSymbol::PT);
        let profile = profile_of(&[(sand(), 0.0), (peat, 3.0), (sand(), 8.0), (sand(), 14.0)]);
        let scan = profile.first_suitable_layer().unwrap();
        assert_eq!(scan.first_suitable, Some(2));
    }

    #[test]
    fn test_hazard_at_bottom() {
        let profile = profile_of(&[(sand(), 0.0), (sand(), 5.0), (organic(), 15.0)]);
        let scan = profile.first_suitable_layer().unwrap();
        assert_eq!(scan.first_suitable, Some(0));
        assert_eq!(
            scan.warnings,
            vec![DesignWarning::SensitiveSoilBelow {
                bearing_layer: 0,
                hazard_layers: vec![2],
            }]
        );
    }

    #[test]
    fn test_interleaved_hazards() {
        let profile = profile_of(&[
            (sand(), 0.0),
            (organic(), 3.0),
            (sand(), 6.0),
            (organic(), 9.0),
            (sand(), 12.0),
        ]);
        let scan = profile.first_suitable_layer().unwrap();
        assert_eq!(scan.first_suitable, Some(4));

        let flagged: Vec<usize> = scan
            .warnings
            .iter()
            .map(|w| match w {
                DesignWarning::HazardLayer { layer_index, .. } => *layer_index,
                other => panic!("unexpected warning {:?}", other),
            })
            .collect();
        assert_eq!(flagged, vec![1, 3]);
    }

    #[test]
    fn test_sound_run_between_hazards() {
        let profile = profile_of(&[(organic(), 0.0), (sand(), 4.0), (sand(), 9.0), (organic(), 15.0)]);
        let scan = profile.first_suitable_layer().unwrap();
        assert_eq!(scan.first_suitable, Some(1));
        assert_eq!(
            scan.warnings,
            vec![
                DesignWarning::HazardLayer {
                    layer_index: 0,
                    top_depth_ft: 0.0,
                    bottom_depth_ft: Some(4.0),
                },
                DesignWarning::SensitiveSoilBelow {
                    bearing_layer: 1,
                    hazard_layers: vec![3],
                },
            ]
        );
    }

    #[test]
    fn test_overburden_pressure() {
        let mut profile = SoilProfile::new();
        profile.insert(SoilProperties::new(100.0, 30.0, 0.0), 0.0).unwrap();
        profile.insert(SoilProperties::new(120.0, 30.0, 0.0), 5.0).unwrap();
        assert_eq!(profile.overburden_pressure(0.0), 0.0);
        assert_eq!(profile.overburden_pressure(4.0), 400.0);
        // 5 ft at 100 + 3 ft at 120
        assert_eq!(profile.overburden_pressure(8.0), 860.0);
        // The deepest layer extends past the boring
        profile.terminate(10.0).unwrap();
        assert_eq!(profile.overburden_pressure(12.0), 500.0 + 7.0 * 120.0);
    }

    #[test]
    fn test_layer_index_at() {
        let profile = profile_of(&[(sand(), 0.0), (organic(), 3.0), (sand(), 7.0)]);
        assert_eq!(profile.layer_index_at(0.0), Some(0));
        assert_eq!(profile.layer_index_at(3.0), Some(1));
        assert_eq!(profile.layer_index_at(6.99), Some(1));
        assert_eq!(profile.layer_index_at(50.0), Some(2));
        assert_eq!(profile.layer_index_at(-1.0), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut profile = profile_of(&[(sand(), 0.0), (organic(), 3.0), (sand(), 7.0)]);
        profile.terminate(25.0).unwrap();
        let json = serde_json::to_string_pretty(&profile).unwrap();
        assert!(json.contains("boring_depth_ft"));
        let roundtrip: SoilProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, profile);
    }

    #[test]
    fn test_json_rejects_misordered_layers() {
        let json = r#"{
            "layers": [
                { "top_depth_ft": 0.0, "unit_weight_pcf": 110.0, "friction_angle_deg": 28.0, "cohesion_psf": 0.0 },
                { "top_depth_ft": 0.0, "unit_weight_pcf": 120.0, "friction_angle_deg": 34.0, "cohesion_psf": 0.0 }
            ]
        }"#;
        assert!(serde_json::from_str::<SoilProfile>(json).is_err());
    }
}
