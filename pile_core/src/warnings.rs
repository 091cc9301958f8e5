//! # Design Warnings
//!
//! Valid-but-unfavorable engineering findings attached to results.
//! Warnings serialize with a `type` discriminator, the same way
//! [`CalcError`](crate::errors::CalcError) does, and `Display` renders the
//! message a report should print verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-fatal finding from one of the design engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum DesignWarning {
    /// A hazard layer lies in the bearing path and cannot bear the element
    HazardLayer {
        layer_index: usize,
        top_depth_ft: f64,
        bottom_depth_ft: Option<f64>,
    },

    /// Every layer in the profile is a hazard
    NoSuitableBearingMedium,

    /// Sensitive layers lie below the selected bearing stratum
    SensitiveSoilBelow {
        bearing_layer: usize,
        hazard_layers: Vec<usize>,
    },

    /// No depth in the profile reaches the required capacity
    CapacityNotAchievable {
        required_capacity_lb: f64,
        deepest_depth_ft: f64,
    },

    /// Capacity curve met the requirement, dropped below it, and met it again
    NonMonotonicCapacity { layer_index: usize, depth_ft: f64 },

    /// Shaft lacks lateral support through a hazard layer
    BucklingRisk {
        top_depth_ft: f64,
        bottom_depth_ft: f64,
        allowable_capacity_lb: f64,
        required_capacity_lb: f64,
    },

    /// Plates under 12 in on a large shaft
    SmallPlates {
        shaft_diameter_in: f64,
        smallest_plate_in: f64,
    },

    /// Embedment runs past the bottom of the described profile
    EmbedmentBelowProfile {
        required_depth_ft: f64,
        profile_bottom_ft: f64,
    },
}

impl fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignWarning::HazardLayer {
                layer_index,
                top_depth_ft,
                bottom_depth_ft,
            } => {
                let bottom = bottom_depth_ft
                    .map(|b| format!("{:.1}", b))
                    .unwrap_or_else(|| "end of boring".to_string());
                write!(
                    f,
                    "HAZARD WARNING: Soil layer {} ({:.1} to {} ft) is a sensitive organic soil. \
                     This layer is not a suitable bearing medium and piers extended through it \
                     are at risk of buckling.",
                    layer_index, top_depth_ft, bottom
                )
            }
            DesignWarning::NoSuitableBearingMedium => write!(
                f,
                "HAZARD WARNING: The soil profile as described contains no suitable bearing \
                 medium. Please review the boring logs carefully."
            ),
            DesignWarning::SensitiveSoilBelow {
                bearing_layer,
                hazard_layers,
            } => write!(
                f,
                "HAZARD WARNING: Soils below layer {} (layers {:?}) are designated as sensitive \
                 fine grained or organic soil. Bearing above a sensitive layer may lead to \
                 excessive settlement or loss of capacity. Please carefully review the boring logs.",
                bearing_layer, hazard_layers
            ),
            DesignWarning::CapacityNotAchievable {
                required_capacity_lb,
                deepest_depth_ft,
            } => write!(
                f,
                "WARNING: The required bearing capacity of {:.0} lb can not be achieved at any \
                 depth within the soil profile as described (searched to {:.1} ft).",
                required_capacity_lb, deepest_depth_ft
            ),
            DesignWarning::NonMonotonicCapacity {
                layer_index,
                depth_ft,
            } => write!(
                f,
                "WARNING: Capacity in layer {} does not stay above the requirement below {:.1} ft. \
                 Reported the shallowest depth where the requirement is first met.",
                layer_index, depth_ft
            ),
            DesignWarning::BucklingRisk {
                top_depth_ft,
                bottom_depth_ft,
                allowable_capacity_lb,
                required_capacity_lb,
            } => write!(
                f,
                "BUCKLING WARNING: Lack of adequate lateral capacity from {:.1} to {:.1} feet below \
                 ground surface. Allowable capacity does not exceed {:.0} pounds. Required capacity \
                 is {:.0} pounds. Increase pier diameter or number of piers in group.",
                top_depth_ft, bottom_depth_ft, allowable_capacity_lb, required_capacity_lb
            ),
            DesignWarning::SmallPlates {
                shaft_diameter_in,
                smallest_plate_in,
            } => write!(
                f,
                "WARNING: Plates smaller than 12-inches diameter will provide little bearing \
                 capacity on a {:.3} in shaft (smallest plate {:.1} in). The provided \
                 configuration is not recommended.",
                shaft_diameter_in, smallest_plate_in
            ),
            DesignWarning::EmbedmentBelowProfile {
                required_depth_ft,
                profile_bottom_ft,
            } => write!(
                f,
                "WARNING: Required embedment to {:.2} ft extends below the described profile \
                 (bottom at {:.2} ft). Extend the boring to verify the bearing layer.",
                required_depth_ft, profile_bottom_ft
            ),
        }
    }
}

impl DesignWarning {
    /// Short code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            DesignWarning::HazardLayer { .. } => "HAZARD_LAYER",
            DesignWarning::NoSuitableBearingMedium => "NO_SUITABLE_BEARING_MEDIUM",
            DesignWarning::SensitiveSoilBelow { .. } => "SENSITIVE_SOIL_BELOW",
            DesignWarning::CapacityNotAchievable { .. } => "CAPACITY_NOT_ACHIEVABLE",
            DesignWarning::NonMonotonicCapacity { .. } => "NON_MONOTONIC_CAPACITY",
            DesignWarning::BucklingRisk { .. } => "BUCKLING_RISK",
            DesignWarning::SmallPlates { .. } => "SMALL_PLATES",
            DesignWarning::EmbedmentBelowProfile { .. } => "EMBEDMENT_BELOW_PROFILE",
        }
    }
}
