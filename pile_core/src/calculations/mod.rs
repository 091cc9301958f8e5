//! # Design Calculations
//!
//! This module contains the foundation design engines. Each design
//! follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Design` / `*Result` - Results with attached warnings (JSON-serializable)
//! - a pure function taking the site profile, the input, and the settings
//!
//! ## Available Calculations
//!
//! - [`bearing`] - Shallowest depth at which helical plates develop a capacity
//! - [`lateral`] - Passive lateral capacity and buckling through hazard soil
//! - [`helical_pier`] - Bearing, lateral, and buckling checks of one pier
//! - [`embedment`] - Pin pile embedment and bending below a slide mass

pub mod bearing;
pub mod embedment;
pub mod helical_pier;
pub mod lateral;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::settings::DesignSettings;
use crate::soil::SoilProfile;

// Re-export commonly used types
pub use bearing::{find_bearing_depth, BearingPoint, CapacityResult};
pub use embedment::{
    bending_moment, calculate_min_depth, design_embedment_depth, BendingMoment, EmbedmentResult, PinPileDesign,
    PinPileInput,
};
pub use helical_pier::{design_helical_pier, CapacityDemand, HelicalPierDesign, HelicalPierInput};
pub use lateral::{lateral_capacity, BucklingCheck, LateralCapacity, PassiveCapacity};

/// Enum wrapper for all design types.
///
/// This allows storing heterogeneous designs in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DesignItem {
    /// Helical pier bearing and lateral design
    HelicalPier(HelicalPierInput),
    /// Pin pile row embedment design
    PinPile(PinPileInput),
}

impl DesignItem {
    /// Get the user-provided label for this design
    pub fn label(&self) -> &str {
        match self {
            DesignItem::HelicalPier(p) => &p.element.label,
            DesignItem::PinPile(p) => &p.element.label,
        }
    }

    /// Get the design type as a string
    pub fn design_type(&self) -> &'static str {
        match self {
            DesignItem::HelicalPier(_) => "HelicalPier",
            DesignItem::PinPile(_) => "PinPile",
        }
    }

    /// Run the design against a site profile
    pub fn run(&self, profile: &SoilProfile, settings: &DesignSettings) -> CalcResult<DesignOutcome> {
        match self {
            DesignItem::HelicalPier(input) => {
                design_helical_pier(profile, input, settings).map(DesignOutcome::HelicalPier)
            }
            DesignItem::PinPile(input) => input.design(profile, settings).map(DesignOutcome::PinPile),
        }
    }
}

/// Result of running a [`DesignItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DesignOutcome {
    HelicalPier(HelicalPierDesign),
    PinPile(PinPileDesign),
}

impl DesignOutcome {
    /// Every warning attached to the outcome
    pub fn warnings(&self) -> &[crate::warnings::DesignWarning] {
        match self {
            DesignOutcome::HelicalPier(d) => &d.warnings,
            DesignOutcome::PinPile(d) => &d.warnings,
        }
    }
}
