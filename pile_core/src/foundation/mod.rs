//! # Foundation Elements
//!
//! Geometric and structural description of the deep foundation elements the
//! design engines size: helical piers (a steel shaft with one or more helical
//! bearing plates) and pin piles (small-diameter driven pipes used in rows to
//! retain a slide mass).
//!
//! ## Example
//!
//! ```rust
//! use pile_core::foundation::FoundationElement;
//!
//! let pier = FoundationElement::helical_pier("HP-1", 2.875, vec![10.0, 12.0, 14.0]).unwrap();
//! assert!(pier.bearing_area_sqft > 0.0);
//! assert_eq!(pier.structural.ultimate_axial_lb, 140_000.0);
//! ```

pub mod plates;
pub mod structural;

pub use plates::{net_bearing_area, PlateArea};
pub use structural::{ShaftSpec, ShaftSpecEntry, StructuralSpecs};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::settings::TORQUE_FACTOR_PER_FT;
use crate::units::{Feet, Inches};
use crate::warnings::DesignWarning;

/// Element configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementKind {
    /// Helical pier with bearing plates, ordered top to bottom
    HelicalPier { plate_diameters_in: Vec<f64> },
    /// Pin pile placed in a row at a maximum center-to-center spacing,
    /// expressed in pile widths
    PinPile { spacing_widths: f64 },
}

/// Input form of a foundation element.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "HP-1",
///   "shaft_diameter_in": 2.875,
///   "kind": { "type": "HelicalPier", "plate_diameters_in": [10.0, 12.0, 14.0] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// User label (e.g., "HP-1", "Pin pile row A")
    pub label: String,

    /// Shaft outside diameter (in)
    pub shaft_diameter_in: f64,

    /// Helical pier or pin pile
    pub kind: ElementKind,

    /// Per-element structural spec overrides
    #[serde(default)]
    pub structural_specs: StructuralSpecs,
}

impl ElementDefinition {
    /// Build the element, resolving geometry and structural capacity.
    pub fn build(&self) -> CalcResult<FoundationElement> {
        FoundationElement::from_definition(self.clone())
    }
}

/// A sized foundation element with derived bearing area and structural limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationElement {
    /// User label
    pub label: String,

    /// Shaft outside diameter (in)
    pub shaft_diameter_in: f64,

    /// Helical pier or pin pile configuration
    pub kind: ElementKind,

    /// Spec table this element resolves against
    pub structural_specs: StructuralSpecs,

    /// Structural capacity resolved at construction
    pub structural: ShaftSpec,

    /// Net plate bearing area (ft²); zero for pin piles
    pub bearing_area_sqft: f64,

    /// Geometry advisories raised at construction
    pub advisories: Vec<DesignWarning>,
}

impl FoundationElement {
    /// Helical pier using the built-in structural specs
    pub fn helical_pier(
        label: impl Into<String>,
        shaft_diameter_in: f64,
        plate_diameters_in: Vec<f64>,
    ) -> CalcResult<Self> {
        Self::helical_pier_with_specs(label, shaft_diameter_in, plate_diameters_in, StructuralSpecs::new())
    }

    /// Helical pier resolving against caller-supplied specs
    pub fn helical_pier_with_specs(
        label: impl Into<String>,
        shaft_diameter_in: f64,
        plate_diameters_in: Vec<f64>,
        structural_specs: StructuralSpecs,
    ) -> CalcResult<Self> {
        Self::from_definition(ElementDefinition {
            label: label.into(),
            shaft_diameter_in,
            kind: ElementKind::HelicalPier { plate_diameters_in },
            structural_specs,
        })
    }

    /// Pin pile using the built-in structural specs
    pub fn pin_pile(label: impl Into<String>, shaft_diameter_in: f64, spacing_widths: f64) -> CalcResult<Self> {
        Self::pin_pile_with_specs(label, shaft_diameter_in, spacing_widths, StructuralSpecs::new())
    }

    /// Pin pile resolving against caller-supplied specs
    pub fn pin_pile_with_specs(
        label: impl Into<String>,
        shaft_diameter_in: f64,
        spacing_widths: f64,
        structural_specs: StructuralSpecs,
    ) -> CalcResult<Self> {
        Self::from_definition(ElementDefinition {
            label: label.into(),
            shaft_diameter_in,
            kind: ElementKind::PinPile { spacing_widths },
            structural_specs,
        })
    }

    fn from_definition(def: ElementDefinition) -> CalcResult<Self> {
        if !(def.shaft_diameter_in > 0.0) || !def.shaft_diameter_in.is_finite() {
            return Err(CalcError::invalid_input(
                "shaft_diameter_in",
                def.shaft_diameter_in.to_string(),
                "Shaft diameter must be positive",
            ));
        }

        let (bearing_area_sqft, advisories) = match &def.kind {
            ElementKind::HelicalPier { plate_diameters_in } => {
                let area = net_bearing_area(def.shaft_diameter_in, plate_diameters_in)?;
                if !(area.net_area_sqft > 0.0) {
                    return Err(CalcError::configuration(
                        "plate configuration",
                        "A helical pier needs at least one bearing plate",
                    ));
                }
                (area.net_area_sqft, area.warnings)
            }
            ElementKind::PinPile { spacing_widths } => {
                if !(*spacing_widths >= 1.0) || !spacing_widths.is_finite() {
                    return Err(CalcError::invalid_input(
                        "spacing_widths",
                        spacing_widths.to_string(),
                        "Pile spacing must be at least one pile width",
                    ));
                }
                (0.0, Vec::new())
            }
        };

        let structural = def.structural_specs.lookup(def.shaft_diameter_in)?;

        Ok(FoundationElement {
            label: def.label,
            shaft_diameter_in: def.shaft_diameter_in,
            kind: def.kind,
            structural_specs: def.structural_specs,
            structural,
            bearing_area_sqft,
            advisories,
        })
    }

    /// Override the spec entry for a diameter in this element's table.
    ///
    /// Capacities already resolved on the element are left as they are;
    /// call [`refresh_structural`](Self::refresh_structural) to pick up the
    /// new entry.
    pub fn override_structural_spec(&mut self, diameter_in: f64, spec: ShaftSpec) -> CalcResult<()> {
        self.structural_specs.set_override(diameter_in, spec)
    }

    /// Re-resolve the structural capacity from the element's spec table.
    pub fn refresh_structural(&mut self) -> CalcResult<()> {
        self.structural = self.structural_specs.lookup(self.shaft_diameter_in)?;
        Ok(())
    }

    /// Shaft width (ft)
    pub fn width_ft(&self) -> f64 {
        Feet::from(Inches(self.shaft_diameter_in)).value()
    }

    /// Maximum center-to-center spacing of a pin pile row (ft)
    pub fn max_spacing_ft(&self) -> Option<f64> {
        match self.kind {
            ElementKind::PinPile { spacing_widths } => Some(spacing_widths * self.width_ft()),
            ElementKind::HelicalPier { .. } => None,
        }
    }

    /// Whether the element is a helical pier
    pub fn is_helical_pier(&self) -> bool {
        matches!(self.kind, ElementKind::HelicalPier { .. })
    }
}

/// Installation torque needed to develop an axial capacity (ft-lb).
///
/// # Formula
/// τ = Q / Kt, with Kt = 9 ft⁻¹
#[inline]
pub fn torque_estimate(capacity_lb: f64) -> f64 {
    capacity_lb / TORQUE_FACTOR_PER_FT
}

/// Capacity each pier in a group must carry under a design load.
///
/// # Formula
/// Q = P / (FS · n)
pub fn required_pier_capacity(load_lb: f64, safety_factor: f64, piers_in_group: u32) -> CalcResult<f64> {
    if !(safety_factor > 0.0) {
        return Err(CalcError::invalid_input(
            "safety_factor",
            safety_factor.to_string(),
            "Safety factor must be positive",
        ));
    }
    if piers_in_group == 0 {
        return Err(CalcError::invalid_input(
            "piers_in_group",
            "0",
            "A group needs at least one pier",
        ));
    }
    Ok(load_lb / (safety_factor * piers_in_group as f64))
}
