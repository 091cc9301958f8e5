//! Shaft Structural Specifications
//!
//! Ultimate structural capacities of round steel shafts keyed by outside
//! diameter. The built-in table follows common helical pier manufacturer
//! literature for the lighter wall of each shaft size:
//!
//! ```text
//! diam (in)   axial (lb)   lateral (lb)   I (in⁴)
//!   2.375      100,000        6,000        0.851
//!   2.875      140,000       13,000        1.530
//!   3.500      210,000       18,000        3.432
//!   4.500      260,000       30,000        7.562
//! ```
//!
//! Piers from other manufacturers or custom-fabricated shafts are handled
//! with per-element overrides. Overrides never touch the built-in table, so
//! one element's override cannot leak into another element.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Structural properties of one shaft size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaftSpec {
    /// Ultimate structural axial capacity (lb)
    pub ultimate_axial_lb: f64,

    /// Ultimate structural lateral capacity (lb)
    pub ultimate_lateral_lb: f64,

    /// Moment of inertia of the shaft section (in⁴)
    pub moment_of_inertia_in4: f64,
}

impl ShaftSpec {
    /// Validate that every capacity is positive.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("ultimate_axial_lb", self.ultimate_axial_lb),
            ("ultimate_lateral_lb", self.ultimate_lateral_lb),
            ("moment_of_inertia_in4", self.moment_of_inertia_in4),
        ];
        for (field, value) in fields {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Structural properties must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Table key: diameter in thousandths of an inch (2.375 in → 2375)
fn diameter_key(diameter_in: f64) -> u32 {
    (diameter_in * 1000.0).round() as u32
}

static DEFAULT_SHAFT_SPECS: Lazy<BTreeMap<u32, ShaftSpec>> = Lazy::new(|| {
    let rows = [
        (2.375, 100_000.0, 6_000.0, 0.851),
        (2.875, 140_000.0, 13_000.0, 1.530),
        (3.500, 210_000.0, 18_000.0, 3.432),
        (4.500, 260_000.0, 30_000.0, 7.562),
    ];
    rows.into_iter()
        .map(|(d, axial, lateral, i)| {
            (
                diameter_key(d),
                ShaftSpec {
                    ultimate_axial_lb: axial,
                    ultimate_lateral_lb: lateral,
                    moment_of_inertia_in4: i,
                },
            )
        })
        .collect()
});

/// One row of the effective spec table, for listing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaftSpecEntry {
    /// Shaft outside diameter (in)
    pub diameter_in: f64,

    /// Structural properties in effect
    pub spec: ShaftSpec,

    /// Whether the entry comes from an override
    pub overridden: bool,
}

/// Per-element view of the shaft spec table: built-in defaults plus overrides.
///
/// ## JSON Example
///
/// Overrides are keyed by diameter in thousandths of an inch:
///
/// ```json
/// {
///   "overrides": {
///     "3000": { "ultimate_axial_lb": 150000.0, "ultimate_lateral_lb": 15000.0, "moment_of_inertia_in4": 2.1 }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuralSpecs {
    #[serde(default)]
    overrides: BTreeMap<u32, ShaftSpec>,
}

impl StructuralSpecs {
    /// Defaults only
    pub fn new() -> Self {
        StructuralSpecs::default()
    }

    /// Builder: add or replace the spec for a diameter
    pub fn with_override(mut self, diameter_in: f64, spec: ShaftSpec) -> CalcResult<Self> {
        self.set_override(diameter_in, spec)?;
        Ok(self)
    }

    /// Add or replace the spec for a diameter
    pub fn set_override(&mut self, diameter_in: f64, spec: ShaftSpec) -> CalcResult<()> {
        if !(diameter_in > 0.0) || !diameter_in.is_finite() {
            return Err(CalcError::invalid_input(
                "diameter_in",
                diameter_in.to_string(),
                "Shaft diameter must be positive",
            ));
        }
        spec.validate()?;
        self.overrides.insert(diameter_key(diameter_in), spec);
        Ok(())
    }

    /// Look up the spec for a diameter, preferring overrides
    pub fn lookup(&self, diameter_in: f64) -> CalcResult<ShaftSpec> {
        let key = diameter_key(diameter_in);
        self.overrides
            .get(&key)
            .or_else(|| DEFAULT_SHAFT_SPECS.get(&key))
            .copied()
            .ok_or_else(|| {
                CalcError::configuration(
                    "structural specs",
                    format!(
                        "No structural spec for a {:.3} in shaft - supply an override",
                        diameter_in
                    ),
                )
            })
    }

    /// Effective table, ordered by diameter
    pub fn entries(&self) -> Vec<ShaftSpecEntry> {
        let mut merged: BTreeMap<u32, (ShaftSpec, bool)> = DEFAULT_SHAFT_SPECS
            .iter()
            .map(|(k, spec)| (*k, (*spec, false)))
            .collect();
        for (k, spec) in &self.overrides {
            merged.insert(*k, (*spec, true));
        }
        merged
            .into_iter()
            .map(|(k, (spec, overridden))| ShaftSpecEntry {
                diameter_in: k as f64 / 1000.0,
                spec,
                overridden,
            })
            .collect()
    }
}
