//! USCS group symbols (ASTM D2487).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CalcError;

/// Unified Soil Classification System group symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UscsSymbol {
    /// Well-graded gravel
    GW,
    /// Poorly graded gravel
    GP,
    /// Silty gravel
    GM,
    /// Clayey gravel
    GC,
    /// Well-graded sand
    SW,
    /// Poorly graded sand
    SP,
    /// Silty sand
    SM,
    /// Clayey sand
    SC,
    /// Low plasticity silt
    ML,
    /// Lean clay
    CL,
    /// Organic silt or clay, low plasticity
    OL,
    /// Elastic silt
    MH,
    /// Fat clay
    CH,
    /// Organic silt or clay, high plasticity
    OH,
    /// Peat
    PT,
}

impl UscsSymbol {
    /// All group symbols for iteration
    pub const ALL: [UscsSymbol; 15] = [
        UscsSymbol::GW,
        UscsSymbol::GP,
        UscsSymbol::GM,
        UscsSymbol::GC,
        UscsSymbol::SW,
        UscsSymbol::SP,
        UscsSymbol::SM,
        UscsSymbol::SC,
        UscsSymbol::ML,
        UscsSymbol::CL,
        UscsSymbol::OL,
        UscsSymbol::MH,
        UscsSymbol::CH,
        UscsSymbol::OH,
        UscsSymbol::PT,
    ];

    /// Organic soils are never a bearing medium
    pub fn is_organic(&self) -> bool {
        matches!(self, UscsSymbol::OL | UscsSymbol::OH | UscsSymbol::PT)
    }

    /// Get the two-letter group symbol
    pub fn code(&self) -> &'static str {
        match self {
            UscsSymbol::GW => "GW",
            UscsSymbol::GP => "GP",
            UscsSymbol::GM => "GM",
            UscsSymbol::GC => "GC",
            UscsSymbol::SW => "SW",
            UscsSymbol::SP => "SP",
            UscsSymbol::SM => "SM",
            UscsSymbol::SC => "SC",
            UscsSymbol::ML => "ML",
            UscsSymbol::CL => "CL",
            UscsSymbol::OL => "OL",
            UscsSymbol::MH => "MH",
            UscsSymbol::CH => "CH",
            UscsSymbol::OH => "OH",
            UscsSymbol::PT => "PT",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            UscsSymbol::GW => "Well-graded gravel",
            UscsSymbol::GP => "Poorly graded gravel",
            UscsSymbol::GM => "Silty gravel",
            UscsSymbol::GC => "Clayey gravel",
            UscsSymbol::SW => "Well-graded sand",
            UscsSymbol::SP => "Poorly graded sand",
            UscsSymbol::SM => "Silty sand",
            UscsSymbol::SC => "Clayey sand",
            UscsSymbol::ML => "Silt",
            UscsSymbol::CL => "Lean clay",
            UscsSymbol::OL => "Organic silt/clay (low plasticity)",
            UscsSymbol::MH => "Elastic silt",
            UscsSymbol::CH => "Fat clay",
            UscsSymbol::OH => "Organic silt/clay (high plasticity)",
            UscsSymbol::PT => "Peat",
        }
    }
}

impl fmt::Display for UscsSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UscsSymbol {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        UscsSymbol::ALL
            .iter()
            .copied()
            .find(|sym| sym.code() == upper)
            .ok_or_else(|| {
                CalcError::invalid_input("uscs", s, "Not a USCS group symbol (e.g. SP, CL, OL)")
            })
    }
}
