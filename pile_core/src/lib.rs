//! # pile_core - Deep Foundation Design Engine
//!
//! `pile_core` sizes helical piers and pin piles against a layered soil
//! profile. All inputs and outputs are JSON-serializable, and every
//! calculation is a pure function of the profile, the element, and the
//! design settings.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Warnings, not prints**: Unfavorable findings travel with the result
//!
//! ## Quick Start
//!
//! ```rust
//! use pile_core::calculations::find_bearing_depth;
//! use pile_core::foundation::FoundationElement;
//! use pile_core::settings::DesignSettings;
//! use pile_core::soil::{SoilProfile, SoilProperties, UscsSymbol};
//!
//! let mut profile = SoilProfile::new();
//! profile.insert(SoilProperties::new(95.0, 5.0, 150.0).with_uscs(UscsSymbol::OL), 0.0).unwrap();
//! profile.insert(SoilProperties::new(120.0, 34.0, 0.0).with_uscs(UscsSymbol::SM), 4.0).unwrap();
//! profile.terminate(30.0).unwrap();
//!
//! let pier = FoundationElement::helical_pier("HP-1", 2.875, vec![10.0, 12.0, 14.0]).unwrap();
//! let result = find_bearing_depth(&profile, &pier, 20_000.0, 2.0, &DesignSettings::default()).unwrap();
//!
//! let bearing = result.bearing.unwrap();
//! assert_eq!(bearing.layer_index, 1);
//! for warning in &result.warnings {
//!     println!("{}", warning);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`soil`] - Soil profile, layers, USCS classification, hazard scan
//! - [`foundation`] - Helical piers, pin piles, plate area, structural specs
//! - [`calculations`] - Bearing, lateral, and embedment design engines
//! - [`equations`] - Coefficient fits and closed-form pile formulas
//! - [`project`] - Site project container and metadata
//! - [`settings`] - Tunable design parameters
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`warnings`] - Non-fatal design findings

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod foundation;
pub mod project;
pub mod settings;
pub mod soil;
pub mod units;
pub mod warnings;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use project::{ProjectMetadata, SiteProject};
pub use settings::DesignSettings;
pub use warnings::DesignWarning;
