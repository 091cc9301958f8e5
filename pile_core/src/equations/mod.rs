//! # Geotechnical Equations
//!
//! This module contains the fundamental equations used by the design engines.
//! Having equations in one place enables:
//! - Easy verification against the published correlations
//! - Documentation of assumptions and sign conventions
//! - Consistent implementation across calculation types
//!
//! ## Modules
//!
//! - [`coefficients`] - Nq, Kp, and the Kq/Kc lateral resistance fits
//! - [`pile`] - Pin pile force/moment equilibrium below a slip surface
//! - [`section`] - Relative stiffness of a shaft on an elastic subgrade
//!
//! ## Conventions
//!
//! - **Depth**: Positive downward from the ground surface (ft)
//! - **Angles**: Degrees at every public boundary
//! - **Lateral stress**: Positive resisting the slide mass
//!
//! ## References
//!
//! - Meyerhof, G.G., "Bearing Capacity and Settlement of Pile Foundations"
//! - Broms, B.B., "Lateral Resistance of Piles in Cohesionless Soils"
//! - Perko, H.A., "Helical Piles: A Practical Guide to Design and Installation"

pub mod coefficients;
pub mod pile;
pub mod section;

// Re-export commonly used items
pub use coefficients::{
    bearing_factor_nq,
    lateral_coefficient_kc,
    lateral_coefficient_kq,
    passive_coefficient_kp,
};

pub use pile::{
    bending_moment_at,
    lower_reaction_moment,
    pivot_depth,
    resisting_force,
    thrust_balance_depth,
    upper_reaction_moment,
};

pub use section::relative_stiffness;
