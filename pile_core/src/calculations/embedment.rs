//! # Pin Pile Embedment
//!
//! Sizes the embedment of a pin pile row retaining a slide mass. The slide
//! mass occupies the profile from the ground surface to the bottom of a
//! chosen layer (the slip surface, depth `H`); everything below is intact
//! soil that must hold the pile.
//!
//! ## Procedure
//!
//! 1. Sample the lateral stress of the slide mass at evenly spaced depths
//!    from the surface to the slip surface:
//!    `σ_L(d) = Kc(φ, d/b)·c + σ_v(d)·Kq(φ, d/b)`.
//! 2. Integrate with the trapezoid rule for the thrust `T` (lb/ft) and its
//!    depth `z̄`.
//! 3. Take the slide mass stress at the slip surface as `σ_ds`. The intact
//!    soil's coefficients at the slip surface's normalized depth, applied to
//!    the overburden down to the bottom of the intact layer, give the average
//!    stress gradient `σ_avg` below the slip surface.
//! 4. Search the embedment `D` below the slip surface at which the soil
//!    reaction moments about the thrust balance, `F1·L1 = F2·L2`, starting
//!    from the shallowest depth that can carry `T` at all.
//! 5. Apply the depth safety factor. If the factored depth runs past the
//!    intact layer, repeat with the next layer down as the reference.
//!
//! See [`crate::equations::pile`] for the closed-form pieces.

use serde::{Deserialize, Serialize};

use crate::equations::{
    bending_moment_at, lateral_coefficient_kc, lateral_coefficient_kq, lower_reaction_moment, pivot_depth,
    thrust_balance_depth, upper_reaction_moment,
};
use crate::errors::{CalcError, CalcResult};
use crate::foundation::{ElementDefinition, FoundationElement};
use crate::settings::DesignSettings;
use crate::soil::{SoilLayer, SoilProfile};
use crate::units::{FtLb, KipFt, Kips, Pounds};
use crate::warnings::DesignWarning;

const SOLVER: &str = "Embedment depth search";

/// Converged embedment of a pin pile below the slip surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedmentResult {
    /// Deepest layer of the slide mass
    pub slide_mass_layer: usize,

    /// Intact layer the final solve was referenced to
    pub intact_layer: usize,

    /// Depth of the slip surface H (ft)
    pub slip_depth_ft: f64,

    /// Thrust of the slide mass per unit width T (lb/ft)
    pub thrust_plf: f64,

    /// Depth of the thrust below ground z̄ (ft)
    pub thrust_depth_ft: f64,

    /// Lateral stress of the slide mass at the slip surface σ_ds (psf)
    pub slip_surface_stress_psf: f64,

    /// Average lateral stress gradient below the slip surface σ_avg (psf/ft)
    pub stress_gradient_psf_per_ft: f64,

    /// Converged embedment below the slip surface D (ft)
    pub embedment_below_slip_ft: f64,

    /// Embedment below the slip surface after the depth safety factor (ft)
    pub factored_embedment_ft: f64,

    /// Total pile length below ground (ft)
    pub total_embedment_ft: f64,

    /// Trial depths evaluated by the final solve
    pub iterations: usize,

    pub warnings: Vec<DesignWarning>,
}

impl EmbedmentResult {
    /// Thrust per unit width (kips/ft)
    pub fn thrust_kips_per_ft(&self) -> f64 {
        Kips::from(Pounds(self.thrust_plf)).value()
    }

    /// Lateral resistance each linear foot of the row must supply (kips/ft),
    /// half the thrust per unit width
    pub fn lateral_resistance_kips_per_ft(&self) -> f64 {
        self.thrust_kips_per_ft() / 2.0
    }

    /// Lever arm from the thrust to the slip surface (ft)
    pub fn thrust_arm_ft(&self) -> f64 {
        self.slip_depth_ft - self.thrust_depth_ft
    }
}

/// Governing pile bending moment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendingMoment {
    /// Maximum moment per unit width (kip-ft/ft)
    pub moment_kipft_per_ft: f64,

    /// Depth of zero shear below the slip surface (ft)
    pub zero_shear_below_slip_ft: f64,

    /// Depth of the maximum moment below the top of the pile (ft)
    pub depth_ft: f64,
}

/// Full pin pile design: embedment, moment, and row spacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinPileDesign {
    pub label: String,

    /// Pile diameter (in)
    pub shaft_diameter_in: f64,

    /// Maximum center-to-center spacing of the row (ft)
    pub max_spacing_ft: f64,

    pub embedment: EmbedmentResult,

    pub bending: BendingMoment,

    /// Every warning from the design
    pub warnings: Vec<DesignWarning>,
}

/// Input parameters for a pin pile row.
///
/// ## JSON Example
///
/// ```json
/// {
///   "element": {
///     "label": "Row A",
///     "shaft_diameter_in": 3.5,
///     "kind": { "type": "PinPile", "spacing_widths": 3.0 }
///   },
///   "slide_mass_layer": 0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinPileInput {
    pub element: ElementDefinition,

    /// Index of the deepest layer of the slide mass
    pub slide_mass_layer: usize,
}

impl PinPileInput {
    /// Build the pile and run the design.
    pub fn design(&self, profile: &SoilProfile, settings: &DesignSettings) -> CalcResult<PinPileDesign> {
        let element = self.element.build()?;
        design_embedment_depth(profile, self.slide_mass_layer, &element, settings)
    }
}

/// Design the embedment and moment of a pin pile retaining a slide mass.
///
/// # Arguments
/// * `profile` - Site profile; needs at least one layer below the slide mass
/// * `slide_mass_layer` - Index of the deepest layer that moves
/// * `element` - Pin pile
/// * `settings` - Grid, search, and safety factor settings
pub fn design_embedment_depth(
    profile: &SoilProfile,
    slide_mass_layer: usize,
    element: &FoundationElement,
    settings: &DesignSettings,
) -> CalcResult<PinPileDesign> {
    let max_spacing_ft = element.max_spacing_ft().ok_or_else(|| {
        CalcError::configuration(
            "element kind",
            format!("'{}' is not a pin pile", element.label),
        )
    })?;

    let embedment = calculate_min_depth(profile, slide_mass_layer, element, settings)?;
    let bending = bending_moment(&embedment)?;

    let mut warnings = element.advisories.clone();
    warnings.extend(embedment.warnings.iter().cloned());

    Ok(PinPileDesign {
        label: element.label.clone(),
        shaft_diameter_in: element.shaft_diameter_in,
        max_spacing_ft,
        embedment,
        bending,
        warnings,
    })
}

/// Solve the minimum embedment of a pile below the slip surface.
pub fn calculate_min_depth(
    profile: &SoilProfile,
    slide_mass_layer: usize,
    element: &FoundationElement,
    settings: &DesignSettings,
) -> CalcResult<EmbedmentResult> {
    settings.validate()?;
    let width_ft = element.width_ft();

    let slide = profile.layer(slide_mass_layer).ok_or_else(|| {
        CalcError::invalid_input(
            "slide_mass_layer",
            slide_mass_layer.to_string(),
            format!("Profile has {} layers", profile.len()),
        )
    })?;
    if profile.underlying(slide_mass_layer).is_none() {
        return Err(CalcError::configuration(
            "slide mass",
            "The slide mass needs an intact layer below it",
        ));
    }
    let slip_depth = slide
        .bottom_depth_ft()
        .ok_or_else(|| CalcError::missing_field("slide mass thickness_ft"))?;

    let SlideMassThrust {
        thrust,
        depth: thrust_depth,
        slip_surface_stress: sigma_ds,
    } = slide_mass_thrust(profile, slide_mass_layer, slip_depth, width_ft, settings)?;
    let arm = slip_depth - thrust_depth;

    let mut intact_index = slide_mass_layer + 1;
    let mut warnings = Vec::new();
    loop {
        let intact = profile
            .layer(intact_index)
            .ok_or_else(|| CalcError::Internal {
                message: format!("intact layer {} left the profile", intact_index),
            })?;
        let reference_depth = intact
            .bottom_depth_ft()
            .unwrap_or(intact.top_depth_ft + settings.terminal_layer_thickness_ft);

        let gradient = resistance_gradient(profile, intact, slip_depth, reference_depth, width_ft);
        if !(gradient > 0.0) || !gradient.is_finite() {
            return Err(CalcError::convergence(
                SOLVER,
                0,
                format!(
                    "Lateral resistance of layer {} does not increase with depth below the slip surface",
                    intact_index
                ),
            ));
        }

        let (depth, iterations) = solve_embedment(sigma_ds, gradient, thrust, arm, settings)?;
        let factored = settings.depth_safety_factor * depth;

        if slip_depth + factored > reference_depth {
            if profile.underlying(intact_index).is_some() {
                intact_index += 1;
                continue;
            }
            warnings.push(DesignWarning::EmbedmentBelowProfile {
                required_depth_ft: slip_depth + factored,
                profile_bottom_ft: reference_depth,
            });
        }

        return Ok(EmbedmentResult {
            slide_mass_layer,
            intact_layer: intact_index,
            slip_depth_ft: slip_depth,
            thrust_plf: thrust,
            thrust_depth_ft: thrust_depth,
            slip_surface_stress_psf: sigma_ds,
            stress_gradient_psf_per_ft: gradient,
            embedment_below_slip_ft: depth,
            factored_embedment_ft: factored,
            total_embedment_ft: slip_depth + factored,
            iterations,
            warnings,
        });
    }
}

/// Maximum bending moment in the pile, at the depth of zero shear.
///
/// # Formula
/// x = (−σ_ds + √(σ_ds² + 2·σ_avg·T)) / σ_avg
/// M = T·(x + H − z̄) − σ_avg·x³/6 − σ_ds·x²/2
pub fn bending_moment(embedment: &EmbedmentResult) -> CalcResult<BendingMoment> {
    let s = embedment.slip_surface_stress_psf;
    let g = embedment.stress_gradient_psf_per_ft;
    let t = embedment.thrust_plf;
    if !(g > 0.0) || !(t > 0.0) {
        return Err(CalcError::calculation_failed(
            "bending moment",
            "Requires a positive thrust and stress gradient",
        ));
    }

    let x = thrust_balance_depth(s, g, t);
    let moment = bending_moment_at(s, g, t, embedment.thrust_arm_ft(), x);
    Ok(BendingMoment {
        moment_kipft_per_ft: KipFt::from(FtLb(moment)).value(),
        zero_shear_below_slip_ft: x,
        depth_ft: x + embedment.slip_depth_ft,
    })
}

// =============================================================================
// SLIDE MASS
// =============================================================================

/// Lateral stress σ_L = Kc·c + σ_v·Kq with the coefficients taken at `normalized_depth` (psf)
fn lateral_stress(profile: &SoilProfile, layer: &SoilLayer, depth_ft: f64, normalized_depth: f64) -> f64 {
    lateral_coefficient_kc(layer.phi(), normalized_depth) * layer.cohesion()
        + profile.overburden_pressure(depth_ft) * lateral_coefficient_kq(layer.phi(), normalized_depth)
}

/// Average gradient of the intact soil's lateral stress from the slip surface
/// to `reference_depth` (psf/ft).
///
/// The coefficients stay at the slip surface's normalized depth, so only the
/// overburden grows over the interval.
fn resistance_gradient(
    profile: &SoilProfile,
    intact: &SoilLayer,
    slip_depth: f64,
    reference_depth: f64,
    width_ft: f64,
) -> f64 {
    let normalized = slip_depth / width_ft;
    let at_slip = lateral_stress(profile, intact, slip_depth, normalized);
    let at_reference = lateral_stress(profile, intact, reference_depth, normalized);
    (at_reference - at_slip) / (reference_depth - slip_depth)
}

/// Slide mass layer containing a depth; a layer boundary belongs to the layer above.
fn slide_layer_at(profile: &SoilProfile, slide_mass_layer: usize, depth_ft: f64) -> Option<&SoilLayer> {
    let mut index = profile.layer_index_at(depth_ft)?;
    if index > 0 && profile.layer(index)?.top_depth_ft >= depth_ft {
        index -= 1;
    }
    profile.layer(index.min(slide_mass_layer))
}

/// Integrated lateral stress of the slide mass
#[derive(Debug, Clone, Copy, PartialEq)]
struct SlideMassThrust {
    /// Thrust per unit width (lb/ft)
    thrust: f64,
    /// Depth of the thrust below ground (ft)
    depth: f64,
    /// Stress of the deepest sample, at the slip surface (psf)
    slip_surface_stress: f64,
}

fn slide_mass_thrust(
    profile: &SoilProfile,
    slide_mass_layer: usize,
    slip_depth: f64,
    width_ft: f64,
    settings: &DesignSettings,
) -> CalcResult<SlideMassThrust> {
    let n = settings.slide_grid_points;
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let depth = slip_depth * i as f64 / (n - 1) as f64;
        let layer = slide_layer_at(profile, slide_mass_layer, depth)
            .ok_or_else(|| CalcError::missing_field("slide mass thickness_ft"))?;
        samples.push((depth, lateral_stress(profile, layer, depth, depth / width_ft)));
    }

    let mut thrust = 0.0;
    let mut moment = 0.0;
    for pair in samples.windows(2) {
        let (d0, a) = pair[0];
        let (d1, b) = pair[1];
        let dz = d1 - d0;
        let force = dz * (a + b) / 2.0;
        let centroid = if a + b != 0.0 {
            d0 + dz * (a + 2.0 * b) / (3.0 * (a + b))
        } else {
            d0 + dz / 2.0
        };
        thrust += force;
        moment += force * centroid;
    }

    if !(thrust > 0.0) || !thrust.is_finite() {
        return Err(CalcError::calculation_failed(
            "slide mass thrust",
            format!("The slide mass exerts no lateral thrust (T = {:.1} lb/ft)", thrust),
        ));
    }
    let slip_surface_stress = samples.last().map_or(0.0, |&(_, stress)| stress);
    Ok(SlideMassThrust {
        thrust,
        depth: moment / thrust,
        slip_surface_stress,
    })
}

// =============================================================================
// EMBEDMENT SEARCH
// =============================================================================

/// Moments of the soil reaction above and below the pivot at trial depth `d`
fn reaction_moments(sigma_ds: f64, gradient: f64, thrust: f64, arm: f64, d: f64) -> (f64, f64) {
    let d1 = pivot_depth(sigma_ds, gradient, thrust, d);
    (
        upper_reaction_moment(sigma_ds, gradient, d1, arm),
        lower_reaction_moment(sigma_ds, gradient, d1, d, arm),
    )
}

/// Step from the thrust balance depth until the lower moment catches the
/// upper one, then bisect the bracketing step.
fn solve_embedment(
    sigma_ds: f64,
    gradient: f64,
    thrust: f64,
    arm: f64,
    settings: &DesignSettings,
) -> CalcResult<(f64, usize)> {
    let tolerance = settings.embedment_tolerance;
    let converged = |f1l1: f64, f2l2: f64| f2l2 > 0.0 && (1.0 - f1l1 / f2l2).abs() <= tolerance;

    let mut lo = thrust_balance_depth(sigma_ds, gradient, thrust);
    if !lo.is_finite() {
        return Err(CalcError::convergence(SOLVER, 0, "Thrust balance depth is not finite"));
    }

    let mut iterations = 0;
    let mut hi = loop {
        iterations += 1;
        if iterations > settings.max_iterations {
            return Err(CalcError::convergence(
                SOLVER,
                settings.max_iterations,
                format!("Moment ratio did not reach 1 by {:.2} ft below the slip surface", lo),
            ));
        }
        let d = lo + settings.embedment_step_ft;
        let (f1l1, f2l2) = reaction_moments(sigma_ds, gradient, thrust, arm, d);
        if converged(f1l1, f2l2) {
            return Ok((d, iterations));
        }
        if f2l2 >= f1l1 {
            break d;
        }
        lo = d;
    };

    loop {
        iterations += 1;
        if iterations > settings.max_iterations {
            return Err(CalcError::convergence(
                SOLVER,
                settings.max_iterations,
                format!("Bisection between {:.4} and {:.4} ft did not converge", lo, hi),
            ));
        }
        let mid = (lo + hi) / 2.0;
        let (f1l1, f2l2) = reaction_moments(sigma_ds, gradient, thrust, arm, mid);
        if converged(f1l1, f2l2) {
            return Ok((mid, iterations));
        }
        if f2l2 >= f1l1 {
            hi = mid;
        } else {
            lo = mid;
        }
        if hi - lo <= f64::EPSILON * hi.max(1.0) {
            return Err(CalcError::convergence(
                SOLVER,
                iterations,
                "Moment ratio is discontinuous at the bracket",
            ));
        }
    }
}
