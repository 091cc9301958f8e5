//! # PileDesign CLI Application
//!
//! Runs every design item of a site project and prints a narrative report
//! followed by the JSON form of each result.
//!
//! ```text
//! pile_cli site.json     run a saved site project
//! pile_cli               run the built-in demo site with prompted inputs
//! ```

use std::io::{self, BufRead, Write};

use pile_core::calculations::{
    CapacityDemand, DesignItem, DesignOutcome, HelicalPierDesign, HelicalPierInput, LateralCapacity, PinPileDesign,
    PinPileInput,
};
use pile_core::foundation::{ElementDefinition, ElementKind, StructuralSpecs};
use pile_core::project::{ItemReport, SiteProject};
use pile_core::soil::{SoilProperties, UscsSymbol};
use pile_core::{CalcError, CalcResult};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("PileDesign CLI - Helical Pier and Pin Pile Design");
    println!("=================================================");
    println!();

    let project = match std::env::args().nth(1) {
        Some(path) => load_project(&path),
        None => demo_project(),
    };

    match project {
        Ok(project) => {
            print_profile(&project);
            for report in project.run_all() {
                print_report(&report);
            }
        }
        Err(e) => print_error(&e),
    }
}

fn load_project(path: &str) -> CalcResult<SiteProject> {
    let json = std::fs::read_to_string(path).map_err(|e| CalcError::SerializationError {
        reason: format!("Could not read {}: {}", path, e),
    })?;
    SiteProject::from_json(&json)
}

/// Fill over peat over dense sand, with a pier and a pin pile row
fn demo_project() -> CalcResult<SiteProject> {
    println!("No project file given. Running the demo site...");
    println!();

    let capacity_lb = prompt_f64("Enter required pier capacity (lb) [20000]: ", 20_000.0);
    let safety_factor = prompt_f64("Enter safety factor [2.0]: ", 2.0);
    println!();

    let mut project = SiteProject::new("Demo Engineer", "DEMO-1", "Demo Client");
    project.settings.default_safety_factor = safety_factor;
    project.settings.validate()?;

    project
        .profile
        .insert(SoilProperties::new(110.0, 20.0, 200.0).with_uscs(UscsSymbol::SC), 0.0)?;
    project
        .profile
        .insert(SoilProperties::new(70.0, 0.0, 50.0).with_uscs(UscsSymbol::PT), 4.0)?;
    project
        .profile
        .insert(SoilProperties::new(125.0, 36.0, 0.0).with_uscs(UscsSymbol::SP), 9.0)?;
    project.profile.terminate(40.0)?;

    project.add_item(DesignItem::HelicalPier(HelicalPierInput {
        element: ElementDefinition {
            label: "HP-1".to_string(),
            shaft_diameter_in: 2.875,
            kind: ElementKind::HelicalPier {
                plate_diameters_in: vec![10.0, 12.0, 14.0],
            },
            structural_specs: StructuralSpecs::new(),
        },
        demand: CapacityDemand::PerPier { capacity_lb },
        safety_factor: None,
        batter_angle_deg: None,
    }));

    project.add_item(DesignItem::PinPile(PinPileInput {
        element: ElementDefinition {
            label: "Pin pile row A".to_string(),
            shaft_diameter_in: 3.5,
            kind: ElementKind::PinPile { spacing_widths: 3.0 },
            structural_specs: StructuralSpecs::new(),
        },
        slide_mass_layer: 1,
    }));

    Ok(project)
}

fn print_profile(project: &SiteProject) {
    println!("Site: {} / {} ({})", project.meta.job_id, project.meta.client, project.meta.engineer);
    println!();
    println!("Soil profile:");
    for (i, layer) in project.profile.layers().enumerate() {
        let bottom = layer
            .bottom_depth_ft()
            .map(|b| format!("{:>6.1}", b))
            .unwrap_or_else(|| "   ...".to_string());
        println!(
            "  [{}] {:>6.1} to {} ft  {}{}",
            i,
            layer.top_depth_ft,
            bottom,
            layer.describe(),
            if layer.is_hazard() { "  (hazard)" } else { "" }
        );
    }
    println!();
}

fn print_report(report: &ItemReport) {
    println!("═══════════════════════════════════════");
    println!("  {} ({})", report.label, report.design_type);
    println!("═══════════════════════════════════════");
    println!();

    match &report.outcome {
        Ok(outcome) => {
            match outcome {
                DesignOutcome::HelicalPier(design) => print_helical_pier(design),
                DesignOutcome::PinPile(design) => print_pin_pile(design),
            }

            if !outcome.warnings().is_empty() {
                println!();
                for warning in outcome.warnings() {
                    println!("{}", warning);
                    println!();
                }
            }

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(outcome) {
                println!("{}", json);
            }
        }
        Err(e) => print_error(e),
    }
    println!();
}

fn print_helical_pier(design: &HelicalPierDesign) {
    let capacity = &design.capacity;
    println!(
        "Shaft {:.3} in, net plate area {:.2} ft², safety factor {:.1}",
        design.element.shaft_diameter_in, design.element.bearing_area_sqft, capacity.safety_factor
    );
    println!("Required capacity: {:.0} lb", capacity.required_capacity_lb);

    match &capacity.bearing {
        Some(point) => {
            println!(
                "The required capacity is achieved at {:.1} ft below ground surface in layer {}.",
                point.depth_ft, point.layer_index
            );
            println!("Achieved capacity: {:.0} lb {}", point.capacity_lb, status_icon(true));
            if let Some(torque) = capacity.torque_estimate_ftlb {
                println!("Estimated installation torque: {:.0} ft-lb", torque);
            }
        }
        None => println!(
            "No bearing depth found (searched to {:.1} ft) {}",
            capacity.searched_to_ft,
            status_icon(false)
        ),
    }

    if let Some(LateralCapacity::Passive(passive)) = &design.bearing_lateral {
        println!(
            "Lateral capacity of bearing stratum: {:.1} lb ultimate, {:.1} lb horizontal at {:.0}° batter",
            passive.ultimate_capacity_lb, passive.horizontal_component_lb, passive.batter_angle_deg
        );
    }

    for check in &design.buckling_checks {
        println!(
            "Buckling check {:.1} to {:.1} ft: allowable {:.0} lb vs {:.0} lb {}",
            check.top_depth_ft,
            check.bottom_depth_ft,
            check.allowable_capacity_lb,
            check.structural_capacity_lb,
            status_icon(check.passes())
        );
    }

    println!();
    println!("RESULT: {}", if design.passes() { "PASS" } else { "FAIL" });
}

fn print_pin_pile(design: &PinPileDesign) {
    let e = &design.embedment;
    println!(
        "Minimum pile diameter {:.3} in at a maximum spacing of {:.2} ft",
        design.shaft_diameter_in, design.max_spacing_ft
    );
    println!(
        "Slide mass thrust: {:.2} kips/ft acting {:.2} ft below the top of the pile",
        e.thrust_kips_per_ft(),
        e.thrust_depth_ft
    );
    println!("Lateral resistance per linear foot: {:.2} kips/ft", e.lateral_resistance_kips_per_ft());
    println!("Slip surface at {:.2} ft, intact layer {}", e.slip_depth_ft, e.intact_layer);
    println!(
        "Minimum embedment below the slip surface: {:.2} ft ({:.2} ft with safety factor)",
        e.embedment_below_slip_ft, e.factored_embedment_ft
    );
    println!("Total pile embedment: {:.2} ft", e.total_embedment_ft);
    println!(
        "Maximum moment: {:.2} kip-ft/ft at {:.2} ft below the top of the pile",
        design.bending.moment_kipft_per_ft, design.bending.depth_ft
    );
}

fn print_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
