//! # Site Project
//!
//! The `SiteProject` struct is the root container for one site: the boring
//! log, the design settings, and every foundation element designed against
//! them. Projects serialize as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! SiteProject
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: DesignSettings (grid, safety factors, solver bounds)
//! ├── profile: SoilProfile (boring log)
//! └── items: HashMap<Uuid, DesignItem> (piers and pin pile rows)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pile_core::project::SiteProject;
//!
//! let project = SiteProject::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = project.to_json().unwrap();
//! let loaded = SiteProject::from_json(&json).unwrap();
//! assert_eq!(loaded.meta.job_id, "25-042");
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{DesignItem, DesignOutcome};
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::soil::SoilProfile;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProject {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Design settings shared by every item
    #[serde(default)]
    pub settings: DesignSettings,

    /// Site boring log
    #[serde(default)]
    pub profile: SoilProfile,

    /// All design items, keyed by UUID
    #[serde(default)]
    pub items: HashMap<Uuid, DesignItem>,
}

impl SiteProject {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        SiteProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            profile: SoilProfile::new(),
            items: HashMap::new(),
        }
    }

    /// Parse a project, rejecting files written for another schema version.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let project: SiteProject = serde_json::from_str(json)?;
        if project.meta.version != SCHEMA_VERSION {
            return Err(CalcError::VersionMismatch {
                file_version: project.meta.version,
                expected_version: SCHEMA_VERSION.to_string(),
            });
        }
        project.settings.validate()?;
        Ok(project)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a design item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: DesignItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a design item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<DesignItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a design item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&DesignItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Run every item against the site profile, ordered by label.
    ///
    /// A failing item does not stop the others; its error is kept in the report.
    pub fn run_all(&self) -> Vec<ItemReport> {
        let mut reports: Vec<ItemReport> = self
            .items
            .iter()
            .map(|(id, item)| ItemReport {
                id: *id,
                label: item.label().to_string(),
                design_type: item.design_type().to_string(),
                outcome: item.run(&self.profile, &self.settings),
            })
            .collect();
        reports.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
        reports
    }
}

impl Default for SiteProject {
    fn default() -> Self {
        SiteProject::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Outcome of one design item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: Uuid,
    pub label: String,
    pub design_type: String,
    pub outcome: Result<DesignOutcome, CalcError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CapacityDemand, HelicalPierInput, PinPileInput};
    use crate::foundation::{ElementDefinition, ElementKind, StructuralSpecs};
    use crate::soil::SoilProperties;

    fn pier(label: &str) -> DesignItem {
        DesignItem::HelicalPier(HelicalPierInput {
            element: ElementDefinition {
                label: label.to_string(),
                shaft_diameter_in: 2.875,
                kind: ElementKind::HelicalPier {
                    plate_diameters_in: vec![10.0, 12.0, 14.0],
                },
                structural_specs: StructuralSpecs::new(),
            },
            demand: CapacityDemand::PerPier { capacity_lb: 20_000.0 },
            safety_factor: None,
            batter_angle_deg: None,
        })
    }

    fn site() -> SiteProject {
        let mut project = SiteProject::new("Jane Engineer", "25-042", "Test Client");
        project.profile.insert(SoilProperties::new(110.0, 20.0, 200.0), 0.0).unwrap();
        project.profile.insert(SoilProperties::new(125.0, 36.0, 0.0), 6.0).unwrap();
        project.profile.terminate(40.0).unwrap();
        project
    }

    #[test]
    fn test_project_creation() {
        let project = SiteProject::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert!(project.profile.is_empty());
    }

    #[test]
    fn test_project_roundtrip() {
        let mut project = site();
        project.add_item(pier("HP-1"));
        let json = project.to_json().unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("HelicalPier"));

        let roundtrip = SiteProject::from_json(&json).unwrap();
        assert_eq!(roundtrip, project);
    }

    #[test]
    fn test_version_mismatch() {
        let mut project = site();
        project.meta.version = "9.9.9".to_string();
        let json = serde_json::to_string(&project).unwrap();
        let err = SiteProject::from_json(&json).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_malformed_json() {
        let err = SiteProject::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = site();
        let id = project.add_item(pier("HP-1"));
        assert_eq!(project.item_count(), 1);
        assert_eq!(project.get_item(&id).unwrap().label(), "HP-1");
        assert!(project.remove_item(&id).is_some());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_run_all() {
        let mut project = site();
        project.add_item(pier("HP-2"));
        project.add_item(pier("HP-1"));
        project.add_item(DesignItem::PinPile(PinPileInput {
            element: ElementDefinition {
                label: "Row A".to_string(),
                shaft_diameter_in: 3.5,
                kind: ElementKind::PinPile { spacing_widths: 3.0 },
                structural_specs: StructuralSpecs::new(),
            },
            slide_mass_layer: 0,
        }));
        // Unknown shaft size: reported, does not stop the run
        project.add_item(DesignItem::HelicalPier(match pier("HP-3") {
            DesignItem::HelicalPier(mut input) => {
                input.element.shaft_diameter_in = 3.0;
                input
            }
            other => unreachable!("{:?}", other),
        }));

        let reports = project.run_all();
        let labels: Vec<&str> = reports.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["HP-1", "HP-2", "HP-3", "Row A"]);
        assert!(reports[0].outcome.is_ok());
        assert!(matches!(reports[2].outcome, Err(CalcError::Configuration { .. })));
        assert!(matches!(reports[3].outcome, Ok(DesignOutcome::PinPile(_))));
    }
}
