//! TOML plan files
//!
//! A plan file replaces the built-in week. Every top-level key is optional;
//! occurrences keep their file order, which decides overlaps.
//!
//! ```toml
//! title = "My Week"
//! legend_title = "Activities and weekly time:"
//! day_names = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
//! free_time = { name = "Free", color = "FFFFFF" }
//!
//! [[activities]]
//! name = "Sleep"
//! color = "B3E0FF"
//!
//! [[occurrences]]
//! activity = "Sleep"
//! duration = 18          # half-hour slots
//! days = [0, 1, 2, 3, 4] # Monday = 0
//! start = "22:00"
//!
//! [[occurrences]]
//! activity = "Sleep"
//! label = "weekend"
//! duration = 23
//! days = [5, 6]
//! start = "22:00"
//!
//! [[legend]]
//! activity = "Sleep"
//! description = "9h per night, 11h30 on weekends"
//! ```

use crate::{Activity, LegendItem, Occurrence, Plan, PlanError, DAYS_PER_WEEK};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const DEFAULT_TITLE: &str = "Weekly Schedule";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    title: Option<String>,
    legend_title: Option<String>,
    day_names: Option<[String; DAYS_PER_WEEK]>,
    free_time: Option<Activity>,
    #[serde(default)]
    activities: Vec<Activity>,
    #[serde(default)]
    occurrences: Vec<Occurrence>,
    #[serde(default)]
    legend: Vec<LegendItem>,
}

impl From<PlanFile> for Plan {
    fn from(file: PlanFile) -> Self {
        let mut plan = Self::new(file.title.unwrap_or_else(|| DEFAULT_TITLE.into()));
        if let Some(title) = file.legend_title {
            plan.legend_title = title;
        }
        if let Some(names) = file.day_names {
            plan.day_names = names;
        }
        if let Some(free_time) = file.free_time {
            plan.free_time = free_time;
        }
        plan.activities = file.activities;
        plan.occurrences = file.occurrences;
        plan.legend = file.legend;
        plan
    }
}

/// Parse a plan from TOML source
pub fn parse_plan(source: &str) -> Result<Plan, PlanError> {
    let file: PlanFile = toml::from_str(source).map_err(|e| PlanError::Parse(e.to_string()))?;
    debug!(
        activities = file.activities.len(),
        occurrences = file.occurrences.len(),
        "Parsed plan file"
    );
    Ok(file.into())
}

/// Read and parse a plan file
pub fn load_plan(path: &Path) -> Result<Plan, PlanError> {
    let source = std::fs::read_to_string(path)?;
    parse_plan(&source)
}
