//! Legend assembly
//!
//! One entry per legend item of the plan, in display order, with the
//! catalog color and the grid-counted weekly total.

use crate::{Color, Plan, Totals};

/// A row of the legend side table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    /// Swatch color, `None` for names missing from the catalog
    pub color: Option<Color>,
    pub description: String,
    /// Weekly minutes, `None` when no occurrence names the activity
    pub minutes: Option<u32>,
}

impl LegendEntry {
    /// Total formatted as `{hours}h{minutes:02}`, blank when absent
    pub fn total_label(&self) -> Option<String> {
        self.minutes.map(format_minutes)
    }
}

/// Format minutes as `{hours}h{minutes:02}` (`630` → `10h30`)
pub fn format_minutes(minutes: u32) -> String {
    format!("{}h{:02}", minutes / 60, minutes % 60)
}

pub(crate) fn build_legend(plan: &Plan, totals: &Totals) -> Vec<LegendEntry> {
    plan.legend
        .iter()
        .map(|item| LegendEntry {
            name: item.activity.clone(),
            color: plan.find_activity(&item.activity).map(|a| a.color),
            description: item.description.clone(),
            minutes: totals.get(&item.activity),
        })
        .collect()
}
