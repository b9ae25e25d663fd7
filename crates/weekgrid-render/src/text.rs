//! Plain-text week preview
//!
//! Renders the grid as fixed-width columns followed by the legend, for a
//! quick look in the terminal.
//!
//! ## Example Output
//!
//! ```text
//! Planning Personnel
//!
//!        Lundi          Mardi          ...
//! 00:00  Sommeil        Sommeil        ...
//! 00:30  Sommeil        Sommeil        ...
//!
//! Activités, fréquences, contraintes et temps total:
//!   Sommeil             47h30  9h par nuit (jusqu'à 10h le weekend)
//!
//! Per day:
//!                       Lundi          Mardi          ...
//!   Sommeil             7h00           7h00           ...
//! ```

use std::fmt::Write;
use weekgrid_core::{format_minutes, Day, Plan, RenderError, Renderer, TimeSlot, WeekSchedule};

/// Plain-text renderer
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Characters per day column, names are cut to fit
    pub column_width: usize,
    /// Append the list of overwritten cells
    pub show_overlaps: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            column_width: 15,
            show_overlaps: false,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    /// Include overwritten cells after the legend
    pub fn with_overlaps(mut self) -> Self {
        self.show_overlaps = true;
        self
    }

    fn cell(&self, text: &str) -> String {
        let width = self.column_width;
        let clipped: String = text.chars().take(width - 1).collect();
        format!("{clipped:<width$}")
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, plan: &Plan, schedule: &WeekSchedule) -> Result<String, RenderError> {
        if self.column_width < 2 {
            return Err(RenderError::InvalidData(
                "column width must be at least 2".into(),
            ));
        }

        let mut out = String::new();
        let fmt_err = |e: std::fmt::Error| RenderError::Format(e.to_string());

        writeln!(out, "{}", plan.title).map_err(fmt_err)?;
        writeln!(out).map_err(fmt_err)?;

        let header: String = Day::ALL.iter().map(|&d| self.cell(plan.day_name(d))).collect();
        writeln!(out, "{:<7}{}", "", header.trim_end()).map_err(fmt_err)?;

        for slot in TimeSlot::all() {
            let row: String = Day::ALL
                .iter()
                .map(|&d| self.cell(schedule.grid.name_at(d, slot)))
                .collect();
            writeln!(out, "{:<7}{}", slot.label(), row.trim_end()).map_err(fmt_err)?;
        }

        writeln!(out).map_err(fmt_err)?;
        writeln!(out, "{}", plan.legend_title).map_err(fmt_err)?;

        let name_width = schedule
            .legend
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &schedule.legend {
            let total = entry.total_label().unwrap_or_default();
            writeln!(
                out,
                "  {:<name_width$}  {:>7}  {}",
                entry.name, total, entry.description
            )
            .map_err(fmt_err)?;
        }

        // Per-day footer, only for legend rows that carry a total
        let counted: Vec<&str> = schedule
            .legend
            .iter()
            .filter(|e| e.minutes.is_some())
            .map(|e| e.name.as_str())
            .collect();
        if !counted.is_empty() {
            writeln!(out).map_err(fmt_err)?;
            writeln!(out, "Per day:").map_err(fmt_err)?;
            writeln!(out, "{:<pad$}{}", "", header.trim_end(), pad = name_width + 4)
                .map_err(fmt_err)?;
            for name in counted {
                let row: String = Day::ALL
                    .iter()
                    .map(|&d| self.cell(&format_minutes(schedule.grid.day_minutes(d, name))))
                    .collect();
                writeln!(out, "  {name:<name_width$}  {}", row.trim_end()).map_err(fmt_err)?;
            }
        }

        if self.show_overlaps && !schedule.overlaps.is_empty() {
            writeln!(out).map_err(fmt_err)?;
            writeln!(out, "Overwritten cells:").map_err(fmt_err)?;
            for overlap in &schedule.overlaps {
                writeln!(
                    out,
                    "  {} {}  {} -> {}",
                    plan.day_name(overlap.day),
                    overlap.slot,
                    overlap.previous,
                    overlap.winner
                )
                .map_err(fmt_err)?;
            }
        }

        Ok(out)
    }
}
