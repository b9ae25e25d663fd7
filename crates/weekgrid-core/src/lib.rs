//! # weekgrid-core
//!
//! Core domain model and grid builder for weekly schedule sheets.
//!
//! This crate provides:
//! - Domain types: `Day`, `TimeSlot`, `Color`, `Activity`, `Occurrence`, `Plan`
//! - The grid builder: `GridBuilder`, `Grid`, `Totals`, `WeekSchedule`
//! - Legend assembly: `LegendEntry`
//! - The `Renderer` trait implemented by output backends
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use weekgrid_core::{Day, GridBuilder, Occurrence, Plan};
//!
//! let plan = Plan::new("My Week")
//!     .activity("Sleep", "B3E0FF".parse().unwrap())
//!     .occurrence(
//!         Occurrence::new("Sleep")
//!             .slots(18)
//!             .on(Day::weekdays())
//!             .at("22:00"),
//!     )
//!     .legend_item("Sleep", "9h per night");
//!
//! let schedule = GridBuilder::new(&plan).build().unwrap();
//! assert_eq!(schedule.totals.get("Sleep"), Some(5 * 18 * 30));
//! ```

pub mod builtin;
pub mod grid;
pub mod legend;
pub mod plan_file;

pub use grid::{Grid, GridBuilder, Overlap, Totals, WeekSchedule};
pub use legend::{format_minutes, LegendEntry};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Time axis
// ============================================================================

/// Number of days in the grid
pub const DAYS_PER_WEEK: usize = 7;

/// Number of half-hour slots in a day
pub const SLOTS_PER_DAY: usize = 48;

/// Length of one slot in minutes
pub const SLOT_MINUTES: u32 = 30;

/// Minutes in a full week, the sum every set of totals must reach
pub const MINUTES_PER_WEEK: u32 = 7 * 24 * 60;

/// Day of the week, Monday = 0 through Sunday = 6
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
    pub const MONDAY: Self = Self(0);
    pub const TUESDAY: Self = Self(1);
    pub const WEDNESDAY: Self = Self(2);
    pub const THURSDAY: Self = Self(3);
    pub const FRIDAY: Self = Self(4);
    pub const SATURDAY: Self = Self(5);
    pub const SUNDAY: Self = Self(6);

    pub const ALL: [Self; DAYS_PER_WEEK] = [
        Self::MONDAY,
        Self::TUESDAY,
        Self::WEDNESDAY,
        Self::THURSDAY,
        Self::FRIDAY,
        Self::SATURDAY,
        Self::SUNDAY,
    ];

    pub fn new(index: u8) -> Result<Self, PlanError> {
        if (index as usize) < DAYS_PER_WEEK {
            Ok(Self(index))
        } else {
            Err(PlanError::InvalidDay(index))
        }
    }

    /// Monday to Friday
    pub fn weekdays() -> Vec<Self> {
        Self::ALL[..5].to_vec()
    }

    /// Saturday and Sunday
    pub fn weekend() -> Vec<Self> {
        Self::ALL[5..].to_vec()
    }

    /// Every day of the week
    pub fn every_day() -> Vec<Self> {
        Self::ALL.to_vec()
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// English day name
    pub fn name(self) -> &'static str {
        ENGLISH_DAY_NAMES[self.index()]
    }
}

impl TryFrom<u8> for Day {
    type Error = PlanError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const ENGLISH_DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A 30-minute slot of a day; slot `s` covers `[s*30, s*30+30)` minutes past midnight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// Slot at `index`, wrapped into the day (`index mod 48`)
    pub const fn wrapping(index: usize) -> Self {
        Self((index % SLOTS_PER_DAY) as u8)
    }

    /// Resolve a start time of the form `HH:MM` to the slot containing it.
    ///
    /// Hours run 00..23 and minutes must be `00` or `30`, so the slot is
    /// `hour * 2 + (minute == 30)`.
    pub fn parse(value: &str) -> Result<Self, PlanError> {
        let time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .map_err(|_| PlanError::InvalidTime(value.to_string()))?;
        let half = match time.minute() {
            0 => 0,
            30 => 1,
            _ => return Err(PlanError::InvalidTime(value.to_string())),
        };
        Ok(Self((time.hour() * 2 + half) as u8))
    }

    /// All 48 slots of a day, from 00:00 to 23:30
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLOTS_PER_DAY).map(Self::wrapping)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Slot `n` positions later, wrapping past midnight within the same day
    pub const fn offset(self, n: usize) -> Self {
        Self::wrapping(self.index() + n)
    }

    /// Minutes past midnight at which the slot starts
    pub const fn start_minutes(self) -> u32 {
        self.0 as u32 * SLOT_MINUTES
    }

    /// `HH:MM` label of the slot start
    pub fn label(self) -> String {
        let minutes = self.start_minutes();
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

impl FromStr for TimeSlot {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// ============================================================================
// Activities
// ============================================================================

/// RGB display color, written as six hex digits (`FFE5B4`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const WHITE: Self = Self(0xFF_FF_FF);

    pub const fn rgb(value: u32) -> Self {
        Self(value & 0xFF_FF_FF)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for Color {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PlanError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Self)
            .map_err(|_| PlanError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

/// A named activity and the color its cells are painted with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Activity {
    /// Display name, unique within a plan
    pub name: String,
    pub color: Color,
}

impl Activity {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// One recurring placement of an activity on the week grid
///
/// The activity is referenced by its canonical name. `label` distinguishes
/// variants of the same activity (e.g. "weekend") and never takes part in
/// name resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Occurrence {
    pub activity: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Length in 30-minute slots
    pub duration: u32,
    pub days: Vec<Day>,
    /// Start time as `HH:MM`, resolved when the grid is built
    pub start: String,
}

impl Occurrence {
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            label: None,
            duration: 1,
            days: Vec::new(),
            start: "00:00".into(),
        }
    }

    /// Set the length in 30-minute slots
    pub fn slots(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Set the days the occurrence applies to
    pub fn on(mut self, days: impl IntoIterator<Item = Day>) -> Self {
        self.days = days.into_iter().collect();
        self
    }

    /// Set the start time (`HH:MM`)
    pub fn at(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    /// Tag this occurrence as a named variant of its activity
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn start_slot(&self) -> Result<TimeSlot, PlanError> {
        TimeSlot::parse(&self.start)
    }

    /// Minutes covered per week if nothing overlaps it, saturating at `u32::MAX`
    pub fn declared_minutes(&self) -> u32 {
        let days = u32::try_from(self.days.len()).unwrap_or(u32::MAX);
        self.duration
            .saturating_mul(SLOT_MINUTES)
            .saturating_mul(days)
    }
}

/// A row of the legend display order: which activity, and its author-written constraints
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendItem {
    pub activity: String,
    pub description: String,
}

// ============================================================================
// Plan
// ============================================================================

/// Everything the grid builder needs: activity catalog, occurrences, legend order, labels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Sheet title
    pub title: String,
    /// Sentinel activity filling every unassigned cell
    pub free_time: Activity,
    /// Activity catalog (excluding free time)
    pub activities: Vec<Activity>,
    /// Occurrences, in declaration order
    pub occurrences: Vec<Occurrence>,
    /// Legend rows, in display order
    pub legend: Vec<LegendItem>,
    /// Header text above the legend
    pub legend_title: String,
    /// Column headers, Monday first
    pub day_names: [String; DAYS_PER_WEEK],
}

impl Plan {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            free_time: Activity::new("Free time", Color::WHITE),
            activities: Vec::new(),
            occurrences: Vec::new(),
            legend: Vec::new(),
            legend_title: "Activities, frequencies, constraints and total time:".into(),
            day_names: ENGLISH_DAY_NAMES.map(String::from),
        }
    }

    /// Add an activity to the catalog
    pub fn activity(mut self, name: impl Into<String>, color: Color) -> Self {
        self.activities.push(Activity::new(name, color));
        self
    }

    /// Append an occurrence; later occurrences win on overlapping cells
    pub fn occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrences.push(occurrence);
        self
    }

    /// Append a legend row
    pub fn legend_item(mut self, activity: impl Into<String>, description: impl Into<String>) -> Self {
        self.legend.push(LegendItem {
            activity: activity.into(),
            description: description.into(),
        });
        self
    }

    /// Rename or recolor the free-time sentinel
    pub fn free_time(mut self, name: impl Into<String>, color: Color) -> Self {
        self.free_time = Activity::new(name, color);
        self
    }

    pub fn legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_title = title.into();
        self
    }

    pub fn day_names(mut self, names: [&str; DAYS_PER_WEEK]) -> Self {
        self.day_names = names.map(String::from);
        self
    }

    /// Look up an activity by name, free time included
    pub fn find_activity(&self, name: &str) -> Option<&Activity> {
        if self.free_time.name == name {
            return Some(&self.free_time);
        }
        self.activities.iter().find(|a| a.name == name)
    }

    pub fn day_name(&self, day: Day) -> &str {
        &self.day_names[day.index()]
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a built week to the output format
    fn render(&self, plan: &Plan, schedule: &WeekSchedule) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Error in the static plan, raised before any output is produced
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid start time '{0}': expected HH:MM with minutes 00 or 30")]
    InvalidTime(String),

    #[error("Occurrence of '{0}' has a zero duration")]
    ZeroDuration(String),

    #[error("Invalid day index {0}: expected 0 (Monday) to 6 (Sunday)")]
    InvalidDay(u8),

    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    #[error("Duplicate activity: {0}")]
    DuplicateActivity(String),

    #[error("Invalid color '{0}': expected six hex digits")]
    InvalidColor(String),

    #[error("Plan file error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_slot_resolution() {
        assert_eq!(TimeSlot::parse("00:00").unwrap().index(), 0);
        assert_eq!(TimeSlot::parse("00:30").unwrap().index(), 1);
        assert_eq!(TimeSlot::parse("07:30").unwrap().index(), 15);
        assert_eq!(TimeSlot::parse("22:00").unwrap().index(), 44);
        assert_eq!(TimeSlot::parse("23:30").unwrap().index(), 47);
    }

    #[test]
    fn start_slot_rejects_malformed_times() {
        for bad in ["07:15", "24:00", "12:60", "noon", "", "7", "12:00:00"] {
            assert!(
                matches!(TimeSlot::parse(bad), Err(PlanError::InvalidTime(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn slot_labels_and_wrap() {
        let labels: Vec<String> = TimeSlot::all().map(TimeSlot::label).collect();
        assert_eq!(labels.len(), SLOTS_PER_DAY);
        assert_eq!(labels[0], "00:00");
        assert_eq!(labels[19], "09:30");
        assert_eq!(labels[47], "23:30");

        let late = TimeSlot::wrapping(46);
        assert_eq!(late.offset(2).index(), 0);
        assert_eq!(late.offset(3).index(), 1);
        assert_eq!(TimeSlot::wrapping(100).index(), 4);
    }

    #[test]
    fn day_bounds() {
        assert_eq!(Day::new(6).unwrap(), Day::SUNDAY);
        assert!(matches!(Day::new(7), Err(PlanError::InvalidDay(7))));
        assert_eq!(Day::weekdays().len(), 5);
        assert_eq!(Day::weekend(), vec![Day::SATURDAY, Day::SUNDAY]);
        assert_eq!(Day::try_from(2).unwrap(), Day::WEDNESDAY);
        assert_eq!(u8::from(Day::FRIDAY), 4);
        assert_eq!(Day::MONDAY.to_string(), "Monday");
    }

    #[test]
    fn color_parsing() {
        let color: Color = "FFE5B4".parse().unwrap();
        assert_eq!(color.value(), 0xFFE5B4);
        assert_eq!(color.to_string(), "FFE5B4");
        assert_eq!("#b3e0ff".parse::<Color>().unwrap(), Color::rgb(0xB3E0FF));
        assert!("FFF".parse::<Color>().is_err());
        assert!("GGGGGG".parse::<Color>().is_err());
    }

    #[test]
    fn color_rejects_signs_and_spaces() {
        // from_str_radix alone would take a leading sign
        for s in ["+FFFFF", "-FFFFF", "FF FFF", "#+FFFFF"] {
            assert!(
                matches!(s.parse::<Color>(), Err(PlanError::InvalidColor(_))),
                "{s:?} should be rejected"
            );
        }
    }

    #[test]
    fn occurrence_builder() {
        let occurrence = Occurrence::new("Sleep")
            .slots(23)
            .on(Day::weekend())
            .at("22:00")
            .label("weekend");

        assert_eq!(occurrence.activity, "Sleep");
        assert_eq!(occurrence.label.as_deref(), Some("weekend"));
        assert_eq!(occurrence.start_slot().unwrap().index(), 44);
        assert_eq!(occurrence.declared_minutes(), 2 * 23 * 30);
    }

    #[test]
    fn declared_minutes_saturates() {
        let occurrence = Occurrence::new("Sleep").slots(u32::MAX).on(Day::ALL);
        assert_eq!(occurrence.declared_minutes(), u32::MAX);
    }

    #[test]
    fn plan_lookup_includes_free_time() {
        let plan = Plan::new("Test")
            .activity("Work", Color::rgb(0xFFB3BA))
            .free_time("Idle", Color::WHITE);

        assert_eq!(plan.find_activity("Work").unwrap().color.value(), 0xFFB3BA);
        assert_eq!(plan.find_activity("Idle").unwrap().color, Color::WHITE);
        assert!(plan.find_activity("Free time").is_none());
        assert_eq!(plan.day_name(Day::SUNDAY), "Sunday");
    }
}
