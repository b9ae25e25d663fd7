//! Week grid builder
//!
//! Resolves a [`Plan`]'s occurrences into a 7 × 48 grid of half-hour cells.
//!
//! ## Algorithm
//!
//! 1. Every cell starts as the plan's free-time activity
//! 2. Occurrences are applied in declaration order; for each day of an
//!    occurrence, `duration` consecutive slots from its start slot are written,
//!    wrapping modulo 48 inside the same day's column
//! 3. A cell written twice keeps the last write (last-write-wins); each
//!    overwrite is recorded as an [`Overlap`]
//! 4. Totals are counted from the final grid, so overwritten cells are never
//!    counted twice; free time takes whatever remains of the 10080 minutes

use crate::legend::{build_legend, LegendEntry};
use crate::{
    Activity, Color, Day, Plan, PlanError, TimeSlot, DAYS_PER_WEEK, MINUTES_PER_WEEK,
    SLOTS_PER_DAY, SLOT_MINUTES,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Palette index of the free-time activity
const FREE: usize = 0;

/// A fully populated week: every (day, slot) cell holds exactly one activity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Index 0 is free time, then the plan's catalog in order
    palette: Vec<Activity>,
    /// Day-major palette indices, `DAYS_PER_WEEK * SLOTS_PER_DAY` long
    cells: Vec<usize>,
}

impl Grid {
    fn new(palette: Vec<Activity>) -> Self {
        Self {
            palette,
            cells: vec![FREE; DAYS_PER_WEEK * SLOTS_PER_DAY],
        }
    }

    const fn position(day: Day, slot: TimeSlot) -> usize {
        day.index() * SLOTS_PER_DAY + slot.index()
    }

    /// Write `activity` into a cell, returning the previous occupant if it was
    /// a different, non-free activity
    fn write(&mut self, day: Day, slot: TimeSlot, activity: usize) -> Option<usize> {
        let cell = &mut self.cells[Self::position(day, slot)];
        let previous = std::mem::replace(cell, activity);
        (previous != FREE && previous != activity).then_some(previous)
    }

    pub fn activity_at(&self, day: Day, slot: TimeSlot) -> &Activity {
        &self.palette[self.cells[Self::position(day, slot)]]
    }

    pub fn name_at(&self, day: Day, slot: TimeSlot) -> &str {
        &self.activity_at(day, slot).name
    }

    pub fn color_at(&self, day: Day, slot: TimeSlot) -> Color {
        self.activity_at(day, slot).color
    }

    pub fn free_time(&self) -> &Activity {
        &self.palette[FREE]
    }

    /// The 48 cells of one day, from 00:00
    pub fn day(&self, day: Day) -> impl Iterator<Item = (TimeSlot, &Activity)> + '_ {
        TimeSlot::all().map(move |slot| (slot, self.activity_at(day, slot)))
    }

    /// Every cell, day by day
    pub fn cells(&self) -> impl Iterator<Item = (Day, TimeSlot, &Activity)> + '_ {
        Day::ALL
            .into_iter()
            .flat_map(move |day| self.day(day).map(move |(slot, a)| (day, slot, a)))
    }

    /// Number of cells holding `name`
    pub fn count(&self, name: &str) -> usize {
        self.cells().filter(|(_, _, a)| a.name == name).count()
    }

    /// Weekly minutes spent on `name`
    pub fn minutes(&self, name: &str) -> u32 {
        self.count(name) as u32 * SLOT_MINUTES
    }

    /// Minutes spent on `name` during a single day
    pub fn day_minutes(&self, day: Day, name: &str) -> u32 {
        self.day(day).filter(|(_, a)| a.name == name).count() as u32 * SLOT_MINUTES
    }
}

/// A cell written by more than one occurrence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlap {
    pub day: Day,
    pub slot: TimeSlot,
    /// Activity that was overwritten
    pub previous: String,
    /// Activity that now holds the cell
    pub winner: String,
}

/// Weekly minutes per activity, counted from the final grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Totals {
    minutes: BTreeMap<String, u32>,
    free_time: String,
}

impl Totals {
    /// Count `names` on the grid; free time is the remainder of the week
    pub fn from_grid<'a>(grid: &Grid, names: impl IntoIterator<Item = &'a str>) -> Self {
        let free_time = grid.free_time().name.clone();
        let mut minutes: BTreeMap<String, u32> = names
            .into_iter()
            .filter(|name| *name != free_time)
            .map(|name| (name.to_string(), grid.minutes(name)))
            .collect();

        let assigned: u32 = minutes.values().sum();
        let free = MINUTES_PER_WEEK - assigned;
        debug_assert_eq!(free, grid.minutes(&free_time));
        minutes.insert(free_time.clone(), free);

        Self { minutes, free_time }
    }

    /// Minutes for `name`, `None` if no occurrence ever named it
    pub fn get(&self, name: &str) -> Option<u32> {
        self.minutes.get(name).copied()
    }

    pub fn free_time(&self) -> u32 {
        self.minutes[&self.free_time]
    }

    /// Sum over every activity, free time included
    pub fn sum(&self) -> u32 {
        self.minutes.values().sum()
    }
}

/// Result of a build: the grid plus everything derived from it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekSchedule {
    pub grid: Grid,
    pub totals: Totals,
    pub legend: Vec<LegendEntry>,
    /// Overwritten cells, in write order
    pub overlaps: Vec<Overlap>,
}

/// Builds a [`WeekSchedule`] from a [`Plan`]
pub struct GridBuilder<'a> {
    plan: &'a Plan,
}

/// An occurrence with its activity and start resolved
struct Resolved<'a> {
    activity: usize,
    start: TimeSlot,
    duration: usize,
    days: &'a [Day],
}

impl<'a> GridBuilder<'a> {
    pub fn new(plan: &'a Plan) -> Self {
        Self { plan }
    }

    /// Build the grid, totals and legend.
    ///
    /// The whole plan is validated before the first cell is written.
    pub fn build(&self) -> Result<WeekSchedule, PlanError> {
        let palette = self.palette()?;
        let index: HashMap<&str, usize> = palette
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.as_str(), i))
            .collect();

        let resolved = self
            .plan
            .occurrences
            .iter()
            .map(|occurrence| {
                let activity = *index
                    .get(occurrence.activity.as_str())
                    .ok_or_else(|| PlanError::UnknownActivity(occurrence.activity.clone()))?;
                if occurrence.duration == 0 {
                    return Err(PlanError::ZeroDuration(occurrence.activity.clone()));
                }
                Ok(Resolved {
                    activity,
                    start: occurrence.start_slot()?,
                    duration: occurrence.duration as usize,
                    days: &occurrence.days,
                })
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        info!(
            activities = self.plan.activities.len(),
            occurrences = resolved.len(),
            "Building week grid"
        );

        let mut grid = Grid::new(palette);
        let mut overlaps = Vec::new();
        for occurrence in &resolved {
            for &day in occurrence.days {
                // Past one full day every further slot rewrites a cell this occurrence already holds
                for i in 0..occurrence.duration.min(SLOTS_PER_DAY) {
                    let slot = occurrence.start.offset(i);
                    if let Some(previous) = grid.write(day, slot, occurrence.activity) {
                        let overlap = Overlap {
                            day,
                            slot,
                            previous: grid.palette[previous].name.clone(),
                            winner: grid.palette[occurrence.activity].name.clone(),
                        };
                        debug!(
                            day = %overlap.day,
                            slot = %overlap.slot,
                            previous = %overlap.previous,
                            winner = %overlap.winner,
                            "Cell overwritten"
                        );
                        overlaps.push(overlap);
                    }
                }
            }
        }

        if !overlaps.is_empty() {
            warn!(
                cells = overlaps.len(),
                "Occurrences overlap; later declarations win"
            );
        }

        let totals = Totals::from_grid(
            &grid,
            self.plan.occurrences.iter().map(|o| o.activity.as_str()),
        );
        let legend = build_legend(self.plan, &totals);

        Ok(WeekSchedule {
            grid,
            totals,
            legend,
            overlaps,
        })
    }

    /// Free time followed by the catalog, rejecting duplicate names
    fn palette(&self) -> Result<Vec<Activity>, PlanError> {
        let mut palette = Vec::with_capacity(self.plan.activities.len() + 1);
        palette.push(self.plan.free_time.clone());
        for activity in &self.plan.activities {
            if palette.iter().any(|a: &Activity| a.name == activity.name) {
                return Err(PlanError::DuplicateActivity(activity.name.clone()));
            }
            palette.push(activity.clone());
        }
        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Occurrence;
    use pretty_assertions::assert_eq;

    fn plan() -> Plan {
        Plan::new("Test")
            .activity("Sleep", Color::rgb(0xB3E0FF))
            .activity("Work", Color::rgb(0xFFB3BA))
    }

    fn slot(index: usize) -> TimeSlot {
        TimeSlot::wrapping(index)
    }

    #[test]
    fn empty_plan_is_all_free_time() {
        let schedule = GridBuilder::new(&plan()).build().unwrap();

        assert_eq!(schedule.grid.count("Free time"), DAYS_PER_WEEK * SLOTS_PER_DAY);
        assert_eq!(schedule.totals.free_time(), MINUTES_PER_WEEK);
        assert_eq!(schedule.totals.get("Sleep"), None);
        assert!(schedule.overlaps.is_empty());
    }

    #[test]
    fn free_time_cells_carry_free_time_color() {
        let plan = plan().free_time("Idle", Color::rgb(0xEEEEEE));
        let schedule = GridBuilder::new(&plan).build().unwrap();

        assert_eq!(schedule.grid.name_at(Day::TUESDAY, slot(3)), "Idle");
        assert_eq!(schedule.grid.color_at(Day::TUESDAY, slot(3)), Color::rgb(0xEEEEEE));
    }

    #[test]
    fn occurrence_cells_carry_activity_color() {
        let plan = plan().occurrence(Occurrence::new("Work").slots(2).on([Day::MONDAY]).at("09:00"));
        let grid = GridBuilder::new(&plan).build().unwrap().grid;

        assert_eq!(grid.name_at(Day::MONDAY, slot(18)), "Work");
        assert_eq!(grid.color_at(Day::MONDAY, slot(19)), Color::rgb(0xFFB3BA));
        assert_eq!(grid.name_at(Day::MONDAY, slot(20)), "Free time");
        assert_eq!(grid.name_at(Day::TUESDAY, slot(18)), "Free time");
    }

    #[test]
    fn overwrite_is_recorded() {
        let plan = plan()
            .occurrence(Occurrence::new("Sleep").slots(4).on([Day::MONDAY]).at("06:00"))
            .occurrence(Occurrence::new("Work").slots(2).on([Day::MONDAY]).at("07:00"));
        let schedule = GridBuilder::new(&plan).build().unwrap();

        assert_eq!(
            schedule.overlaps,
            vec![
                Overlap {
                    day: Day::MONDAY,
                    slot: slot(14),
                    previous: "Sleep".into(),
                    winner: "Work".into(),
                },
                Overlap {
                    day: Day::MONDAY,
                    slot: slot(15),
                    previous: "Sleep".into(),
                    winner: "Work".into(),
                },
            ]
        );
        assert_eq!(schedule.totals.get("Sleep"), Some(60));
        assert_eq!(schedule.totals.get("Work"), Some(60));
    }

    #[test]
    fn self_overlap_is_not_an_overlap() {
        // 50 slots wrap onto the first two slots of the same occurrence
        let plan = plan().occurrence(Occurrence::new("Sleep").slots(50).on([Day::SUNDAY]).at("00:00"));
        let schedule = GridBuilder::new(&plan).build().unwrap();

        assert!(schedule.overlaps.is_empty());
        assert_eq!(schedule.totals.get("Sleep"), Some(24 * 60));
        assert_eq!(schedule.grid.day_minutes(Day::SUNDAY, "Sleep"), 24 * 60);
        assert_eq!(schedule.grid.day_minutes(Day::MONDAY, "Sleep"), 0);
    }

    #[test]
    fn huge_duration_fills_one_day() {
        let plan = plan().occurrence(Occurrence::new("Work").slots(u32::MAX).on([Day::TUESDAY]).at("09:00"));
        let schedule = GridBuilder::new(&plan).build().unwrap();

        assert!(schedule.overlaps.is_empty());
        assert_eq!(schedule.totals.get("Work"), Some(24 * 60));
        assert_eq!(schedule.grid.day_minutes(Day::TUESDAY, "Work"), 24 * 60);
        assert_eq!(schedule.totals.free_time(), MINUTES_PER_WEEK - 24 * 60);
    }

    #[test]
    fn fully_overwritten_activity_totals_zero() {
        let plan = plan()
            .occurrence(Occurrence::new("Sleep").slots(2).on([Day::FRIDAY]).at("10:00"))
            .occurrence(Occurrence::new("Work").slots(4).on([Day::FRIDAY]).at("10:00"));
        let totals = GridBuilder::new(&plan).build().unwrap().totals;

        assert_eq!(totals.get("Sleep"), Some(0));
        assert_eq!(totals.get("Work"), Some(120));
        assert_eq!(totals.sum(), MINUTES_PER_WEEK);
    }

    #[test]
    fn unknown_activity_is_rejected() {
        let plan = plan().occurrence(Occurrence::new("Gym").slots(2).on([Day::MONDAY]).at("07:00"));
        let err = GridBuilder::new(&plan).build().unwrap_err();
        assert!(matches!(err, PlanError::UnknownActivity(name) if name == "Gym"));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let plan = plan().occurrence(Occurrence::new("Work").slots(0).on([Day::MONDAY]).at("09:00"));
        let err = GridBuilder::new(&plan).build().unwrap_err();
        assert!(matches!(err, PlanError::ZeroDuration(name) if name == "Work"));
    }

    #[test]
    fn bad_start_time_is_rejected() {
        let plan = plan().occurrence(Occurrence::new("Work").slots(2).on([Day::MONDAY]).at("09:15"));
        let err = GridBuilder::new(&plan).build().unwrap_err();
        assert!(matches!(err, PlanError::InvalidTime(value) if value == "09:15"));
    }

    #[test]
    fn duplicate_activity_is_rejected() {
        let plan = plan().activity("Work", Color::WHITE);
        let err = GridBuilder::new(&plan).build().unwrap_err();
        assert!(matches!(err, PlanError::DuplicateActivity(name) if name == "Work"));

        let clash = Plan::new("Test").activity("Free time", Color::WHITE);
        assert!(matches!(
            GridBuilder::new(&clash).build(),
            Err(PlanError::DuplicateActivity(_))
        ));
    }

    #[test]
    fn occurrence_may_name_free_time() {
        let plan = plan()
            .occurrence(Occurrence::new("Work").slots(4).on([Day::MONDAY]).at("09:00"))
            .occurrence(Occurrence::new("Free time").slots(2).on([Day::MONDAY]).at("09:00"));
        let totals = GridBuilder::new(&plan).build().unwrap().totals;

        assert_eq!(totals.get("Work"), Some(60));
        assert_eq!(totals.free_time(), MINUTES_PER_WEEK - 60);
        assert_eq!(totals.sum(), MINUTES_PER_WEEK);
    }
}
