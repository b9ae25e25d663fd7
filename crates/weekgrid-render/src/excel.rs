//! XLSX week sheet renderer
//!
//! Writes a single worksheet: the week grid on the left, the legend side
//! table on the right.
//!
//! ## Sheet Layout
//!
//! ```text
//! |   A   |    B    |    C    | ... |    H     | I |    J    |   K   |      L      |   M   |
//! |-------|---------|---------|-----|----------|---|---------|-------|-------------|-------|
//! |       | Lundi   | Mardi   | ... | Dimanche |   | Activités, fréquences, ...            |
//! | 00:00 | Sommeil | Sommeil | ... | Sommeil  |   | (swatch)| Name  | Description | 9h30  |
//! | 00:30 | Sommeil | Sommeil | ... | Sommeil  |   | (swatch)| Name  | Description | 10h00 |
//! | ...   |         |         |     |          |   |         |       |             |       |
//! | 23:30 | Sommeil | Sommeil | ... | Sommeil  |   |         |       |             |       |
//! ```
//!
//! Grid cells carry the activity name on a solid background of the
//! activity's color. Legend swatches are blank cells with the same fill.
//!
//! The sheet is first computed as a [`SheetLayout`] (plain cell writes and
//! column widths), then handed to `rust_xlsxwriter`. The workbook is fully
//! assembled in memory before anything is written to disk.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;
use weekgrid_core::{Color, Day, Plan, RenderError, Renderer, TimeSlot, WeekSchedule};

/// One cell of the sheet: an optional text value and an optional solid fill
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellWrite {
    /// Zero-based row
    pub row: u32,
    /// Zero-based column
    pub col: u16,
    pub value: Option<String>,
    pub fill: Option<Color>,
}

impl CellWrite {
    fn text(row: u32, col: u16, value: impl Into<String>) -> Self {
        Self {
            row,
            col,
            value: Some(value.into()),
            fill: None,
        }
    }

    fn filled(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }
}

/// Everything the worksheet receives, independent of the xlsx encoding
#[derive(Clone, Debug, PartialEq)]
pub struct SheetLayout {
    pub title: String,
    pub cells: Vec<CellWrite>,
    /// Zero-based column and width in character units
    pub column_widths: Vec<(u16, f64)>,
}

impl SheetLayout {
    /// The write at (`row`, `col`), if any
    pub fn cell(&self, row: u32, col: u16) -> Option<&CellWrite> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }
}

/// XLSX week sheet renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Width of the time column and the seven day columns
    pub grid_column_width: f64,
    /// Width of the four legend columns
    pub legend_column_width: f64,
    /// Zero-based column where the legend starts (column J by default)
    pub legend_column: u16,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            grid_column_width: 17.0,
            legend_column_width: 30.0,
            legend_column: 9,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width of the grid columns
    pub fn grid_width(mut self, width: f64) -> Self {
        self.grid_column_width = width;
        self
    }

    /// Set the width of the legend columns
    pub fn legend_width(mut self, width: f64) -> Self {
        self.legend_column_width = width;
        self
    }

    /// Move the legend to another zero-based column
    ///
    /// It must start right of the grid, and its four columns must fit in the worksheet.
    pub fn legend_at(mut self, col: u16) -> Self {
        self.legend_column = col;
        self
    }

    /// Compute every cell write and column width of the sheet
    ///
    /// Fails when the legend would overlap the grid or run past the last
    /// worksheet column.
    pub fn layout(&self, plan: &Plan, schedule: &WeekSchedule) -> Result<SheetLayout, RenderError> {
        let col = self.legend_column;
        if col < FIRST_LEGEND_COLUMN {
            return Err(RenderError::InvalidData(format!(
                "legend column {col} overlaps the week grid"
            )));
        }
        let last = col
            .checked_add(LEGEND_COLUMNS - 1)
            .filter(|&last| last <= LAST_COLUMN)
            .ok_or_else(|| {
                RenderError::InvalidData(format!(
                    "legend column {col} leaves no room for the legend table"
                ))
            })?;

        let mut cells = Vec::new();

        // Day headers, columns B..H
        for day in Day::ALL {
            cells.push(CellWrite::text(0, grid_col(day), plan.day_name(day)));
        }

        // Time labels and grid cells, rows 2..49
        for slot in TimeSlot::all() {
            let row = grid_row(slot);
            cells.push(CellWrite::text(row, 0, slot.label()));
            for day in Day::ALL {
                let activity = schedule.grid.activity_at(day, slot);
                cells.push(
                    CellWrite::text(row, grid_col(day), activity.name.clone())
                        .filled(Some(activity.color)),
                );
            }
        }

        // Legend side table
        cells.push(CellWrite::text(0, col, plan.legend_title.clone()));
        for (i, entry) in schedule.legend.iter().enumerate() {
            let row = i as u32 + 1;
            if entry.color.is_some() {
                cells.push(CellWrite {
                    row,
                    col,
                    value: None,
                    fill: entry.color,
                });
            }
            cells.push(CellWrite::text(row, col + 1, entry.name.clone()));
            cells.push(CellWrite::text(row, col + 2, entry.description.clone()));
            if let Some(total) = entry.total_label() {
                cells.push(CellWrite::text(row, col + 3, total));
            }
        }

        let mut column_widths: Vec<(u16, f64)> =
            (0..=7).map(|c| (c, self.grid_column_width)).collect();
        column_widths.extend((col..=last).map(|c| (c, self.legend_column_width)));

        Ok(SheetLayout {
            title: plan.title.clone(),
            cells,
            column_widths,
        })
    }

    /// Generate workbook bytes
    pub fn render_to_bytes(
        &self,
        plan: &Plan,
        schedule: &WeekSchedule,
    ) -> Result<Vec<u8>, RenderError> {
        let layout = self.layout(plan, schedule)?;
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&layout.title).map_err(format_error)?;
        write_layout(sheet, &layout)?;

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Render and write the workbook to `path`
    pub fn save(
        &self,
        plan: &Plan,
        schedule: &WeekSchedule,
        path: &Path,
    ) -> Result<(), RenderError> {
        let bytes = self.render_to_bytes(plan, schedule)?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Workbook written");
        Ok(())
    }
}

/// First column right of the grid and its spacer column
const FIRST_LEGEND_COLUMN: u16 = 9;

/// Swatch, name, description, total
const LEGEND_COLUMNS: u16 = 4;

/// Last zero-based worksheet column (XFD)
const LAST_COLUMN: u16 = 16_383;

const fn grid_col(day: Day) -> u16 {
    day.index() as u16 + 1
}

const fn grid_row(slot: TimeSlot) -> u32 {
    slot.index() as u32 + 1
}

fn format_error(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

fn write_layout(sheet: &mut Worksheet, layout: &SheetLayout) -> Result<(), RenderError> {
    // One solid-fill format per distinct color
    let mut fills: HashMap<Color, Format> = HashMap::new();

    for cell in &layout.cells {
        let format = cell.fill.map(|color| {
            fills
                .entry(color)
                .or_insert_with(|| Format::new().set_background_color(color.value()))
                .clone()
        });

        match (&cell.value, &format) {
            (Some(value), Some(format)) => {
                sheet
                    .write_string_with_format(cell.row, cell.col, value, format)
                    .map_err(format_error)?;
            }
            (Some(value), None) => {
                sheet
                    .write_string(cell.row, cell.col, value)
                    .map_err(format_error)?;
            }
            (None, Some(format)) => {
                sheet
                    .write_blank(cell.row, cell.col, format)
                    .map_err(format_error)?;
            }
            (None, None) => {}
        }
    }

    for &(col, width) in &layout.column_widths {
        sheet.set_column_width(col, width).map_err(format_error)?;
    }

    Ok(())
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, plan: &Plan, schedule: &WeekSchedule) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(plan, schedule)
    }
}
