//! # weekgrid-render
//!
//! Rendering backends for weekgrid week schedules.
//!
//! This crate provides:
//! - XLSX week sheets with colored cells and a legend side table
//! - Plain-text previews for the terminal
//!
//! ## Example
//!
//! ```rust,ignore
//! use weekgrid_core::{builtin, GridBuilder, Renderer};
//! use weekgrid_render::{ExcelRenderer, TextRenderer};
//!
//! let plan = builtin::personal_plan();
//! let schedule = GridBuilder::new(&plan).build()?;
//!
//! // Spreadsheet
//! ExcelRenderer::new().save(&plan, &schedule, "planning_personnel.xlsx".as_ref())?;
//!
//! // Terminal preview
//! let text = TextRenderer::new().render(&plan, &schedule)?;
//! println!("{text}");
//! ```

pub mod excel;
pub mod text;

pub use excel::{CellWrite, ExcelRenderer, SheetLayout};
pub use text::TextRenderer;
