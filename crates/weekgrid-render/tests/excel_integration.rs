//! Integration tests for XLSX rendering

use weekgrid_core::builtin::personal_plan;
use weekgrid_core::{Color, Day, GridBuilder, Occurrence, Plan, RenderError, Renderer};
use weekgrid_render::ExcelRenderer;

fn gym_plan() -> Plan {
    Plan::new("Gym Week")
        .activity("Gym", Color::rgb(0xE6FFE6))
        .occurrence(Occurrence::new("Gym").slots(4).on([Day::MONDAY, Day::THURSDAY]).at("18:00"))
        .legend_item("Gym", "Twice a week, 2h")
        .legend_item("Free time", "Everything else")
}

#[test]
fn save_built_in_week() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning_personnel.xlsx");

    let plan = personal_plan();
    let schedule = GridBuilder::new(&plan).build().unwrap();
    ExcelRenderer::new().save(&plan, &schedule, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn custom_widths_reach_the_layout() {
    let plan = gym_plan();
    let schedule = GridBuilder::new(&plan).build().unwrap();
    let layout = ExcelRenderer::new()
        .grid_width(12.0)
        .legend_width(40.0)
        .layout(&plan, &schedule)
        .unwrap();

    assert!(layout.column_widths.contains(&(0, 12.0)));
    assert!(layout.column_widths.contains(&(7, 12.0)));
    assert!(layout.column_widths.contains(&(12, 40.0)));
    assert!(!layout.column_widths.iter().any(|&(col, _)| col == 8));

    let bytes = ExcelRenderer::new().render(&plan, &schedule).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("week.xlsx");

    let plan = gym_plan();
    let schedule = GridBuilder::new(&plan).build().unwrap();
    let err = ExcelRenderer::new().save(&plan, &schedule, &path).unwrap_err();

    assert!(matches!(err, RenderError::Io(_)));
    assert!(!path.exists());
}

#[test]
fn invalid_sheet_title_is_format_error() {
    // Worksheet names are limited to 31 characters without []:*?/\
    for title in ["", "Week [draft]", "A title that is far too long for a worksheet"] {
        let mut plan = gym_plan();
        plan.title = title.to_string();
        let schedule = GridBuilder::new(&plan).build().unwrap();

        let result = ExcelRenderer::new().render_to_bytes(&plan, &schedule);
        assert!(
            matches!(result, Err(RenderError::Format(_))),
            "title {title:?} should be rejected"
        );
    }
}

#[test]
fn layout_of_small_plan() {
    let plan = gym_plan();
    let schedule = GridBuilder::new(&plan).build().unwrap();
    let layout = ExcelRenderer::new().layout(&plan, &schedule).unwrap();

    // Thursday 18:00 = slot 36, row 37, column E
    let gym = layout.cell(37, 4).unwrap();
    assert_eq!(gym.value.as_deref(), Some("Gym"));
    assert_eq!(gym.fill, Some(Color::rgb(0xE6FFE6)));

    assert_eq!(layout.cell(1, 12).unwrap().value.as_deref(), Some("4h00"));
    assert_eq!(layout.cell(2, 12).unwrap().value.as_deref(), Some("164h00"));
}
