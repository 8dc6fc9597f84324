use std::collections::BTreeSet;

use anyhow::Context;
use chrono::NaiveDate;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::filter::{ColumnControl, ControlKind};
use crate::data::model::CellValue;
use crate::state::{AppState, Session};
use crate::ui::{panels, table_view};

/// A range edited through a widget, applied to the control afterwards.
enum RangeEdit {
    Dates(NaiveDate, NaiveDate),
    Numbers(f64, f64),
}

// ---------------------------------------------------------------------------
// Example dashboard page: upload → filter → explore
// ---------------------------------------------------------------------------

/// Render the live dashboard. Errors propagate to the app's outer boundary.
pub fn show(ui: &mut Ui, state: &mut AppState) -> anyhow::Result<()> {
    ui.heading("Analytics Dashboard");
    ui.label("This is your starting point for any analytical project.");
    ui.add_space(8.0);

    upload_section(ui, &mut state.session);

    if state.session.table.is_none() {
        return Ok(());
    }

    ui.add_space(12.0);
    if filter_section(ui, &mut state.session, state.config.filter_grid_columns) {
        state
            .session
            .refilter()
            .context("applying column filters")?;
    }
    if let Some(summary) = state.session.filter_summary() {
        ui.label(RichText::new(summary).color(Color32::from_rgb(14, 165, 233)));
    }

    ui.add_space(12.0);
    data_explorer(ui, state);
    Ok(())
}

fn upload_section(ui: &mut Ui, session: &mut Session) {
    ui.strong("Upload Data");
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .button("Choose a CSV file…")
            .on_hover_text("Upload your data in CSV format, or drop a file onto the window")
            .clicked()
        {
            panels::open_file_dialog(session);
        }
        panels::status_line(ui, &session.status);
    });
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Render one control per column, laid out `grid_columns` to a row.
/// Returns whether any control changed.
fn filter_section(ui: &mut Ui, session: &mut Session, grid_columns: usize) -> bool {
    let mut changed = false;
    ui.heading("Data Filtering");

    egui::CollapsingHeader::new("Filter Data")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Reset filters").clicked() {
                session.reset_filters();
                changed = true;
            }
            ui.add_space(4.0);

            let per_row = grid_columns.max(1);
            for row in session.filters.chunks_mut(per_row) {
                ui.columns(per_row, |cols: &mut [Ui]| {
                    for (cell, control) in cols.iter_mut().zip(row.iter_mut()) {
                        changed |= control_widget(cell, control);
                    }
                });
                ui.add_space(6.0);
            }
        });

    changed
}

fn control_widget(ui: &mut Ui, control: &mut ColumnControl) -> bool {
    let column = control.column.clone();
    let edit = match &mut control.kind {
        ControlKind::Categorical { options, selected } => {
            return categorical_widget(ui, &column, options, selected);
        }
        ControlKind::Temporal { range, .. } => date_range_widget(ui, &column, *range),
        ControlKind::Continuous {
            bounds,
            range,
            step,
        } => numeric_range_widget(ui, &column, *bounds, *range, *step),
    };

    match edit {
        Some(RangeEdit::Dates(start, end)) => control.set_date_range(start, end),
        Some(RangeEdit::Numbers(low, high)) => control.set_numeric_range(low, high),
        None => return false,
    }
    true
}

fn categorical_widget(
    ui: &mut Ui,
    column: &str,
    options: &[CellValue],
    selected: &mut BTreeSet<CellValue>,
) -> bool {
    let mut changed = false;
    let header = if selected.is_empty() {
        format!("Select {column}  (all)")
    } else {
        format!("Select {column}  ({}/{})", selected.len(), options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(("filter", column))
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() && !selected.is_empty() {
                selected.clear();
                changed = true;
            }
            ScrollArea::vertical()
                .id_salt(("filter_options", column))
                .max_height(200.0)
                .show(ui, |ui: &mut Ui| {
                    for val in options {
                        let mut checked = selected.contains(val);
                        if ui.checkbox(&mut checked, val.to_string()).changed() {
                            if checked {
                                selected.insert(val.clone());
                            } else {
                                selected.remove(val);
                            }
                            changed = true;
                        }
                    }
                });
        });

    changed
}

fn date_range_widget(
    ui: &mut Ui,
    column: &str,
    (mut start, mut end): (NaiveDate, NaiveDate),
) -> Option<RangeEdit> {
    let mut changed = false;
    ui.strong(format!("Filter {column}"));
    let start_id = format!("{column}_start");
    let end_id = format!("{column}_end");
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt(&start_id))
            .changed();
        ui.label("to");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt(&end_id))
            .changed();
    });
    changed.then_some(RangeEdit::Dates(start, end))
}

fn numeric_range_widget(
    ui: &mut Ui,
    column: &str,
    (min, max): (f64, f64),
    (mut low, mut high): (f64, f64),
    step: f64,
) -> Option<RangeEdit> {
    ui.strong(format!("Filter {column}"));
    let low_changed = ui
        .add(egui::Slider::new(&mut low, min..=max).step_by(step).text("min"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, min..=max).step_by(step).text("max"))
        .changed();
    (low_changed || high_changed).then_some(RangeEdit::Numbers(low, high))
}

// ---------------------------------------------------------------------------
// Data explorer
// ---------------------------------------------------------------------------

fn data_explorer(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.session.table else {
        return;
    };
    ui.heading("Data Explorer");
    let rows = state.session.visible_rows();
    egui::CollapsingHeader::new("Show Raw Data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table_view::data_grid(
                ui,
                table,
                &rows,
                state.config.grid_height,
                state.config.grid_row_height,
            );
        });
}
