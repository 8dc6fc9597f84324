use eframe::egui::Ui;
use egui_extras::{Column as GridColumn, TableBuilder};

use crate::data::model::Table;

/// Read-only grid of the given rows of `table`. Only visible rows are laid out.
pub fn data_grid(ui: &mut Ui, table: &Table, rows: &[usize], max_height: f32, row_height: f32) {
    if table.n_cols() == 0 {
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(max_height)
        .columns(GridColumn::auto().at_least(60.0).clip(true), table.n_cols())
        .header(row_height + 4.0, |mut header| {
            for col in &table.columns {
                header.col(|ui| {
                    ui.strong(&col.name);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut row| {
                let idx = rows[row.index()];
                for col in &table.columns {
                    row.col(|ui| {
                        ui.label(col.values[idx].to_string());
                    });
                }
            });
        });
}
