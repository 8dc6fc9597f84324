use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Page, Session, Status};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation panel: guide pages, then the live dashboard.
pub fn nav_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(8.0);
        ui.heading(RichText::new("🌈 Vibe Coding").strong());
        ui.label(RichText::new("AI-Powered Development").weak());
    });
    ui.separator();

    ui.strong("Navigation");
    ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for (i, page) in state.guide.pages.iter().enumerate() {
                ui.selectable_value(&mut state.page, Page::Guide(i), &page.nav_label);
            }
            ui.separator();
            ui.selectable_value(&mut state.page, Page::Dashboard, "📈 Example Dashboard");
        });

    ui.separator();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new("Happy Vibe Coding! 🌈✨").color(Color32::from_rgb(59, 130, 246)));
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(&mut state.session);
                state.page = Page::Dashboard;
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.session.table {
            ui.label(format!(
                "{} rows loaded, {} visible",
                table.n_rows(),
                state.session.visible_rows().len()
            ));
        }

        if let Some(msg) = &state.guide_error {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Coloured status line for the dashboard's upload section.
pub fn status_line(ui: &mut Ui, status: &Status) {
    let color = match status {
        Status::NoInputYet => Color32::from_rgb(14, 165, 233),
        Status::Loaded(_) => Color32::from_rgb(34, 197, 94),
        Status::LoadFailed(_) | Status::Failed(_) => Color32::RED,
    };
    ui.label(RichText::new(status.to_string()).color(color));
}

// ---------------------------------------------------------------------------
// File input: dialog and drag-and-drop
// ---------------------------------------------------------------------------

pub fn open_file_dialog(session: &mut Session) {
    let file = rfd::FileDialog::new()
        .set_title("Choose a CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file();

    // A cancelled dialog keeps whatever is loaded.
    if let Some(path) = file {
        session.load_path(&path);
    }
}

/// Load the first file dropped onto the window, if any.
pub fn handle_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    let Some(file) = dropped.into_iter().next() else {
        return;
    };

    if let Some(path) = &file.path {
        state.session.load_path(path);
    } else if let Some(bytes) = &file.bytes {
        state.session.load_from(Some(&bytes[..]), &file.name);
    } else {
        log::warn!("Dropped file '{}' has neither a path nor contents", file.name);
        return;
    }
    state.page = Page::Dashboard;
}
