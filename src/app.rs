use eframe::egui::{self, ScrollArea, Ui};

use crate::config::AppConfig;
use crate::state::{AppState, Page, Status};
use crate::ui::{dashboard, guide_view, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VibeGuideApp {
    pub state: AppState,
}

impl VibeGuideApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for VibeGuideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_dropped_files(ctx, &mut self.state);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(self.state.config.nav_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                panels::nav_panel(ui, &mut self.state);
            });

        // ---- Central panel: guide page or dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| central(ui, &mut self.state));
        });
    }
}

fn central(ui: &mut Ui, state: &mut AppState) {
    match state.page {
        Page::Guide(index) => {
            let Some(page) = state.guide.page(index) else {
                state.page = Page::Dashboard;
                return;
            };
            if let Some(next) =
                guide_view::show(ui, &state.guide, page, state.session.table.as_ref())
            {
                state.page = next;
            }
        }
        Page::Dashboard => {
            // Outermost boundary: report the error and keep accepting input.
            if let Err(e) = dashboard::show(ui, state) {
                log::error!("Dashboard error: {e:?}");
                state.session.status = Status::Failed(format!("{e:?}"));
            }
        }
    }
}
