use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Table;
use crate::guide::{self, Block, CodePane, Guide, GuidePage, Item, Tone};
use crate::state::Page;

const ACCENT: Color32 = Color32::from_rgb(26, 86, 219);

/// What a guide block needs besides the block itself.
struct RenderCtx<'a> {
    guide: &'a Guide,
    table: Option<&'a Table>,
}

// ---------------------------------------------------------------------------
// Guide page
// ---------------------------------------------------------------------------

/// Render one guide page. Returns a navigation request if a block asked for one.
pub fn show(ui: &mut Ui, guide: &Guide, page: &GuidePage, table: Option<&Table>) -> Option<Page> {
    ui.heading(RichText::new(&page.title).size(26.0).strong());
    if let Some(subtitle) = &page.subtitle {
        ui.label(RichText::new(subtitle).italics().weak());
    }
    ui.separator();

    let ctx = RenderCtx { guide, table };
    let mut nav = None;
    blocks(ui, &ctx, &page.blocks, &mut nav);
    nav
}

fn blocks(ui: &mut Ui, ctx: &RenderCtx<'_>, blocks: &[Block], nav: &mut Option<Page>) {
    for block in blocks {
        block_ui(ui, ctx, block, nav);
        ui.add_space(6.0);
    }
}

fn block_ui(ui: &mut Ui, ctx: &RenderCtx<'_>, block: &Block, nav: &mut Option<Page>) {
    match block {
        Block::Heading { text } => {
            ui.add_space(10.0);
            ui.label(RichText::new(text).size(20.0).strong());
        }
        Block::Paragraph { text } => {
            ui.label(text);
        }
        Block::Bullets { items } => {
            for item in items {
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    ui.label("•");
                    item_ui(ui, item);
                });
            }
        }
        Block::Numbered { items } => {
            for (i, item) in items.iter().enumerate() {
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    ui.label(format!("{}.", i + 1));
                    item_ui(ui, item);
                });
            }
        }
        Block::Code {
            label,
            language,
            text,
        } => {
            if let Some(label) = label {
                ui.strong(label);
            }
            copyable(ui, text, Some(language.as_str()));
        }
        Block::SideBySide { panes } => side_by_side(ui, panes),
        Block::Commandments { items } => {
            for (i, c) in items.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        RichText::new(format!("{}. {}", i + 1, c.title))
                            .size(16.0)
                            .strong()
                            .color(ACCENT),
                    );
                    ui.label(&c.explanation);
                });
            }
        }
        Block::Callout {
            tone,
            title,
            body,
            items,
        } => {
            let (fill, accent) = tone_colors(*tone);
            egui::Frame::group(ui.style())
                .fill(fill)
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(title).strong().color(accent));
                    ui.label(RichText::new(body).color(Color32::DARK_GRAY));
                    for item in items {
                        ui.label(RichText::new(format!("• {item}")).color(Color32::DARK_GRAY));
                    }
                });
        }
        Block::Expander {
            title,
            open,
            blocks: inner,
        } => {
            egui::CollapsingHeader::new(title)
                .default_open(*open)
                .show(ui, |ui: &mut Ui| blocks(ui, ctx, inner, nav));
        }
        Block::PromptContext => {
            egui::CollapsingHeader::new("PROMPT CONTEXT")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    copyable(ui, &guide::render_prompt(&ctx.guide.prompt_context, ctx.table), None);
                });
        }
        Block::Prompt { title, text } => {
            ui.label(RichText::new(title).strong().color(ACCENT));
            let rendered = guide::render_prompt(text, ctx.table);
            if ctx.table.is_some() && rendered != text.as_str() {
                ui.label(RichText::new("Dataset description filled in from the loaded file.").weak());
            }
            copyable(ui, &rendered, None);
        }
        Block::LaunchDashboard { label } => {
            if ui.button(RichText::new(label).strong()).clicked() {
                *nav = Some(Page::Dashboard);
            }
        }
    }
}

fn item_ui(ui: &mut Ui, item: &Item) {
    match item {
        Item::Plain(text) => {
            ui.label(text);
        }
        Item::Lead { lead, text } => {
            ui.label(RichText::new(lead).strong());
            ui.label(format!("– {text}"));
        }
    }
}

fn side_by_side(ui: &mut Ui, panes: &[CodePane]) {
    if panes.is_empty() {
        return;
    }
    ui.columns(panes.len(), |cols: &mut [Ui]| {
        for (col, pane) in cols.iter_mut().zip(panes) {
            col.strong(&pane.label);
            copyable(col, &pane.text, Some(pane.language.as_str()));
        }
    });
}

/// Monospace block with a button that puts its text on the clipboard.
/// Code listings carry their language as a small caption.
fn copyable(ui: &mut Ui, text: &str, language: Option<&str>) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            if let Some(language) = language {
                ui.label(RichText::new(language).small().weak());
            }
            ui.add(egui::Label::new(RichText::new(text).monospace()).wrap());
            if ui.small_button("📋 Copy").clicked() {
                ui.ctx().copy_text(text.to_string());
                log::debug!("Copied {} characters to the clipboard", text.len());
            }
        });
}

fn tone_colors(tone: Tone) -> (Color32, Color32) {
    match tone {
        Tone::Info => (
            Color32::from_rgb(240, 249, 255),
            Color32::from_rgb(3, 105, 161),
        ),
        Tone::Success => (
            Color32::from_rgb(240, 253, 244),
            Color32::from_rgb(21, 128, 61),
        ),
        Tone::Warning => (
            Color32::from_rgb(255, 247, 237),
            Color32::from_rgb(194, 65, 12),
        ),
    }
}
