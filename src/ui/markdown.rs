// PlantCare - ui/markdown.rs
//
// Draws a parsed markdown Document with egui widgets.

use crate::core::markdown::{spans_text, Block, Document, ListItem, Span};
use crate::ui::theme;
use egui::RichText;

/// Render the whole document top to bottom.
pub fn render(ui: &mut egui::Ui, document: &Document) {
    let body = egui::TextStyle::Body.resolve(ui.style()).size;
    let scope = ui.id().with("article");
    render_blocks(ui, &document.blocks, body, scope);
}

/// Id scope for the blocks of a nested container, e.g. the `idx`-th list
/// item or quote of the enclosing block list.
fn child_scope(scope: egui::Id, idx: usize) -> egui::Id {
    scope.with(("child", idx))
}

/// Grid id for a table at position `idx` within `scope`.
fn table_id(scope: egui::Id, idx: usize) -> egui::Id {
    scope.with(("md_table", idx))
}

/// `scope` keeps widget ids unique across nested block lists.
fn render_blocks(ui: &mut egui::Ui, blocks: &[Block], body: f32, scope: egui::Id) {
    for (idx, block) in blocks.iter().enumerate() {
        match block {
            Block::Heading { level, spans } => {
                if idx > 0 {
                    ui.add_space(body * 0.8);
                }
                render_spans(ui, spans, Some(theme::heading_size(*level, body)));
                ui.add_space(body * 0.3);
            }
            Block::Paragraph(spans) => {
                render_spans(ui, spans, None);
                ui.add_space(body * 0.5);
            }
            Block::List { start, items } => {
                render_list(ui, *start, items, body, child_scope(scope, idx));
                ui.add_space(body * 0.3);
            }
            Block::CodeBlock { code, .. } => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(code.trim_end()).monospace());
                });
                ui.add_space(body * 0.5);
            }
            Block::Quote(inner) => {
                ui.horizontal(|ui| {
                    ui.separator();
                    ui.vertical(|ui| render_blocks(ui, inner, body, child_scope(scope, idx)));
                });
            }
            Block::Table { header, rows } => {
                egui::Grid::new(table_id(scope, idx))
                    .striped(true)
                    .spacing([body, body * 0.4])
                    .show(ui, |ui| {
                        for cell in header {
                            ui.label(RichText::new(spans_text(cell)).strong());
                        }
                        ui.end_row();
                        for row in rows {
                            for cell in row {
                                render_spans(ui, cell, None);
                            }
                            ui.end_row();
                        }
                    });
                ui.add_space(body * 0.5);
            }
            Block::Rule => {
                ui.separator();
            }
        }
    }
}

fn render_list(
    ui: &mut egui::Ui,
    start: Option<u64>,
    items: &[ListItem],
    body: f32,
    scope: egui::Id,
) {
    for (i, item) in items.iter().enumerate() {
        let marker = match (item.checked, start) {
            (Some(true), _) => "[x]".to_string(),
            (Some(false), _) => "[ ]".to_string(),
            (None, Some(n)) => format!("{}.", n + i as u64),
            (None, None) => "\u{2022}".to_string(),
        };
        ui.horizontal_top(|ui| {
            ui.add_space(theme::LIST_INDENT);
            ui.label(marker);
            ui.vertical(|ui| render_blocks(ui, &item.blocks, body, child_scope(scope, i)));
        });
    }
}

/// One wrapped line of styled runs. `heading` sets a size and bold face.
fn render_spans(ui: &mut egui::Ui, spans: &[Span], heading: Option<f32>) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let mut text = RichText::new(&span.text);
            if let Some(size) = heading {
                text = text.size(size).strong();
            }
            if span.style.strong {
                text = text.strong();
            }
            if span.style.emphasis {
                text = text.italics();
            }
            if span.style.strikethrough {
                text = text.strikethrough();
            }
            if span.style.code {
                text = text.code();
            }
            match &span.link {
                Some(url) => {
                    ui.hyperlink_to(text, url);
                }
                None => {
                    ui.label(text);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_in_sibling_list_items_get_distinct_ids() {
        let list = child_scope(egui::Id::new("article"), 0);
        let first_item = child_scope(list, 0);
        let second_item = child_scope(list, 1);
        assert_ne!(table_id(first_item, 0), table_id(second_item, 0));
        assert_ne!(table_id(list, 0), table_id(first_item, 0));
    }
}
