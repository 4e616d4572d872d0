//! Detail overlay showing the full row behind a clicked shape

use egui::{Context, RichText, ScrollArea};
use serde_json::Value;

use crate::payload::Dimension;

/// Pure display state for the row-detail overlay.
///
/// Opened by a click handler with the click payload's dimensions, closed
/// by explicit user action. No business logic.
#[derive(Default)]
pub struct DetailModal {
    visible: bool,
    rows: Vec<Dimension>,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, rows: Vec<Dimension>) {
        self.rows = rows;
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.rows.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn rows(&self) -> &[Dimension] {
        &self.rows
    }

    /// Draw the overlay when visible.
    pub fn show(&mut self, ctx: &Context) {
        if !self.visible {
            return;
        }

        let mut open = true;
        egui::Window::new("Details")
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                    for dimension in &self.rows {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(dimension.column.display_name.as_str()).strong(),
                            );
                            ui.label(display_value(&dimension.value));
                        });
                    }
                });
            });

        if !open {
            self.close();
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
