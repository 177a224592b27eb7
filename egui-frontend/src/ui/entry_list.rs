//! Income and expense lists with per-row delete.
//!
//! The lists render the snapshot exactly as the planner sorted it (date
//! descending); deletion is reported back as an action, never applied here.

use backend::Snapshot;
use eframe::egui;
use shared::{EntryId, EntryKind};

use crate::ui::style;

/// Render both lists; returns the entry the user asked to delete, if any.
pub fn show(ui: &mut egui::Ui, snapshot: &Snapshot) -> Option<(EntryKind, EntryId)> {
    let mut action = None;

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Income");
        egui::ScrollArea::vertical()
            .id_source("income-list")
            .max_height(200.0)
            .show(ui, |ui| {
                if snapshot.incomes.is_empty() {
                    ui.weak("No incomes added yet.");
                }
                for entry in &snapshot.incomes {
                    let subtitle = entry.date.format("%d/%m/%Y").to_string();
                    if entry_row(
                        ui,
                        entry.id.as_str(),
                        &entry.source,
                        &subtitle,
                        style::money(entry.amount),
                        style::INCOME_GREEN,
                    ) {
                        action = Some((EntryKind::Income, entry.id.clone()));
                    }
                }
            });
    });

    ui.add_space(8.0);

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Expenses");
        egui::ScrollArea::vertical()
            .id_source("expense-list")
            .max_height(200.0)
            .show(ui, |ui| {
                if snapshot.expenses.is_empty() {
                    ui.weak("No expenses added yet.");
                }
                for entry in &snapshot.expenses {
                    let subtitle =
                        format!("{} · {}", entry.date.format("%d/%m/%Y"), entry.category);
                    if entry_row(
                        ui,
                        entry.id.as_str(),
                        &entry.name,
                        &subtitle,
                        style::money(entry.amount),
                        style::EXPENSE_RED,
                    ) {
                        action = Some((EntryKind::Expense, entry.id.clone()));
                    }
                }
            });
    });

    action
}

/// One list row; returns true when its delete button was clicked.
fn entry_row(
    ui: &mut egui::Ui,
    id: &str,
    title: &str,
    subtitle: &str,
    amount: String,
    amount_color: egui::Color32,
) -> bool {
    let mut delete = false;
    ui.push_id(id, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.strong(title);
                ui.weak(subtitle);
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("🗑").clicked() {
                    delete = true;
                }
                ui.colored_label(amount_color, amount);
            });
        });
    });
    delete
}
