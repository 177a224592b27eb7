//! Financial summary card: total income, total expenses, balance.

use eframe::egui::{self, Color32};
use rust_decimal::Decimal;
use shared::Totals;

use crate::ui::style;

pub fn show(ui: &mut egui::Ui, totals: &Totals) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Financial Summary");
        ui.add_space(6.0);

        row(ui, "Total Income", totals.total_income, style::INCOME_GREEN);
        row(ui, "Total Expenses", totals.total_expenses, style::EXPENSE_RED);

        let balance_color = if totals.balance >= Decimal::ZERO {
            style::BALANCE_BLUE
        } else {
            style::BALANCE_ORANGE
        };
        row(ui, "Balance", totals.balance, balance_color);
    });
}

fn row(ui: &mut egui::Ui, label: &str, amount: Decimal, color: Color32) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(color, style::money(amount));
        });
    });
}
