//! Proportional category breakdown: a stacked bar plus a legend.

use eframe::egui::{self, Color32};
use shared::{Category, Totals};

use crate::ui::style;

pub fn show(ui: &mut egui::Ui, totals: &Totals) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Expense Breakdown");
        ui.add_space(6.0);

        if totals.total_expenses.is_zero() {
            ui.weak("No expenses to visualize.");
        } else {
            bar(ui, totals);
            ui.add_space(8.0);
            legend(ui, totals);
        }
    });
}

/// One horizontal bar, split per category by share of total expenses.
/// Categories at zero render as zero width (they are skipped entirely).
fn bar(ui: &mut egui::Ui, totals: &Totals) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 18.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, Color32::from_gray(229));

    let mut x = rect.left();
    for category in Category::ALL {
        let fraction = totals.category_percentage(category) / 100.0;
        if fraction <= 0.0 {
            continue;
        }
        let width = rect.width() * fraction;
        let segment = egui::Rect::from_min_max(
            egui::pos2(x, rect.top()),
            egui::pos2((x + width).min(rect.right()), rect.bottom()),
        );
        painter.rect_filled(segment, 0.0, style::category_color(category));
        x += width;
    }
}

fn legend(ui: &mut egui::Ui, totals: &Totals) {
    for category in Category::ALL {
        let total = totals.category_total(category);
        if total.is_zero() {
            continue;
        }
        ui.horizontal(|ui| {
            let (dot, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().rect_filled(dot, 5.0, style::category_color(category));
            ui.label(format!("{}:", category));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(style::money(total));
            });
        });
    }
}
