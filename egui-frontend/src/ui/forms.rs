//! Add-income and add-expense forms.
//!
//! Parsing and validation happen on submit; a rejected draft never leaves
//! the form, and the reason is shown inline under the fields. On success
//! the name and amount clear while the date and category stick.

use chrono::Local;
use eframe::egui;
use shared::{Category, NewExpense, NewIncome};

use crate::ui::style;

/// Field state for one entry form. The expense form uses `category`; the
/// income form ignores it.
pub struct EntryForm {
    pub name: String,
    pub amount: String,
    pub date: String,
    pub category: Category,
    pub error: Option<String>,
}

impl EntryForm {
    pub fn new() -> Self {
        EntryForm {
            name: String::new(),
            amount: String::new(),
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            category: Category::Housing,
            error: None,
        }
    }

    fn clear_after_submit(&mut self) {
        self.name.clear();
        self.amount.clear();
        self.error = None;
    }
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

pub fn show_income(ui: &mut egui::Ui, form: &mut EntryForm) -> Option<NewIncome> {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Add New Income");
        ui.add_space(4.0);

        labeled_field(ui, "Income Source", &mut form.name, "e.g., Side Hustle");
        labeled_field(ui, "Amount (£)", &mut form.amount, "0.00");
        labeled_field(ui, "Date", &mut form.date, "YYYY-MM-DD");
        error_line(ui, &form.error);

        let mut draft = None;
        if ui.button("Add income").clicked() {
            match NewIncome::parse(&form.name, &form.amount, &form.date) {
                Ok(parsed) => {
                    form.clear_after_submit();
                    draft = Some(parsed);
                }
                Err(err) => form.error = Some(err.to_string()),
            }
        }
        draft
    })
    .inner
}

pub fn show_expense(ui: &mut egui::Ui, form: &mut EntryForm) -> Option<NewExpense> {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Add New Expense");
        ui.add_space(4.0);

        labeled_field(ui, "Expense Name", &mut form.name, "e.g., Coffee");
        labeled_field(ui, "Amount (£)", &mut form.amount, "0.00");

        ui.label("Category");
        egui::ComboBox::from_id_source("expense-category")
            .selected_text(form.category.name())
            .show_ui(ui, |ui| {
                for category in Category::ALL {
                    ui.selectable_value(&mut form.category, category, category.name());
                }
            });

        labeled_field(ui, "Date", &mut form.date, "YYYY-MM-DD");
        error_line(ui, &form.error);

        let mut draft = None;
        if ui.button("Add expense").clicked() {
            match NewExpense::parse(&form.name, &form.amount, &form.date, form.category.name()) {
                Ok(parsed) => {
                    form.clear_after_submit();
                    draft = Some(parsed);
                }
                Err(err) => form.error = Some(err.to_string()),
            }
        }
        draft
    })
    .inner
}

fn labeled_field(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).hint_text(hint));
    ui.add_space(4.0);
}

fn error_line(ui: &mut egui::Ui, error: &Option<String>) {
    if let Some(error) = error {
        ui.colored_label(style::ERROR_TEXT, error.as_str());
        ui.add_space(4.0);
    }
}
