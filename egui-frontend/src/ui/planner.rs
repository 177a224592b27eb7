//! The signed-in planner view: header, failure notice, summary, forms,
//! breakdown, and the two entry lists.

use eframe::egui;
use shared::EntryDraft;

use crate::app::{Command, PlannerState};
use crate::ui::{self, style};

enum NoticeAction {
    Dismiss,
    Retry,
}

/// Render the planner. Returns true when the user clicked Sign Out.
pub fn show(ui: &mut egui::Ui, planner: &mut PlannerState, can_sign_out: bool) -> bool {
    let mut sign_out = false;
    let mut commands: Vec<Command> = Vec::new();

    header(ui, planner, can_sign_out, &mut sign_out);
    notice(ui, planner);

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.columns(2, |columns| {
            {
                let ui = &mut columns[0];
                ui::summary::show(ui, &planner.totals);
                ui.add_space(8.0);
                if let Some(draft) = ui::forms::show_income(ui, &mut planner.income_form) {
                    commands.push(Command::Add(EntryDraft::Income(draft)));
                }
                ui.add_space(8.0);
                if let Some(draft) = ui::forms::show_expense(ui, &mut planner.expense_form) {
                    commands.push(Command::Add(EntryDraft::Expense(draft)));
                }
            }
            {
                let ui = &mut columns[1];
                ui::breakdown::show(ui, &planner.totals);
                ui.add_space(8.0);
                if let Some((kind, id)) = ui::entry_list::show(ui, &planner.snapshot) {
                    commands.push(Command::Delete(kind, id));
                }
            }
        });
    });

    for command in commands {
        planner.apply(command);
    }
    sign_out
}

fn header(ui: &mut egui::Ui, planner: &PlannerState, can_sign_out: bool, sign_out: &mut bool) {
    ui.horizontal(|ui| {
        ui.heading("Monthly Expense Tracker");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if can_sign_out && ui.button("Sign Out").clicked() {
                *sign_out = true;
            }
            if let Some(email) = &planner.email {
                ui.weak(format!("Signed in as: {email}"));
            }
        });
    });
    ui.separator();
}

fn notice(ui: &mut egui::Ui, planner: &mut PlannerState) {
    let mut action = None;
    if let Some(notice) = &planner.notice {
        egui::Frame::none()
            .fill(style::ERROR_FILL)
            .rounding(4.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(style::ERROR_TEXT, notice.message.as_str());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Dismiss").clicked() {
                            action = Some(NoticeAction::Dismiss);
                        }
                        if notice.retry.is_some() && ui.small_button("Retry").clicked() {
                            action = Some(NoticeAction::Retry);
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }

    match action {
        Some(NoticeAction::Dismiss) => planner.notice = None,
        Some(NoticeAction::Retry) => {
            if let Some(notice) = planner.notice.take() {
                if let Some(command) = notice.retry {
                    planner.apply(command);
                }
            }
        }
        None => {}
    }
}
