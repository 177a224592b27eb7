//! Sign-in / sign-up screen shown while the session is unauthenticated.

use eframe::egui;

use crate::ui::style;

/// Form fields for the auth screen. `error` holds the provider's rejection
/// reason, shown inline under the inputs.
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub is_login: bool,
    pub error: Option<String>,
}

impl Default for AuthForm {
    fn default() -> Self {
        AuthForm {
            email: String::new(),
            password: String::new(),
            is_login: true,
            error: None,
        }
    }
}

pub enum AuthAction {
    Submit {
        email: String,
        password: String,
        is_login: bool,
    },
}

pub fn show(ui: &mut egui::Ui, form: &mut AuthForm) -> Option<AuthAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.add_space(90.0);
        ui.heading(if form.is_login {
            "Welcome Back!"
        } else {
            "Create Account"
        });
        ui.label(if form.is_login {
            "Sign in to continue"
        } else {
            "Get started with your budget"
        });
        ui.add_space(16.0);

        ui.add(
            egui::TextEdit::singleline(&mut form.email)
                .hint_text("Email")
                .desired_width(260.0),
        );
        ui.add_space(4.0);
        ui.add(
            egui::TextEdit::singleline(&mut form.password)
                .password(true)
                .hint_text("Password")
                .desired_width(260.0),
        );

        if let Some(error) = &form.error {
            ui.add_space(6.0);
            ui.colored_label(style::ERROR_TEXT, error.as_str());
        }

        ui.add_space(10.0);
        let submit = if form.is_login { "Login" } else { "Sign Up" };
        if ui.button(submit).clicked() {
            action = Some(AuthAction::Submit {
                email: form.email.clone(),
                password: form.password.clone(),
                is_login: form.is_login,
            });
        }

        ui.add_space(8.0);
        let toggle = if form.is_login {
            "Need an account? Sign Up"
        } else {
            "Already have an account? Login"
        };
        if ui.link(toggle).clicked() {
            form.is_login = !form.is_login;
            form.error = None;
        }
    });

    action
}
