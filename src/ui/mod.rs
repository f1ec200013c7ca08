//! User interface module.
//!
//! Plain-text rendering of session snapshots for the line-driven demo. Each
//! snapshot is drawn as a small card: screen title, fields with their errors,
//! then the submission status.

use crate::state::{FormKind, FormSnapshot, Phase, Route, Snapshot};
use crate::utils::validation::strength_level;
use std::fmt::Write;

pub const BANNER: &str = "PayStell - payments made simple";

/// Return the title of the screen.
///
pub fn title(route: Route) -> &'static str {
    match route {
        Route::Welcome => "Welcome",
        Route::Login => "Login",
        Route::SignUp => "Create Account",
        Route::ForgotPassword => "Forgot Password",
        Route::Home => "Home",
    }
}

/// Return the command reference shown by `help`.
///
pub fn help_text() -> String {
    [
        "Commands:",
        "  email <value>      set the email field",
        "  password <value>   set the password field",
        "  confirm <value>    set the confirm password field",
        "  remember           toggle remember me (login)",
        "  submit             submit the current form",
        "  go <route>         open a linked screen (welcome, login, signup, forgot_password)",
        "  back               return to the previous screen",
        "  dismiss            close an error dialog",
        "  clear              reset the current form",
        "  help               show this reference",
        "  quit               exit",
    ]
    .join("\n")
}

/// Render a snapshot as text.
///
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", title(snapshot.route));
    if snapshot.route == Route::Welcome {
        let _ = writeln!(out, "{}", BANNER);
    }
    if let Some(form) = &snapshot.form {
        render_form(&mut out, form);
    }
    let links = snapshot.route.links();
    if !links.is_empty() {
        let names: Vec<&str> = links.iter().map(Route::as_str).collect();
        let _ = writeln!(out, "links: {}", names.join(", "));
    }
    render_phase(&mut out, snapshot);
    out
}

fn render_form(out: &mut String, form: &FormSnapshot) {
    render_field(out, "email", &form.email, &form.email_error);
    if form.kind != FormKind::ForgotPassword {
        render_field(out, "password", &mask(&form.password), &form.password_error);
    }
    if form.kind == FormKind::SignUp {
        render_field(
            out,
            "confirm",
            &mask(&form.confirm_password),
            &form.confirm_password_error,
        );
    }
    if let Some(score) = form.password_strength {
        let _ = writeln!(out, "  strength: {} ({:.0}%)", strength_level(score), score * 100.0);
    }
    if form.kind == FormKind::Login {
        let mark = if form.remember_me { "x" } else { " " };
        let _ = writeln!(out, "  [{}] remember me", mark);
    }
}

fn render_field(out: &mut String, label: &str, value: &str, error: &str) {
    let _ = writeln!(out, "  {}: {}", label, value);
    if !error.is_empty() {
        let _ = writeln!(out, "    ! {}", error);
    }
}

fn render_phase(out: &mut String, snapshot: &Snapshot) {
    match &snapshot.phase {
        Phase::Idle => {}
        Phase::Validating | Phase::Pending => {
            let _ = writeln!(out, "  ... please wait");
        }
        Phase::Succeeded => {
            let _ = writeln!(out, "  OK {}", snapshot.message.as_deref().unwrap_or_default());
        }
        Phase::Failed(error) => {
            let _ = writeln!(out, "  [{}] {}", error.title(), error.user_message());
            let action = if error.is_retryable() {
                "submit to retry"
            } else {
                "edit the form"
            };
            let _ = writeln!(out, "  dismiss to close, or {}", action);
        }
    }
}

fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}
