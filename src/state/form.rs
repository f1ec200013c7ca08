//! Form editing state types.
//!
//! This module contains the authentication form fields, the per-field error
//! bookkeeping and the lazy-then-eager validation rules.

use super::error::ValidationError;
use crate::backend::Credentials;
use crate::state::navigation::Route;
use crate::utils::validation::{
    do_passwords_match, is_valid_email, is_valid_password, password_strength, PasswordPolicy,
};
use std::collections::HashMap;
use std::str::FromStr;

/// Message shown for a malformed email address.
///
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// Specifying the editable form fields.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Message shown when the field is left blank.
    ///
    pub fn empty_message(&self) -> &'static str {
        match self {
            Field::Email => "Email cannot be empty",
            Field::Password => "Password cannot be empty",
            Field::ConfirmPassword => "Please confirm your password",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm",
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Field::Email),
            "password" => Ok(Field::Password),
            "confirm" | "confirm_password" => Ok(Field::ConfirmPassword),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// Specifying which authentication form a screen shows.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormKind {
    Login,
    SignUp,
    ForgotPassword,
}

impl FormKind {
    /// Return the form hosted by the route, if any.
    ///
    pub fn for_route(route: Route) -> Option<FormKind> {
        match route {
            Route::Login => Some(FormKind::Login),
            Route::SignUp => Some(FormKind::SignUp),
            Route::ForgotPassword => Some(FormKind::ForgotPassword),
            Route::Welcome | Route::Home => None,
        }
    }

    /// Fields validated on submit, in display order.
    ///
    pub fn fields(&self) -> &'static [Field] {
        match self {
            FormKind::Login => &[Field::Email, Field::Password],
            FormKind::SignUp => &[Field::Email, Field::Password, Field::ConfirmPassword],
            FormKind::ForgotPassword => &[Field::Email],
        }
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

/// Point-in-time copy of a form for rendering.
///
/// Error strings are empty when the field has no error.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub kind: FormKind,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub remember_me: bool,
    pub email_error: String,
    pub password_error: String,
    pub confirm_password_error: String,
    /// Only reported on the sign-up form.
    pub password_strength: Option<f64>,
}

/// Houses the inputs and validation errors of one form instance.
///
#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    kind: FormKind,
    policy: PasswordPolicy,
    email: String,
    password: String,
    confirm_password: String,
    remember_me: bool,
    errors: HashMap<Field, ValidationError>,
}

impl AuthForm {
    /// Return a blank form.
    ///
    pub fn new(kind: FormKind, policy: PasswordPolicy) -> Self {
        AuthForm {
            kind,
            policy,
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            remember_me: false,
            errors: HashMap::new(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub fn toggle_remember_me(&mut self) {
        self.remember_me = !self.remember_me;
    }

    pub fn error(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Return the error text for the field, empty when there is none.
    ///
    pub fn error_message(&self, field: Field) -> String {
        self.error(field).map(|e| e.to_string()).unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Store a new value for the field.
    ///
    /// Once a field shows an error it is re-validated on every edit until the
    /// error clears. Editing the password also refreshes a visible
    /// confirmation error since the match may have changed.
    pub fn set_value(&mut self, field: Field, value: String) {
        match field {
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
        }
        if self.errors.contains_key(&field) {
            self.validate_field(field);
        }
        if field == Field::Password && self.errors.contains_key(&Field::ConfirmPassword) {
            self.validate_field(Field::ConfirmPassword);
        }
    }

    /// Check a single field without touching the stored errors.
    ///
    pub fn check(&self, field: Field) -> Result<(), ValidationError> {
        match field {
            Field::Email => {
                let email = self.email.trim();
                if email.is_empty() {
                    Err(ValidationError::EmptyField(Field::Email))
                } else if !is_valid_email(email) {
                    Err(ValidationError::InvalidFormat {
                        field: Field::Email,
                        requirement: INVALID_EMAIL,
                    })
                } else {
                    Ok(())
                }
            }
            Field::Password => {
                if self.password.is_empty() {
                    Err(ValidationError::EmptyField(Field::Password))
                } else if self.kind != FormKind::Login
                    && !is_valid_password(&self.password, self.policy)
                {
                    Err(ValidationError::InvalidFormat {
                        field: Field::Password,
                        requirement: self.policy.requirement(),
                    })
                } else {
                    Ok(())
                }
            }
            Field::ConfirmPassword => {
                if self.confirm_password.is_empty() {
                    Err(ValidationError::EmptyField(Field::ConfirmPassword))
                } else if !do_passwords_match(&self.password, &self.confirm_password) {
                    Err(ValidationError::Mismatch)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Validate one field and record or clear its error.
    ///
    pub fn validate_field(&mut self, field: Field) -> bool {
        match self.check(field) {
            Ok(()) => {
                self.errors.remove(&field);
                true
            }
            Err(error) => {
                self.errors.insert(error.field(), error);
                false
            }
        }
    }

    /// Validate every field of the form, recording all errors.
    ///
    pub fn validate(&mut self) -> bool {
        let mut valid = true;
        for field in self.kind.fields() {
            valid &= self.validate_field(*field);
        }
        valid
    }

    /// Reset inputs and errors.
    ///
    pub fn clear(&mut self) {
        *self = AuthForm::new(self.kind, self.policy);
    }

    /// Return the credentials to submit, email trimmed.
    ///
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            remember_me: self.remember_me,
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            kind: self.kind,
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            remember_me: self.remember_me,
            email_error: self.error_message(Field::Email),
            password_error: self.error_message(Field::Password),
            confirm_password_error: self.error_message(Field::ConfirmPassword),
            password_strength: match self.kind {
                FormKind::SignUp => Some(password_strength(&self.password)),
                _ => None,
            },
        }
    }
}
