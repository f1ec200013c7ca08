use super::form::{AuthForm, Field, FormKind, FormSnapshot};
use super::navigation::{Completion, Route, Router};
use super::submission::{success_message, Phase, Submission};
use crate::backend::{AuthRequest, SubmissionError};
use crate::utils::validation::PasswordPolicy;
use log::*;
use std::fmt;

/// Callback notified with every new snapshot.
///
pub type Observer = Box<dyn Fn(&Snapshot) + Send + Sync>;

/// Point-in-time copy of everything a rendering surface displays.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub route: Route,
    pub back_stack: Vec<Route>,
    /// None on screens without a form.
    pub form: Option<FormSnapshot>,
    pub phase: Phase,
    pub message: Option<String>,
}

/// A validated submission waiting for the backend.
///
/// Holds the activation it was started from so a result arriving after the
/// user left the screen can be recognised and dropped.
pub struct PendingSubmission {
    activation: u64,
    request: AuthRequest,
    on_success: Completion,
}

impl PendingSubmission {
    pub fn activation(&self) -> u64 {
        self.activation
    }

    pub fn request(&self) -> &AuthRequest {
        &self.request
    }

    pub fn into_parts(self) -> (u64, AuthRequest, Completion) {
        (self.activation, self.request, self.on_success)
    }
}

impl fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("activation", &self.activation)
            .field("request", &self.request)
            .finish()
    }
}

/// Specifying what happened to a backend result.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Resolution {
    /// The screen that started the submission is gone.
    Discarded,
    Failed,
    Succeeded,
}

/// Houses the session state: the router and the state of the active screen.
///
/// Form and submission state belong to one screen activation and are replaced
/// whenever the route changes.
pub struct State {
    router: Router,
    policy: PasswordPolicy,
    activation: u64,
    form: Option<AuthForm>,
    submission: Submission,
    observers: Vec<Observer>,
    last_snapshot: Option<Snapshot>,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State::new(PasswordPolicy::default())
    }
}

impl State {
    /// Return a session starting on the welcome screen.
    ///
    pub fn new(policy: PasswordPolicy) -> State {
        State::with_start(Route::Welcome, policy)
    }

    /// Return a session starting on the given screen.
    ///
    pub fn with_start(start: Route, policy: PasswordPolicy) -> State {
        let mut state = State {
            router: Router::new(start),
            policy,
            activation: 0,
            form: None,
            submission: Submission::default(),
            observers: vec![],
            last_snapshot: None,
        };
        state.activate_screen();
        state
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current_route(&self) -> Route {
        self.router.current()
    }

    /// Return the form of the active screen, if it has one.
    ///
    pub fn form(&self) -> Option<&AuthForm> {
        self.form.as_ref()
    }

    pub fn phase(&self) -> &Phase {
        self.submission.phase()
    }

    pub fn message(&self) -> Option<&str> {
        self.submission.message()
    }

    /// Identifier of the active screen instance.
    ///
    pub fn activation(&self) -> u64 {
        self.activation
    }

    /// Register an observer. It immediately receives the current snapshot and
    /// then every changed one.
    ///
    pub fn subscribe(&mut self, observer: Observer) {
        let snapshot = self.snapshot();
        observer(&snapshot);
        self.observers.push(observer);
        self.last_snapshot = Some(snapshot);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            route: self.router.current(),
            back_stack: self.router.back_stack().to_vec(),
            form: self.form.as_ref().map(AuthForm::snapshot),
            phase: self.submission.phase().clone(),
            message: self.submission.message().map(str::to_string),
        }
    }

    /// Open `route` on top of the current screen.
    ///
    pub fn navigate(&mut self, route: Route) {
        debug!("Navigating from {} to {}.", self.router.current(), route);
        self.router.navigate(route);
        self.activate_screen();
        self.emit();
    }

    /// Return to the previous screen. No-op on an empty history.
    ///
    pub fn go_back(&mut self) -> bool {
        if !self.router.go_back() {
            debug!("Back requested with empty history.");
            return false;
        }
        self.activate_screen();
        self.emit();
        true
    }

    /// Open `route` after truncating the history at `pop_up_to`.
    ///
    pub fn navigate_with_pop_up(&mut self, route: Route, pop_up_to: Route, inclusive: bool) {
        self.router.navigate_with_pop_up(route, pop_up_to, inclusive);
        self.activate_screen();
        self.emit();
    }

    /// Update a field of the active form. Returns false when the screen does
    /// not show that field.
    ///
    pub fn set_field(&mut self, field: Field, value: String) -> bool {
        let Some(form) = self.form.as_mut().filter(|f| f.kind().has_field(field)) else {
            warn!("Screen {} has no {} field.", self.router.current(), field.as_str());
            return false;
        };
        form.set_value(field, value);
        self.emit();
        true
    }

    /// Flip the remember-me option of the login form.
    ///
    pub fn toggle_remember_me(&mut self) -> bool {
        match self.form.as_mut() {
            Some(form) if form.kind() == FormKind::Login => {
                form.toggle_remember_me();
                self.emit();
                true
            }
            _ => false,
        }
    }

    /// Reset every field and error of the active form.
    ///
    pub fn clear_form(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.clear();
            self.emit();
        }
    }

    /// Validate the active form and, when it passes, move to `Pending`.
    ///
    /// Returns the submission to hand to the lifecycle driver, or None if the
    /// screen has no form, a submission is already under way, or validation
    /// failed. `on_success` runs once the submission succeeds.
    pub fn submit(&mut self, on_success: Completion) -> Option<PendingSubmission> {
        let kind = self.form.as_ref()?.kind();
        if !self.submission.begin() {
            return None;
        }
        self.emit();

        let form = self.form.as_mut()?;
        if !form.validate() {
            debug!("Validation failed for {:?} form.", kind);
            self.submission.reject();
            self.emit();
            return None;
        }
        let credentials = form.credentials();
        self.submission.start();
        self.emit();

        info!("Submitting {:?} form for {}...", kind, credentials.email);
        Some(PendingSubmission {
            activation: self.activation,
            request: AuthRequest { kind, credentials },
            on_success,
        })
    }

    /// Apply a backend result to the screen that started it.
    ///
    pub fn resolve_submission(
        &mut self,
        activation: u64,
        request: &AuthRequest,
        outcome: Result<(), SubmissionError>,
    ) -> Resolution {
        if activation != self.activation {
            debug!("Discarding result for abandoned screen activation {}.", activation);
            return Resolution::Discarded;
        }
        let resolution = match &outcome {
            Ok(()) => Resolution::Succeeded,
            Err(_) => Resolution::Failed,
        };
        let outcome = outcome.map(|()| success_message(request.kind, &request.credentials));
        if !self.submission.resolve(outcome) {
            return Resolution::Discarded;
        }
        self.emit();
        resolution
    }

    /// Run the completion of a succeeded submission.
    ///
    /// Returns false, without calling `on_success`, if the screen was left in
    /// the meantime.
    pub fn complete_submission(&mut self, activation: u64, on_success: Completion) -> bool {
        if activation != self.activation || *self.submission.phase() != Phase::Succeeded {
            debug!("Dropping completion for abandoned screen activation {}.", activation);
            return false;
        }
        let before = self.router.clone();
        on_success(&mut self.router);
        if self.router != before {
            self.activate_screen();
        } else {
            self.submission.reset();
        }
        self.emit();
        true
    }

    /// Close the failure dialog of the active screen.
    ///
    pub fn dismiss_error(&mut self) -> bool {
        if self.submission.dismiss() {
            self.emit();
            return true;
        }
        false
    }

    /// Start a fresh screen instance for the current route.
    ///
    fn activate_screen(&mut self) {
        self.activation += 1;
        let policy = self.policy;
        self.form = FormKind::for_route(self.router.current()).map(|kind| AuthForm::new(kind, policy));
        self.submission.reset();
    }

    /// Notify observers if the snapshot changed since the last notification.
    ///
    fn emit(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        if self.last_snapshot.as_ref() == Some(&snapshot) {
            return;
        }
        for observer in &self.observers {
            observer(&snapshot);
        }
        self.last_snapshot = Some(snapshot);
    }
}
