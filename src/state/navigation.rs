//! Navigation-related state types.
//!
//! This module contains the route identifiers, the back-stack router and the
//! completion callbacks wired to each authentication screen.

use std::fmt;
use std::str::FromStr;

/// Specifying the different screens.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Route {
    Welcome,
    Login,
    SignUp,
    ForgotPassword,
    Home,
}

impl Route {
    /// Every route, in declaration order.
    ///
    pub const ALL: [Route; 5] = [
        Route::Welcome,
        Route::Login,
        Route::SignUp,
        Route::ForgotPassword,
        Route::Home,
    ];

    /// Return the stable identifier of the route.
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Welcome => "welcome",
            Route::Login => "login",
            Route::SignUp => "signup",
            Route::ForgotPassword => "forgot_password",
            Route::Home => "home",
        }
    }

    /// Return the routes the screen offers a button for.
    ///
    pub fn links(&self) -> &'static [Route] {
        match self {
            Route::Welcome => &[Route::SignUp, Route::Login],
            Route::Login => &[Route::ForgotPassword, Route::SignUp],
            Route::SignUp | Route::ForgotPassword | Route::Home => &[],
        }
    }

    /// Return true if the screen has a button leading to `target`.
    ///
    pub fn links_to(&self, target: Route) -> bool {
        self.links().contains(&target)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown route identifier.
///
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .iter()
            .find(|route| route.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

/// Holds the active route and the history used for back navigation.
///
/// Every operation is total: popping an empty stack or popping up to a route
/// that is not on the stack leaves the history untouched.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Router {
    current: Route,
    back_stack: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Router::new(Route::Welcome)
    }
}

impl Router {
    /// Return a router positioned at `start` with an empty history.
    ///
    pub fn new(start: Route) -> Self {
        Router {
            current: start,
            back_stack: vec![],
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Previously active routes, most recent last.
    ///
    pub fn back_stack(&self) -> &[Route] {
        &self.back_stack
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    /// Push the current route onto the history and activate `route`.
    ///
    /// Navigating to the active route duplicates it on the stack.
    pub fn navigate(&mut self, route: Route) {
        self.back_stack.push(self.current);
        self.current = route;
    }

    /// Return to the previous route. Returns false on an empty history.
    ///
    pub fn go_back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Activate `route` after truncating the history at `pop_up_to`.
    ///
    /// The truncation removes everything above the first occurrence of
    /// `pop_up_to`, and the occurrence itself when `inclusive` is set.
    pub fn navigate_with_pop_up(&mut self, route: Route, pop_up_to: Route, inclusive: bool) {
        if let Some(index) = self.back_stack.iter().position(|r| *r == pop_up_to) {
            let keep = if inclusive { index } else { index + 1 };
            self.back_stack.truncate(keep);
        }
        self.current = route;
    }
}

/// Callback run once a submission has succeeded and its success state has
/// been shown.
///
pub type Completion = Box<dyn FnOnce(&mut Router) + Send>;

/// Return the completion wired to the form on `route`.
///
/// Signing in or up replaces the pre-auth history with Home so back
/// navigation cannot return to it; a sent reset link returns to the previous
/// screen.
pub fn completion_for(route: Route) -> Completion {
    match route {
        Route::Login | Route::SignUp => Box::new(|router: &mut Router| {
            router.navigate_with_pop_up(Route::Home, Route::Welcome, true)
        }),
        Route::ForgotPassword => Box::new(|router: &mut Router| {
            router.go_back();
        }),
        Route::Welcome | Route::Home => Box::new(|_: &mut Router| {}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_identifiers() {
        assert_eq!(Route::Welcome.as_str(), "welcome");
        assert_eq!(Route::ForgotPassword.to_string(), "forgot_password");
        for route in Route::ALL {
            assert_eq!(route.as_str().parse::<Route>(), Ok(route));
        }
        assert_eq!(
            "settings".parse::<Route>(),
            Err(UnknownRoute("settings".to_string()))
        );
    }

    #[test]
    fn test_route_links() {
        assert!(Route::Welcome.links_to(Route::Login));
        assert!(Route::Welcome.links_to(Route::SignUp));
        assert!(Route::Login.links_to(Route::ForgotPassword));
        assert!(!Route::Welcome.links_to(Route::Home));
        assert!(Route::Home.links().is_empty());
    }

    #[test]
    fn test_router_starts_at_welcome() {
        let router = Router::default();
        assert_eq!(router.current(), Route::Welcome);
        assert!(router.back_stack().is_empty());
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_navigate_then_go_back() {
        let mut router = Router::default();
        router.navigate(Route::Login);
        router.navigate(Route::ForgotPassword);
        assert!(router.go_back());
        assert_eq!(router.current(), Route::Login);
        assert_eq!(router.back_stack(), &[Route::Welcome]);
    }

    #[test]
    fn test_navigate_to_current_route_duplicates_it() {
        let mut router = Router::new(Route::Login);
        router.navigate(Route::Login);
        assert_eq!(router.current(), Route::Login);
        assert_eq!(router.back_stack(), &[Route::Login]);
    }

    #[test]
    fn test_go_back_on_empty_stack_is_noop() {
        let mut router = Router::default();
        for _ in 0..3 {
            assert!(!router.go_back());
        }
        assert_eq!(router, Router::default());
    }

    #[test]
    fn test_pop_up_inclusive_clears_history() {
        let mut router = Router::default();
        router.navigate(Route::Login);
        router.navigate(Route::SignUp);
        // Stack is [Welcome, Login]; pop up to Login inclusive.
        router.navigate_with_pop_up(Route::Home, Route::Login, true);
        assert_eq!(router.current(), Route::Home);
        assert_eq!(router.back_stack(), &[Route::Welcome]);

        let mut router = Router::new(Route::Login);
        router.navigate(Route::SignUp);
        router.navigate(Route::ForgotPassword);
        router.navigate_with_pop_up(Route::Home, Route::Login, true);
        assert_eq!(router.current(), Route::Home);
        assert!(router.back_stack().is_empty());
    }

    #[test]
    fn test_pop_up_to_first_entry_empties_stack() {
        let mut router = Router::default();
        router.navigate(Route::Welcome);
        router.navigate(Route::Login);
        router.navigate_with_pop_up(Route::Home, Route::Welcome, true);
        assert_eq!(router.current(), Route::Home);
        assert!(router.back_stack().is_empty());
    }

    #[test]
    fn test_pop_up_exclusive_keeps_target() {
        let mut router = Router::default();
        router.navigate(Route::Login);
        router.navigate(Route::ForgotPassword);
        router.navigate_with_pop_up(Route::Home, Route::Welcome, false);
        assert_eq!(router.current(), Route::Home);
        assert_eq!(router.back_stack(), &[Route::Welcome]);
    }

    #[test]
    fn test_pop_up_missing_target_keeps_history() {
        let mut router = Router::default();
        router.navigate(Route::Login);
        router.navigate_with_pop_up(Route::Home, Route::SignUp, true);
        assert_eq!(router.current(), Route::Home);
        assert_eq!(router.back_stack(), &[Route::Welcome]);
    }

    #[test]
    fn test_login_completion_replaces_pre_auth_history() {
        let mut router = Router::default();
        router.navigate(Route::Login);
        completion_for(Route::Login)(&mut router);
        assert_eq!(router.current(), Route::Home);
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_reset_completion_goes_back() {
        let mut router = Router::default();
        router.navigate(Route::Login);
        router.navigate(Route::ForgotPassword);
        completion_for(Route::ForgotPassword)(&mut router);
        assert_eq!(router.current(), Route::Login);
    }
}
