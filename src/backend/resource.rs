use crate::state::FormKind;
#[cfg(test)]
use fake::Dummy;
use std::fmt;

/// Defines the credentials carried by a submission.
///
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(Dummy))]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Defines a request sent to the authentication backend.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthRequest {
    pub kind: FormKind,
    pub credentials: Credentials,
}
