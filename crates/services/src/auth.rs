//! Sign-in form state and provider error mapping.
//!
//! Talking to the identity provider is the host's job; this module only
//! validates input locally and turns provider error codes into failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum password length accepted by the identity provider.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Signed-in identity, or a guest who skipped sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthUser {
    Guest,
    SignedIn { email: String },
}

impl AuthUser {
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            AuthUser::Guest => "ゲスト",
            AuthUser::SignedIn { email } => email,
        }
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        matches!(self, AuthUser::Guest)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthFailure {
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("email already in use")]
    EmailInUse,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("authentication failed")]
    Other,
}

impl AuthFailure {
    /// Map an identity-provider error code (e.g. `auth/wrong-password`).
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/email-already-in-use" => Self::EmailInUse,
            "auth/weak-password" => Self::WeakPassword,
            "auth/invalid-email" => Self::InvalidEmail,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

/// Validated credentials ready to hand to the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("mode", &self.mode)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Sign-in / sign-up form.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    mode: AuthMode,
    pub email: String,
    pub password: String,
    error: Option<AuthFailure>,
    pending: bool,
}

impl AuthForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn error(&self) -> Option<&AuthFailure> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.error = None;
    }

    /// Validate input and mark the form as pending.
    ///
    /// # Errors
    ///
    /// Returns `AuthFailure::InvalidEmail` or `AuthFailure::WeakPassword`;
    /// the failure is also kept on the form for display.
    pub fn submit(&mut self) -> Result<Credentials, AuthFailure> {
        self.error = None;
        let email = self.email.trim().to_string();
        let result = if !looks_like_email(&email) {
            Err(AuthFailure::InvalidEmail)
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            Err(AuthFailure::WeakPassword)
        } else {
            Ok(Credentials {
                mode: self.mode,
                email,
                password: self.password.clone(),
            })
        };

        match &result {
            Ok(_) => self.pending = true,
            Err(failure) => self.error = Some(failure.clone()),
        }
        result
    }

    /// Record the provider's answer to the last submission.
    pub fn complete(&mut self, outcome: Result<(), AuthFailure>) {
        self.pending = false;
        if let Err(failure) = outcome {
            tracing::warn!(error = %failure, "authentication failed");
            self.error = Some(failure);
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, password: &str) -> AuthForm {
        AuthForm {
            email: email.to_string(),
            password: password.to_string(),
            ..AuthForm::default()
        }
    }

    #[test]
    fn provider_codes_map_to_failures() {
        assert_eq!(AuthFailure::from_code("auth/wrong-password"), AuthFailure::WrongPassword);
        assert_eq!(AuthFailure::from_code("auth/email-already-in-use"), AuthFailure::EmailInUse);
        assert_eq!(AuthFailure::from_code("auth/network-request-failed"), AuthFailure::Other);
    }

    #[test]
    fn local_validation_rejects_bad_input() {
        let mut f = form("not-an-email", "secret123");
        assert_eq!(f.submit().unwrap_err(), AuthFailure::InvalidEmail);
        assert_eq!(f.error(), Some(&AuthFailure::InvalidEmail));

        let mut f = form("kid@example.com", "12345");
        assert_eq!(f.submit().unwrap_err(), AuthFailure::WeakPassword);
        assert!(!f.is_pending());
    }

    #[test]
    fn valid_submission_is_pending_until_completed() {
        let mut f = form("  kid@example.com ", "123456");
        f.toggle_mode();
        let creds = f.submit().unwrap();
        assert_eq!(creds.email, "kid@example.com");
        assert_eq!(creds.mode, AuthMode::SignUp);
        assert!(f.is_pending());

        f.complete(Err(AuthFailure::EmailInUse));
        assert!(!f.is_pending());
        assert_eq!(f.error(), Some(&AuthFailure::EmailInUse));
    }

    #[test]
    fn toggling_mode_clears_error() {
        let mut f = form("bad", "123456");
        let _ = f.submit();
        f.toggle_mode();
        assert!(f.error().is_none());
        assert_eq!(f.mode(), AuthMode::SignUp);
    }
}
