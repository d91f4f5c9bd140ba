use drill_core::{DrillConfig, DrillEvent};

use crate::auth::AuthUser;
use crate::error::AppStateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    Selection,
    Drill,
    Results,
}

/// Host-level UI state, kept apart from the drill engine.
///
/// Holds who is signed in, which screen is showing, the current selection,
/// the menu flag and the solved-problems counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    screen: Screen,
    user: Option<AuthUser>,
    selection: Option<DrillConfig>,
    menu_open: bool,
    problems_solved: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::SignIn,
            user: None,
            selection: None,
            menu_open: false,
            problems_solved: 0,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<DrillConfig> {
        self.selection
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    #[must_use]
    pub fn problems_solved(&self) -> u32 {
        self.problems_solved
    }

    pub fn sign_in(&mut self, user: AuthUser) {
        tracing::debug!(guest = user.is_guest(), "signed in");
        self.user = Some(user);
        self.screen = Screen::Selection;
        self.menu_open = false;
    }

    /// Back to the sign-in screen; the counter is per user, so it resets.
    pub fn sign_out(&mut self) {
        *self = Self::new();
    }

    /// Pick difficulty and operation, then show the drill.
    ///
    /// # Errors
    ///
    /// Returns `AppStateError::NotSignedIn` without a user (guests count).
    pub fn select(&mut self, config: DrillConfig) -> Result<(), AppStateError> {
        if self.user.is_none() {
            return Err(AppStateError::NotSignedIn);
        }
        self.selection = Some(config);
        self.screen = Screen::Drill;
        self.menu_open = false;
        Ok(())
    }

    /// Apply an event dispatched by the drill.
    pub fn apply_event(&mut self, event: &DrillEvent) {
        match event {
            DrillEvent::ProblemSolved => {
                self.problems_solved = self.problems_solved.saturating_add(1);
            }
            DrillEvent::SetComplete { .. } => self.screen = Screen::Results,
        }
    }

    /// Leave the results screen for a fresh set with the same selection.
    ///
    /// # Errors
    ///
    /// Returns `AppStateError::NoResults` unless showing results.
    pub fn restart_set(&mut self) -> Result<DrillConfig, AppStateError> {
        if self.screen != Screen::Results {
            return Err(AppStateError::NoResults);
        }
        let config = self.selection.ok_or(AppStateError::NoSelection)?;
        self.screen = Screen::Drill;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `AppStateError::NotSignedIn` without a user.
    pub fn back_to_selection(&mut self) -> Result<(), AppStateError> {
        if self.user.is_none() {
            return Err(AppStateError::NotSignedIn);
        }
        self.screen = Screen::Selection;
        self.menu_open = false;
        Ok(())
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}
