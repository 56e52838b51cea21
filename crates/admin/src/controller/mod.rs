//! Loaders and actions behind every product page.
//!
//! An action runs one [`Submission`] through
//! `Idle -> Validating -> {Redirecting | ErrorDisplayed}`. Same-page actions run
//! in [`SubmissionMode::Fetch`] and return to `Idle` instead of redirecting.

mod product;

pub use self::product::{Confirm, DELETE_PROMPT, ProductController};

use tracing::debug;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Todos los campos son obligatorios";
pub const STORE_FAILURE_MESSAGE: &str = "Hubo un error al guardar el producto, intenta de nuevo";
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionMode {
    /// Full-page form post that ends by navigating elsewhere.
    Navigate,
    /// In-place post that refreshes the current page's data.
    Fetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Redirecting(String),
    ErrorDisplayed(String),
}

/// One form submission and the states it has passed through.
#[derive(Debug, Clone)]
pub struct Submission {
    mode: SubmissionMode,
    state: SubmissionState,
    transitions: Vec<SubmissionState>,
}

impl Submission {
    pub fn new(mode: SubmissionMode) -> Self {
        Self {
            mode,
            state: SubmissionState::Idle,
            transitions: Vec::new(),
        }
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// States entered after `Idle`, in order.
    pub fn transitions(&self) -> &[SubmissionState] {
        &self.transitions
    }

    pub fn redirect_location(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Redirecting(location) => Some(location),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::ErrorDisplayed(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn validate(&mut self) {
        debug_assert_eq!(self.state, SubmissionState::Idle);
        self.enter(SubmissionState::Validating);
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.enter(SubmissionState::ErrorDisplayed(message.into()));
    }

    /// Terminal step after the store call resolved successfully.
    pub(crate) fn complete(&mut self, location: &str) {
        debug_assert_eq!(self.state, SubmissionState::Validating);
        match self.mode {
            SubmissionMode::Navigate => {
                self.enter(SubmissionState::Redirecting(location.to_string()))
            }
            SubmissionMode::Fetch => self.enter(SubmissionState::Idle),
        }
    }

    /// Fetch submissions settle back to `Idle` whatever the store answered.
    pub(crate) fn settle(&mut self) {
        debug_assert_eq!(self.mode, SubmissionMode::Fetch);
        self.enter(SubmissionState::Idle);
    }

    fn enter(&mut self, next: SubmissionState) {
        debug!("Submission {:?}: {:?} -> {:?}", self.mode, self.state, next);
        self.state = next.clone();
        self.transitions.push(next);
    }
}

/// What a loader hands to its view.
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderOutcome<T> {
    Data(T),
    Redirect(String),
}
