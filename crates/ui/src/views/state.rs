use dioxus::prelude::*;

use services::{ApiError, GENERIC_ERROR_MESSAGE};

const SIGNED_OUT_MESSAGE: &str = "Your session has expired. Please sign in again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// Already phrased for the user.
    Message(String),
    /// The backend rejected the stored token.
    SignedOut,
}

impl ViewError {
    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        if err.is_unauthorized() {
            ViewError::SignedOut
        } else {
            ViewError::Message(err.user_message())
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Unknown => GENERIC_ERROR_MESSAGE,
            ViewError::Message(message) => message,
            ViewError::SignedOut => SIGNED_OUT_MESSAGE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
