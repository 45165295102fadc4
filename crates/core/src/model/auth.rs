use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::user::{Board, EducationLevel, SubLevel, UserProfile};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoginError {
    #[error("email is required")]
    MissingEmail,
    #[error("password is required")]
    MissingPassword,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SignupError {
    #[error("email is required")]
    MissingEmail,
    #[error("password is required")]
    MissingPassword,
    #[error("please select your education level")]
    MissingEducationLevel,
    #[error("please select your class level")]
    MissingSubLevel,
    #[error("please select your board")]
    MissingBoard,
}

/// Opaque bearer token issued by the backend.
///
/// `Debug` is redacted so the token never lands in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// A logged-in user: token and profile always travel together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: AuthToken,
    pub user: UserProfile,
}

impl AuthSession {
    #[must_use]
    pub fn new(token: AuthToken, user: UserProfile) -> Self {
        Self { token, user }
    }
}

/// Validated body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated body of `POST /auth/signup`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub education_level: EducationLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_level: Option<SubLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<Board>,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("education_level", &self.education_level)
            .field("sub_level", &self.sub_level)
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

/// Raw login form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns `LoginError` when a field is blank.
    pub fn validate(&self) -> Result<LoginRequest, LoginError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(LoginError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(LoginError::MissingPassword);
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Raw signup form state. Selections are `None` until the user picks one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub education_level: Option<EducationLevel>,
    pub sub_level: Option<SubLevel>,
    pub board: Option<Board>,
}

impl SignupForm {
    /// Validate the form. School-level signups must carry both a sub-level and a board;
    /// other levels drop any stale school selections.
    ///
    /// # Errors
    ///
    /// Returns the first `SignupError` encountered in field order.
    pub fn validate(&self) -> Result<SignupRequest, SignupError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(SignupError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(SignupError::MissingPassword);
        }
        let education_level = self
            .education_level
            .clone()
            .filter(|level| !level.as_str().trim().is_empty())
            .ok_or(SignupError::MissingEducationLevel)?;

        let (sub_level, board) = if education_level.requires_school_details() {
            let sub_level = self
                .sub_level
                .clone()
                .filter(|value| !value.as_str().trim().is_empty())
                .ok_or(SignupError::MissingSubLevel)?;
            let board = self
                .board
                .clone()
                .filter(|value| !value.as_str().trim().is_empty())
                .ok_or(SignupError::MissingBoard)?;
            (Some(sub_level), Some(board))
        } else {
            (None, None)
        };

        Ok(SignupRequest {
            email: email.to_string(),
            password: self.password.clone(),
            education_level,
            sub_level,
            board,
        })
    }
}
