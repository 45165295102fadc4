use brainpath_core::model::{Board, EducationLevel, SubLevel};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome back",
            AuthMode::Signup => "Create your account",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Log in",
            AuthMode::Signup => "Sign up",
        }
    }

    #[must_use]
    pub fn toggle_prompt(self) -> &'static str {
        match self {
            AuthMode::Login => "Don't have an account? Sign up",
            AuthMode::Signup => "Already have an account? Log in",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[must_use]
pub fn education_level_options() -> Vec<SelectOption> {
    EducationLevel::CHOICES
        .iter()
        .map(|level| SelectOption {
            value: level.as_str().to_string(),
            label: level.label().to_string(),
        })
        .collect()
}

#[must_use]
pub fn sub_level_options() -> Vec<SelectOption> {
    SubLevel::CHOICES
        .iter()
        .map(|level| SelectOption {
            value: level.as_str().to_string(),
            label: level.label().to_string(),
        })
        .collect()
}

#[must_use]
pub fn board_options() -> Vec<SelectOption> {
    Board::CHOICES
        .iter()
        .map(|board| SelectOption {
            value: board.as_str().to_string(),
            label: board.label().to_string(),
        })
        .collect()
}

/// `<select>` value to a model choice; the empty placeholder means "not chosen".
#[must_use]
pub fn parse_selection<T: From<String>>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| T::from(trimmed.to_string()))
}
