use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Broad education stage chosen at signup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationLevel {
    School,
    College,
    Undergraduate,
    Postgraduate,
    Other(String),
}

impl EducationLevel {
    pub const CHOICES: [EducationLevel; 4] = [
        EducationLevel::School,
        EducationLevel::College,
        EducationLevel::Undergraduate,
        EducationLevel::Postgraduate,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::School => "school",
            Self::College => "college",
            Self::Undergraduate => "undergraduate",
            Self::Postgraduate => "postgraduate",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::School => "School",
            Self::College => "College",
            Self::Undergraduate => "Undergraduate",
            Self::Postgraduate => "Postgraduate",
            Self::Other(raw) => raw,
        }
    }

    /// School students must also pick a sub-level and a board.
    #[must_use]
    pub fn requires_school_details(&self) -> bool {
        matches!(self, Self::School)
    }
}

impl From<String> for EducationLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "school" => Self::School,
            "college" => Self::College,
            "undergraduate" => Self::Undergraduate,
            "postgraduate" => Self::Postgraduate,
            _ => Self::Other(raw),
        }
    }
}

impl From<EducationLevel> for String {
    fn from(level: EducationLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Stage within school.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubLevel {
    Primary,
    Middle,
    HighSchool,
    SeniorSecondary,
    Competitive,
    Other(String),
}

impl SubLevel {
    pub const CHOICES: [SubLevel; 5] = [
        SubLevel::Primary,
        SubLevel::Middle,
        SubLevel::HighSchool,
        SubLevel::SeniorSecondary,
        SubLevel::Competitive,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Primary => "primary",
            Self::Middle => "middle",
            Self::HighSchool => "high_school",
            Self::SeniorSecondary => "senior_secondary",
            Self::Competitive => "competitive",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Primary => "Primary (Class 1-5)",
            Self::Middle => "Middle (Class 6-8)",
            Self::HighSchool => "High School (Class 9-10)",
            Self::SeniorSecondary => "Senior Secondary (Class 11-12)",
            Self::Competitive => "Competitive (JEE/NEET)",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for SubLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "primary" => Self::Primary,
            "middle" => Self::Middle,
            "high_school" => Self::HighSchool,
            "senior_secondary" => Self::SeniorSecondary,
            "competitive" => Self::Competitive,
            _ => Self::Other(raw),
        }
    }
}

impl From<SubLevel> for String {
    fn from(level: SubLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Examination board for school students.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Board {
    Cbse,
    Icse,
    State,
    Ncert,
    Other(String),
}

impl Board {
    pub const CHOICES: [Board; 4] = [Board::Cbse, Board::Icse, Board::State, Board::Ncert];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cbse => "cbse",
            Self::Icse => "icse",
            Self::State => "state",
            Self::Ncert => "ncert",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Cbse => "CBSE",
            Self::Icse => "ICSE",
            Self::State => "State Board",
            Self::Ncert => "NCERT",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Board {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "cbse" => Self::Cbse,
            "icse" => Self::Icse,
            "state" => Self::State,
            "ncert" => Self::Ncert,
            _ => Self::Other(raw),
        }
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.as_str().to_string()
    }
}

/// Profile returned by the backend on login/signup. Read-only on the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub email: String,
    pub education_level: EducationLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_level: Option<SubLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Board>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Short description for the dashboard header, e.g. `School · High School (Class 9-10) · CBSE`.
    #[must_use]
    pub fn level_summary(&self) -> String {
        let mut parts = vec![self.education_level.label().to_string()];
        if let Some(sub_level) = &self.sub_level {
            parts.push(sub_level.label().to_string());
        }
        if let Some(board) = &self.board {
            parts.push(board.label().to_string());
        }
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_user_payload() {
        let json = r#"{
            "id": "7b1c",
            "email": "a@b.com",
            "education_level": "school",
            "sub_level": "high_school",
            "board": "cbse",
            "created_at": "2024-01-02T03:04:05Z"
        }"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.education_level, EducationLevel::School);
        assert_eq!(user.sub_level, Some(SubLevel::HighSchool));
        assert_eq!(user.board, Some(Board::Cbse));
        assert_eq!(user.level_summary(), "School · High School (Class 9-10) · CBSE");
    }

    #[test]
    fn keeps_unknown_levels_verbatim() {
        let json = r#"{"email":"a@b.com","education_level":"bootcamp","sub_level":null}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.education_level, EducationLevel::Other("bootcamp".into()));
        assert_eq!(user.sub_level, None);

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["education_level"], "bootcamp");
    }

    #[test]
    fn only_school_requires_details() {
        assert!(EducationLevel::School.requires_school_details());
        assert!(!EducationLevel::College.requires_school_details());
        assert!(!EducationLevel::Postgraduate.requires_school_details());
    }
}
