use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content-delivery mode for a learning topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    Passage,
    Video,
    Flowchart,
}

impl Technique {
    pub const ALL: [Technique; 3] = [Technique::Passage, Technique::Video, Technique::Flowchart];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passage => "passage",
            Self::Video => "video",
            Self::Flowchart => "flowchart",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Passage => "Text Passage",
            Self::Video => "Video",
            Self::Flowchart => "Flowchart",
        }
    }

    #[must_use]
    pub fn blurb(self) -> &'static str {
        match self {
            Self::Passage => "Read a focused explanation.",
            Self::Video => "Watch a short animated lesson.",
            Self::Flowchart => "Follow the idea as a diagram.",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown technique: {0}")]
pub struct UnknownTechnique(pub String);

impl FromStr for Technique {
    type Err = UnknownTechnique;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passage" => Ok(Self::Passage),
            "video" => Ok(Self::Video),
            "flowchart" => Ok(Self::Flowchart),
            other => Err(UnknownTechnique(other.to_string())),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TopicError {
    #[error("please enter a topic first")]
    Empty,
}

/// A non-blank, trimmed learning topic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    /// # Errors
    ///
    /// Returns `TopicError::Empty` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Result<Self, TopicError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TopicError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
