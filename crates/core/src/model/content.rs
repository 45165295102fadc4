use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::technique::Technique;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("expected text content for {0}")]
    ExpectedText(Technique),
    #[error("expected a video description for video content")]
    ExpectedVideo,
    #[error("generated content is empty")]
    Empty,
}

/// Video reference chosen by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoContent {
    #[serde(rename = "videoId")]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl VideoContent {
    #[must_use]
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }
}

/// `content` field of `generate-content`, before it is matched against the technique.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPayload {
    Text(String),
    Video(VideoContent),
}

/// Generated learning material for one topic and technique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LearningContent {
    Passage(String),
    Video(VideoContent),
    /// Mermaid source.
    Flowchart(String),
}

impl LearningContent {
    /// # Errors
    ///
    /// Returns `ContentError` when the payload shape doesn't match the technique or is blank.
    pub fn from_payload(
        technique: Technique,
        payload: ContentPayload,
    ) -> Result<Self, ContentError> {
        match (technique, payload) {
            (Technique::Passage, ContentPayload::Text(text)) => {
                non_blank(text).map(Self::Passage)
            }
            (Technique::Flowchart, ContentPayload::Text(text)) => {
                non_blank(strip_code_fence(&text).to_string()).map(Self::Flowchart)
            }
            (Technique::Video, ContentPayload::Video(video)) => {
                if video.video_id.trim().is_empty() {
                    return Err(ContentError::Empty);
                }
                Ok(Self::Video(video))
            }
            (Technique::Video, ContentPayload::Text(_)) => Err(ContentError::ExpectedVideo),
            (technique, ContentPayload::Video(_)) => Err(ContentError::ExpectedText(technique)),
        }
    }

    #[must_use]
    pub fn technique(&self) -> Technique {
        match self {
            Self::Passage(_) => Technique::Passage,
            Self::Video(_) => Technique::Video,
            Self::Flowchart(_) => Technique::Flowchart,
        }
    }

    /// The shape stored with the assessment session on the backend.
    #[must_use]
    pub fn to_payload(&self) -> ContentPayload {
        match self {
            Self::Passage(text) | Self::Flowchart(text) => ContentPayload::Text(text.clone()),
            Self::Video(video) => ContentPayload::Video(video.clone()),
        }
    }

    /// Text handed to question generation. Video is flattened to labelled lines.
    #[must_use]
    pub fn question_source(&self) -> String {
        match self {
            Self::Passage(text) | Self::Flowchart(text) => text.clone(),
            Self::Video(video) => format!(
                "Title: {}\nDescription: {}\nVideo ID: {}",
                video.title, video.description, video.video_id
            ),
        }
    }
}

fn non_blank(text: String) -> Result<String, ContentError> {
    if text.trim().is_empty() {
        Err(ContentError::Empty)
    } else {
        Ok(text)
    }
}

/// Remove a surrounding ```` ``` ```` / ```` ```mermaid ```` fence if the generator left one in.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_lang, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
