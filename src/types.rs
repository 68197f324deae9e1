use crate::error::FlowError;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum AppMode {
    Normal,
    Insert,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MediaKind::Video => "Video",
            MediaKind::Audio => "Audio",
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Session {
    pub submitted_url: String,
    pub media_kind: Option<MediaKind>,
}

impl Session {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            submitted_url: url.into(),
            media_kind: None,
        }
    }

    pub fn with_kind(&self, kind: MediaKind) -> Self {
        Self {
            submitted_url: self.submitted_url.clone(),
            media_kind: Some(kind),
        }
    }

    pub fn unselected(&self) -> Self {
        Self::new(self.submitted_url.clone())
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Quality {
    pub label: String,
    pub detail: String,
}

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct FormatCatalog {
    pub formats: Vec<String>,
    pub qualities: Vec<Quality>,
}

impl FormatCatalog {
    /// Picks the arrays relevant to `kind` out of a `/formats` body.
    ///
    /// The kind's format array is required; a missing `available_qualities`
    /// yields an empty quality list. Quality order follows the body.
    pub fn from_response(kind: MediaKind, body: &Value) -> Result<Self, FlowError> {
        let key = match kind {
            MediaKind::Video => "video_formats",
            MediaKind::Audio => "audio_formats",
        };

        let formats = body
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| FlowError::Protocol(format!("Response is missing {key}")))?
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();

        let empty = Map::new();
        let qualities = body
            .get("available_qualities")
            .and_then(Value::as_object)
            .unwrap_or(&empty)
            .iter()
            .map(|(label, meta)| Quality {
                label: label.clone(),
                detail: match meta {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                },
            })
            .collect();

        Ok(Self { formats, qualities })
    }

    pub fn contains(&self, selection: &Selection) -> bool {
        self.formats.iter().any(|f| *f == selection.format)
            && self.qualities.iter().any(|q| q.label == selection.quality)
    }
}

#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub struct Selection {
    pub format: String,
    pub quality: String,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DownloadStatus {
    Success,
    Failure,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DownloadResult {
    pub status: DownloadStatus,
    pub link: Option<String>,
}

impl DownloadResult {
    pub fn from_response(body: &Value) -> Self {
        let status = body.get("status").and_then(Value::as_str);
        let link = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty());

        match (status, link) {
            (Some("success"), Some(link)) => Self {
                status: DownloadStatus::Success,
                link: Some(link.to_string()),
            },
            _ => Self {
                status: DownloadStatus::Failure,
                link: None,
            },
        }
    }
}
