//! Films: structured video descriptors instead of raw embed markup.
//!
//! Only allow-listed providers are accepted; the embed URL is always
//! built from the provider and id, so third-party markup never reaches
//! the site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Identify, ListRecord};

#[derive(Debug, Clone, Error, PartialEq)]
#[error("unsupported video URL: {0}. Only YouTube and Vimeo links are accepted.")]
pub struct UnsupportedVideoUrl(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    YouTube,
    Vimeo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    pub provider: VideoProvider,
    pub video_id: String,
}

impl VideoSource {
    /// Parse a pasted watch URL into a descriptor. Anything outside the
    /// allow list is rejected.
    pub fn parse(url: &str) -> Result<Self, UnsupportedVideoUrl> {
        let trimmed = url.trim();
        if let Some(id) = youtube_id(trimmed) {
            return Ok(Self {
                provider: VideoProvider::YouTube,
                video_id: id,
            });
        }
        if let Some(id) = vimeo_id(trimmed) {
            return Ok(Self {
                provider: VideoProvider::Vimeo,
                video_id: id,
            });
        }
        Err(UnsupportedVideoUrl(trimmed.to_string()))
    }

    /// Embed URL built from the descriptor, never from user markup.
    pub fn embed_url(&self) -> String {
        match self.provider {
            VideoProvider::YouTube => {
                format!("https://www.youtube.com/embed/{}", self.video_id)
            }
            VideoProvider::Vimeo => {
                format!("https://player.vimeo.com/video/{}", self.video_id)
            }
        }
    }
}

fn youtube_id(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://www.youtube.com/watch?v=")
        .or_else(|| url.strip_prefix("https://youtube.com/watch?v="))
        .or_else(|| url.strip_prefix("https://youtu.be/"))?;
    let id: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    (!id.is_empty()).then_some(id)
}

fn vimeo_id(url: &str) -> Option<String> {
    let rest = url.strip_prefix("https://vimeo.com/")?;
    let id: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    (!id.is_empty()).then_some(id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: String,
    pub source: VideoSource,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
}

impl Identify for Video {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ListRecord for Video {
    fn display_field(&self) -> &str {
        &self.source.video_id
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}
