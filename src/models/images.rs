//! Image attachment data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image attached to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Unique ID.
    pub id: Uuid,
    /// Where the image lives (remote URL or data URI).
    pub url: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Pixel width, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Optional caption shown alongside the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// When the attachment was recorded.
    pub created_at: DateTime<Utc>,
}

impl ImageAttachment {
    /// Create a new attachment for the given URL and MIME type.
    pub fn new(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            mime_type: mime_type.into(),
            width: None,
            height: None,
            caption: None,
            created_at: Utc::now(),
        }
    }

    /// Builder: set pixel dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Builder: set caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}
