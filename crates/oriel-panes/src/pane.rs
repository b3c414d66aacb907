//! Pane data structure
//!
//! A pane is one tab-like unit of content inside a host surface. The
//! session layer owns ordering and focus; a pane only knows its own
//! display state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pane {
    /// Unique identifier
    pub id: String,
    /// Target URL the pane should display
    pub url: String,
    /// URL currently loaded and rendered; lags `url` until content arrives
    pub rendered_url: String,
    /// Page title (may be empty while loading)
    pub title: String,
    /// Favicon URL if available
    pub favicon_url: Option<String>,
    /// Content is still being fetched/rendered
    pub is_loading: bool,
    /// Pinned panes sort before unpinned ones
    pub is_pinned: bool,
    /// Content is currently producing audio
    pub is_audible: bool,
    /// Audio output is muted by the user
    pub is_muted: bool,
    /// Last time the pane was focused or updated
    pub last_accessed: DateTime<Utc>,
    /// Position within the visible ordering
    pub index: usize,
}

/// Parameters for opening a new pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRequest {
    pub url: String,
    pub title: Option<String>,
    pub is_loading: bool,
}

impl OpenRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            is_loading: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn loaded(mut self) -> Self {
        self.is_loading = false;
        self
    }
}

/// Partial field merge for an existing pane.
///
/// `favicon_url` is doubly optional so a caller can distinguish
/// "leave unchanged" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaneUpdate {
    pub url: Option<String>,
    pub rendered_url: Option<String>,
    pub title: Option<String>,
    pub favicon_url: Option<Option<String>>,
    pub is_loading: Option<bool>,
}

impl Pane {
    /// Create a fresh pane at the given position, focused state left to
    /// the session layer. Defaults are unpinned, unmuted, non-audible.
    pub fn new(request: OpenRequest, index: usize) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            rendered_url: request.url.clone(),
            url: request.url,
            title: request.title.unwrap_or_default(),
            favicon_url: None,
            is_loading: request.is_loading,
            is_pinned: false,
            is_audible: false,
            is_muted: false,
            last_accessed: now,
            index,
        }
    }

    /// Merge a partial update and refresh `last_accessed`.
    pub fn apply(&mut self, update: PaneUpdate) {
        if let Some(url) = update.url {
            self.url = url;
        }
        if let Some(rendered_url) = update.rendered_url {
            self.rendered_url = rendered_url;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(favicon_url) = update.favicon_url {
            self.favicon_url = favicon_url;
        }
        if let Some(is_loading) = update.is_loading {
            self.is_loading = is_loading;
        }
        self.touch();
    }

    /// Refresh `last_accessed` to now.
    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pane_defaults() {
        let pane = Pane::new(OpenRequest::new("https://example.com"), 3);
        assert_eq!(pane.url, "https://example.com");
        assert_eq!(pane.rendered_url, "https://example.com");
        assert_eq!(pane.index, 3);
        assert!(pane.is_loading);
        assert!(!pane.is_pinned);
        assert!(!pane.is_muted);
        assert!(!pane.is_audible);
        assert!(pane.title.is_empty());
        assert!(pane.favicon_url.is_none());
    }

    #[test]
    fn test_partial_update_merge() {
        let mut pane = Pane::new(OpenRequest::new("https://example.com"), 0);
        pane.apply(PaneUpdate {
            title: Some("Example".to_string()),
            is_loading: Some(false),
            ..Default::default()
        });

        assert_eq!(pane.title, "Example");
        assert!(!pane.is_loading);
        // Untouched fields keep their values
        assert_eq!(pane.url, "https://example.com");
    }

    #[test]
    fn test_favicon_clear_vs_unchanged() {
        let mut pane = Pane::new(OpenRequest::new("https://example.com"), 0);
        pane.apply(PaneUpdate {
            favicon_url: Some(Some("https://example.com/favicon.ico".to_string())),
            ..Default::default()
        });
        assert!(pane.favicon_url.is_some());

        // None leaves the favicon alone
        pane.apply(PaneUpdate::default());
        assert!(pane.favicon_url.is_some());

        // Some(None) clears it
        pane.apply(PaneUpdate {
            favicon_url: Some(None),
            ..Default::default()
        });
        assert!(pane.favicon_url.is_none());
    }

    #[test]
    fn test_display_title_fallback() {
        let pane = Pane::new(OpenRequest::new("https://example.com"), 0);
        assert_eq!(pane.display_title(), "https://example.com");

        let named = Pane::new(
            OpenRequest::new("https://example.com").with_title("Example"),
            0,
        );
        assert_eq!(named.display_title(), "Example");
    }
}
