//! Closed-pane history
//!
//! Bounded most-recently-closed-first stack of pane snapshots. A snapshot
//! keeps everything needed to restore the pane as a new identity; it never
//! keeps the original id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::pane::Pane;

/// Immutable snapshot of a removed pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedPane {
    pub url: String,
    pub rendered_url: String,
    pub title: String,
    pub favicon_url: Option<String>,
    pub is_pinned: bool,
    pub is_muted: bool,
    /// Position the pane occupied before removal
    pub index: usize,
    /// When the pane was closed
    pub closed_at: DateTime<Utc>,
}

impl ClosedPane {
    pub fn snapshot(pane: &Pane) -> Self {
        Self {
            url: pane.url.clone(),
            rendered_url: pane.rendered_url.clone(),
            title: pane.title.clone(),
            favicon_url: pane.favicon_url.clone(),
            is_pinned: pane.is_pinned,
            is_muted: pane.is_muted,
            index: pane.index,
            closed_at: Utc::now(),
        }
    }
}

/// Bounded deque of closed-pane snapshots, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedHistory {
    entries: VecDeque<ClosedPane>,
    max_closed: usize,
}

impl ClosedHistory {
    pub fn new(max_closed: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_closed,
        }
    }

    /// Push a snapshot at the front, evicting the oldest beyond the cap.
    pub fn push(&mut self, closed: ClosedPane) {
        self.entries.push_front(closed);
        self.entries.truncate(self.max_closed);
    }

    /// Pop the most recently closed snapshot.
    pub fn pop(&mut self) -> Option<ClosedPane> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest-first view of the snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &ClosedPane> {
        self.entries.iter()
    }
}
