//! Pane session state
//!
//! The session owns the ordered pane list, the focused-pane pointer and
//! the closed-pane history. Every transition is a pure function: it takes
//! `&self` and returns a new session value, leaving the input untouched.
//! Precondition violations (unknown id, capacity reached, out-of-range
//! index, closing the last pane) return the session unchanged rather than
//! an error, so a stale UI control degrades gracefully.
//!
//! Invariants after every transition:
//! - the pane list is never empty
//! - `index` fields are contiguous `0..len` matching array order
//! - pinned panes precede unpinned panes, except after an explicit move
//! - `focused_pane_id` names a pane in the list
//! - pane count and history length respect the configured limits

use serde::{Deserialize, Serialize};

use oriel_panes::{ClosedHistory, ClosedPane, OpenRequest, Pane, PaneUpdate};

/// Capacity limits consumed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLimits {
    /// Ceiling on the number of open panes
    pub max_panes: usize,
    /// Depth of the closed-pane history
    pub max_closed: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_panes: 64,
            max_closed: 20,
        }
    }
}

pub const DEFAULT_PANE_URL: &str = "about:blank";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaneSession {
    panes: Vec<Pane>,
    focused_pane_id: String,
    closed_history: ClosedHistory,
    limits: SessionLimits,
    default_url: String,
}

impl PaneSession {
    /// Create a session seeded with a single focused `about:blank` pane.
    pub fn new(limits: SessionLimits) -> Self {
        Self::with_default_url(limits, DEFAULT_PANE_URL)
    }

    /// Create a session whose seed pane (and every `reset`) uses `url`.
    pub fn with_default_url(limits: SessionLimits, url: impl Into<String>) -> Self {
        let default_url = url.into();
        let pane = Pane::new(OpenRequest::new(default_url.clone()).loaded(), 0);
        let focused_pane_id = pane.id.clone();

        Self {
            panes: vec![pane],
            focused_pane_id,
            closed_history: ClosedHistory::new(limits.max_closed),
            limits,
            default_url,
        }
    }

    // === Read-only view ===

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn focused_pane_id(&self) -> &str {
        &self.focused_pane_id
    }

    pub fn focused_pane(&self) -> Option<&Pane> {
        self.pane(&self.focused_pane_id)
    }

    pub fn pane(&self, pane_id: &str) -> Option<&Pane> {
        self.panes.iter().find(|p| p.id == pane_id)
    }

    pub fn closed_history(&self) -> &ClosedHistory {
        &self.closed_history
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    // === Transitions ===

    /// Open a new pane, focused, at `insert_at` (clamped) or appended.
    /// Returns the new pane id, or `None` when the capacity ceiling makes
    /// the call a no-op.
    pub fn open(&self, request: OpenRequest, insert_at: Option<usize>) -> (Self, Option<String>) {
        if self.panes.len() >= self.limits.max_panes {
            return (self.clone(), None);
        }

        let mut next = self.clone();
        let pane = Pane::new(request, next.panes.len());
        let pane_id = pane.id.clone();

        match insert_at {
            Some(at) => {
                let at = at.min(next.panes.len());
                next.panes.insert(at, pane);
            }
            None => next.panes.push(pane),
        }

        renormalize(&mut next.panes);
        next.focused_pane_id = pane_id.clone();

        (next, Some(pane_id))
    }

    /// Close a pane, snapshotting it into the history. The last remaining
    /// pane cannot be closed. If the closed pane was focused, focus moves
    /// to the nearest non-pinned pane that slid into the slot immediately
    /// left of the removed one, falling back to the last pane.
    pub fn close(&self, pane_id: &str) -> Self {
        if self.panes.len() < 2 {
            return self.clone();
        }
        let Some(removed_index) = self.panes.iter().position(|p| p.id == pane_id) else {
            return self.clone();
        };

        // Pick the focus target before mutating. Panes left of the
        // removed one keep their indices across renormalization, so the
        // pre-removal pane at removed_index - 1 is exactly the pane that
        // slides into the closed slot, and indices are unique so at most
        // one non-pinned pane matches.
        let focus_target = if self.panes[removed_index].id == self.focused_pane_id {
            let predecessor = removed_index.checked_sub(1).and_then(|left| {
                self.panes
                    .iter()
                    .filter(|p| !p.is_pinned)
                    .find(|p| p.index == left)
            });
            // Fallback is the pane that ends up last after removal;
            // len >= 2 was checked above, so both arms index in range.
            let fallback = if removed_index + 1 == self.panes.len() {
                &self.panes[removed_index - 1]
            } else {
                &self.panes[self.panes.len() - 1]
            };
            Some(predecessor.unwrap_or(fallback).id.clone())
        } else {
            None
        };

        let mut next = self.clone();
        let removed = next.panes.remove(removed_index);
        next.closed_history.push(ClosedPane::snapshot(&removed));
        renormalize(&mut next.panes);

        if let Some(focus_target) = focus_target {
            next.focused_pane_id = focus_target;
        }

        next
    }

    /// Focus a pane and refresh its `last_accessed`.
    pub fn focus(&self, pane_id: &str) -> Self {
        let mut next = self.clone();
        let Some(pane) = next.panes.iter_mut().find(|p| p.id == pane_id) else {
            return self.clone();
        };

        pane.touch();
        next.focused_pane_id = pane.id.clone();
        next
    }

    /// Merge a partial update onto a pane.
    pub fn update(&self, pane_id: &str, update: PaneUpdate) -> Self {
        let mut next = self.clone();
        let Some(pane) = next.panes.iter_mut().find(|p| p.id == pane_id) else {
            return self.clone();
        };

        pane.apply(update);
        next
    }

    /// Flip a pane's pinned flag, then stably repartition the list so all
    /// pinned panes precede all unpinned ones.
    pub fn toggle_pin(&self, pane_id: &str) -> Self {
        let mut next = self.clone();
        let Some(pane) = next.panes.iter_mut().find(|p| p.id == pane_id) else {
            return self.clone();
        };

        pane.is_pinned = !pane.is_pinned;
        // Stable sort preserves relative order within each partition.
        next.panes.sort_by_key(|p| !p.is_pinned);
        renormalize(&mut next.panes);
        next
    }

    /// Flip a pane's muted flag. Does not touch `is_audible`, which
    /// tracks actual content audio independently.
    pub fn toggle_mute(&self, pane_id: &str) -> Self {
        let mut next = self.clone();
        let Some(pane) = next.panes.iter_mut().find(|p| p.id == pane_id) else {
            return self.clone();
        };

        pane.is_muted = !pane.is_muted;
        next
    }

    /// Record externally observed audio activity. A pane can be audible
    /// and muted at the same time.
    pub fn set_audible(&self, pane_id: &str, audible: bool) -> Self {
        let mut next = self.clone();
        let Some(pane) = next.panes.iter_mut().find(|p| p.id == pane_id) else {
            return self.clone();
        };

        pane.is_audible = audible;
        next
    }

    /// Move a pane to `new_index` with splice semantics. Explicit
    /// reordering is respected as-is: unlike `toggle_pin`, this does not
    /// re-establish the pinned-first partition.
    pub fn move_pane(&self, pane_id: &str, new_index: usize) -> Self {
        if new_index >= self.panes.len() {
            return self.clone();
        }
        let Some(current_index) = self.panes.iter().position(|p| p.id == pane_id) else {
            return self.clone();
        };

        let mut next = self.clone();
        let pane = next.panes.remove(current_index);
        next.panes.insert(new_index, pane);
        renormalize(&mut next.panes);
        next
    }

    /// Restore the most recently closed pane as a new identity, appended
    /// at the end and focused. Returns `None` when the history is empty
    /// or the session is at capacity.
    pub fn restore_last_closed(&self) -> (Self, Option<String>) {
        if self.panes.len() >= self.limits.max_panes {
            return (self.clone(), None);
        }

        let mut next = self.clone();
        let Some(closed) = next.closed_history.pop() else {
            return (self.clone(), None);
        };

        let request = OpenRequest {
            url: closed.url,
            title: Some(closed.title),
            is_loading: true,
        };
        let mut pane = Pane::new(request, next.panes.len());
        pane.favicon_url = closed.favicon_url;
        pane.is_muted = closed.is_muted;
        let pane_id = pane.id.clone();

        next.panes.push(pane);
        renormalize(&mut next.panes);
        next.focused_pane_id = pane_id.clone();

        (next, Some(pane_id))
    }

    /// Discard all panes and history; reinitialize to a single focused
    /// default pane.
    pub fn reset(&self) -> Self {
        Self::with_default_url(self.limits, self.default_url.clone())
    }

    /// Check the structural invariants on an externally supplied session,
    /// e.g. one deserialized from a host-owned snapshot. Transitions
    /// preserve these by construction; a hand-edited snapshot may not.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.panes.is_empty() {
            return Err("pane list is empty".to_string());
        }
        if self.panes.len() > self.limits.max_panes {
            return Err(format!(
                "{} panes exceed the ceiling of {}",
                self.panes.len(),
                self.limits.max_panes
            ));
        }
        if self.closed_history.len() > self.limits.max_closed {
            return Err(format!(
                "{} history entries exceed the cap of {}",
                self.closed_history.len(),
                self.limits.max_closed
            ));
        }
        for (position, pane) in self.panes.iter().enumerate() {
            if pane.index != position {
                return Err(format!(
                    "pane {} has index {} at position {}",
                    pane.id, pane.index, position
                ));
            }
        }
        let mut ids: Vec<&str> = self.panes.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err("duplicate pane ids".to_string());
        }
        if self.pane(&self.focused_pane_id).is_none() {
            return Err(format!(
                "focused pane {} is not in the list",
                self.focused_pane_id
            ));
        }
        Ok(())
    }
}

/// Recompute each pane's `index` to match its position in the list.
fn renormalize(panes: &mut [Pane]) {
    for (index, pane) in panes.iter_mut().enumerate() {
        pane.index = index;
    }
}
