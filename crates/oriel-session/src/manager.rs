//! Session Manager
//!
//! Host-facing handle over the pane session. Each operation applies the
//! corresponding pure transition under the write lock and replaces the
//! stored session wholesale, so readers always observe a consistent value.
//! The host serializes dispatch; the lock only guards the swap itself.

use parking_lot::RwLock;
use std::sync::Arc;

use oriel_panes::{OpenRequest, Pane, PaneUpdate};

use crate::error::SessionError;
use crate::session::{PaneSession, SessionLimits};
use crate::Result;

pub struct SessionManager {
    session: Arc<RwLock<PaneSession>>,
}

impl SessionManager {
    pub fn new(limits: SessionLimits) -> Self {
        Self::from_session(PaneSession::new(limits))
    }

    pub fn with_default_url(limits: SessionLimits, url: impl Into<String>) -> Self {
        Self::from_session(PaneSession::with_default_url(limits, url))
    }

    pub fn from_session(session: PaneSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Open a new pane. Returns the pane id, or `None` when the session
    /// is at capacity.
    pub fn open(&self, request: OpenRequest, insert_at: Option<usize>) -> Option<String> {
        let mut guard = self.session.write();
        let (next, pane_id) = guard.open(request, insert_at);

        match &pane_id {
            Some(id) => tracing::info!(pane_id = %id, "Opened pane"),
            None => tracing::debug!(
                max_panes = guard.limits().max_panes,
                "Pane capacity reached, open ignored"
            ),
        }

        *guard = next;
        pane_id
    }

    /// Close a pane, keeping its snapshot in the closed history.
    pub fn close(&self, pane_id: &str) {
        let mut guard = self.session.write();
        let next = guard.close(pane_id);

        if next.len() < guard.len() {
            tracing::info!(pane_id = %pane_id, "Closed pane");
        }

        *guard = next;
    }

    pub fn focus(&self, pane_id: &str) {
        let mut guard = self.session.write();
        let next = guard.focus(pane_id);
        *guard = next;
    }

    pub fn update(&self, pane_id: &str, update: PaneUpdate) {
        let mut guard = self.session.write();
        let next = guard.update(pane_id, update);
        *guard = next;
    }

    pub fn toggle_pin(&self, pane_id: &str) {
        let mut guard = self.session.write();
        let next = guard.toggle_pin(pane_id);
        *guard = next;
    }

    pub fn toggle_mute(&self, pane_id: &str) {
        let mut guard = self.session.write();
        let next = guard.toggle_mute(pane_id);
        *guard = next;
    }

    pub fn set_audible(&self, pane_id: &str, audible: bool) {
        let mut guard = self.session.write();
        let next = guard.set_audible(pane_id, audible);
        *guard = next;
    }

    pub fn move_pane(&self, pane_id: &str, new_index: usize) {
        let mut guard = self.session.write();
        let next = guard.move_pane(pane_id, new_index);
        *guard = next;
    }

    /// Restore the most recently closed pane. Returns the new pane id if
    /// a snapshot was available and capacity allowed it.
    pub fn restore_last_closed(&self) -> Option<String> {
        let mut guard = self.session.write();
        let (next, pane_id) = guard.restore_last_closed();

        if let Some(id) = &pane_id {
            tracing::info!(pane_id = %id, "Restored closed pane");
        }

        *guard = next;
        pane_id
    }

    /// Tear down the session to a single default pane.
    pub fn reset(&self) {
        let mut guard = self.session.write();
        let next = guard.reset();
        tracing::info!("Reset pane session");
        *guard = next;
    }

    // === Read-only views ===

    /// Consistent snapshot of the full session for the rendering layer.
    pub fn snapshot(&self) -> PaneSession {
        self.session.read().clone()
    }

    pub fn panes(&self) -> Vec<Pane> {
        self.session.read().panes().to_vec()
    }

    pub fn focused_pane(&self) -> Option<Pane> {
        self.session.read().focused_pane().cloned()
    }

    // === Persistence seam ===

    /// Serialize the session for a host-owned storage layer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&*self.session.read())?)
    }

    /// Rebuild a manager from a serialized session. The snapshot is
    /// host-supplied, so its invariants are checked rather than trusted.
    pub fn from_json(json: &str) -> Result<Self> {
        let session: PaneSession = serde_json::from_str(json)?;
        session.validate().map_err(SessionError::InvalidSnapshot)?;
        Ok(Self::from_session(session))
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_lifecycle() {
        let manager = SessionManager::new(SessionLimits::default());
        assert_eq!(manager.panes().len(), 1);

        let a = manager
            .open(OpenRequest::new("https://a.example"), None)
            .unwrap();
        let b = manager
            .open(OpenRequest::new("https://b.example"), None)
            .unwrap();
        assert_eq!(manager.panes().len(), 3);
        assert_eq!(manager.focused_pane().unwrap().id, b);

        manager.update(
            &a,
            PaneUpdate {
                title: Some("Alpha".to_string()),
                is_loading: Some(false),
                ..Default::default()
            },
        );
        manager.focus(&a);
        assert_eq!(manager.focused_pane().unwrap().title, "Alpha");

        manager.close(&a);
        assert_eq!(manager.panes().len(), 2);
        assert_eq!(manager.snapshot().closed_history().len(), 1);

        let restored = manager.restore_last_closed().unwrap();
        assert_ne!(restored, a);
        assert_eq!(manager.focused_pane().unwrap().url, "https://a.example");

        manager.reset();
        assert_eq!(manager.panes().len(), 1);
        assert!(manager.snapshot().closed_history().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let manager = SessionManager::new(SessionLimits::default());
        let view = manager.clone();

        manager.open(OpenRequest::new("https://a.example"), None);
        assert_eq!(view.panes().len(), 2);
    }

    #[test]
    fn test_from_json_rejects_tampered_snapshot() {
        let manager = SessionManager::new(SessionLimits::default());
        manager.open(OpenRequest::new("https://a.example"), None);

        let mut value: serde_json::Value =
            serde_json::from_str(&manager.to_json().unwrap()).unwrap();
        value["focused_pane_id"] = serde_json::Value::String("missing".to_string());
        let tampered = serde_json::to_string(&value).unwrap();

        assert!(matches!(
            SessionManager::from_json(&tampered),
            Err(SessionError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let manager = SessionManager::new(SessionLimits::default());
        let a = manager
            .open(OpenRequest::new("https://a.example").loaded(), None)
            .unwrap();
        manager.toggle_pin(&a);

        let json = manager.to_json().unwrap();
        let revived = SessionManager::from_json(&json).unwrap();

        assert_eq!(revived.panes().len(), manager.panes().len());
        assert_eq!(revived.focused_pane().unwrap().id, a);
        assert!(revived.snapshot().pane(&a).unwrap().is_pinned);
    }
}
