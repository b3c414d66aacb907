//! Oriel Session Management
//!
//! The pane session manager: an ordered pane list with a focused-pane
//! pointer, capacity ceilings and a bounded restorable history of closed
//! panes. `PaneSession` is the pure state value with every transition as
//! a total function; `SessionManager` is the host-facing handle that
//! applies transitions atomically.

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{PaneSession, SessionLimits, DEFAULT_PANE_URL};

pub type Result<T> = std::result::Result<T, SessionError>;
