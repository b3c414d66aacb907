//! Oriel Pane Model
//!
//! Data structures for the pane session manager: the pane itself, partial
//! updates, and the bounded closed-pane history. Ordering, focus and
//! capacity rules live in `oriel-session`.

mod history;
mod pane;

pub use history::{ClosedHistory, ClosedPane};
pub use pane::{OpenRequest, Pane, PaneUpdate};
