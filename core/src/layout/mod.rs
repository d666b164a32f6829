//! Layout engine: tmux layout text, the tree it describes, and the zoom
//! geometry applied to it.
//!
//! `codec` converts between layout text and `node::LayoutNode` trees. `zoom`
//! rewrites a tree so one pane gets a fixed share of its window. `capture`
//! snapshots the live window, `targeting` resolves pane ids and window
//! identity, and `fallback` plans per-pane resizes when a snapshot cannot be
//! decoded.

pub mod capture;
pub mod codec;
pub mod fallback;
pub mod node;
pub mod targeting;
pub mod zoom;
