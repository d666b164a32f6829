//! Target resolution: which pane and which window a zoom applies to.
//!
//! tmux reports pane ids as `%42`; the layout text uses the bare number.
//! Zoom state is scoped to one `session:window`, captured when zoom is turned
//! on and compared against the live window on every apply.

use crate::error::{Result, ZoomError};
use crate::infrastructure::tmux::Host;
use crate::layout::node::PaneId;
use crate::types::state::ZoomState;


/// Parse a tmux pane id (`%42` or `42`) into its number.
pub fn parse_pane_id(raw: &str) -> Result<PaneId> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('%').unwrap_or(trimmed);
    digits
        .parse::<PaneId>()
        .map_err(|_| ZoomError::InvalidPaneId(trimmed.to_string()))
}


/// A `session:window` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTarget {
    pub session: String,
    pub window: String,
}

impl WindowTarget {
    /// The window the current client is looking at.
    pub fn current(host: &dyn Host) -> Result<WindowTarget> {
        Ok(WindowTarget {
            session: host.session_name()?,
            window: host.window_index()?,
        })
    }

    /// True if `state` was captured in this window.
    pub fn matches(&self, state: &ZoomState) -> bool {
        self.session == state.session && self.window == state.window
    }
}

impl std::fmt::Display for WindowTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.session, self.window)
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
