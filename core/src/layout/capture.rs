//! Layout capture: snapshot the live window and decide whether a stored
//! snapshot still fits it.

use crate::error::Result;
use crate::infrastructure::tmux::Host;
use crate::layout::codec;
use crate::layout::targeting::WindowTarget;
use crate::types::state::ZoomState;


/// Capture the current window's layout and identity as an enabled state.
pub fn capture_state(host: &dyn Host) -> Result<ZoomState> {
    let target = WindowTarget::current(host)?;
    let snapshot = host.window_layout()?;
    log::debug!("captured {}: {}", target, snapshot);
    Ok(ZoomState {
        enabled: true,
        session: target.session,
        window: target.window,
        snapshot,
    })
}


/// True if the stored snapshot decodes and has exactly `live_panes` panes,
/// i.e. handing it back to tmux restores the same topology.
pub fn restorable(state: &ZoomState, live_panes: u32) -> bool {
    match codec::decode(&state.snapshot) {
        Ok(tree) => {
            let snapshot_panes = tree.count_leaves();
            log::debug!(
                "snapshot panes={}, live panes={}",
                snapshot_panes,
                live_panes
            );
            snapshot_panes == live_panes
        }
        Err(e) => {
            log::debug!("snapshot cannot be restored: {}", e);
            false
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
