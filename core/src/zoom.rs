//! Zoom orchestration: snapshot, apply and restore against a live tmux window.
//!
//! Every entry point is one short-lived invocation. State shared between
//! invocations lives in the `StateStore`; tmux is reached through `Host`.
//!
//! `apply` is the hot path, run from the `pane-focus-in` hook:
//!
//! 1. skip when the window has a single pane or is not the zoomed window
//! 2. decode the stored snapshot, re-capturing it when panes were opened or
//!    closed since it was taken
//! 3. resize the tree for the focused pane, encode, `select-layout`
//!
//! A snapshot that does not decode is handed back to tmux verbatim and the
//! per-pane `resize-pane` fallback runs instead.

use crate::error::Result;
use crate::infrastructure::tmux::Host;
use crate::layout::capture::{capture_state, restorable};
use crate::layout::targeting::WindowTarget;
use crate::layout::{codec, fallback, zoom};
use crate::types::config::ZoomSettings;
use crate::types::state::{StateStore, ZoomState};

pub const MSG_ON: &str = "Focus zoom: ON";
pub const MSG_OFF: &str = "Focus zoom: OFF";
pub const MSG_LAYOUT_CHANGED: &str = "Focus zoom: disabled (layout changed)";

pub const STATUS_ON: &str = "#[fg=#f9e2af]󰍉 ON#[default] ";
pub const STATUS_OFF: &str = "#[fg=#f9e2af]󰍉 OFF#[default] ";


/// Which branch an `apply` took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The zoomed layout text handed to `select-layout`.
    Applied { layout: String },
    Skipped(SkipReason),
    /// The snapshot did not decode; `steps` resize commands were issued.
    Fallback { steps: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    SinglePane,
    OtherWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggled {
    On(ApplyOutcome),
    Off { restored: bool },
}


pub struct Zoom<'a> {
    host: &'a dyn Host,
    store: &'a StateStore,
    settings: &'a ZoomSettings,
}

impl<'a> Zoom<'a> {
    pub fn new(host: &'a dyn Host, store: &'a StateStore, settings: &'a ZoomSettings) -> Zoom<'a> {
        Zoom {
            host,
            store,
            settings,
        }
    }

    /// Snapshot the current window, persist it, and zoom the focused pane.
    pub fn enable(&self) -> Result<ApplyOutcome> {
        let state = capture_state(self.host)?;
        self.store.save(&state)?;
        log::info!("enabled for {}:{}", state.session, state.window);
        let outcome = self.apply_state(state)?;
        self.host.display_message(MSG_ON)?;
        Ok(outcome)
    }

    /// Restore the snapshot when it still matches the window, then forget it.
    /// Returns whether the snapshot was restored.
    pub fn disable(&self) -> Result<bool> {
        let state = self.store.load()?;
        let live = match self.host.pane_count() {
            Ok(n) => n,
            Err(e) => {
                log::debug!("pane count unavailable: {}", e);
                0
            }
        };
        let mut restored = false;
        if restorable(&state, live) {
            match self.host.select_layout(&state.snapshot) {
                Ok(()) => restored = true,
                Err(e) => log::warn!("restore failed (ignored): {}", e),
            }
        } else {
            log::debug!("skipping restore, pane count changed");
        }
        self.store.clear()?;
        self.host.display_message(MSG_OFF)?;
        Ok(restored)
    }

    pub fn toggle(&self) -> Result<Toggled> {
        if self.store.load()?.enabled {
            Ok(Toggled::Off {
                restored: self.disable()?,
            })
        } else {
            Ok(Toggled::On(self.enable()?))
        }
    }

    /// Re-zoom for whichever pane has focus now.
    pub fn apply(&self) -> Result<ApplyOutcome> {
        let state = self.store.load()?;
        if !state.enabled {
            return Ok(ApplyOutcome::Skipped(SkipReason::Disabled));
        }
        self.apply_state(state)
    }

    fn apply_state(&self, mut state: ZoomState) -> Result<ApplyOutcome> {
        let live = self.host.pane_count()?;
        if live <= 1 {
            log::debug!("single pane, nothing to zoom");
            return Ok(ApplyOutcome::Skipped(SkipReason::SinglePane));
        }
        let target = WindowTarget::current(self.host)?;
        if !target.matches(&state) {
            log::debug!("{} is not the zoomed window", target);
            return Ok(ApplyOutcome::Skipped(SkipReason::OtherWindow));
        }
        let active = self.host.active_pane()?;
        log::debug!("active pane {}", active);

        let mut tree = match codec::decode(&state.snapshot) {
            Ok(tree) => tree,
            Err(e) => {
                log::warn!("snapshot does not decode: {}", e);
                return self.fallback(&state);
            }
        };

        if tree.count_leaves() != live {
            log::info!(
                "pane count changed (snapshot={}, live={}), re-capturing",
                tree.count_leaves(),
                live
            );
            let fresh = capture_state(self.host)?;
            tree = match codec::decode(&fresh.snapshot) {
                Ok(tree) => tree,
                Err(e) => {
                    log::warn!("live layout does not decode: {}", e);
                    return self.fallback(&fresh);
                }
            };
            self.store.save(&fresh)?;
            state = fresh;
        }

        let zoomed = zoom::resize(&tree, active, self.settings.percent);
        let layout = codec::encode(&zoomed);
        log::debug!("applying {}", layout);
        if let Err(e) = self.host.select_layout(&layout) {
            log::error!("select-layout failed: {}", e);
            if let Err(restore) = self.host.select_layout(&state.snapshot) {
                log::warn!("restore after failure also failed: {}", restore);
            }
            return Err(e);
        }
        Ok(ApplyOutcome::Applied { layout })
    }

    fn fallback(&self, state: &ZoomState) -> Result<ApplyOutcome> {
        if let Err(e) = self.host.select_layout(&state.snapshot) {
            log::error!("cannot restore snapshot, disabling: {}", e);
            if let Err(clear) = self.store.clear() {
                log::warn!("clearing state: {}", clear);
            }
            if let Err(msg) = self.host.display_message(MSG_LAYOUT_CHANGED) {
                log::warn!("display-message: {}", msg);
            }
            return Err(e);
        }

        let panes = self.host.list_panes()?;
        let (window_width, _) = self.host.window_size()?;
        let steps = fallback::plan(&panes, window_width, self.settings.percent);
        log::debug!("fallback: {} resize steps", steps.len());
        for step in &steps {
            let result = match step {
                fallback::ResizeStep::Width { pane, width } => {
                    self.host.resize_pane_width(pane, *width)
                }
                fallback::ResizeStep::Height { pane, height } => {
                    self.host.resize_pane_height(pane, *height)
                }
            };
            if let Err(e) = result {
                log::warn!("fallback resize failed (ignored): {}", e);
            }
        }
        Ok(ApplyOutcome::Fallback { steps: steps.len() })
    }

    /// Status-bar text: ON only while zoom is enabled for the current window.
    /// Any failure reads as OFF.
    pub fn status_line(&self) -> &'static str {
        let state = match self.store.load() {
            Ok(state) if state.enabled => state,
            _ => return STATUS_OFF,
        };
        match WindowTarget::current(self.host) {
            Ok(target) if target.matches(&state) => STATUS_ON,
            _ => STATUS_OFF,
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
