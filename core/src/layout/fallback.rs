//! Per-pane fallback zoom, used when the snapshot layout cannot be decoded.
//!
//! Live panes are grouped into columns (same `left`) and, inside the active
//! column, into rows (same `top`). The active column is widened and the
//! active row heightened with plain `resize-pane` calls. tmux only takes the
//! space from adjacent panes, so the result is coarser than a rewritten
//! layout, but it works from live geometry alone.

use crate::types::config::ZoomPercent;
use crate::types::pane::TmuxPane;


/// Panes sharing one `left` (a column) or one `top` (a row).
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// Shared `left` or `top` offset.
    pub start: u32,
    /// Largest width (column) or height (row) among the panes.
    pub extent: u32,
    pub panes: Vec<TmuxPane>,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeStep {
    Width { pane: String, width: u32 },
    Height { pane: String, height: u32 },
}


/// The resize commands to issue for the focused pane, at most one per axis.
pub fn plan(panes: &[TmuxPane], window_width: u32, percent: ZoomPercent) -> Vec<ResizeStep> {
    let Some(active) = panes.iter().find(|p| p.active) else {
        log::debug!("no active pane among {} panes", panes.len());
        return Vec::new();
    };
    let percent = u64::from(percent.get());
    let mut steps = Vec::new();

    let cols = columns(panes);
    let Some(col_idx) = cols.iter().position(|c| c.start == active.left) else {
        return steps;
    };
    let column = &cols[col_idx];
    log::debug!(
        "{} columns, active column {} at left={} with {} panes",
        cols.len(),
        col_idx,
        column.start,
        column.panes.len()
    );

    if cols.len() > 1 {
        let width = (u64::from(window_width) * percent / 100) as u32;
        steps.push(ResizeStep::Width {
            pane: column.panes[0].id.clone(),
            width,
        });
    }

    if column.panes.len() > 1 {
        let row_bands = rows(&column.panes);
        if row_bands.len() > 1 {
            if let Some(row) = row_bands.iter().find(|r| r.start == active.top) {
                let column_height: u64 = column.panes.iter().map(|p| u64::from(p.height)).sum::<u64>()
                    + (row_bands.len() as u64 - 1);
                let height = (column_height * percent / 100) as u32;
                steps.push(ResizeStep::Height {
                    pane: row.panes[0].id.clone(),
                    height,
                });
            }
        }
    }
    steps
}


/// Group panes by `left`, sorted left to right.
pub fn columns(panes: &[TmuxPane]) -> Vec<Band> {
    group_by(panes, |p| p.left, |p| p.width)
}


/// Group panes by `top`, sorted top to bottom.
pub fn rows(panes: &[TmuxPane]) -> Vec<Band> {
    group_by(panes, |p| p.top, |p| p.height)
}


fn group_by(
    panes: &[TmuxPane],
    start: impl Fn(&TmuxPane) -> u32,
    extent: impl Fn(&TmuxPane) -> u32,
) -> Vec<Band> {
    let mut bands: Vec<Band> = Vec::new();
    for p in panes {
        if let Some(band) = bands.iter_mut().find(|b| b.start == start(p)) {
            band.extent = band.extent.max(extent(p));
            band.panes.push(p.clone());
        } else {
            bands.push(Band {
                start: start(p),
                extent: extent(p),
                panes: vec![p.clone()],
            });
        }
    }
    bands.sort_by_key(|b| b.start);
    bands
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
