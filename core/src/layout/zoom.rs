//! Zoom geometry: enlarge one pane inside a layout tree.
//!
//! Walking from the root to the target pane, each split on the way gives the
//! child holding the target `percent` of its available space (its size minus
//! one border per gap). The other children share the rest in proportion to
//! the sizes they had in the input tree. Every child is then re-laid out
//! inside its new box so that the whole tree still tiles exactly.

use crate::layout::node::{Axis, LayoutNode, PaneId};
use crate::types::config::ZoomPercent;


/// Return a copy of `tree` with `target` zoomed to `percent`.
///
/// A target that is not in the tree leaves the copy unchanged.
pub fn resize(tree: &LayoutNode, target: PaneId, percent: ZoomPercent) -> LayoutNode {
    let mut zoomed = tree.clone();
    if !tree.contains_pane(target) {
        log::debug!("pane {} is not in the layout, nothing to zoom", target);
        return zoomed;
    }
    zoom_path(tree, &mut zoomed, target, percent.get());
    zoomed
}


/// Apply the zoom at `node` and continue into the child holding `target`.
///
/// `original` is the matching node of the input tree; its children's sizes
/// are the proportions used at this level.
fn zoom_path(original: &LayoutNode, node: &mut LayoutNode, target: PaneId, percent: u32) {
    let Some(axis) = node.split_axis() else {
        return;
    };
    let originals = original.children();
    if originals.len() <= 1 {
        return;
    }
    let Some(active) = originals.iter().position(|c| c.contains_pane(target)) else {
        return;
    };

    let borders = originals.len() as u32 - 1;
    let available = node.size(axis).saturating_sub(borders);
    let sizes: Vec<u32> = originals.iter().map(|c| c.size(axis)).collect();
    let mins: Vec<u32> = originals.iter().map(|c| c.min_size(axis)).collect();
    let mut zoomed = distribute(&sizes, active, available, percent);
    keep_minimums(&mut zoomed, &mins);
    log::trace!(
        "{:?} split: {:?} -> {:?} (active child {})",
        axis,
        sizes,
        zoomed,
        active
    );
    arrange(node, axis, &zoomed);

    zoom_path(&originals[active], &mut node.children_mut()[active], target, percent);
}


/// New sizes for one split level. The active child gets `percent` of
/// `available`, the others share the remainder by their previous sizes, and
/// whatever truncation leaves over goes back to the active child.
pub fn distribute(sizes: &[u32], active: usize, available: u32, percent: u32) -> Vec<u32> {
    let available = u64::from(available);
    let target = available * u64::from(percent) / 100;
    let remaining = available - target;
    let others: u64 = sizes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != active)
        .map(|(_, s)| u64::from(*s))
        .sum();
    let siblings = sizes.len().saturating_sub(1).max(1) as u64;

    let mut zoomed: Vec<u64> = sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| {
            if i == active {
                target
            } else if others > 0 {
                u64::from(size) * remaining / others
            } else {
                remaining / siblings
            }
        })
        .collect();

    let used: u64 = zoomed.iter().sum();
    zoomed[active] += available - used;
    zoomed.into_iter().map(|s| s as u32).collect()
}


/// Lay out the children of a split along `axis` with the given sizes.
///
/// Children are placed consecutively from the parent's offset with one
/// border cell between them and inherit the parent's box on the other axis.
/// Their own subtrees are then fitted to the new boxes.
fn arrange(node: &mut LayoutNode, axis: Axis, sizes: &[u32]) {
    let cross = axis.cross();
    let (cross_offset, cross_size) = (node.offset(cross), node.size(cross));
    let mut offset = node.offset(axis);
    for (child, &size) in node.children_mut().iter_mut().zip(sizes) {
        child.place(axis, offset, size);
        child.place(cross, cross_offset, cross_size);
        fit_children(child);
        offset = offset.saturating_add(size).saturating_add(1);
    }
}


/// Re-lay out a node's children after its own box changed, scaling them
/// proportionally along its split axis. Children that already fill the box
/// keep their sizes.
fn fit_children(node: &mut LayoutNode) {
    let Some(axis) = node.split_axis() else {
        return;
    };
    let count = node.children().len();
    if count == 0 {
        return;
    }
    let sizes: Vec<u32> = node.children().iter().map(|c| c.size(axis)).collect();
    let available = node.size(axis).saturating_sub(count as u32 - 1);
    let mins: Vec<u32> = node.children().iter().map(|c| c.min_size(axis)).collect();
    let mut scaled = rescale(&sizes, available);
    keep_minimums(&mut scaled, &mins);
    arrange(node, axis, &scaled);
}


/// Raise every size below its minimum, taking cells from whichever entry
/// has the most to spare. Totals are unchanged. Stops when nothing can be
/// spared.
fn keep_minimums(sizes: &mut [u32], mins: &[u32]) {
    for i in 0..sizes.len() {
        while sizes[i] < mins[i] {
            let donor = (0..sizes.len())
                .filter(|&j| sizes[j] > mins[j])
                .max_by_key(|&j| sizes[j] - mins[j]);
            let Some(j) = donor else {
                return;
            };
            let moved = (mins[i] - sizes[i]).min(sizes[j] - mins[j]);
            sizes[j] -= moved;
            sizes[i] += moved;
        }
    }
}


/// Scale `sizes` to sum to `available`; the last entry absorbs rounding.
fn rescale(sizes: &[u32], available: u32) -> Vec<u32> {
    let total: u64 = sizes.iter().map(|s| u64::from(*s)).sum();
    let available = u64::from(available);
    if total == available {
        return sizes.to_vec();
    }
    let mut scaled: Vec<u64> = if total > 0 {
        sizes
            .iter()
            .map(|s| u64::from(*s) * available / total)
            .collect()
    } else {
        vec![available / sizes.len() as u64; sizes.len()]
    };
    let used: u64 = scaled.iter().sum();
    if let Some(last) = scaled.last_mut() {
        *last += available - used;
    }
    scaled.into_iter().map(|s| s as u32).collect()
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
