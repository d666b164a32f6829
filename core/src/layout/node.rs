//! Layout tree: the in-memory form of a tmux window layout.
//!
//! Every node carries its own geometry in character cells. Split nodes lay
//! their children out along one axis with a single-cell border between
//! neighbours, and every child spans the parent's full extent on the other
//! axis.

/// Numeric tmux pane id (`%42` in tmux notation is pane `42`).
pub type PaneId = u32;


/// The dimension along which a split node lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    /// The other axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Width => Axis::Height,
            Axis::Height => Axis::Width,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A terminal pane.
    Leaf(PaneId),
    /// Children side by side, written `{...}` in layout text.
    SplitWidth(Vec<LayoutNode>),
    /// Children stacked top to bottom, written `[...]` in layout text.
    SplitHeight(Vec<LayoutNode>),
}


/// One rectangular region of a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
    pub kind: NodeKind,
}


impl LayoutNode {
    pub fn leaf(width: u32, height: u32, x: u32, y: u32, pane: PaneId) -> LayoutNode {
        LayoutNode {
            width,
            height,
            x,
            y,
            kind: NodeKind::Leaf(pane),
        }
    }

    /// Build a split node from its geometry, axis and children.
    pub fn split(
        width: u32,
        height: u32,
        x: u32,
        y: u32,
        axis: Axis,
        children: Vec<LayoutNode>,
    ) -> LayoutNode {
        let kind = match axis {
            Axis::Width => NodeKind::SplitWidth(children),
            Axis::Height => NodeKind::SplitHeight(children),
        };
        LayoutNode {
            width,
            height,
            x,
            y,
            kind,
        }
    }

    /// The pane id of a leaf, `None` for split nodes.
    pub fn pane(&self) -> Option<PaneId> {
        match self.kind {
            NodeKind::Leaf(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn split_axis(&self) -> Option<Axis> {
        match self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::SplitWidth(_) => Some(Axis::Width),
            NodeKind::SplitHeight(_) => Some(Axis::Height),
        }
    }

    pub fn children(&self) -> &[LayoutNode] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::SplitWidth(children) | NodeKind::SplitHeight(children) => children,
        }
    }

    pub fn children_mut(&mut self) -> &mut [LayoutNode] {
        match &mut self.kind {
            NodeKind::Leaf(_) => &mut [],
            NodeKind::SplitWidth(children) | NodeKind::SplitHeight(children) => children,
        }
    }

    pub fn size(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    pub fn offset(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Width => self.x,
            Axis::Height => self.y,
        }
    }

    /// Set offset and size on one axis, leaving the other untouched.
    pub fn place(&mut self, axis: Axis, offset: u32, size: u32) {
        match axis {
            Axis::Width => {
                self.x = offset;
                self.width = size;
            }
            Axis::Height => {
                self.y = offset;
                self.height = size;
            }
        }
    }

    /// Total number of panes in this subtree.
    pub fn count_leaves(&self) -> u32 {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::SplitWidth(children) | NodeKind::SplitHeight(children) => {
                children.iter().map(LayoutNode::count_leaves).sum()
            }
        }
    }

    /// True if `pane` is a leaf somewhere in this subtree.
    pub fn contains_pane(&self, pane: PaneId) -> bool {
        match &self.kind {
            NodeKind::Leaf(id) => *id == pane,
            NodeKind::SplitWidth(children) | NodeKind::SplitHeight(children) => {
                children.iter().any(|c| c.contains_pane(pane))
            }
        }
    }

    /// Smallest extent along `axis` that still gives every pane in the
    /// subtree one cell.
    pub fn min_size(&self, axis: Axis) -> u32 {
        match self.split_axis() {
            None => 1,
            Some(split) if split == axis => {
                let children = self.children();
                children.iter().map(|c| c.min_size(axis)).sum::<u32>()
                    + children.len().saturating_sub(1) as u32
            }
            Some(_) => self
                .children()
                .iter()
                .map(|c| c.min_size(axis))
                .max()
                .unwrap_or(1),
        }
    }

    /// Pane ids in depth-first order.
    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::new();
        collect_panes(self, &mut ids);
        ids
    }

    /// Check the size-conservation invariant on every split in the subtree.
    ///
    /// Along the split axis the children must tile the parent exactly (sizes
    /// plus one border per gap, offsets consecutive from the parent's own);
    /// across it every child must match the parent's offset and size.
    pub fn is_consistent(&self) -> bool {
        let Some(axis) = self.split_axis() else {
            return true;
        };
        let children = self.children();
        if children.is_empty() {
            return false;
        }
        let cross = axis.cross();
        let mut offset = self.offset(axis);
        let mut used = 0u64;
        for child in children {
            if child.offset(axis) != offset
                || child.offset(cross) != self.offset(cross)
                || child.size(cross) != self.size(cross)
                || !child.is_consistent()
            {
                return false;
            }
            used += u64::from(child.size(axis));
            offset = offset.saturating_add(child.size(axis)).saturating_add(1);
        }
        used + (children.len() as u64 - 1) == u64::from(self.size(axis))
    }
}


fn collect_panes(node: &LayoutNode, ids: &mut Vec<PaneId>) {
    match &node.kind {
        NodeKind::Leaf(id) => ids.push(*id),
        NodeKind::SplitWidth(children) | NodeKind::SplitHeight(children) => {
            for child in children {
                collect_panes(child, ids);
            }
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
