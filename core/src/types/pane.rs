/// Live geometry of one pane, as reported by `tmux list-panes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxPane {
    /// tmux pane id including the `%` prefix, e.g. `%26`.
    pub id: String,
    pub index: u32,
    pub width: u32,
    pub height: u32,
    pub left: u32,
    pub top: u32,
    pub active: bool,
}
