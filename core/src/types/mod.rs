pub mod config;
pub mod pane;
pub mod state;
