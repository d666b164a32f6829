//! focus-zoom core: tmux layout codec, zoom geometry and the orchestration
//! that applies it to a live window.

pub mod command;
pub mod error;
pub mod help;
pub mod infrastructure;
pub mod layout;
pub mod logging;
pub mod sys;
pub mod types;
pub mod zoom;
