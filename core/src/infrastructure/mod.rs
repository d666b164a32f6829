//! Boundaries to the outside world.

#[cfg(test)]
pub(crate) mod fake;
pub mod tmux;
