//! In-memory `Host` for tests: canned query answers and a command log.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::error::{Result, ZoomError};
use crate::infrastructure::tmux::Host;
use crate::types::pane::TmuxPane;


#[derive(Debug, Default)]
pub struct FakeHost {
    values: RefCell<HashMap<String, String>>,
    options: HashMap<String, String>,
    panes: Vec<TmuxPane>,
    failing: HashSet<String>,
    commands: RefCell<Vec<Vec<String>>>,
}

impl FakeHost {
    pub fn new() -> FakeHost {
        FakeHost::default()
    }

    /// A window `session:window` showing `layout` with `active` focused.
    pub fn window(session: &str, window: &str, layout: &str, active: u32, panes: u32) -> FakeHost {
        FakeHost::new()
            .with_value("#{session_name}", session)
            .with_value("#{window_index}", window)
            .with_value("#{window_layout}", layout)
            .with_value("#{pane_id}", &format!("%{}", active))
            .with_value("#{window_panes}", &panes.to_string())
    }

    pub fn with_value(self, format: &str, value: &str) -> FakeHost {
        self.set_value(format, value);
        self
    }

    pub fn with_option(mut self, name: &str, value: &str) -> FakeHost {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn with_panes(mut self, panes: Vec<TmuxPane>) -> FakeHost {
        self.panes = panes;
        self
    }

    /// Make every command starting with `name` fail.
    pub fn failing(mut self, name: &str) -> FakeHost {
        self.failing.insert(name.into());
        self
    }

    /// Change a query answer mid-test, e.g. after a pane was opened.
    pub fn set_value(&self, format: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(format.into(), value.into());
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.borrow().clone()
    }

    /// Arguments of every `select-layout` run so far.
    pub fn selected_layouts(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .filter(|c| c[0] == "select-layout")
            .map(|c| c[1].clone())
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .filter(|c| c[0] == "display-message")
            .map(|c| c[1].clone())
            .collect()
    }
}

impl Host for FakeHost {
    fn query(&self, format: &str) -> Result<String> {
        self.values
            .borrow()
            .get(format)
            .cloned()
            .ok_or_else(|| ZoomError::host(format!("display-message -p {}", format), "no value"))
    }

    fn option(&self, name: &str) -> Result<String> {
        Ok(self.options.get(name).cloned().unwrap_or_default())
    }

    fn list_panes(&self) -> Result<Vec<TmuxPane>> {
        Ok(self.panes.clone())
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        self.commands
            .borrow_mut()
            .push(args.iter().map(|a| a.to_string()).collect());
        if args.first().is_some_and(|a| self.failing.contains(*a)) {
            return Err(ZoomError::host(args.join(" "), "exit status: 1"));
        }
        Ok(())
    }
}
