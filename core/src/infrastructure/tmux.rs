//! tmux boundary: queries and commands against the running server.
//!
//! The orchestrator only talks to tmux through the `Host` trait so it can be
//! driven by a recording fake in tests. `Tmux` is the real implementation and
//! shells out to the `tmux` binary for every call.

use std::process::Command;

use crate::error::{Result, ZoomError};
use crate::layout::node::PaneId;
use crate::layout::targeting::parse_pane_id;
use crate::types::pane::TmuxPane;

/// `list-panes -F` format understood by `parse_list_panes`.
pub const PANE_FORMAT: &str =
    "#{pane_id}:#{pane_index}:#{pane_width}:#{pane_height}:#{pane_left}:#{pane_top}:#{pane_active}";


/// Request/response access to tmux.
///
/// Implementors provide the four primitives; everything else is expressed in
/// terms of them.
pub trait Host {
    /// Expand a format string for the current pane (`display-message -p`).
    fn query(&self, format: &str) -> Result<String>;

    /// Value of a global option, empty when unset (`show-option -gqv`).
    fn option(&self, name: &str) -> Result<String>;

    /// Geometry of every pane in the current window.
    fn list_panes(&self) -> Result<Vec<TmuxPane>>;

    /// Run a command whose output is not needed.
    fn run(&self, args: &[&str]) -> Result<()>;

    fn session_name(&self) -> Result<String> {
        self.query("#{session_name}")
    }

    fn window_index(&self) -> Result<String> {
        self.query("#{window_index}")
    }

    /// Numeric id of the focused pane.
    fn active_pane(&self) -> Result<PaneId> {
        parse_pane_id(&self.query("#{pane_id}")?)
    }

    fn pane_count(&self) -> Result<u32> {
        query_number(self, "#{window_panes}")
    }

    fn window_size(&self) -> Result<(u32, u32)> {
        Ok((
            query_number(self, "#{window_width}")?,
            query_number(self, "#{window_height}")?,
        ))
    }

    fn window_layout(&self) -> Result<String> {
        self.query("#{window_layout}")
    }

    /// Replace the current window's layout. tmux re-validates the checksum.
    fn select_layout(&self, layout: &str) -> Result<()> {
        self.run(&["select-layout", layout])
    }

    fn resize_pane_width(&self, pane: &str, width: u32) -> Result<()> {
        let width = width.to_string();
        self.run(&["resize-pane", "-t", pane, "-x", &width])
    }

    fn resize_pane_height(&self, pane: &str, height: u32) -> Result<()> {
        let height = height.to_string();
        self.run(&["resize-pane", "-t", pane, "-y", &height])
    }

    fn display_message(&self, message: &str) -> Result<()> {
        self.run(&["display-message", message])
    }
}


fn query_number<H: Host + ?Sized>(host: &H, format: &str) -> Result<u32> {
    let raw = host.query(format)?;
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ZoomError::host(format, format!("expected a number, got '{}'", raw)))
}


/// The real tmux server, reached through the `tmux` executable.
#[derive(Debug, Clone)]
pub struct Tmux {
    program: String,
}

impl Default for Tmux {
    fn default() -> Self {
        Tmux::new()
    }
}

impl Tmux {
    pub fn new() -> Tmux {
        Tmux {
            program: "tmux".into(),
        }
    }

    /// Run tmux and return its trimmed stdout.
    fn output(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        log::trace!("{} {}", self.program, command);
        let out = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| ZoomError::host(&command, e.to_string()))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                out.status.to_string()
            } else {
                stderr
            };
            return Err(ZoomError::host(command, detail));
        }
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }
}

impl Host for Tmux {
    fn query(&self, format: &str) -> Result<String> {
        self.output(&["display-message", "-p", format])
    }

    fn option(&self, name: &str) -> Result<String> {
        self.output(&["show-option", "-gqv", name])
    }

    fn list_panes(&self) -> Result<Vec<TmuxPane>> {
        let raw = self.output(&["list-panes", "-F", PANE_FORMAT])?;
        Ok(parse_list_panes(&raw))
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        self.output(args).map(|_| ())
    }
}


/// Parse `list-panes -F PANE_FORMAT` output. Lines that do not have all
/// seven fields, or whose numbers do not parse, are skipped.
pub fn parse_list_panes(output: &str) -> Vec<TmuxPane> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let pane = parse_pane_line(line);
            if pane.is_none() {
                log::warn!("skipping unparseable pane line '{}'", line);
            }
            pane
        })
        .collect()
}

fn parse_pane_line(line: &str) -> Option<TmuxPane> {
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() != 7 {
        return None;
    }
    Some(TmuxPane {
        id: parts[0].to_string(),
        index: parts[1].parse().ok()?,
        width: parts[2].parse().ok()?,
        height: parts[3].parse().ok()?,
        left: parts[4].parse().ok()?,
        top: parts[5].parse().ok()?,
        active: parts[6] == "1",
    })
}


// ---------------------------------------------------------------------------
// Hook installation
// ---------------------------------------------------------------------------

/// Builds the tmux commands that wire this program into a tmux server.
pub struct TmuxCommandBuilder {
    executable: String,
}

impl TmuxCommandBuilder {
    pub fn new(executable: impl Into<String>) -> TmuxCommandBuilder {
        TmuxCommandBuilder {
            executable: executable.into(),
        }
    }

    /// `bind-key <key> run-shell "<exe> toggle"`
    pub fn bind_toggle(&self, key: &str) -> Vec<String> {
        vec![
            "bind-key".into(),
            key.into(),
            "run-shell".into(),
            format!("{} toggle", self.quoted_executable()),
        ]
    }

    /// `set-hook -g pane-focus-in 'run-shell "<exe> apply"'`
    pub fn focus_hook(&self) -> Vec<String> {
        vec![
            "set-hook".into(),
            "-g".into(),
            "pane-focus-in".into(),
            format!("run-shell \"{} apply\"", self.quoted_executable()),
        ]
    }

    /// Render arguments as a line that can be pasted into a shell or tmux.conf.
    pub fn render(args: &[String]) -> String {
        let mut line = String::from("tmux");
        for arg in args {
            line.push(' ');
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '#') {
                line.push('\'');
                line.push_str(&arg.replace('\'', "'\\''"));
                line.push('\'');
            } else {
                line.push_str(arg);
            }
        }
        line
    }

    fn quoted_executable(&self) -> String {
        if self.executable.contains(char::is_whitespace) {
            format!("'{}'", self.executable)
        } else {
            self.executable.clone()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fake::FakeHost;

    #[test]
    fn parses_pane_lines() {
        let output = "%26:0:84:30:0:0:1\n%41:1:84:30:0:31:0\n%36:2:85:61:85:0:0\n";
        let panes = parse_list_panes(output);
        assert_eq!(panes.len(), 3);
        assert_eq!(
            panes[0],
            TmuxPane {
                id: "%26".into(),
                index: 0,
                width: 84,
                height: 30,
                left: 0,
                top: 0,
                active: true,
            }
        );
        assert_eq!(panes[1].top, 31);
        assert!(!panes[1].active);
        assert_eq!(panes[2].left, 85);
    }

    #[test]
    fn skips_malformed_pane_lines() {
        let output = "%1:0:80:24:0:0:1\ngarbage\n%2:1:wide:24:81:0:0\n\n%3:2:40:24:0:25:0";
        let panes = parse_list_panes(output);
        let ids: Vec<&str> = panes.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["%1", "%3"]);
    }

    #[test]
    fn host_helpers_use_queries() {
        let host = FakeHost::new()
            .with_value("#{pane_id}", "%42")
            .with_value("#{window_panes}", "3")
            .with_value("#{window_width}", "255")
            .with_value("#{window_height}", "61");
        assert_eq!(host.active_pane().unwrap(), 42);
        assert_eq!(host.pane_count().unwrap(), 3);
        assert_eq!(host.window_size().unwrap(), (255, 61));
    }

    #[test]
    fn non_numeric_query_is_host_error() {
        let host = FakeHost::new().with_value("#{window_panes}", "many");
        assert!(matches!(
            host.pane_count(),
            Err(ZoomError::HostCommandFailed { .. })
        ));
    }

    #[test]
    fn resize_commands() {
        let host = FakeHost::new();
        host.resize_pane_width("%3", 120).unwrap();
        host.resize_pane_height("%3", 40).unwrap();
        assert_eq!(
            host.commands(),
            vec![
                vec!["resize-pane", "-t", "%3", "-x", "120"],
                vec!["resize-pane", "-t", "%3", "-y", "40"],
            ]
        );
    }

    #[test]
    fn builds_hook_commands() {
        let builder = TmuxCommandBuilder::new("/usr/local/bin/tmux-focus-zoom");
        assert_eq!(
            builder.bind_toggle("z"),
            vec!["bind-key", "z", "run-shell", "/usr/local/bin/tmux-focus-zoom toggle"]
        );
        assert_eq!(
            TmuxCommandBuilder::render(&builder.focus_hook()),
            "tmux set-hook -g pane-focus-in 'run-shell \"/usr/local/bin/tmux-focus-zoom apply\"'"
        );
    }

    #[test]
    fn executable_with_spaces_is_quoted() {
        let builder = TmuxCommandBuilder::new("/opt/my tools/fz");
        assert_eq!(builder.bind_toggle("z")[3], "'/opt/my tools/fz' toggle");
    }

    #[test]
    #[ignore = "needs a running tmux server"]
    fn live_tmux_reports_session() {
        let tmux = Tmux::new();
        assert!(!tmux.session_name().unwrap().is_empty());
    }
}
