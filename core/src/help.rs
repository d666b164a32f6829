//! Help system for tmux-focus-zoom commands.

pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(t) => {
            if let Some(text) = command_help(t) {
                return text;
            }
            if let Some(text) = group_help(t) {
                return text;
            }
            format!(
                "Unknown help topic: '{}'. Run 'tmux-focus-zoom help' for a list of commands.",
                t
            )
        }
    }
}


fn overview() -> String {
    "\
tmux-focus-zoom: give the focused tmux pane most of the window

Usage: tmux-focus-zoom <command> [args...]

Zoom commands:
  toggle                     Turn focus zoom on or off for this window
  enable                     Snapshot the layout and zoom the focused pane
  disable                    Restore the snapshot and turn zoom off
  apply                      Re-zoom for the focused pane (pane-focus-in hook)
  status                     Print status-bar text (ON/OFF)

Setup:
  setup [--print]            Bind the toggle key and install the focus hook
  help [topic]               Show help

Options (tmux.conf):
  set -g @focus-zoom-percent 65   Share for the focused pane, 10-95
  set -g @focus-zoom-key z        Key bound by 'setup'

Run 'tmux-focus-zoom help <command>' for detailed help on a specific command."
        .into()
}


fn group_help(group: &str) -> Option<String> {
    let text = match group {
        "zoom" => "\
Zoom commands: resize the current window around the focused pane

  toggle
    Enable when off, disable when on.

  enable
    Save the current layout and window, then zoom the focused pane.

  disable
    Restore the saved layout if the window still has the same panes,
    then forget it.

  apply
    Zoom whichever pane has focus now. Does nothing when zoom is off,
    the window has one pane, or this is not the zoomed window.

  status
    Print tmux status-bar markup showing whether zoom is on here.",

        "options" => "\
Options: read from tmux user options on every run

  @focus-zoom-percent
    Share of the window given to the focused pane, 10 to 95.
    Missing or invalid values use 65.

  @focus-zoom-key
    Key 'setup' binds to 'toggle'. Default: z.

Environment:

  FOCUS_ZOOM_CONFIG_DIR
    Directory for state.json and debug.log.
    Default: ~/.config/tmux-focus-zoom

  FOCUS_ZOOM_LOG
    Log level for debug.log: off, error, warn, info, debug, trace.
    Default: debug",

        _ => return None,
    };
    Some(text.into())
}


fn command_help(command: &str) -> Option<String> {
    let text = match command {
        "toggle" => "tmux-focus-zoom toggle: turn zoom on or off\n\nUsage: tmux-focus-zoom toggle",
        "enable" => "tmux-focus-zoom enable: snapshot and zoom\n\nUsage: tmux-focus-zoom enable",
        "disable" => "tmux-focus-zoom disable: restore and turn off\n\nUsage: tmux-focus-zoom disable",
        "apply" => "tmux-focus-zoom apply: zoom the focused pane\n\nUsage: tmux-focus-zoom apply",
        "status" => "tmux-focus-zoom status: status-bar text\n\nUsage: tmux-focus-zoom status\n\nExample: set -g status-right '#(tmux-focus-zoom status)'",
        "setup" => "tmux-focus-zoom setup: install key binding and focus hook\n\nUsage: tmux-focus-zoom setup [--print]\n\n  --print    Print the tmux commands instead of running them",
        "help" => "tmux-focus-zoom help: show help\n\nUsage: tmux-focus-zoom help [topic]",
        _ => return None,
    };
    Some(text.into())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_commands() {
        let text = help_text(None);
        assert!(text.contains("Zoom commands:"));
        assert!(text.contains("setup [--print]"));
        assert!(text.contains("@focus-zoom-percent"));
    }

    #[test]
    fn group_help_zoom() {
        let text = help_text(Some("zoom"));
        assert!(text.contains("toggle"));
        assert!(text.contains("apply"));
        assert!(text.contains("status"));
    }

    #[test]
    fn command_help_setup() {
        let text = help_text(Some("setup"));
        assert!(text.contains("Usage:"));
        assert!(text.contains("--print"));
    }

    #[test]
    fn unknown_topic() {
        let text = help_text(Some("bogus"));
        assert!(text.contains("Unknown help topic"));
    }
}
