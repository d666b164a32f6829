//! Command: the typed interface for every focus-zoom operation.
//!
//! The CLI parses its arguments into a `Command`, `Sys::execute` turns it
//! into a `Response`. Both serialize as tagged JSON for the debug log.

use serde::Serialize;


#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    // -----------------------------------------------------------------
    // Zoom commands
    // -----------------------------------------------------------------

    #[serde(rename = "toggle")]
    Toggle,

    #[serde(rename = "enable")]
    Enable,

    #[serde(rename = "disable")]
    Disable,

    #[serde(rename = "apply")]
    Apply,

    #[serde(rename = "status")]
    Status,

    // -----------------------------------------------------------------
    // Setup / Help
    // -----------------------------------------------------------------

    #[serde(rename = "setup")]
    Setup {
        /// Path tmux should run for the binding and hook.
        executable: String,
        /// Print the tmux commands instead of running them.
        print: bool,
    },

    #[serde(rename = "help")]
    Help {
        #[serde(skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
}


/// Result of executing a `Command`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok { output: String },
    Error { message: String },
}


/// One-line JSON rendering, falling back to `Debug` if serialization fails.
fn log_line<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

impl Command {
    pub fn to_log_line(&self) -> String {
        log_line(self)
    }
}

impl Response {
    pub fn to_log_line(&self) -> String {
        log_line(self)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_log_line() {
        assert_eq!(Command::Toggle.to_log_line(), r#"{"command":"toggle"}"#);
    }

    #[test]
    fn setup_log_line_carries_fields() {
        let cmd = Command::Setup {
            executable: "/bin/fz".into(),
            print: true,
        };
        assert_eq!(
            cmd.to_log_line(),
            r#"{"command":"setup","executable":"/bin/fz","print":true}"#
        );
    }

    #[test]
    fn help_topic_omitted_when_none() {
        assert_eq!(Command::Help { topic: None }.to_log_line(), r#"{"command":"help"}"#);
        assert_eq!(
            Command::Help {
                topic: Some("apply".into())
            }
            .to_log_line(),
            r#"{"command":"help","topic":"apply"}"#
        );
    }

    #[test]
    fn response_tagging() {
        let ok = Response::Ok {
            output: String::new(),
        };
        assert_eq!(ok.to_log_line(), r#"{"status":"ok","output":""}"#);
        let err = Response::Error {
            message: "no server".into(),
        };
        assert_eq!(err.to_log_line(), r#"{"status":"error","message":"no server"}"#);
    }
}
