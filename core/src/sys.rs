use crate::command::{Command, Response};
use crate::error::Result;
use crate::infrastructure::tmux::{Host, TmuxCommandBuilder};
use crate::types::config::ZoomSettings;
use crate::types::state::StateStore;
use crate::zoom::Zoom;


/// Central runtime for focus-zoom. Dispatches one command against one host.
pub struct Sys<H: Host> {
    host: H,
    settings: ZoomSettings,
    store: StateStore,
}


impl<H: Host> Sys<H> {
    pub fn new(host: H, settings: ZoomSettings) -> Sys<H> {
        let store = StateStore::new(&settings.config_dir);
        Sys {
            host,
            settings,
            store,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Return a reference to the current settings.
    pub fn settings(&self) -> &ZoomSettings {
        &self.settings
    }

    /// The single dispatch method.
    pub fn execute(&self, cmd: Command) -> Response {
        log::debug!("execute {}", cmd.to_log_line());
        let result = match cmd {
            Command::Toggle => self.cmd_toggle(),
            Command::Enable => self.cmd_enable(),
            Command::Disable => self.cmd_disable(),
            Command::Apply => self.cmd_apply(),
            Command::Status => Ok(self.cmd_status()),
            Command::Setup { executable, print } => self.cmd_setup(&executable, print),
            Command::Help { topic } => Ok(crate::help::help_text(topic.as_deref())),
        };
        let response = match result {
            Ok(output) => Response::Ok { output },
            Err(e) => {
                log::error!("{}", e);
                Response::Error {
                    message: e.to_string(),
                }
            }
        };
        log::debug!("response {}", response.to_log_line());
        response
    }

    fn zoom(&self) -> Zoom<'_> {
        Zoom::new(&self.host, &self.store, &self.settings)
    }

    // -----------------------------------------------------------------------
    // Zoom commands
    // -----------------------------------------------------------------------
    // These run from tmux bindings and hooks, where stdout would open a
    // view pane, so feedback goes through display-message instead.

    fn cmd_toggle(&self) -> Result<String> {
        let toggled = self.zoom().toggle()?;
        log::debug!("toggle: {:?}", toggled);
        Ok(String::new())
    }

    fn cmd_enable(&self) -> Result<String> {
        let outcome = self.zoom().enable()?;
        log::debug!("enable: {:?}", outcome);
        Ok(String::new())
    }

    fn cmd_disable(&self) -> Result<String> {
        let restored = self.zoom().disable()?;
        log::debug!("disable: restored={}", restored);
        Ok(String::new())
    }

    fn cmd_apply(&self) -> Result<String> {
        let outcome = self.zoom().apply()?;
        log::debug!("apply: {:?}", outcome);
        Ok(String::new())
    }

    fn cmd_status(&self) -> String {
        self.zoom().status_line().to_string()
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    fn cmd_setup(&self, executable: &str, print: bool) -> Result<String> {
        let builder = TmuxCommandBuilder::new(executable);
        let commands = [
            builder.bind_toggle(&self.settings.toggle_key),
            builder.focus_hook(),
        ];
        let lines: Vec<String> = commands.iter().map(|c| TmuxCommandBuilder::render(c)).collect();
        if !print {
            for command in &commands {
                let args: Vec<&str> = command.iter().map(String::as_str).collect();
                self.host.run(&args)?;
            }
            log::info!("installed binding on '{}' and focus hook", self.settings.toggle_key);
        }
        Ok(lines.join("\n"))
    }
}
