//! tmux-focus-zoom CLI: the entry point tmux bindings and hooks run.

use std::process;

use clap::{Parser, Subcommand};

use focus_zoom_core::command::{Command, Response};
use focus_zoom_core::infrastructure::tmux::Tmux;
use focus_zoom_core::logging;
use focus_zoom_core::sys::Sys;
use focus_zoom_core::types::config::{resolve_config_dir, ZoomSettings};


/// tmux-focus-zoom - give the focused tmux pane most of the window
#[derive(Parser)]
#[command(name = "tmux-focus-zoom")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn focus zoom on or off for the current window
    Toggle,
    /// Snapshot the layout and zoom the focused pane
    Enable,
    /// Restore the snapshot and turn zoom off
    Disable,
    /// Re-zoom for the focused pane (run from the pane-focus-in hook)
    Apply,
    /// Print status-bar text
    Status,
    /// Bind the toggle key and install the focus hook
    Setup {
        /// Print the tmux commands instead of running them
        #[arg(long)]
        print: bool,
    },
    /// Show help for a command or topic
    Help {
        topic: Option<String>,
    },
}


fn main() {
    let cli = Cli::parse();

    let config_dir = resolve_config_dir();
    logging::init(&config_dir, logging::level_from_env());

    let cmd = into_command(cli.command);
    let tmux = Tmux::new();
    let settings = ZoomSettings::from_host(&tmux, config_dir);
    let sys = Sys::new(tmux, settings);
    let response = sys.execute(cmd);
    logging::shutdown();

    match response {
        Response::Ok { output } => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Response::Error { message } => {
            eprintln!("tmux-focus-zoom: {}", message);
            process::exit(1);
        }
    }
}


fn into_command(command: Commands) -> Command {
    match command {
        Commands::Toggle => Command::Toggle,
        Commands::Enable => Command::Enable,
        Commands::Disable => Command::Disable,
        Commands::Apply => Command::Apply,
        Commands::Status => Command::Status,
        Commands::Setup { print } => Command::Setup {
            executable: current_executable(),
            print,
        },
        Commands::Help { topic } => Command::Help { topic },
    }
}


/// Absolute path of this binary, or its bare name when that is unknown.
fn current_executable() -> String {
    std::env::current_exe()
        .ok()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "tmux-focus-zoom".into())
}
