use std::path::PathBuf;

use crate::infrastructure::tmux::Host;

/// tmux user option holding the zoom percentage.
pub const PERCENT_OPTION: &str = "@focus-zoom-percent";
/// tmux user option holding the toggle key.
pub const KEY_OPTION: &str = "@focus-zoom-key";
/// Environment variable overriding the state/log directory.
pub const CONFIG_DIR_ENV: &str = "FOCUS_ZOOM_CONFIG_DIR";


/// Share of the available space the focused pane receives, 10 to 95.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomPercent(u32);

impl ZoomPercent {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 95;
    pub const DEFAULT: u32 = 65;

    pub fn new(value: u32) -> Option<ZoomPercent> {
        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then_some(ZoomPercent(value))
    }

    /// Parse an option value, falling back to the default when it is missing,
    /// not a number, or out of range.
    pub fn parse_or_default(raw: &str) -> ZoomPercent {
        raw.trim()
            .parse::<u32>()
            .ok()
            .and_then(ZoomPercent::new)
            .unwrap_or_default()
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ZoomPercent {
    fn default() -> Self {
        ZoomPercent(Self::DEFAULT)
    }
}


/// Settings read once per invocation from tmux user options.
#[derive(Debug, Clone)]
pub struct ZoomSettings {
    /// Zoom percentage. Default: 65.
    pub percent: ZoomPercent,
    /// Key bound to `toggle` by `setup`. Default: "z".
    pub toggle_key: String,
    /// Directory holding `state.json` and `debug.log`.
    pub config_dir: PathBuf,
}

fn default_toggle_key() -> String {
    "z".into()
}

impl ZoomSettings {
    /// Read the user options from tmux. Options that are unset, invalid or
    /// unreadable keep their defaults.
    pub fn from_host(host: &dyn Host, config_dir: PathBuf) -> ZoomSettings {
        let percent = match host.option(PERCENT_OPTION) {
            Ok(raw) => ZoomPercent::parse_or_default(&raw),
            Err(e) => {
                log::debug!("reading {}: {}", PERCENT_OPTION, e);
                ZoomPercent::default()
            }
        };
        let toggle_key = host
            .option(KEY_OPTION)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(default_toggle_key);
        ZoomSettings {
            percent,
            toggle_key,
            config_dir,
        }
    }
}


/// `$FOCUS_ZOOM_CONFIG_DIR`, else `~/.config/tmux-focus-zoom`.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("tmux-focus-zoom")
}
