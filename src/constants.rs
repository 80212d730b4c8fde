// src/constants.rs

/// The name of the directory holding flashdeck configuration (inside the system config dir).
pub const CONFIG_DIR_NAME: &str = "flashdeck";

/// The name of the settings file (inside the config directory).
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// The prompt shown before each input line when the settings do not override it.
pub const DEFAULT_PROMPT: &str = "flashdeck> ";

/// The hint appended to every malformed-input error.
pub const HELP_HINT: &str = "Type `help` to see the commands available right now.";
