//! # System Interaction Layer
//!
//! The boundary between the interpreter and the user's machine.
//!
//! - **`settings`**: loads `settings.toml`, writing the defaults on first run.

pub mod settings;
