// Library root
// -----------
// The binary (`main.rs`) parses the command line and hands a `Command`
// plus the loaded `Config` to `ui::run`.
//
// Module responsibilities:
// - `cli`: clap definitions of the command line.
// - `config`: credentials and default graph id from env and env files.
// - `pixel`: validated pixel date/quantity and graph enums.
// - `command`: maps a command to the single Pixela request it issues.
// - `api`: blocking HTTP client that sends that request.
// - `ui`: per-command flows (confirm, spinner, print the outcome).
pub mod api;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod pixel;
pub mod ui;

pub use error::{Error, Result};
