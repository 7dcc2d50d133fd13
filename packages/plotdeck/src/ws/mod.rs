mod commands;
mod handler;

pub use commands::{CommandTable, command_table, parse_web_cmd};
pub use handler::{control_channel_handler, run_session};
