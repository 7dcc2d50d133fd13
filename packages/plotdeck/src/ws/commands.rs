//! Legacy text command dispatch.
//!
//! Browsers may send lines of the form `/<action> args='<a,b>')` over
//! the control channel. Actions resolve through a closed lookup table,
//! so the supported set is statically enumerable; an unknown action runs
//! the default `base` handler with no arguments and is never an error.

use tracing::debug;

type Handler = fn(&[&str]);

/// Closed mapping from action name to handler, with a defined fallback.
pub struct CommandTable {
    entries: &'static [(&'static str, Handler)],
    default: (&'static str, Handler),
}

impl CommandTable {
    /// Parse `line` and run the matching handler. Returns the name of
    /// the handler that ran, which is the default for unknown actions
    /// and unparseable lines.
    pub fn dispatch(&self, line: &str) -> &'static str {
        match parse_web_cmd(line) {
            Some((action, args)) => {
                match self.entries.iter().find(|(name, _)| *name == action) {
                    Some((name, handler)) => {
                        handler(&args);
                        name
                    }
                    None => {
                        (self.default.1)(&[]);
                        self.default.0
                    }
                }
            }
            None => {
                (self.default.1)(&[]);
                self.default.0
            }
        }
    }

    /// The statically known action names
    pub fn actions(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(name, _)| *name)
    }
}

fn handle_base(_args: &[&str]) {
    debug!("Request for base page");
}

/// The command table for the control channel
pub fn command_table() -> &'static CommandTable {
    static TABLE: CommandTable = CommandTable {
        entries: &[("base", handle_base)],
        default: ("base", handle_base),
    };
    &TABLE
}

/// Split `/<action> args='<a,b>')` into the action name and its
/// comma-separated arguments. Returns `None` when the line does not
/// carry a command at all.
pub fn parse_web_cmd(line: &str) -> Option<(&str, Vec<&str>)> {
    let rest = line.strip_prefix('/')?;
    let space = rest.find(' ')?;
    let action = &rest[..space];
    let args = rest[space + 1..]
        .strip_prefix("args='")?
        .strip_suffix("')")?;
    Some((action, args.split(',').collect()))
}
