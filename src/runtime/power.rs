use std::io::{self, Write};
use std::process::Command;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowerError {
    #[error("{action} command could not be started: {source}\nCommand was: {command}")]
    Spawn {
        action: &'static str,
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("{action} command failed with exit code: {code}\nCommand was: {command}")]
    Failed {
        action: &'static str,
        command: String,
        /// `-1` when the command was killed by a signal.
        code: i32,
    },
}

/// Privileged power actions bound to keys. Run only after the terminal has
/// been restored so their output is readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    Reboot,
    Shutdown,
}

impl PowerAction {
    pub fn name(self) -> &'static str {
        match self {
            PowerAction::Reboot => "Reboot",
            PowerAction::Shutdown => "Shutdown",
        }
    }

    pub fn announcement(self) -> &'static str {
        match self {
            PowerAction::Reboot => "Rebooting system...",
            PowerAction::Shutdown => "Shutting down system...",
        }
    }

    /// Announce on `out`, then run `command` through `sh -c` and wait for it.
    pub fn execute(self, command: &str, out: &mut impl Write) -> Result<(), PowerError> {
        let spawn_error = |source| PowerError::Spawn {
            action: self.name(),
            command: command.to_string(),
            source,
        };

        writeln!(out, "{}", self.announcement()).map_err(spawn_error)?;
        out.flush().map_err(spawn_error)?;

        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .status()
            .map_err(spawn_error)?;

        if status.success() {
            Ok(())
        } else {
            Err(PowerError::Failed {
                action: self.name(),
                command: command.to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }
}
