use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use thiserror::Error;

use crate::DashError;
use crate::logging::LoggingError;
use crate::probe::FactSource;
use crate::runtime::{Dashboard, Exit, PowerError};

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error("runtime error: {0}")]
    Runtime(#[from] DashError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),
    #[error("{0}")]
    Power(#[from] PowerError),
}

/// Owns a `Dashboard` and the raw mode + alternate screen transitions around
/// it. A power action requested from the keyboard runs only after the
/// terminal has been handed back.
pub struct CliDriver<S: FactSource> {
    dashboard: Dashboard<S>,
}

impl<S: FactSource> CliDriver<S> {
    pub fn new(dashboard: Dashboard<S>) -> Self {
        Self { dashboard }
    }

    pub fn run(mut self) -> DriverResult<()> {
        let mut stdout = io::stdout();
        enter_screen(&CrosstermRawMode, &mut stdout)?;
        let result = self.dashboard.run(&mut stdout);
        leave_screen(&CrosstermRawMode, &mut stdout);

        match result? {
            Exit::Quit => Ok(()),
            Exit::Power(action) => {
                let command = self.dashboard.config().command_for(action).to_string();
                action.execute(&command, &mut stdout)?;
                Ok(())
            }
        }
    }
}

/// Raw mode toggle, split out so screen setup can be exercised without a tty.
trait RawMode {
    fn enable(&self) -> io::Result<()>;
    fn disable(&self);
}

struct CrosstermRawMode;

impl RawMode for CrosstermRawMode {
    fn enable(&self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable(&self) {
        terminal::disable_raw_mode().ok();
    }
}

/// Raw mode, alternate screen, hidden cursor. If the screen cannot be set up
/// after raw mode is on, raw mode is undone before the error is returned.
fn enter_screen(mode: &impl RawMode, stdout: &mut impl Write) -> DriverResult<()> {
    mode.enable().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
    if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
        leave_screen(mode, stdout);
        return Err(err.into());
    }
    Ok(())
}

fn leave_screen(mode: &impl RawMode, stdout: &mut impl Write) {
    execute!(stdout, Show, LeaveAlternateScreen).ok();
    mode.disable();
}
