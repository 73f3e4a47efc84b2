use std::env;
use std::process::ExitCode;

use hexstat::{CliDriver, CliDriverError, Dashboard, DashboardConfig, SystemProbe};

fn main() -> ExitCode {
    if env::args_os().len() > 1 {
        eprintln!("usage: hexstat");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliDriverError::Power(err)) => {
            println!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("hexstat: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliDriverError> {
    let config = DashboardConfig::from_env()?;
    let probe = SystemProbe::new(config.battery_path.clone());
    CliDriver::new(Dashboard::new(probe, config)).run()
}
