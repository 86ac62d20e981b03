use std::io;
use std::process::exit;

use chrono::Utc;
use clap::Parser;
use env_logger::Env;
use log::error;
use ssl_expiry::input::{read_target_line, stdin_has_data, READ_ERROR, USAGE};
use ssl_expiry::{run, ExpiryError, OpenSslConnector};

#[derive(Parser)]
#[command(
    name = "ssl-expiry",
    version,
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Hostname, host:port or https:// URL to check
    #[arg(value_name = "targetURL", allow_hyphen_values = true)]
    target: Option<String>,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _rest: Vec<String>,
}

/// Piped or redirected stdin wins over the command line.
fn acquire_target() -> Result<String, &'static str> {
    if stdin_has_data() {
        return read_target_line(io::stdin().lock()).ok_or(READ_ERROR);
    }
    match Cli::try_parse() {
        Ok(Cli {
            target: Some(target),
            ..
        }) => Ok(target),
        _ => Err(USAGE),
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let target = match acquire_target() {
        Ok(target) => target,
        Err(message) => {
            println!("{}", message);
            return;
        }
    };

    let connector = OpenSslConnector::default();
    match run(&target, &connector, Utc::now(), &mut io::stdout()) {
        Ok(()) => {}
        Err(err @ ExpiryError::MalformedTarget { .. }) => {
            error!("{}", err);
            exit(1);
        }
        Err(err) => println!("Error: {}", err),
    }
}
