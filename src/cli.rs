use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

/// Pulls the value that must follow `flag` out of an argument stream.
/// Shared by the daemon and the `send-alert` packet sender.
pub fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

pub fn config_path_from_args() -> Result<PathBuf> {
    config_path_from(env::args().skip(1))
}

fn config_path_from(args: impl Iterator<Item = String>) -> Result<PathBuf> {
    let mut args = args;
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(PathBuf::from(next_value(&mut args, "--config")?));
            }
            other => {
                return Err(anyhow!(
                    "unknown argument: {other}. usage: inkalert [--config <path>]"
                ));
            }
        }
    }

    Ok(config_path.unwrap_or_else(|| PathBuf::from("./inkalert.jsonc")))
}
