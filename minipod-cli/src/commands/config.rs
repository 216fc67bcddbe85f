//! `minipod config` — show the effective configuration.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use minipod_core::config;

/// Arguments for `minipod config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print only the path of the config file.
    #[arg(long)]
    pub path: bool,
}

impl ConfigArgs {
    pub fn run(self) -> Result<ExitCode> {
        let home = dirs::home_dir().context("could not determine home directory")?;

        if self.path {
            println!("{}", config::config_path_at(&home).display());
            return Ok(ExitCode::SUCCESS);
        }

        let cfg = config::load_at(&home).context("failed to load config")?;
        print!("{}", cfg.to_yaml().context("failed to render config")?);
        Ok(ExitCode::SUCCESS)
    }
}
