use std::env;
use std::io::Write;

use crate::{Cli, Result};

use clap::{App, ArgMatches, SubCommand};

use sifstore::install::{self, InstallConfig, InstallOutcome, SystemHost};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("install-lfs")
        .about("Install a user-local git-lfs if the host git is too old to manage one")
        .after_help(
            "Set SIF_LFS_INSTALL_IF_GIT_LT to override the git version threshold \
             (default 2.13.0). Exits 0 whether git-lfs was installed, was already \
             present, or was not needed.",
        )
}

pub(crate) fn run(cli: &mut Cli, _args: &ArgMatches) -> Result<()> {
    let config = config_from_env()?;
    let outcome = install::install_lfs(&SystemHost, &config)?;

    match outcome {
        InstallOutcome::AlreadyInstalled => {
            writeln!(cli, "git-lfs is already installed; nothing to do.")?;
        }
        InstallOutcome::GitTooNew {
            installed,
            threshold,
        } => {
            writeln!(
                cli,
                "git {} is not older than {}; install git-lfs through your package manager instead.",
                installed, threshold
            )?;
        }
        InstallOutcome::Installed { version, prefix } => {
            writeln!(
                cli,
                "Installed git-lfs {} under {}.",
                version,
                prefix.display()
            )?;
            writeln!(
                cli,
                "Make sure {} is on your PATH.",
                prefix.join("bin").display()
            )?;
        }
    }

    Ok(())
}

fn config_from_env() -> Result<InstallConfig> {
    let mut config = InstallConfig::default();

    if let Ok(threshold) = env::var(install::THRESHOLD_ENV_VAR) {
        config.min_git_version = threshold.parse()?;
    }

    Ok(config)
}
