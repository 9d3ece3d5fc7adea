use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::{Error, Result};

/// The host-system capabilities the installer needs.
///
/// Production code uses [`SystemHost`]; tests substitute a scripted
/// implementation so the install sequence runs without a network connection
/// or subprocesses.
pub trait Host {
    /// Report whether `name` resolves to a runnable command.
    fn has_command(&self, name: &str) -> bool;

    /// The full output of `git --version`.
    fn git_version_string(&self) -> Result<String>;

    /// Fetch `url` and return the response body.
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// Download `url` to the file at `dest`.
    fn download(&self, url: &str, dest: &Path) -> Result<()>;

    /// Unpack the gzipped tar archive at `archive` into the directory `dest`.
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<()>;

    /// Run the bundled `install.sh` from `dir`, installing under `prefix`.
    fn run_install_script(&self, dir: &Path, prefix: &Path) -> Result<()>;
}

/// [`Host`] implementation that shells out to the real git, curl, and tar.
pub struct SystemHost;

impl SystemHost {
    fn run(mut command: Command, what: &str) -> Result<String> {
        debug!("running {:?}", command);
        let output = command.output()?;

        if !output.status.success() {
            return Err(Error::IoError(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "{} failed with status {:?}: {}",
                    what,
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Host for SystemHost {
    fn has_command(&self, name: &str) -> bool {
        // `--version` is the one flag git, git-lfs, curl, and tar all answer.
        Command::new(name)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn git_version_string(&self) -> Result<String> {
        let mut command = Command::new("git");
        command.arg("--version");
        Self::run(command, "git --version")
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        let mut command = Command::new("curl");
        command.args(&["--fail", "--silent", "--show-error", "--location", url]);
        Self::run(command, "curl")
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let mut command = Command::new("curl");
        command
            .args(&["--fail", "--silent", "--show-error", "--location", "--output"])
            .arg(dest)
            .arg(url);
        Self::run(command, "curl").map(|_| ())
    }

    fn unpack(&self, archive: &Path, dest: &Path) -> Result<()> {
        let mut command = Command::new("tar");
        command.arg("-xzf").arg(archive).arg("-C").arg(dest);
        Self::run(command, "tar").map(|_| ())
    }

    fn run_install_script(&self, dir: &Path, prefix: &Path) -> Result<()> {
        let mut command = Command::new("sh");
        command.arg("install.sh").current_dir(dir).env("PREFIX", prefix);
        Self::run(command, "install.sh").map(|_| ())
    }
}
