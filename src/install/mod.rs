//! Bootstrap a user-local git-lfs installation.
//!
//! Hosts whose git is recent enough are expected to install git-lfs through
//! their package manager; this module exists for the machines (typically HPC
//! login nodes) where git predates built-in large-file support and nothing
//! can be installed system-wide. The sequence is strictly linear with no
//! retries:
//!
//! 1. git-lfs already callable → done.
//! 2. git, curl, and tar must be callable → the first missing one is fatal.
//! 3. Parse the host git version.
//! 4. Not older than the threshold → skip, advising a manual install.
//! 5. Ask the release index for the latest release and pick the platform
//!    archive.
//! 6. Download it into a scoped temporary directory.
//! 7. Extract and locate the archive's top-level directory.
//! 8. Run the bundled `install.sh` against the user-local prefix.
//!
//! Every collaborator sits behind the [`Host`] trait so the sequence is
//! testable without a network or subprocesses.

mod host;
pub use host::{Host, SystemHost};

mod release;
pub use release::{Asset, Release};

mod version;
pub use version::Version;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::{Error, Result};

/// Environment variable the CLI reads to override the git version threshold.
pub const THRESHOLD_ENV_VAR: &str = "SIF_LFS_INSTALL_IF_GIT_LT";

/// Settings for one install attempt.
///
/// `Default` matches the deployment scripts this tool replaces: install
/// git-lfs from its latest GitHub release when the host git is older than
/// 2.13.0, into `~/.local`.
#[derive(Clone, Debug)]
pub struct InstallConfig {
    /// Install only when the host git is older than this.
    pub min_git_version: Version,
    /// Token that must appear in the release asset's file name.
    pub platform: String,
    /// Required asset file-name suffix.
    pub archive_suffix: String,
    /// Endpoint describing the latest release.
    pub release_url: String,
    /// Installation prefix; the binary lands in `<prefix>/bin`.
    pub install_prefix: PathBuf,
}

impl Default for InstallConfig {
    fn default() -> InstallConfig {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        InstallConfig {
            min_git_version: Version::new(vec![2, 13, 0]),
            platform: "linux-amd64".to_string(),
            archive_suffix: ".tar.gz".to_string(),
            release_url: "https://api.github.com/repos/git-lfs/git-lfs/releases/latest"
                .to_string(),
            install_prefix: home.join(".local"),
        }
    }
}

/// How an install attempt that didn't fail ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InstallOutcome {
    /// git-lfs was already callable; nothing was done.
    AlreadyInstalled,
    /// The host git is new enough to get git-lfs through normal channels,
    /// so no unprivileged install was attempted.
    GitTooNew {
        installed: Version,
        threshold: Version,
    },
    /// git-lfs was downloaded and installed under `prefix`.
    Installed { version: String, prefix: PathBuf },
}

/// Ensure git-lfs is available without elevated privileges.
///
/// The download and extraction happen inside a temporary directory that is
/// removed on every exit path, so no partial download survives an error.
pub fn install_lfs(host: &dyn Host, config: &InstallConfig) -> Result<InstallOutcome> {
    if host.has_command("git-lfs") {
        info!("git-lfs already present");
        return Ok(InstallOutcome::AlreadyInstalled);
    }

    for tool in &["git", "curl", "tar"] {
        if !host.has_command(tool) {
            return Err(Error::MissingDependency((*tool).to_string()));
        }
    }

    let raw = host.git_version_string()?;
    let installed = Version::from_git_output(&raw)?;
    debug!("host git is {}", installed);

    if !installed.is_older_than(&config.min_git_version) {
        return Ok(InstallOutcome::GitTooNew {
            installed,
            threshold: config.min_git_version.clone(),
        });
    }

    let body = host.fetch_text(&config.release_url)?;
    let release = Release::from_json(&body)?;
    let asset = release
        .asset_for(&config.platform, &config.archive_suffix)
        .ok_or_else(|| {
            Error::AssetNotFound(format!("*{}*{}", config.platform, config.archive_suffix))
        })?;
    info!("installing git-lfs {} from {}", release.tag_name, asset.name);

    let workspace = tempfile::tempdir()?;

    let archive = workspace.path().join(&asset.name);
    host.download(&asset.browser_download_url, &archive)?;

    let unpacked = workspace.path().join("unpacked");
    fs::create_dir(&unpacked)?;
    host.unpack(&archive, &unpacked)?;

    let extracted = toplevel_dir(&unpacked, "git-lfs-")?;
    host.run_install_script(&extracted, &config.install_prefix)?;

    Ok(InstallOutcome::Installed {
        version: release.tag_name.clone(),
        prefix: config.install_prefix.clone(),
    })
}

// The release tarball unpacks into a single `git-lfs-<version>` directory
// holding `install.sh`.
fn toplevel_dir(unpacked: &Path, name_prefix: &str) -> Result<PathBuf> {
    for entry in fs::read_dir(unpacked)? {
        let entry = entry?;
        let name = entry.file_name();
        let matches = name.to_str().map_or(false, |n| n.starts_with(name_prefix));
        if matches && entry.path().is_dir() {
            return Ok(entry.path());
        }
    }

    Err(Error::MalformedArchive(format!("{}*", name_prefix)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    const RELEASE_JSON: &str = r#"{
        "tag_name": "v3.4.0",
        "assets": [
            {
                "name": "git-lfs-darwin-amd64-v3.4.0.zip",
                "browser_download_url": "https://example.invalid/darwin.zip"
            },
            {
                "name": "git-lfs-linux-amd64-v3.4.0.tar.gz",
                "browser_download_url": "https://example.invalid/linux.tar.gz"
            }
        ]
    }"#;

    struct FakeHost {
        commands: Vec<&'static str>,
        git_version: &'static str,
        release_json: &'static str,
        // Name of the directory unpack() pretends the archive contains;
        // empty means the archive unpacks to nothing.
        archive_dir_name: &'static str,
        calls: RefCell<Vec<String>>,
        downloaded_to: RefCell<Option<PathBuf>>,
    }

    impl Default for FakeHost {
        fn default() -> FakeHost {
            FakeHost {
                commands: vec!["git", "curl", "tar"],
                git_version: "git version 2.7.4",
                release_json: RELEASE_JSON,
                archive_dir_name: "git-lfs-3.4.0",
                calls: RefCell::new(Vec::new()),
                downloaded_to: RefCell::new(None),
            }
        }
    }

    impl FakeHost {
        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl Host for FakeHost {
        fn has_command(&self, name: &str) -> bool {
            self.commands.contains(&name)
        }

        fn git_version_string(&self) -> Result<String> {
            self.record("git --version".to_string());
            Ok(self.git_version.to_string())
        }

        fn fetch_text(&self, url: &str) -> Result<String> {
            self.record(format!("fetch {}", url));
            Ok(self.release_json.to_string())
        }

        fn download(&self, url: &str, dest: &Path) -> Result<()> {
            self.record(format!("download {}", url));
            *self.downloaded_to.borrow_mut() = Some(dest.to_path_buf());
            fs::write(dest, b"pretend archive bytes")?;
            Ok(())
        }

        fn unpack(&self, archive: &Path, dest: &Path) -> Result<()> {
            assert!(archive.is_file(), "unpack called before download");
            self.record("unpack".to_string());

            if !self.archive_dir_name.is_empty() {
                let dir = dest.join(self.archive_dir_name);
                fs::create_dir(&dir)?;
                fs::write(dir.join("install.sh"), "#!/bin/sh\n")?;
            }
            Ok(())
        }

        fn run_install_script(&self, dir: &Path, prefix: &Path) -> Result<()> {
            self.record(format!(
                "install {} -> {}",
                dir.file_name().unwrap().to_str().unwrap(),
                prefix.display()
            ));
            Ok(())
        }
    }

    fn config() -> InstallConfig {
        let mut config = InstallConfig::default();
        config.release_url = "https://release.invalid/latest".to_string();
        config.install_prefix = PathBuf::from("/home/someone/.local");
        config
    }

    #[test]
    fn noop_when_already_installed() {
        let mut host = FakeHost::default();
        host.commands.push("git-lfs");

        let outcome = install_lfs(&host, &config()).unwrap();

        assert_eq!(outcome, InstallOutcome::AlreadyInstalled);
        assert!(host.calls.borrow().is_empty());
    }

    #[test]
    fn missing_dependency_is_named() {
        let mut host = FakeHost::default();
        host.commands = vec!["git", "tar"];

        let err = install_lfs(&host, &config()).unwrap_err();

        if let Error::MissingDependency(tool) = err {
            assert_eq!(tool, "curl");
        } else {
            panic!("unexpected error: {:?}", err);
        }
    }

    #[test]
    fn skips_when_git_is_not_older_than_threshold() {
        let mut host = FakeHost::default();
        host.git_version = "git version 2.40.1";

        let outcome = install_lfs(&host, &config()).unwrap();

        assert_eq!(
            outcome,
            InstallOutcome::GitTooNew {
                installed: Version::new(vec![2, 40, 1]),
                threshold: Version::new(vec![2, 13, 0]),
            }
        );
        // The skip happens before any network traffic.
        assert_eq!(*host.calls.borrow(), vec!["git --version"]);
    }

    #[test]
    fn threshold_exactly_met_still_skips() {
        let mut host = FakeHost::default();
        host.git_version = "git version 2.13.0";

        let outcome = install_lfs(&host, &config()).unwrap();
        assert!(matches!(outcome, InstallOutcome::GitTooNew { .. }));
    }

    #[test]
    fn unparseable_git_version_is_fatal() {
        let mut host = FakeHost::default();
        host.git_version = "git version mystery";

        let err = install_lfs(&host, &config()).unwrap_err();
        assert!(matches!(err, Error::VersionParse(_)));
    }

    #[test]
    fn missing_platform_asset_is_fatal() {
        let mut host = FakeHost::default();
        host.release_json = r#"{"tag_name": "v3.4.0", "assets": []}"#;

        let err = install_lfs(&host, &config()).unwrap_err();

        if let Error::AssetNotFound(pattern) = err {
            assert!(pattern.contains("linux-amd64"));
        } else {
            panic!("unexpected error: {:?}", err);
        }
    }

    #[test]
    fn malformed_release_body_is_fatal() {
        let mut host = FakeHost::default();
        host.release_json = "<html>rate limited</html>";

        let err = install_lfs(&host, &config()).unwrap_err();
        assert!(matches!(err, Error::ReleaseParse(_)));
    }

    #[test]
    fn unexpected_archive_layout_is_fatal() {
        let mut host = FakeHost::default();
        host.archive_dir_name = "";

        let err = install_lfs(&host, &config()).unwrap_err();
        assert!(matches!(err, Error::MalformedArchive(_)));

        // The workspace is cleaned up on the failure path too.
        let archive = host.downloaded_to.borrow().clone().unwrap();
        assert!(!archive.exists());
    }

    #[test]
    fn happy_path_runs_the_full_sequence() {
        let host = FakeHost::default();

        let outcome = install_lfs(&host, &config()).unwrap();

        assert_eq!(
            outcome,
            InstallOutcome::Installed {
                version: "v3.4.0".to_string(),
                prefix: PathBuf::from("/home/someone/.local"),
            }
        );
        assert_eq!(
            *host.calls.borrow(),
            vec![
                "git --version",
                "fetch https://release.invalid/latest",
                "download https://example.invalid/linux.tar.gz",
                "unpack",
                "install git-lfs-3.4.0 -> /home/someone/.local",
            ]
        );
    }

    #[test]
    fn workspace_is_removed_after_success() {
        let host = FakeHost::default();

        install_lfs(&host, &config()).unwrap();

        let archive = host.downloaded_to.borrow().clone().unwrap();
        assert!(!archive.exists());
        assert!(!archive.parent().unwrap().exists());
    }

    #[test]
    fn custom_threshold_is_honored() {
        let mut host = FakeHost::default();
        host.git_version = "git version 2.20.0";

        // Default threshold would skip; a higher one installs.
        let mut config = config();
        config.min_git_version = Version::new(vec![2, 25, 0]);

        let outcome = install_lfs(&host, &config).unwrap();
        assert!(matches!(outcome, InstallOutcome::Installed { .. }));
    }
}
