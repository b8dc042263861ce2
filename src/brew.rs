//! The two things we ask Homebrew itself: where it is installed, and where it
//! keeps (or would keep) a package's downloaded artifact.
//!
//! Both go through the [`Brew`] trait so resolution logic can run against a
//! scripted stand-in instead of a real `brew` binary.

use crate::descriptor::DescriptorKind;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Environment variable holding the Homebrew repository root
pub const REPOSITORY_ENV: &str = "HOMEBREW_REPOSITORY";

/// Environment variable overriding the `brew` executable
pub const BREW_PROGRAM_ENV: &str = "VTSUM_BREW";

/// Access to the package manager installation
pub trait Brew {
    /// Repository root from the environment, if any
    fn repository(&self) -> Option<PathBuf>;

    /// Install prefix as reported by `brew --prefix`
    fn prefix(&self) -> Result<PathBuf>;

    /// Raw output of `brew --cache [--formula|--cask] <name>`
    fn cache_path(&self, kind: Option<DescriptorKind>, name: &str) -> Result<String>;
}

impl<B: Brew + ?Sized> Brew for &B {
    fn repository(&self) -> Option<PathBuf> {
        (**self).repository()
    }

    fn prefix(&self) -> Result<PathBuf> {
        (**self).prefix()
    }

    fn cache_path(&self, kind: Option<DescriptorKind>, name: &str) -> Result<String> {
        (**self).cache_path(kind, name)
    }
}

/// [`Brew`] backed by the process environment and the `brew` executable
#[derive(Debug, Clone)]
pub struct SystemBrew {
    program: OsString,
}

impl SystemBrew {
    /// Use `$VTSUM_BREW` if set, `brew` from `PATH` otherwise
    pub fn new() -> Self {
        let program = std::env::var_os(BREW_PROGRAM_ENV).unwrap_or_else(|| "brew".into());
        Self { program }
    }

    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.program.to_string_lossy(), args.join(" "))
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let command_line = self.command_line(args);
        debug!("Running {}", command_line);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| Error::ExternalCommandFailure {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ExternalCommandFailure {
                command: command_line,
                reason: match stderr.trim() {
                    "" => format!("exited with {}", output.status),
                    msg => msg.to_string(),
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for SystemBrew {
    fn default() -> Self {
        Self::new()
    }
}

impl Brew for SystemBrew {
    fn repository(&self) -> Option<PathBuf> {
        std::env::var_os(REPOSITORY_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn prefix(&self) -> Result<PathBuf> {
        let args = ["--prefix"];
        let output = self.run(&args)?;
        let prefix = output.trim();
        if prefix.is_empty() {
            return Err(Error::ExternalCommandFailure {
                command: self.command_line(&args),
                reason: "no output".to_string(),
            });
        }
        Ok(PathBuf::from(prefix))
    }

    fn cache_path(&self, kind: Option<DescriptorKind>, name: &str) -> Result<String> {
        let mut args = vec!["--cache"];
        if let Some(kind) = kind {
            args.push(kind.brew_flag());
        }
        args.push(name);
        self.run(&args)
    }
}

/// Locate the Taps directory.
///
/// Prefers `$HOMEBREW_REPOSITORY/Library/Taps`; only when that is unset or
/// missing is `brew --prefix` invoked.
pub fn taps_dir<B: Brew + ?Sized>(brew: &B) -> Result<PathBuf> {
    if let Some(repository) = brew.repository() {
        let taps = repository.join("Library").join("Taps");
        if taps.exists() {
            debug!("Using taps from {}: {}", REPOSITORY_ENV, taps.display());
            return Ok(taps);
        }
        debug!("{} does not exist, asking brew for its prefix", taps.display());
    }

    let prefix = brew.prefix()?;
    let taps = prefix.join("Homebrew").join("Library").join("Taps");
    if !taps.exists() {
        // Apple Silicon installs keep the repository at the prefix itself
        let flat = prefix.join("Library").join("Taps");
        if flat.exists() {
            debug!("Using taps from brew prefix: {}", flat.display());
            return Ok(flat);
        }
    }

    debug!("Using taps from brew prefix: {}", taps.display());
    Ok(taps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct FakeBrew {
        repository: Option<PathBuf>,
        prefix: PathBuf,
        prefix_calls: Cell<usize>,
    }

    impl Brew for FakeBrew {
        fn repository(&self) -> Option<PathBuf> {
            self.repository.clone()
        }

        fn prefix(&self) -> Result<PathBuf> {
            self.prefix_calls.set(self.prefix_calls.get() + 1);
            Ok(self.prefix.clone())
        }

        fn cache_path(&self, _kind: Option<DescriptorKind>, _name: &str) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_taps_dir_from_repository() {
        let temp = TempDir::new().unwrap();
        let taps = temp.path().join("Library/Taps");
        std::fs::create_dir_all(&taps).unwrap();

        let brew = FakeBrew {
            repository: Some(temp.path().to_path_buf()),
            prefix: PathBuf::from("/nonexistent"),
            prefix_calls: Cell::new(0),
        };

        assert_eq!(taps_dir(&brew).unwrap(), taps);
        assert_eq!(brew.prefix_calls.get(), 0);
    }

    #[test]
    fn test_taps_dir_falls_back_when_repository_missing() {
        let temp = TempDir::new().unwrap();
        let brew = FakeBrew {
            repository: Some(temp.path().join("gone")),
            prefix: PathBuf::from("/usr/local"),
            prefix_calls: Cell::new(0),
        };

        assert_eq!(
            taps_dir(&brew).unwrap(),
            PathBuf::from("/usr/local/Homebrew/Library/Taps")
        );
        assert_eq!(brew.prefix_calls.get(), 1);
    }

    #[test]
    fn test_taps_dir_without_repository() {
        let temp = TempDir::new().unwrap();
        let taps = temp.path().join("Homebrew/Library/Taps");
        std::fs::create_dir_all(&taps).unwrap();

        let brew = FakeBrew {
            repository: None,
            prefix: temp.path().to_path_buf(),
            prefix_calls: Cell::new(0),
        };

        assert_eq!(taps_dir(&brew).unwrap(), taps);
        assert_eq!(brew.prefix_calls.get(), 1);
    }

    #[test]
    fn test_taps_dir_flat_prefix() {
        let temp = TempDir::new().unwrap();
        let taps = temp.path().join("Library/Taps");
        std::fs::create_dir_all(&taps).unwrap();

        let brew = FakeBrew {
            repository: None,
            prefix: temp.path().to_path_buf(),
            prefix_calls: Cell::new(0),
        };

        assert_eq!(taps_dir(&brew).unwrap(), taps);
    }

    #[test]
    fn test_missing_program_is_external_failure() {
        let brew = SystemBrew::with_program("/nonexistent/brew-for-vtsum-tests");
        let err = brew.prefix().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ExternalCommandFailure);

        let err = brew.cache_path(None, "wget").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ExternalCommandFailure);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_external_failure() {
        let brew = SystemBrew::with_program("false");

        let err = brew.prefix().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ExternalCommandFailure);
        assert!(err.to_string().contains("false --prefix"));

        let err = brew.cache_path(Some(DescriptorKind::Cask), "docker").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ExternalCommandFailure);
        assert!(err.to_string().contains("false --cache --cask docker"));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_prefix_output() {
        let brew = SystemBrew::with_program("true");

        let err = brew.prefix().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ExternalCommandFailure);
        assert_eq!(err.to_string(), "`true --prefix` failed: no output");

        // Empty cache output is left for the resolver to judge
        assert_eq!(brew.cache_path(None, "wget").unwrap(), "");
    }
}
