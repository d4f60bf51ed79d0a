//! Advisory lock around registry read-modify-write cycles.
//!
//! The lock is a file next to the registry, created exclusively and holding the
//! owner's pid. Locks left behind by dead processes are removed on sight.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::StudyError;

const LOCK_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Removes the lock file when dropped.
#[derive(Debug)]
pub struct RegistryLock {
    path: PathBuf,
}

impl Drop for RegistryLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

impl RegistryLock {
    /// Lock file guarding `registry`: the registry path with `.lock` appended.
    #[must_use]
    pub fn path_for(registry: &Path) -> PathBuf {
        let mut name = registry.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Block until the lock for `registry` is ours or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// [`StudyError::Locked`] if another live process still holds it after `timeout`.
    pub fn acquire(registry: &Path, timeout: Duration) -> Result<Self, StudyError> {
        let lock_path = Self::path_for(registry);
        let started = Instant::now();

        loop {
            match try_acquire(&lock_path) {
                Ok(guard) => return Ok(guard),
                Err(LockState::Stale) => {
                    tracing::debug!(path = %lock_path.display(), "removing stale registry lock");
                    let _ = std::fs::remove_file(&lock_path);
                }
                Err(state) => {
                    if started.elapsed() >= timeout {
                        return Err(StudyError::Locked {
                            holder: state.describe(),
                            path: lock_path,
                        });
                    }
                    std::thread::sleep(LOCK_RETRY_DELAY);
                }
            }
        }
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(u32),
    Stale,
    Unknown,
}

impl LockState {
    fn describe(&self) -> String {
        match self {
            Self::HeldBy(pid) => format!("pid {pid}"),
            Self::Stale | Self::Unknown => "an unknown process".to_string(),
        }
    }
}

fn try_acquire(lock_path: &Path) -> Result<RegistryLock, LockState> {
    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let pid = std::process::id();
            let _ = writeln!(file, "{pid}");
            Ok(RegistryLock {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match pid_buf.trim().parse::<u32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(_) => Err(LockState::Stale),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: u32) -> bool {
    if pid == std::process::id() {
        return true;
    }
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|status| status.success())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn acquires_and_releases_lock_file() {
        let temp = TempDir::new().expect("tempdir should create");
        let registry = temp.path().join("studies.json");
        let lock_path = RegistryLock::path_for(&registry);

        let guard = RegistryLock::acquire(&registry, Duration::from_secs(1)).expect("lock");
        assert!(lock_path.is_file());
        drop(guard);
        assert!(!lock_path.exists());
    }

    #[test]
    fn held_lock_times_out() {
        let temp = TempDir::new().expect("tempdir should create");
        let registry = temp.path().join("studies.json");

        let _held = RegistryLock::acquire(&registry, Duration::from_secs(1)).expect("lock");
        let err = RegistryLock::acquire(&registry, Duration::from_millis(150)).unwrap_err();
        assert!(matches!(err, StudyError::Locked { .. }));
    }

    #[test]
    fn garbage_lock_is_reported_not_stolen() {
        let temp = TempDir::new().expect("tempdir should create");
        let registry = temp.path().join("studies.json");
        std::fs::write(RegistryLock::path_for(&registry), "not-a-pid").expect("fixture");

        let err = RegistryLock::acquire(&registry, Duration::from_millis(50)).unwrap_err();
        assert!(matches!(err, StudyError::Locked { .. }));
    }

    #[test]
    fn lock_path_appends_suffix() {
        assert_eq!(
            RegistryLock::path_for(Path::new("/srv/studies.json")),
            PathBuf::from("/srv/studies.json.lock")
        );
    }
}
