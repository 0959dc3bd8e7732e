//! PID file guarding against two relays for the same provider project

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use nix::sys::signal::kill;
use nix::unistd::Pid;

use crate::domain::config::ProviderConfig;

static STAGING_SEQ: AtomicUsize = AtomicUsize::new(0);

/// PID file for the relay process
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// PID file for a provider record, preferring XDG_RUNTIME_DIR
    pub fn for_config(config: &ProviderConfig) -> Self {
        let dir = std::env::var("XDG_RUNTIME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());
        Self {
            path: dir.join(format!("push-relay-{}.pid", config.routing_key())),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the PID file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// PID of a live relay holding this file, if any
    pub fn is_running(&self) -> Option<u32> {
        let mut file = File::open(&self.path).ok()?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).ok()?;

        let pid: u32 = contents.trim().parse().ok()?;
        if pid == process::id() {
            return None;
        }

        // Signal 0 only checks that the process exists
        match kill(Pid::from_raw(pid as i32), None) {
            Ok(()) => Some(pid),
            Err(nix::errno::Errno::ESRCH) => {
                // Stale PID file
                let _ = fs::remove_file(&self.path);
                None
            }
            Err(nix::errno::Errno::EPERM) => Some(pid),
            Err(_) => None,
        }
    }

    /// Acquire the PID file (fails if another relay is running).
    ///
    /// The file is created exclusively with its content already in place, so
    /// two relays starting together cannot both win.
    pub fn acquire(&self) -> Result<(), PidFileError> {
        for _ in 0..2 {
            match self.create_exclusive() {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    if self.holder() == Some(process::id()) {
                        return Ok(());
                    }
                    if let Some(pid) = self.is_running() {
                        return Err(PidFileError::AlreadyRunning(pid));
                    }
                    // Stale or unreadable; clear it and try once more
                    match fs::remove_file(&self.path) {
                        Ok(()) => {}
                        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                        Err(e) => {
                            return Err(PidFileError::WriteFailed(format!(
                                "Failed to replace stale PID file: {}",
                                e
                            )))
                        }
                    }
                }
                Err(e) => {
                    return Err(PidFileError::WriteFailed(format!(
                        "Failed to create PID file: {}",
                        e
                    )))
                }
            }
        }

        match self.is_running() {
            Some(pid) => Err(PidFileError::AlreadyRunning(pid)),
            None => Err(PidFileError::WriteFailed(
                "PID file keeps reappearing; another relay is starting".to_string(),
            )),
        }
    }

    /// Write our PID to a private file, then link it into place.
    /// Linking fails with `AlreadyExists` if the PID file is present.
    fn create_exclusive(&self) -> io::Result<()> {
        let staging = self.path.with_extension(format!(
            "pid.{}.{}.tmp",
            process::id(),
            STAGING_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&staging, process::id().to_string())?;
        let linked = fs::hard_link(&staging, &self.path);
        let _ = fs::remove_file(&staging);
        linked
    }

    /// PID recorded in the file, if readable
    fn holder(&self) -> Option<u32> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }

    /// Release the PID file
    pub fn release(&self) -> Result<(), PidFileError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                PidFileError::RemoveFailed(format!("Failed to remove PID file: {}", e))
            })?;
        }
        Ok(())
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        // Only remove the file if it is ours
        if self.holder() == Some(process::id()) {
            let _ = self.release();
        }
    }
}

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another relay is already running for this provider project (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}
