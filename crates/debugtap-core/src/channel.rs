//! Output-channel resolution.
//!
//! Formatted lines go to stderr unless the `fd` option names a path, in
//! which case output goes to a named pipe at that path so a second
//! terminal can tail it (`debugtap drain <path>`, or plain `cat`). The
//! pipe is created on demand with mode 0644; an existing entry that is
//! not a pipe is never written to - the channel quietly falls back to
//! stderr instead.
//!
//! Resolution happens at instance-initialization time, not per log
//! call. The resolved channel is process-wide: every instance holds the
//! same [`SharedChannel`] handle, and re-initializing one instance
//! swaps the channel under all of them.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use tracing::warn;

use crate::config::{ConfigValue, InspectOpts};
use crate::error::{TapError, TapResult};

/// The resolved destination for formatted lines.
#[derive(Debug)]
pub enum Channel {
    /// The process's standard error stream.
    Stderr,
    /// A writable named pipe.
    Pipe { path: PathBuf, file: File },
}

impl Channel {
    /// Resolve the destination from an option snapshot.
    ///
    /// Filesystem errors while creating or opening the pipe are fatal:
    /// an instance that cannot reach its destination fails
    /// initialization rather than silently dropping output.
    pub fn resolve(opts: &InspectOpts) -> TapResult<Channel> {
        let Some(fd) = opts.fd() else {
            return Ok(Channel::Stderr);
        };
        let path = match fd {
            ConfigValue::Str(path) => Path::new(path),
            other => return Err(TapError::InvalidDestination(other.describe())),
        };
        match std::fs::metadata(path) {
            Ok(meta) => {
                if !meta.file_type().is_fifo() {
                    warn!(
                        path = %path.display(),
                        "destination exists but is not a named pipe, falling back to stderr"
                    );
                    return Ok(Channel::Stderr);
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                mkfifo(
                    path,
                    Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH,
                )
                .map_err(|source| TapError::FifoCreate {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
            Err(err) => return Err(err.into()),
        }
        // Read+write so the open never blocks waiting for an external
        // reader to attach.
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Channel::Pipe {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn is_pipe(&self) -> bool {
        matches!(self, Channel::Pipe { .. })
    }

    /// Path of the backing pipe, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Channel::Stderr => None,
            Channel::Pipe { path, .. } => Some(path),
        }
    }

    /// Write one formatted line plus the trailing newline.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Channel::Stderr => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(line.as_bytes())?;
                stderr.write_all(b"\n")
            }
            Channel::Pipe { file, .. } => {
                file.write_all(line.as_bytes())?;
                file.write_all(b"\n")?;
                file.flush()
            }
        }
    }
}

/// Process-wide channel handle shared by all debug instances.
///
/// Cloning shares the underlying channel; [`SharedChannel::replace`]
/// swaps it for every holder at once.
#[derive(Debug, Clone)]
pub struct SharedChannel {
    inner: Arc<Mutex<Channel>>,
}

impl SharedChannel {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(channel)),
        }
    }

    /// A handle pointing at stderr.
    pub fn stderr() -> Self {
        Self::new(Channel::Stderr)
    }

    /// Swap the active channel for all holders of this handle.
    pub fn replace(&self, channel: Channel) {
        *self.inner.lock().unwrap() = channel;
    }

    pub fn is_pipe(&self) -> bool {
        self.inner.lock().unwrap().is_pipe()
    }

    pub fn write_line(&self, line: &str) -> io::Result<()> {
        self.inner.lock().unwrap().write_line(line)
    }
}
