use {
    crate::entry::now_entry,
    anyhow::{Context, Result},
    std::{
        fmt,
        fs::{File, OpenOptions},
        io::{self, Write},
        path::{Path, PathBuf},
        process,
        sync::{Mutex, OnceLock, PoisonError},
    },
};

#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

pub const LOG_FILE_NAME: &str = "tds.log";

const FATAL_EXIT_CODE: i32 = 255;

/// Appends timestamped lines to a file that is opened on first use.
///
/// The file is opened at most once per logger. Later calls reuse the handle
/// until the logger is dropped, and the handle is never closed explicitly.
///
/// Writes after the open take no lock. Each entry goes out as one `write_all`
/// on an append-mode handle, so a line only stays whole if the OS completes it
/// in a single write. Very long messages from different threads can interleave.
pub struct FileLogger {
    path: PathBuf,
    lock: Mutex<()>,
    target: OnceLock<File>,
    #[cfg(test)]
    opens: AtomicUsize,
}

impl FileLogger {
    /// Logger for `tds.log` in the current working directory.
    pub fn new() -> Self {
        Self::at(LOG_FILE_NAME)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            target: OnceLock::new(),
            #[cfg(test)]
            opens: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_ready(&self) -> bool {
        self.target.get().is_some()
    }

    /// Open the log file now instead of on the first write. Unlike `log`,
    /// a failure is handed back to the caller rather than ending the process.
    pub fn init(&self) -> Result<()> {
        self.target().map(|_| ())
    }

    /// Write one entry, exiting the process if the file can't be opened.
    /// Write errors after that are dropped.
    pub fn log(&self, args: fmt::Arguments) {
        let mut file = match self.target() {
            Ok(file) => file,
            Err(err) => fatal(&err),
        };
        let _ = file.write_all(now_entry(args).as_bytes());
    }

    pub fn try_log(&self, args: fmt::Arguments) -> Result<()> {
        let mut file = self.target()?;
        file.write_all(now_entry(args).as_bytes())
            .with_context(|| format!("writing log file {}", self.path.display()))
    }

    fn target(&self) -> Result<&File> {
        if let Some(file) = self.target.get() {
            return Ok(file);
        }
        // the guarded value is (), so a poisoned lock is still usable
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = self.target.get() {
            return Ok(file);
        }
        #[cfg(test)]
        self.opens.fetch_add(1, Ordering::SeqCst);
        let file = open(&self.path)
            .with_context(|| format!("opening log file {}", self.path.display()))?;
        Ok(self.target.get_or_init(|| file))
    }
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    options.open(path)
}

fn fatal(err: &anyhow::Error) -> ! {
    eprintln!("Error {:#}", err);
    process::exit(FATAL_EXIT_CODE);
}
