//! Process-wide file logger.
//!
//! `log!` appends `HH:MM:SS message` lines to `tds.log` in the working
//! directory. The file is opened on the first call, and the process exits if
//! it can't be. Hosts that want to handle that themselves can build their own
//! [`FileLogger`] and call [`FileLogger::init`] up front.

mod entry;
mod log;

use lazy_static::lazy_static;

pub use {
    entry::format_entry,
    log::{FileLogger, LOG_FILE_NAME},
};

lazy_static! {
    pub static ref LOG: FileLogger = FileLogger::new();
}

/// Write a line to the process-wide `tds.log`.
#[macro_export]
macro_rules! log {
    ($($t:tt)*) => {
        $crate::LOG.log(::std::format_args!($($t)*))
    };
}

/// Write a line through a specific [`FileLogger`].
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $($t:tt)*) => {
        ($logger).log(::std::format_args!($($t)*))
    };
}
