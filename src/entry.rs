use {
    chrono::{Local, NaiveTime},
    std::fmt,
};

const TIME_FORMAT: &str = "%H:%M:%S";

/// Render one log line: `HH:MM:SS message`, newline-terminated.
///
/// A message that already ends in a newline doesn't get a second one.
pub fn format_entry(time: NaiveTime, message: &str) -> String {
    let mut line = format!("{} {}", time.format(TIME_FORMAT), message);
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

pub(crate) fn now_entry(args: fmt::Arguments) -> String {
    format_entry(Local::now().time(), &args.to_string())
}
