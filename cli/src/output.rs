//! User-facing output for the CLI.
//!
//! Progress and errors go to stderr through a `dyn Write` sink so they can
//! be captured in tests.

use std::error::Error;
use std::fmt::Display;
use std::io::Write;

/// Write `message` and a newline to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Write `err` followed by each error in its `source` chain.
///
/// # Examples
///
/// ```
/// use central_publisher_cli::output::write_error_chain;
///
/// let err = std::io::Error::other("disk full");
/// let mut stderr = Vec::new();
/// write_error_chain(&mut stderr, &err);
/// assert_eq!(stderr, b"error: disk full\n");
/// ```
pub fn write_error_chain(stderr: &mut dyn Write, err: &dyn Error) {
    write_stderr_line(stderr, format_args!("error: {err}"));
    let mut source = err.source();
    while let Some(cause) = source {
        write_stderr_line(stderr, format_args!("  caused by: {cause}"));
        source = cause.source();
    }
}
