//! Last-error diagnostics.
//!
//! Place [`report_last_error`] right after a dispatch to print whatever the
//! runtime's last-error register holds:
//!
//! ```
//! use kernelkit_core::error::ComputeError;
//! use kernelkit_core::register::ErrorRegister;
//! use kernelkit_core::report::ErrorReporter;
//!
//! let register = ErrorRegister::new();
//! register.record(ComputeError::InvalidConfiguration);
//!
//! let mut reporter = ErrorReporter::new(Vec::new());
//! reporter.report_last_error(&register);
//! reporter.report_last_error(&register);
//!
//! let text = String::from_utf8(reporter.into_inner()).unwrap();
//! assert_eq!(text, "invalid configuration argument\nno error\n");
//! ```
//!
//! Reporting is a logging action. It never returns the error, never panics,
//! and ignores failures of the output stream.

use std::io::{self, Write};

use tracing::{trace, warn};

use crate::error::{describe, ComputeResult};
use crate::register::LastErrorRegister;

/// Writes last-error diagnostics to a sink, one line per report.
#[derive(Debug)]
pub struct ErrorReporter<W: Write> {
    sink: W,
}

impl ErrorReporter<io::Stderr> {
    /// Reporter over the process's standard error stream.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ErrorReporter<W> {
    /// Creates a reporter writing to `sink`.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Reads and resets the register, then prints the description.
    pub fn report_last_error(&mut self, register: &dyn LastErrorRegister) {
        let status = register.take_last_error();
        self.emit(None, &status);
    }

    /// Like [`report_last_error`](Self::report_last_error), prefixed with `label`.
    pub fn report_last_error_with_label(&mut self, register: &dyn LastErrorRegister, label: &str) {
        let status = register.take_last_error();
        self.emit(Some(label), &status);
    }

    /// Prints the description of a status returned directly by a dispatch.
    pub fn report_status(&mut self, status: &ComputeResult<()>) {
        self.emit(None, status);
    }

    fn emit(&mut self, label: Option<&str>, status: &ComputeResult<()>) {
        let description = describe(status);
        let line = match label {
            Some(label) => format!("{}: {}\n", label, description),
            None => format!("{}\n", description),
        };

        match status {
            Err(e) => warn!(code = e.code(), label = label.unwrap_or(""), "{}", description),
            Ok(()) => trace!(label = label.unwrap_or(""), "{}", description),
        }

        let _ = self.sink.write_all(line.as_bytes());
        let _ = self.sink.flush();
    }
}

/// Prints the runtime's last error to standard error and resets the register.
pub fn report_last_error(register: &dyn LastErrorRegister) {
    ErrorReporter::stderr().report_last_error(register);
}

/// Prints `"<label>: <description>"` for the runtime's last error.
pub fn report_last_error_with_label(register: &dyn LastErrorRegister, label: &str) {
    ErrorReporter::stderr().report_last_error_with_label(register, label);
}

/// Prints the description of an explicit dispatch status to standard error.
pub fn report_status(status: &ComputeResult<()>) {
    ErrorReporter::stderr().report_status(status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComputeError;
    use crate::register::ErrorRegister;

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn output(reporter: ErrorReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_clean_register_reports_no_error() {
        let register = ErrorRegister::new();
        let mut reporter = ErrorReporter::new(Vec::new());
        reporter.report_last_error(&register);
        assert_eq!(output(reporter), "no error\n");
    }

    #[test]
    fn test_second_report_sees_cleared_register() {
        let register = ErrorRegister::new();
        register.record(ComputeError::LaunchFailure);

        let mut reporter = ErrorReporter::new(Vec::new());
        reporter.report_last_error(&register);
        reporter.report_last_error(&register);

        assert_eq!(output(reporter), "unspecified launch failure\nno error\n");
    }

    #[test]
    fn test_label_prefix() {
        let register = ErrorRegister::new();
        register.record(ComputeError::InvalidConfiguration);

        let mut reporter = ErrorReporter::new(Vec::new());
        reporter.report_last_error_with_label(&register, "blur_kernel");

        assert_eq!(
            output(reporter),
            "blur_kernel: invalid configuration argument\n"
        );
    }

    #[test]
    fn test_report_status_leaves_register_alone() {
        let register = ErrorRegister::new();
        register.record(ComputeError::IllegalAddress);

        let mut reporter = ErrorReporter::new(Vec::new());
        reporter.report_status(&Err(ComputeError::MemoryAllocation));
        reporter.report_status(&Ok(()));

        assert_eq!(output(reporter), "out of memory\nno error\n");
        assert!(register.is_pending());
    }

    #[test]
    fn test_broken_sink_does_not_panic() {
        let register = ErrorRegister::new();
        register.record(ComputeError::Unknown);

        let mut reporter = ErrorReporter::new(BrokenSink);
        reporter.report_last_error(&register);

        // The read still happened even though nothing could be written.
        assert!(!register.is_pending());
    }

    #[test]
    fn test_stderr_functions() {
        let register = ErrorRegister::new();
        register.record(ComputeError::InvalidValue);

        report_last_error(&register);
        assert!(!register.is_pending());

        register.record(ComputeError::LaunchTimeout);
        report_status(&Err(ComputeError::NoDevice));
        assert_eq!(register.peek_last_error(), Err(ComputeError::LaunchTimeout));

        report_last_error_with_label(&register, "after");
        assert!(!register.is_pending());
    }
}
