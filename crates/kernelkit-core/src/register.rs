//! The runtime's last-error register.
//!
//! A compute runtime keeps one process-wide slot holding the most recent
//! failure. Reading it through [`LastErrorRegister::take_last_error`] resets
//! the slot, so a second read with no failure in between sees success.
//!
//! The slot is shared by every thread that talks to the runtime. Nothing here
//! ties an error to the call that produced it: a query on one thread can pick
//! up a failure raised by another.

use parking_lot::Mutex;

use crate::error::{ComputeError, ComputeResult};

/// Read access to a runtime's last-error register.
pub trait LastErrorRegister: Send + Sync {
    /// Returns the pending error, if any, and resets the register.
    fn take_last_error(&self) -> ComputeResult<()>;

    /// Returns the pending error, if any, without resetting the register.
    fn peek_last_error(&self) -> ComputeResult<()>;
}

/// In-process last-error register.
///
/// Only failures are recorded. A successful call leaves an earlier failure in
/// place until someone reads it.
#[derive(Debug, Default)]
pub struct ErrorRegister {
    slot: Mutex<Option<ComputeError>>,
}

impl ErrorRegister {
    /// Creates a clean register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `err` as the most recent failure.
    pub fn record(&self, err: ComputeError) {
        *self.slot.lock() = Some(err);
    }

    /// Records the error of a failed `status` and passes `status` through.
    pub fn track<T>(&self, status: ComputeResult<T>) -> ComputeResult<T> {
        if let Err(e) = &status {
            self.record(e.clone());
        }
        status
    }

    /// Returns whether an error is pending.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl LastErrorRegister for ErrorRegister {
    fn take_last_error(&self) -> ComputeResult<()> {
        match self.slot.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn peek_last_error(&self) -> ComputeResult<()> {
        match self.slot.lock().as_ref() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl<R: LastErrorRegister + ?Sized> LastErrorRegister for std::sync::Arc<R> {
    fn take_last_error(&self) -> ComputeResult<()> {
        (**self).take_last_error()
    }

    fn peek_last_error(&self) -> ComputeResult<()> {
        (**self).peek_last_error()
    }
}
