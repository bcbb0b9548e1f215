//! # kernelkit core
//!
//! Launch defaults and last-error diagnostics for GPU kernel dispatch.
//!
//! - [`THREADS_PER_BLOCK`] - block size for launches that do not pick their own
//! - [`report_last_error`] - print the runtime's pending error and reset it
//! - [`LastErrorRegister`] - seam between the reporter and a compute runtime
//!
//! ## Example
//!
//! ```
//! use kernelkit_core::prelude::*;
//!
//! let register = ErrorRegister::new();
//! let config = LaunchSettings::default().launch_1d(4096);
//! let status = register.track(DeviceLimits::default().validate(&config));
//! assert!(status.is_ok());
//!
//! // Prints "no error" to standard error.
//! report_last_error(&register);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend_stub;
pub mod device;
pub mod error;
pub mod launch;
pub mod register;
pub mod report;

pub use device::DeviceLimits;
pub use error::{ComputeError, ComputeResult, KernelKitError, Result, NO_ERROR_DESCRIPTION};
pub use launch::{LaunchConfig, LaunchSettings, THREADS_PER_BLOCK};
pub use register::{ErrorRegister, LastErrorRegister};
pub use report::{report_last_error, report_last_error_with_label, report_status, ErrorReporter};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::device::DeviceLimits;
    pub use crate::error::{
        describe, ComputeError, ComputeResult, KernelKitError, NO_ERROR_DESCRIPTION,
    };
    pub use crate::launch::{LaunchConfig, LaunchSettings, THREADS_PER_BLOCK};
    pub use crate::register::{ErrorRegister, LastErrorRegister};
    pub use crate::report::{
        report_last_error, report_last_error_with_label, report_status, ErrorReporter,
    };
}
