//! # kernelkit CPU backend
//!
//! An emulated compute runtime that runs kernels as host closures. It keeps a
//! last-error register with the same read-and-reset behaviour as a GPU
//! runtime, so diagnostics can be exercised without a device.
//!
//! ```
//! use kernelkit_core::prelude::*;
//! use kernelkit_cpu::CpuRuntime;
//!
//! let runtime = CpuRuntime::new();
//! let config = LaunchConfig::new((1, 1, 1), (0, 1, 1));
//!
//! let status = runtime.launch("empty_block", &config, |_| {});
//! assert_eq!(status, Err(ComputeError::InvalidConfiguration));
//!
//! // Prints "invalid configuration argument", then "no error".
//! report_last_error(&runtime);
//! report_last_error(&runtime);
//! ```

#![warn(missing_docs)]

mod runtime;
mod thread;

pub use runtime::{CpuRuntime, RuntimeMetrics};
pub use thread::ThreadContext;
