//! Macro for generating unavailable backend stubs.
//!
//! When a backend feature (e.g. `cuda`) is disabled, the backend crate still
//! exposes its register type so downstream code compiles unchanged. The stub
//! cannot be constructed: `new()` returns `BackendUnavailable`.

/// Generate a stub last-error register for an unavailable backend.
///
/// # Example
///
/// ```
/// kernelkit_core::unavailable_register!(HipLastError, "HIP");
///
/// let err = HipLastError::new().err().unwrap();
/// assert_eq!(err.to_string(), "Backend unavailable: HIP feature not enabled");
/// ```
#[macro_export]
macro_rules! unavailable_register {
    ($register:ident, $name:expr) => {
        /// Stub register when the backend feature is disabled.
        #[derive(Debug)]
        pub struct $register {
            _private: (),
        }

        impl $register {
            /// Create fails when the backend is not available.
            pub fn new() -> $crate::error::Result<Self> {
                Err($crate::error::KernelKitError::BackendUnavailable(
                    concat!($name, " feature not enabled").to_string(),
                ))
            }
        }

        impl $crate::register::LastErrorRegister for $register {
            fn take_last_error(&self) -> $crate::error::ComputeResult<()> {
                Err($crate::error::ComputeError::NoDevice)
            }

            fn peek_last_error(&self) -> $crate::error::ComputeResult<()> {
                Err($crate::error::ComputeError::NoDevice)
            }
        }
    };
}
