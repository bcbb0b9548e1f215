//! CUDA Backend for kernelkit
//!
//! Reads the CUDA runtime's last-error register and the device's launch
//! limits through `cudarc`.
//!
//! # Requirements
//!
//! - The `cuda` cargo feature
//! - CUDA Toolkit 11.0+ with the runtime library on the loader path
//!
//! Without the feature every entry point reports `BackendUnavailable`.
//!
//! # Example
//!
//! ```ignore
//! use kernelkit_core::report_last_error;
//! use kernelkit_cuda::CudaLastError;
//!
//! let register = CudaLastError::new()?;
//! // ... launch a kernel ...
//! report_last_error(&register);
//! ```

#![warn(missing_docs)]

#[cfg(feature = "cuda")]
mod device;
#[cfg(feature = "cuda")]
mod register;

#[cfg(feature = "cuda")]
pub use device::query_limits;
#[cfg(feature = "cuda")]
pub use register::CudaLastError;

// Placeholder implementations when CUDA is not available
#[cfg(not(feature = "cuda"))]
mod stub {
    use kernelkit_core::device::DeviceLimits;
    use kernelkit_core::error::{KernelKitError, Result};

    kernelkit_core::unavailable_register!(CudaLastError, "CUDA");

    /// Stub device query when CUDA is not available.
    pub fn query_limits(_ordinal: usize) -> Result<DeviceLimits> {
        Err(KernelKitError::BackendUnavailable(
            "CUDA feature not enabled".to_string(),
        ))
    }
}

#[cfg(not(feature = "cuda"))]
pub use stub::{query_limits, CudaLastError};

/// Check if CUDA is available at runtime.
///
/// This function returns false if:
/// - CUDA feature is not enabled
/// - CUDA libraries are not installed on the system
/// - No CUDA devices are present
pub fn is_cuda_available() -> bool {
    cuda_device_count() > 0
}

/// Get CUDA device count.
///
/// Returns 0 if CUDA is not available or libraries are not installed.
pub fn cuda_device_count() -> usize {
    #[cfg(feature = "cuda")]
    {
        // cudarc panics if CUDA libraries are not found, so we catch that
        std::panic::catch_unwind(|| {
            cudarc::driver::CudaContext::device_count().unwrap_or(0) as usize
        })
        .unwrap_or(0)
    }
    #[cfg(not(feature = "cuda"))]
    {
        0
    }
}
