//! CUDA runtime last-error register.

use std::ffi::CStr;
use std::panic::{self, AssertUnwindSafe};

use cudarc::runtime::sys as cuda_rt;

use kernelkit_core::error::{ComputeError, ComputeResult, KernelKitError, Result};
use kernelkit_core::register::LastErrorRegister;

/// The CUDA runtime's process-wide last-error register.
///
/// `take_last_error` calls `cudaGetLastError`, which resets the register;
/// `peek_last_error` calls `cudaPeekAtLastError`, which does not.
#[derive(Debug)]
pub struct CudaLastError {
    _private: (),
}

impl CudaLastError {
    /// Handle to the register. Fails when no CUDA device is present.
    pub fn new() -> Result<Self> {
        if !crate::is_cuda_available() {
            return Err(KernelKitError::BackendUnavailable(
                "no CUDA device present".to_string(),
            ));
        }
        tracing::debug!("Attached to CUDA runtime last-error register");
        Ok(Self { _private: () })
    }

    // cudarc panics when the runtime library cannot be loaded; the register
    // must stay panic-free, so that surfaces as an initialization error.
    fn query(read: impl FnOnce() -> cuda_rt::cudaError_t) -> ComputeResult<()> {
        match panic::catch_unwind(AssertUnwindSafe(read)) {
            Ok(code) => status_from_code(code),
            Err(_) => Err(ComputeError::InitializationError),
        }
    }
}

impl LastErrorRegister for CudaLastError {
    fn take_last_error(&self) -> ComputeResult<()> {
        // SAFETY: cudaGetLastError takes no arguments and only touches
        // runtime-owned state.
        Self::query(|| unsafe { cuda_rt::cudaGetLastError() })
    }

    fn peek_last_error(&self) -> ComputeResult<()> {
        // SAFETY: as above; the register is read without being reset.
        Self::query(|| unsafe { cuda_rt::cudaPeekAtLastError() })
    }
}

fn status_from_code(code: cuda_rt::cudaError_t) -> ComputeResult<()> {
    if code == cuda_rt::cudaError_t::cudaSuccess {
        return Ok(());
    }

    // SAFETY: cudaGetErrorString returns a static NUL-terminated string or null.
    let message = unsafe {
        let ptr = cuda_rt::cudaGetErrorString(code);
        if ptr.is_null() {
            String::from("unrecognized error code")
        } else {
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    };

    match ComputeError::from_code(code as i32, message) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
