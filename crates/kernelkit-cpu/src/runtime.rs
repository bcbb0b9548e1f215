//! CPU runtime implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use kernelkit_core::device::DeviceLimits;
use kernelkit_core::error::{ComputeError, ComputeResult};
use kernelkit_core::launch::LaunchConfig;
use kernelkit_core::register::{ErrorRegister, LastErrorRegister};

use crate::thread::ThreadContext;

/// Launch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeMetrics {
    /// Launches that passed validation and ran.
    pub total_launched: u64,
    /// Launches rejected or faulted.
    pub failed_launches: u64,
}

/// Emulated compute runtime.
///
/// Kernels run on the calling thread, one closure call per GPU thread. Every
/// call returns its status directly and, on failure, also leaves the error in
/// the runtime's last-error register.
#[derive(Debug)]
pub struct CpuRuntime {
    /// Launch limits of the emulated device.
    limits: DeviceLimits,
    /// Process-style last-error register.
    register: ErrorRegister,
    /// Total kernels launched.
    total_launched: AtomicU64,
    /// Total launches that failed.
    failed_launches: AtomicU64,
}

impl Default for CpuRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuRuntime {
    /// Create a runtime emulating the default device.
    pub fn new() -> Self {
        Self::with_limits(DeviceLimits::default())
    }

    /// Create a runtime emulating a device with specific limits.
    pub fn with_limits(limits: DeviceLimits) -> Self {
        info!(
            "Initializing CPU runtime ({}, max_threads_per_block={})",
            limits.name, limits.max_threads_per_block
        );

        Self {
            limits,
            register: ErrorRegister::new(),
            total_launched: AtomicU64::new(0),
            failed_launches: AtomicU64::new(0),
        }
    }

    /// Get device limits.
    pub fn limits(&self) -> &DeviceLimits {
        &self.limits
    }

    /// Select the active device. Only ordinal 0 exists.
    pub fn set_device(&self, ordinal: usize) -> ComputeResult<()> {
        if ordinal != 0 {
            debug!("Rejecting device ordinal {}", ordinal);
            return self.register.track(Err(ComputeError::InvalidDevice));
        }
        Ok(())
    }

    /// Record a runtime fault that did not come from a call on this thread.
    ///
    /// Stands in for asynchronous failures such as a kernel on another stream
    /// touching an illegal address.
    pub fn inject_error(&self, err: ComputeError) {
        warn!("Injected runtime error: {}", err);
        self.register.record(err);
    }

    /// Launch a kernel that cannot fault.
    pub fn launch<F>(
        &self,
        kernel_name: &str,
        config: &LaunchConfig,
        kernel: F,
    ) -> ComputeResult<()>
    where
        F: Fn(&ThreadContext),
    {
        self.try_launch(kernel_name, config, |ctx| {
            kernel(ctx);
            Ok(())
        })
    }

    /// Launch a kernel whose threads may fault.
    ///
    /// Execution stops at the first faulting thread; that thread's error is the
    /// launch status.
    pub fn try_launch<F>(
        &self,
        kernel_name: &str,
        config: &LaunchConfig,
        kernel: F,
    ) -> ComputeResult<()>
    where
        F: Fn(&ThreadContext) -> ComputeResult<()>,
    {
        debug!(
            "Launching CPU kernel '{}' (grid={:?}, block={:?}, shared={})",
            kernel_name, config.grid_dim, config.block_dim, config.shared_mem_bytes
        );

        let status = self
            .limits
            .validate(config)
            .and_then(|()| Self::execute(config, &kernel));

        match &status {
            Ok(()) => {
                self.total_launched.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.failed_launches.fetch_add(1, Ordering::Relaxed);
                debug!("CPU kernel '{}' failed: {}", kernel_name, e);
            }
        }

        self.register.track(status)
    }

    fn execute<F>(config: &LaunchConfig, kernel: &F) -> ComputeResult<()>
    where
        F: Fn(&ThreadContext) -> ComputeResult<()>,
    {
        let (gx, gy, gz) = config.grid_dim;
        let (bx, by, bz) = config.block_dim;

        for block_z in 0..gz {
            for block_y in 0..gy {
                for block_x in 0..gx {
                    for thread_z in 0..bz {
                        for thread_y in 0..by {
                            for thread_x in 0..bx {
                                let ctx = ThreadContext {
                                    block_idx: (block_x, block_y, block_z),
                                    thread_idx: (thread_x, thread_y, thread_z),
                                    block_dim: config.block_dim,
                                    grid_dim: config.grid_dim,
                                };
                                kernel(&ctx)?;
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Get launch counters.
    pub fn metrics(&self) -> RuntimeMetrics {
        RuntimeMetrics {
            total_launched: self.total_launched.load(Ordering::Relaxed),
            failed_launches: self.failed_launches.load(Ordering::Relaxed),
        }
    }
}

impl LastErrorRegister for CpuRuntime {
    fn take_last_error(&self) -> ComputeResult<()> {
        self.register.take_last_error()
    }

    fn peek_last_error(&self) -> ComputeResult<()> {
        self.register.peek_last_error()
    }
}
