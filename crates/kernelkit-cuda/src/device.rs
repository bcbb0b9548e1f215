//! CUDA device limit queries.

use std::collections::HashMap;
use std::sync::OnceLock;

use cudarc::driver::sys::CUdevice_attribute;
use cudarc::driver::CudaContext;
use parking_lot::Mutex;

use kernelkit_core::device::DeviceLimits;
use kernelkit_core::error::{KernelKitError, Result};

/// Limits already read, keyed by device ordinal.
static LIMITS: OnceLock<Mutex<HashMap<usize, DeviceLimits>>> = OnceLock::new();

fn limits_cache() -> &'static Mutex<HashMap<usize, DeviceLimits>> {
    LIMITS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Read the launch limits of CUDA device `ordinal`.
///
/// The first query per ordinal creates a context; later queries hit a cache.
pub fn query_limits(ordinal: usize) -> Result<DeviceLimits> {
    let mut cache = limits_cache().lock();
    if let Some(limits) = cache.get(&ordinal) {
        return Ok(limits.clone());
    }

    let ctx = CudaContext::new(ordinal).map_err(|e| {
        KernelKitError::Backend(format!("Failed to create CUDA device {}: {}", ordinal, e))
    })?;

    let name = ctx
        .name()
        .map_err(|e| KernelKitError::Backend(format!("Failed to get device name: {}", e)))?;

    let attribute = |attrib: CUdevice_attribute| -> Result<u32> {
        ctx.attribute(attrib)
            .map(|value| value.max(0) as u32)
            .map_err(|e| {
                KernelKitError::Backend(format!("Failed to query {:?}: {}", attrib, e))
            })
    };

    let limits = DeviceLimits {
        name,
        max_threads_per_block: attribute(
            CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_THREADS_PER_BLOCK,
        )?,
        max_block_dim: (
            attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_BLOCK_DIM_X)?,
            attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_BLOCK_DIM_Y)?,
            attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_BLOCK_DIM_Z)?,
        ),
        max_grid_dim: (
            attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_GRID_DIM_X)?,
            attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_GRID_DIM_Y)?,
            attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_GRID_DIM_Z)?,
        ),
        shared_mem_per_block: attribute(
            CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_SHARED_MEMORY_PER_BLOCK,
        )?,
        warp_size: attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_WARP_SIZE)?,
    };

    tracing::info!(
        "CUDA device {} ({}): max_threads_per_block={}, shared_mem_per_block={}",
        ordinal,
        limits.name,
        limits.max_threads_per_block,
        limits.shared_mem_per_block
    );

    cache.insert(ordinal, limits.clone());
    Ok(limits)
}
