//! Device launch limits.

use crate::error::{ComputeError, ComputeResult};
use crate::launch::LaunchConfig;

/// Launch limits of a compute device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLimits {
    /// Device name.
    pub name: String,
    /// Maximum threads per block.
    pub max_threads_per_block: u32,
    /// Maximum block dimensions (x, y, z).
    pub max_block_dim: (u32, u32, u32),
    /// Maximum grid dimensions (x, y, z).
    pub max_grid_dim: (u32, u32, u32),
    /// Shared memory available to one block in bytes.
    pub shared_mem_per_block: u32,
    /// Warp size (typically 32).
    pub warp_size: u32,
}

impl Default for DeviceLimits {
    fn default() -> Self {
        Self::with_name("Ampere-class device")
    }
}

impl DeviceLimits {
    // Every architecture since Volta shares the same launch limits; only the
    // optional shared-memory carve-out differs, and 48 KiB is the default.
    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            max_threads_per_block: 1024,
            max_block_dim: (1024, 1024, 64),
            max_grid_dim: (i32::MAX as u32, 65535, 65535),
            shared_mem_per_block: 48 * 1024,
            warp_size: 32,
        }
    }

    /// Limits for Volta GPUs.
    #[must_use]
    pub fn volta() -> Self {
        Self::with_name("Volta-class device")
    }

    /// Limits for Ampere GPUs.
    #[must_use]
    pub fn ampere() -> Self {
        Self::default()
    }

    /// Limits for Ada Lovelace GPUs.
    #[must_use]
    pub fn ada() -> Self {
        Self::with_name("Ada-class device")
    }

    /// Limits for Hopper GPUs.
    #[must_use]
    pub fn hopper() -> Self {
        Self::with_name("Hopper-class device")
    }

    /// Checks a launch against these limits.
    ///
    /// Shape errors map to [`ComputeError::InvalidConfiguration`]; excess shared
    /// memory maps to [`ComputeError::LaunchOutOfResources`].
    pub fn validate(&self, config: &LaunchConfig) -> ComputeResult<()> {
        let (bx, by, bz) = config.block_dim;
        let (gx, gy, gz) = config.grid_dim;

        if bx == 0 || by == 0 || bz == 0 || gx == 0 || gy == 0 || gz == 0 {
            return Err(ComputeError::InvalidConfiguration);
        }

        let (mbx, mby, mbz) = self.max_block_dim;
        let (mgx, mgy, mgz) = self.max_grid_dim;
        if bx > mbx || by > mby || bz > mbz || gx > mgx || gy > mgy || gz > mgz {
            return Err(ComputeError::InvalidConfiguration);
        }

        if config.threads_per_block() > self.max_threads_per_block as u64 {
            return Err(ComputeError::InvalidConfiguration);
        }

        if config.shared_mem_bytes > self.shared_mem_per_block {
            return Err(ComputeError::LaunchOutOfResources);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::THREADS_PER_BLOCK;

    #[test]
    fn test_presets_admit_default_block_size() {
        for limits in [
            DeviceLimits::volta(),
            DeviceLimits::ampere(),
            DeviceLimits::ada(),
            DeviceLimits::hopper(),
        ] {
            assert!(THREADS_PER_BLOCK <= limits.max_threads_per_block);
            assert_eq!(limits.warp_size, 32);
        }
    }

    #[test]
    fn test_validate_accepts_default_launch() {
        let limits = DeviceLimits::default();
        let config = LaunchConfig::simple_1d(1 << 20, THREADS_PER_BLOCK);
        assert_eq!(limits.validate(&config), Ok(()));
    }

    #[test]
    fn test_validate_zero_threads() {
        let limits = DeviceLimits::default();
        let config = LaunchConfig::new((1, 1, 1), (0, 1, 1));
        assert_eq!(
            limits.validate(&config),
            Err(ComputeError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_validate_zero_blocks() {
        let limits = DeviceLimits::default();
        let config = LaunchConfig::new((0, 1, 1), (256, 1, 1));
        assert_eq!(
            limits.validate(&config),
            Err(ComputeError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_validate_block_product_over_limit() {
        let limits = DeviceLimits::default();
        // Each dimension is within its own limit but 64 * 32 = 2048 threads.
        let config = LaunchConfig::new((1, 1, 1), (64, 32, 1));
        assert_eq!(
            limits.validate(&config),
            Err(ComputeError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_validate_grid_y_over_limit() {
        let limits = DeviceLimits::default();
        let config = LaunchConfig::new((1, 65536, 1), (32, 1, 1));
        assert_eq!(
            limits.validate(&config),
            Err(ComputeError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_validate_shared_mem() {
        let limits = DeviceLimits::default();
        let config = LaunchConfig::new((1, 1, 1), (32, 1, 1)).with_shared_mem(64 * 1024);
        assert_eq!(
            limits.validate(&config),
            Err(ComputeError::LaunchOutOfResources)
        );
    }
}
