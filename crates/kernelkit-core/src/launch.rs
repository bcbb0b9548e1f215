//! Launch defaults and launch descriptors.
//!
//! ```
//! use kernelkit_core::launch::{LaunchSettings, THREADS_PER_BLOCK};
//!
//! let settings = LaunchSettings::default();
//! assert_eq!(settings.threads_per_block, THREADS_PER_BLOCK);
//!
//! let config = settings.launch_1d(10_000);
//! assert_eq!(config.block_dim, (512, 1, 1));
//! assert_eq!(config.grid_dim, (20, 1, 1));
//! ```

use serde::{Deserialize, Serialize};

use crate::device::DeviceLimits;
use crate::error::{ComputeError, ComputeResult, KernelKitError, Result};

/// Threads per block for launches that do not size their own blocks.
///
/// A shared default, not a tuned value. It must not exceed the target
/// device's `max_threads_per_block`; nothing checks that here.
pub const THREADS_PER_BLOCK: u32 = 512;

/// Overridable launch defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSettings {
    /// Threads per block used by [`LaunchSettings::launch_1d`].
    pub threads_per_block: u32,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            threads_per_block: THREADS_PER_BLOCK,
        }
    }
}

impl LaunchSettings {
    /// Creates settings holding the default block size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to override the block size.
    #[must_use]
    pub fn with_threads_per_block(mut self, threads_per_block: u32) -> Self {
        self.threads_per_block = threads_per_block;
        self
    }

    /// Parses settings from TOML text.
    ///
    /// Missing keys keep their defaults. A zero block size is rejected.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: LaunchSettings = toml::from_str(text)?;
        if settings.threads_per_block == 0 {
            return Err(KernelKitError::Config(
                "threads_per_block must be greater than zero".to_string(),
            ));
        }
        Ok(settings)
    }

    /// Checks the block size against a device's limits.
    pub fn check_against(&self, limits: &DeviceLimits) -> ComputeResult<()> {
        if self.threads_per_block == 0 || self.threads_per_block > limits.max_threads_per_block {
            return Err(ComputeError::InvalidConfiguration);
        }
        Ok(())
    }

    /// One-dimensional launch covering `element_count` elements.
    #[must_use]
    pub fn launch_1d(&self, element_count: usize) -> LaunchConfig {
        LaunchConfig::simple_1d(element_count, self.threads_per_block)
    }
}

/// Grid and block shape for one kernel dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Grid dimensions (blocks).
    pub grid_dim: (u32, u32, u32),
    /// Block dimensions (threads).
    pub block_dim: (u32, u32, u32),
    /// Dynamic shared memory in bytes.
    pub shared_mem_bytes: u32,
}

impl LaunchConfig {
    /// Creates a launch configuration with no dynamic shared memory.
    #[must_use]
    pub fn new(grid_dim: (u32, u32, u32), block_dim: (u32, u32, u32)) -> Self {
        Self {
            grid_dim,
            block_dim,
            shared_mem_bytes: 0,
        }
    }

    /// Creates a simple 1D launch configuration.
    ///
    /// A zero `threads_per_block` yields an empty grid; the runtime rejects it.
    #[must_use]
    pub fn simple_1d(element_count: usize, threads_per_block: u32) -> Self {
        let blocks = if threads_per_block == 0 {
            0
        } else {
            let blocks = element_count.div_ceil(threads_per_block as usize);
            u32::try_from(blocks).unwrap_or(u32::MAX)
        };
        Self::new((blocks, 1, 1), (threads_per_block, 1, 1))
    }

    /// Builder method to set shared memory.
    #[must_use]
    pub fn with_shared_mem(mut self, bytes: u32) -> Self {
        self.shared_mem_bytes = bytes;
        self
    }

    /// Returns threads in a single block, saturating at `u64::MAX`.
    #[must_use]
    pub fn threads_per_block(&self) -> u64 {
        product(self.block_dim)
    }

    /// Returns number of blocks in the grid, saturating at `u64::MAX`.
    #[must_use]
    pub fn block_count(&self) -> u64 {
        product(self.grid_dim)
    }

    /// Returns total threads, saturating at `u64::MAX`.
    ///
    /// The largest grid a device accepts already holds more threads than fit
    /// in a `u64`.
    #[must_use]
    pub fn total_threads(&self) -> u64 {
        self.block_count().saturating_mul(self.threads_per_block())
    }
}

fn product((x, y, z): (u32, u32, u32)) -> u64 {
    (x as u64)
        .saturating_mul(y as u64)
        .saturating_mul(z as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threads_per_block_constant() {
        assert_eq!(THREADS_PER_BLOCK, 512);
        for _ in 0..3 {
            assert_eq!(LaunchSettings::default().threads_per_block, THREADS_PER_BLOCK);
        }
    }

    #[test]
    fn test_settings_override() {
        let settings = LaunchSettings::new().with_threads_per_block(128);
        assert_eq!(settings.threads_per_block, 128);
        assert_eq!(settings.launch_1d(1000).grid_dim, (8, 1, 1));
    }

    #[test]
    fn test_from_toml_missing_key_uses_default() {
        let settings = LaunchSettings::from_toml_str("").unwrap();
        assert_eq!(settings, LaunchSettings::default());
    }

    #[test]
    fn test_from_toml_override() {
        let settings = LaunchSettings::from_toml_str("threads_per_block = 256").unwrap();
        assert_eq!(settings.threads_per_block, 256);
    }

    #[test]
    fn test_from_toml_rejects_zero() {
        let err = LaunchSettings::from_toml_str("threads_per_block = 0").unwrap_err();
        assert!(matches!(err, KernelKitError::Config(_)));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = LaunchSettings::from_toml_str("threads_per_block = \"many\"").unwrap_err();
        assert!(matches!(err, KernelKitError::Config(_)));
    }

    #[test]
    fn test_check_against_limits() {
        let limits = DeviceLimits::default();
        assert!(LaunchSettings::default().check_against(&limits).is_ok());

        let too_big = LaunchSettings::new().with_threads_per_block(2048);
        assert_eq!(
            too_big.check_against(&limits),
            Err(ComputeError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_launch_config_simple() {
        let config = LaunchConfig::simple_1d(1000, 256);
        assert_eq!(config.grid_dim.0, 4); // ceil(1000/256) = 4
        assert_eq!(config.block_dim.0, 256);
        assert!(config.total_threads() >= 1000);
    }

    #[test]
    fn test_launch_config_zero_threads() {
        let config = LaunchConfig::simple_1d(1000, 0);
        assert_eq!(config.grid_dim, (0, 1, 1));
        assert_eq!(config.total_threads(), 0);
    }

    #[test]
    fn test_total_threads_saturates_at_max_grid() {
        let limits = DeviceLimits::default();
        let config = LaunchConfig::new(limits.max_grid_dim, (1024, 1, 1));

        assert_eq!(limits.validate(&config), Ok(()));
        assert_eq!(config.block_count(), (i32::MAX as u64) * 65535 * 65535);
        assert_eq!(config.threads_per_block(), 1024);
        assert_eq!(config.total_threads(), u64::MAX);
    }

    #[test]
    fn test_threads_per_block_saturates() {
        let config = LaunchConfig::new((1, 1, 1), (u32::MAX, u32::MAX, u32::MAX));
        assert_eq!(config.threads_per_block(), u64::MAX);
    }

    #[test]
    fn test_launch_config_shared_mem() {
        let config = LaunchConfig::new((2, 2, 1), (16, 16, 1)).with_shared_mem(4096);
        assert_eq!(config.shared_mem_bytes, 4096);
        assert_eq!(config.threads_per_block(), 256);
        assert_eq!(config.block_count(), 4);
    }
}
