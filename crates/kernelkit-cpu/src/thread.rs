//! Per-thread launch coordinates.

/// Coordinates of one emulated GPU thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadContext {
    /// Block index within the grid.
    pub block_idx: (u32, u32, u32),
    /// Thread index within the block.
    pub thread_idx: (u32, u32, u32),
    /// Block dimensions.
    pub block_dim: (u32, u32, u32),
    /// Grid dimensions.
    pub grid_dim: (u32, u32, u32),
}

impl ThreadContext {
    /// Linear block index (x fastest).
    #[must_use]
    pub fn linear_block_id(&self) -> u64 {
        let (bx, by, bz) = self.block_idx;
        let (gx, gy, _) = self.grid_dim;
        (gy as u64)
            .saturating_mul(bz as u64)
            .saturating_add(by as u64)
            .saturating_mul(gx as u64)
            .saturating_add(bx as u64)
    }

    /// Linear thread index within the block (x fastest).
    #[must_use]
    pub fn linear_thread_id(&self) -> u64 {
        let (tx, ty, tz) = self.thread_idx;
        let (dx, dy, _) = self.block_dim;
        tx as u64 + dx as u64 * (ty as u64 + dy as u64 * tz as u64)
    }

    /// Global linear id: `block * threads_per_block + thread`, saturating at
    /// `u64::MAX`.
    #[must_use]
    pub fn global_linear_id(&self) -> u64 {
        let (dx, dy, dz) = self.block_dim;
        let threads_per_block = (dx as u64 * dy as u64).saturating_mul(dz as u64);
        self.linear_block_id()
            .saturating_mul(threads_per_block)
            .saturating_add(self.linear_thread_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_linear_id_1d() {
        let ctx = ThreadContext {
            block_idx: (3, 0, 0),
            thread_idx: (5, 0, 0),
            block_dim: (512, 1, 1),
            grid_dim: (8, 1, 1),
        };
        assert_eq!(ctx.global_linear_id(), 3 * 512 + 5);
    }

    #[test]
    fn test_global_linear_id_saturates_on_last_thread_of_max_grid() {
        let ctx = ThreadContext {
            block_idx: (i32::MAX as u32 - 1, 65534, 65534),
            thread_idx: (1023, 0, 0),
            block_dim: (1024, 1, 1),
            grid_dim: (i32::MAX as u32, 65535, 65535),
        };
        assert_eq!(ctx.linear_block_id(), (i32::MAX as u64) * 65535 * 65535 - 1);
        assert_eq!(ctx.global_linear_id(), u64::MAX);
    }

    #[test]
    fn test_global_linear_id_2d() {
        let ctx = ThreadContext {
            block_idx: (1, 1, 0),
            thread_idx: (2, 3, 0),
            block_dim: (4, 4, 1),
            grid_dim: (2, 2, 1),
        };
        // block 1 + 2*1 = 3, thread 2 + 4*3 = 14
        assert_eq!(ctx.linear_block_id(), 3);
        assert_eq!(ctx.linear_thread_id(), 14);
        assert_eq!(ctx.global_linear_id(), 3 * 16 + 14);
    }
}
