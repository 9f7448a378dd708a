use log::debug;

use crate::error::{GridError, GridResult};
use crate::grid::{GridSize, IntensityGrid, TargetSize, SOURCE_SIZE, TARGET_SIZE};
use crate::reduce::quadrant::reduce;

/// Caller-facing reduction boundary: accepts grids of one fixed source size
/// and reduces them to one fixed target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reducer {
    source: GridSize,
    target: TargetSize,
}

impl Default for Reducer {
    /// 448×448 canvas down to the 28×28 classifier input.
    fn default() -> Self {
        Reducer { source: SOURCE_SIZE, target: TARGET_SIZE }
    }
}

impl Reducer {
    /// Fails with [`GridError::DegenerateTarget`] when the target is empty or
    /// larger than the source in either dimension.
    pub fn new(source: GridSize, target: TargetSize) -> GridResult<Reducer> {
        if source.is_empty()
            || target.is_empty()
            || target.height > source.height
            || target.width > source.width
        {
            return Err(GridError::DegenerateTarget { grid: source, target });
        }
        Ok(Reducer { source, target })
    }

    pub fn source(&self) -> GridSize {
        self.source
    }

    pub fn target(&self) -> TargetSize {
        self.target
    }

    /// Validates the source dimensions, then reduces.
    ///
    /// A grid of any other size than `source` is rejected with
    /// [`GridError::DimensionMismatch`] before any reduction work.
    pub fn reduce_image(&self, grid: &IntensityGrid) -> GridResult<IntensityGrid> {
        if grid.size() != self.source {
            return Err(GridError::DimensionMismatch { expected: self.source, actual: grid.size() });
        }
        debug!("reducing {} grid to {}", self.source, self.target);
        reduce(grid, self.target)
    }
}
