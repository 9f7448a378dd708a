use std::fmt;

use serde::{Deserialize, Serialize};

/// Height × width of a grid, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub height: usize,
    pub width: usize,
}

/// Output resolution of a reduction. Fixed for one invocation, whatever the
/// recursion depth.
pub type TargetSize = GridSize;

/// Size the drawing canvas delivers.
pub const SOURCE_SIZE: GridSize = GridSize::square(448);

/// Size the classifier consumes.
pub const TARGET_SIZE: TargetSize = GridSize::square(28);

impl GridSize {
    pub const fn new(height: usize, width: usize) -> GridSize {
        GridSize { height, width }
    }

    pub const fn square(side: usize) -> GridSize {
        GridSize { height: side, width: side }
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
