pub mod intensity_grid;
pub mod size;

pub use intensity_grid::{IntensityGrid, Quadrants};
pub use size::{GridSize, TargetSize, SOURCE_SIZE, TARGET_SIZE};
