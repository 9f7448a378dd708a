use log::trace;

use crate::error::{GridError, GridResult};
use crate::grid::{IntensityGrid, TargetSize};
use crate::reduce::block_average::block_average;

/// Recursively reduces `grid` to exactly `target`.
///
/// - A grid already at `target` is returned as is.
/// - A grid less than twice the target in either dimension is block averaged.
/// - Otherwise the grid is split into quadrants, each quadrant is reduced to
///   the full `target` (not a quarter of it), the four results are tiled back
///   into a `2 * target` grid, and that grid is block averaged down to
///   `target`.
///
/// No interpolation happens anywhere; all resolution loss comes from region
/// means.
pub fn reduce(grid: &IntensityGrid, target: TargetSize) -> GridResult<IntensityGrid> {
    if target.is_empty() {
        return Err(GridError::DegenerateTarget { grid: grid.size(), target });
    }
    reduce_level(grid, target, 0)
}

fn reduce_level(grid: &IntensityGrid, target: TargetSize, depth: usize) -> GridResult<IntensityGrid> {
    if grid.size() == target {
        return Ok(grid.clone());
    }

    if grid.height() < target.height * 2 || grid.width() < target.width * 2 {
        trace!("depth {}: {} too small to quarter, averaging to {}", depth, grid.size(), target);
        return block_average(grid, target);
    }

    trace!("depth {}: quartering {}", depth, grid.size());
    let quadrants = grid.quadrants()?;
    let top_left = reduce_level(&quadrants.top_left, target, depth + 1)?;
    let top_right = reduce_level(&quadrants.top_right, target, depth + 1)?;
    let bottom_left = reduce_level(&quadrants.bottom_left, target, depth + 1)?;
    let bottom_right = reduce_level(&quadrants.bottom_right, target, depth + 1)?;

    let top = IntensityGrid::hconcat(&top_left, &top_right)?;
    let bottom = IntensityGrid::hconcat(&bottom_left, &bottom_right)?;
    let combined = IntensityGrid::vconcat(&top, &bottom)?;

    if combined.height() > target.height || combined.width() > target.width {
        block_average(&combined, target)
    } else {
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridSize, SOURCE_SIZE, TARGET_SIZE};

    #[test]
    fn exact_size_is_identity() {
        let g = IntensityGrid::from_fn(28, 28, |r, c| ((r * 7 + c * 3) % 256) as f64).unwrap();
        assert_eq!(reduce(&g, TARGET_SIZE).unwrap(), g);
    }

    #[test]
    fn constant_power_of_two_multiple_stays_constant() {
        for side in [56, 112, 224, 448] {
            let g = IntensityGrid::filled(side, side, 77.0).unwrap();
            let out = reduce(&g, TARGET_SIZE).unwrap();
            assert_eq!(out.size(), TARGET_SIZE);
            assert!(out.as_slice().iter().all(|&v| v == 77.0), "side {}", side);
        }
    }

    #[test]
    fn top_left_block_lands_in_top_left_cells() {
        let g = IntensityGrid::from_fn(448, 448, |r, c| if r < 224 && c < 224 { 200.0 } else { 0.0 })
            .unwrap();
        let out = reduce(&g, TARGET_SIZE).unwrap();
        assert_eq!(out.size(), TARGET_SIZE);
        for r in 0..28 {
            for c in 0..28 {
                let expected = if r < 14 && c < 14 { 200.0 } else { 0.0 };
                assert_eq!(out.get(r, c), Some(expected), "cell ({}, {})", r, c);
            }
        }
    }

    #[test]
    fn double_target_takes_one_quartering_level() {
        // Each 28x28 quadrant has its own value and hits the exact-size base
        // case; the final 2x2 averaging mixes only cells inside one quadrant.
        let g = IntensityGrid::from_fn(56, 56, |r, c| match (r < 28, c < 28) {
            (true, true) => 10.0,
            (true, false) => 20.0,
            (false, true) => 30.0,
            (false, false) => 40.0,
        })
        .unwrap();
        let out = reduce(&g, TARGET_SIZE).unwrap();
        assert_eq!(out.get(0, 0), Some(10.0));
        assert_eq!(out.get(13, 13), Some(10.0));
        assert_eq!(out.get(0, 14), Some(20.0));
        assert_eq!(out.get(14, 0), Some(30.0));
        assert_eq!(out.get(27, 27), Some(40.0));
    }

    #[test]
    fn double_target_tiles_quadrants_rather_than_averaging_whole_grid() {
        // A two-row stripe confined to the top-right quadrant must come out
        // in the top-right quarter of the first output row only.
        let g = IntensityGrid::from_fn(56, 56, |r, c| if r < 2 && c >= 28 { 100.0 } else { 0.0 })
            .unwrap();
        let out = reduce(&g, TARGET_SIZE).unwrap();
        for c in 0..28 {
            let expected = if c >= 14 { 100.0 } else { 0.0 };
            assert_eq!(out.get(0, c), Some(expected), "col {}", c);
        }
        assert!(out.as_slice()[28..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn undersize_grid_falls_back_to_block_average() {
        // 55 < 2 * 28, so no quartering: regions are 1x1 and the trailing
        // 27 rows and columns are dropped.
        let g = IntensityGrid::from_fn(55, 55, |r, c| (r * 55 + c) as f64).unwrap();
        let out = reduce(&g, TARGET_SIZE).unwrap();
        assert_eq!(out, g.region(0..28, 0..28).unwrap());
    }

    #[test]
    fn odd_and_rectangular_grids_reach_target() {
        for size in [GridSize::new(57, 57), GridSize::new(448, 100), GridSize::new(131, 509)] {
            let g = IntensityGrid::from_fn(size.height, size.width, |r, c| ((r ^ c) % 256) as f64)
                .unwrap();
            assert_eq!(reduce(&g, TARGET_SIZE).unwrap().size(), TARGET_SIZE);
        }
    }

    #[test]
    fn reduction_is_deterministic() {
        let g = IntensityGrid::from_fn(SOURCE_SIZE.height, SOURCE_SIZE.width, |r, c| {
            ((r * 31 + c * 17) % 256) as f64
        })
        .unwrap();
        let a = reduce(&g, TARGET_SIZE).unwrap();
        let b = reduce(&g, TARGET_SIZE).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn grid_smaller_than_target_is_degenerate() {
        let g = IntensityGrid::filled(20, 20, 5.0).unwrap();
        assert!(matches!(reduce(&g, TARGET_SIZE), Err(GridError::DegenerateTarget { .. })));
    }

    #[test]
    fn zero_target_is_rejected_before_recursing() {
        let g = IntensityGrid::filled(64, 64, 5.0).unwrap();
        assert!(matches!(
            reduce(&g, GridSize::new(0, 28)),
            Err(GridError::DegenerateTarget { .. })
        ));
    }
}
