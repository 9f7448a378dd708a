use crate::error::{GridError, GridResult};
use crate::grid::{IntensityGrid, TargetSize};

/// Reduces `grid` to exactly `target` by replacing uniform rectangular
/// regions with their arithmetic mean.
///
/// Region size is `grid / target` per axis with truncating division. When the
/// target does not divide the grid evenly, the trailing rows and columns past
/// `target * region` are never read: the bottom and right margins are dropped,
/// not folded into the last region.
///
/// Fails with [`GridError::DegenerateTarget`] when a target dimension is zero
/// or larger than the grid's (which would leave a zero-size region).
pub fn block_average(grid: &IntensityGrid, target: TargetSize) -> GridResult<IntensityGrid> {
    let region_h = if target.height == 0 { 0 } else { grid.height() / target.height };
    let region_w = if target.width == 0 { 0 } else { grid.width() / target.width };
    if region_h == 0 || region_w == 0 {
        return Err(GridError::DegenerateTarget { grid: grid.size(), target });
    }

    let count = (region_h * region_w) as f64;
    let mut data = Vec::with_capacity(target.area());
    for i in 0..target.height {
        for j in 0..target.width {
            let cols = j * region_w..(j + 1) * region_w;
            // Accumulate offsets from the region's first sample so a uniform
            // region averages back to exactly that sample.
            let base = grid.row(i * region_h)[cols.start];
            let offset: f64 = (i * region_h..(i + 1) * region_h)
                .map(|row| grid.row(row)[cols.clone()].iter().map(|x| x - base).sum::<f64>())
                .sum();
            data.push(base + offset / count);
        }
    }

    IntensityGrid::new(target.height, target.width, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;

    #[test]
    fn constant_grid_stays_constant() {
        let g = IntensityGrid::filled(90, 61, 137.0).unwrap();
        for target in [GridSize::square(28), GridSize::new(3, 7), GridSize::new(90, 61)] {
            let out = block_average(&g, target).unwrap();
            assert_eq!(out.size(), target);
            assert!(out.as_slice().iter().all(|&v| v == 137.0));
        }
    }

    #[test]
    fn fractional_constant_grid_stays_exact() {
        let target = GridSize::square(28);
        for value in [0.1, 0.3, 0.7, 1.0 / 3.0, 12.345, 254.9] {
            for side in [56, 90, 448] {
                let g = IntensityGrid::filled(side, side, value).unwrap();
                let out = block_average(&g, target).unwrap();
                assert!(
                    out.as_slice().iter().all(|&v| v == value),
                    "value {} side {}",
                    value,
                    side
                );
            }
        }
    }

    #[test]
    fn cells_hold_region_means() {
        // 4x4 -> 2x2, each 2x2 block averaged.
        let g = IntensityGrid::from_rows(vec![
            vec![0.0, 2.0, 10.0, 10.0],
            vec![4.0, 6.0, 10.0, 30.0],
            vec![1.0, 1.0, 0.0, 0.0],
            vec![1.0, 1.0, 0.0, 8.0],
        ])
        .unwrap();
        let out = block_average(&g, GridSize::square(2)).unwrap();
        assert_eq!(out.rows(), vec![vec![3.0, 15.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn trailing_rows_are_dropped() {
        // 28 * 2 + 5 rows: the last 5 rows are never read.
        let target = GridSize::square(28);
        let g = IntensityGrid::from_fn(61, 56, |r, _| if r >= 56 { 1.0e6 } else { 40.0 }).unwrap();
        let out = block_average(&g, target).unwrap();
        assert_eq!(out.size(), target);
        assert!(out.as_slice().iter().all(|&v| v == 40.0));
    }

    #[test]
    fn trailing_columns_are_dropped() {
        let target = GridSize::new(4, 4);
        let g = IntensityGrid::from_fn(8, 11, |_, c| if c >= 8 { -500.0 } else { 9.0 }).unwrap();
        let out = block_average(&g, target).unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 9.0));
    }

    #[test]
    fn target_larger_than_grid_fails_fast() {
        let g = IntensityGrid::filled(20, 40, 1.0).unwrap();
        let err = block_average(&g, GridSize::square(28)).unwrap_err();
        assert_eq!(
            err,
            GridError::DegenerateTarget { grid: GridSize::new(20, 40), target: GridSize::square(28) }
        );
    }

    #[test]
    fn zero_target_fails_fast() {
        let g = IntensityGrid::filled(4, 4, 1.0).unwrap();
        assert!(matches!(
            block_average(&g, GridSize::new(0, 2)),
            Err(GridError::DegenerateTarget { .. })
        ));
    }
}
