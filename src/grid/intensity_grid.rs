use std::ops::Range;

use crate::error::{GridError, GridResult};
use crate::grid::size::GridSize;

/// A single-channel grid of intensity samples, stored row-major.
///
/// Samples are conventionally in `0.0..=255.0`. A grid is never mutated once
/// built: every geometry helper returns a new grid.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityGrid {
    height: usize,
    width: usize,
    data: Vec<f64>,
}

/// The four sub-grids produced by splitting at the row and column midpoints.
#[derive(Debug, Clone)]
pub struct Quadrants {
    pub top_left: IntensityGrid,
    pub top_right: IntensityGrid,
    pub bottom_left: IntensityGrid,
    pub bottom_right: IntensityGrid,
}

impl IntensityGrid {
    /// Builds a grid from row-major samples.
    ///
    /// Fails when a dimension is zero, when `data.len() != height * width`,
    /// or when any sample is NaN or infinite.
    pub fn new(height: usize, width: usize, data: Vec<f64>) -> GridResult<IntensityGrid> {
        let size = GridSize::new(height, width);
        if size.is_empty() {
            return Err(GridError::EmptyGrid(size));
        }
        if data.len() != size.area() {
            return Err(GridError::ShapeMismatch {
                height,
                width,
                expected: size.area(),
                actual: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(GridError::NonFiniteSample { row: pos / width, col: pos % width });
        }
        Ok(IntensityGrid { height, width, data })
    }

    /// Grid with every sample set to `value`.
    pub fn filled(height: usize, width: usize, value: f64) -> GridResult<IntensityGrid> {
        IntensityGrid::new(height, width, vec![value; height * width])
    }

    /// Grid whose sample at `(row, col)` is `f(row, col)`.
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> GridResult<IntensityGrid>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        IntensityGrid::new(height, width, data)
    }

    /// Builds a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> GridResult<IntensityGrid> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(height * width);
        for row in rows {
            if row.len() != width {
                return Err(GridError::ShapeMismatch {
                    height,
                    width,
                    expected: height * width,
                    actual: data.len() + row.len(),
                });
            }
            data.extend(row);
        }
        IntensityGrid::new(height, width, data)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.height, self.width)
    }

    /// Sample at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.height && col < self.width {
            Some(self.data[row * self.width + col])
        } else {
            None
        }
    }

    /// One row of samples. Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Samples as nested rows, the shape used in JSON responses.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.width).map(<[f64]>::to_vec).collect()
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// Copies the rectangular sub-region `rows × cols`.
    ///
    /// The ranges must be non-empty and lie inside the grid.
    pub fn region(&self, rows: Range<usize>, cols: Range<usize>) -> GridResult<IntensityGrid> {
        if rows.end > self.height || cols.end > self.width {
            return Err(GridError::ShapeMismatch {
                height: rows.end,
                width: cols.end,
                expected: rows.end * cols.end,
                actual: self.data.len(),
            });
        }
        let height = rows.len();
        let width = cols.len();
        let mut data = Vec::with_capacity(height * width);
        for row in rows {
            data.extend_from_slice(&self.row(row)[cols.clone()]);
        }
        IntensityGrid::new(height, width, data)
    }

    /// Splits at `height / 2` and `width / 2`.
    ///
    /// Truncating division means that for an odd dimension the bottom and
    /// right quadrants get the extra row or column. Both dimensions must be
    /// at least 2.
    pub fn quadrants(&self) -> GridResult<Quadrants> {
        let (h, w) = (self.height, self.width);
        let (mid_h, mid_w) = (h / 2, w / 2);
        Ok(Quadrants {
            top_left: self.region(0..mid_h, 0..mid_w)?,
            top_right: self.region(0..mid_h, mid_w..w)?,
            bottom_left: self.region(mid_h..h, 0..mid_w)?,
            bottom_right: self.region(mid_h..h, mid_w..w)?,
        })
    }

    /// Places `left` and `right` side by side. Heights must match.
    pub fn hconcat(left: &IntensityGrid, right: &IntensityGrid) -> GridResult<IntensityGrid> {
        if left.height != right.height {
            return Err(GridError::ShapeMismatch {
                height: left.height,
                width: left.width + right.width,
                expected: left.height * (left.width + right.width),
                actual: left.data.len() + right.data.len(),
            });
        }
        let width = left.width + right.width;
        let mut data = Vec::with_capacity(left.height * width);
        for row in 0..left.height {
            data.extend_from_slice(left.row(row));
            data.extend_from_slice(right.row(row));
        }
        IntensityGrid::new(left.height, width, data)
    }

    /// Stacks `top` above `bottom`. Widths must match.
    pub fn vconcat(top: &IntensityGrid, bottom: &IntensityGrid) -> GridResult<IntensityGrid> {
        if top.width != bottom.width {
            return Err(GridError::ShapeMismatch {
                height: top.height + bottom.height,
                width: top.width,
                expected: (top.height + bottom.height) * top.width,
                actual: top.data.len() + bottom.data.len(),
            });
        }
        let mut data = Vec::with_capacity(top.data.len() + bottom.data.len());
        data.extend_from_slice(&top.data);
        data.extend_from_slice(&bottom.data);
        IntensityGrid::new(top.height + bottom.height, top.width, data)
    }

    // -----------------------------------------------------------------------
    // Sample conversion
    // -----------------------------------------------------------------------

    /// Truncates every sample to an 8-bit value (toward zero, saturating at
    /// 0 and 255). This is the cast applied to a reduced grid before it is
    /// shown or classified.
    pub fn quantize_u8(&self) -> IntensityGrid {
        IntensityGrid {
            height: self.height,
            width: self.width,
            data: self.data.iter().map(|&v| f64::from(v as u8)).collect(),
        }
    }

    /// Samples divided by 255, flattened row-major.
    pub fn normalized(&self) -> Vec<f64> {
        self.data.iter().map(|v| v / 255.0).collect()
    }
}
