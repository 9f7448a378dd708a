use serde::{Serialize, Deserialize};
use std::ops::{Add, Mul};

/// Dense row-major matrix of `f64`, the storage for layer weights and biases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, Vec::len),
            data
        }
    }

    /// True when `data` really is `rows × cols`.
    ///
    /// Matrices read from a model file carry their own `rows`/`cols` fields,
    /// which nothing forces to agree with the nested vectors.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    /// True when every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|x| x.is_finite())
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res =  Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_vector_times_matrix() {
        let x = Matrix::from_data(vec![vec![1.0, 2.0]]);
        let w = Matrix::from_data(vec![vec![1.0, 0.0, 2.0], vec![0.5, 1.0, -1.0]]);
        let y = &x * &w;
        assert_eq!(y.data, vec![vec![2.0, 2.0, 0.0]]);
    }

    #[test]
    fn add_is_element_wise() {
        let a = Matrix::from_data(vec![vec![1.0, 2.0]]);
        let b = Matrix::from_data(vec![vec![0.5, -2.0]]);
        assert_eq!((&a + &b).data, vec![vec![1.5, 0.0]]);
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn mul_panics_on_shape_mismatch() {
        let _ = &Matrix::zeros(1, 2) * &Matrix::zeros(3, 1);
    }

    #[test]
    fn consistency_catches_lying_dimensions() {
        let mut m = Matrix::zeros(2, 2);
        assert!(m.is_consistent());
        m.cols = 3;
        assert!(!m.is_consistent());
        assert!(Matrix::from_data(vec![]).is_consistent());
    }
}
