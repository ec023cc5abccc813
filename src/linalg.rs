//! matrices over GF(2^8)
//!
//! The codec only ever needs small dense matrices of field elements, stored
//! row-major. The interesting operation is [`Matrix::invert`]: Gaussian
//! elimination to full reduced form, mirroring every row operation onto an
//! identity matrix so that `[M | I]` becomes `[I | M^-1]`.
use crate::error::TessellaError;
use crate::field;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Matrix {
    pub(crate) elements: Vec<u8>,
    pub(crate) height: usize,
    pub(crate) width: usize,
}

impl Matrix {
    pub fn zeroes(height: usize, width: usize) -> Self {
        Self {
            elements: vec![0; height * width],
            height,
            width,
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::zeroes(size, size);
        for i in 0..size {
            matrix.set(i, i, 1);
        }
        matrix
    }

    pub fn from_vec_vec(rows: Vec<Vec<u8>>) -> Result<Self, TessellaError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or_default();

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TessellaError::InvalidMatrixElements {
                    expected: width,
                    found: row.len(),
                    row: i,
                });
            }
        }

        let mut matrix = Self::zeroes(height, width);
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                matrix.set(i, j, value);
            }
        }

        Ok(matrix)
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> u8 {
        self.elements[i * self.width + j]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: u8) {
        self.elements[i * self.width + j] = value;
    }

    /// A view of row `i` as a slice.
    #[inline]
    pub(crate) fn row(&self, i: usize) -> &[u8] {
        &self.elements[i * self.width..(i + 1) * self.width]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.width {
            let tmp = self.get(a, j);
            self.set(a, j, self.get(b, j));
            self.set(b, j, tmp);
        }
    }

    // compute _row = row * value_
    fn scale_row(&mut self, row: usize, value: u8) {
        let gf = field::tables();
        for j in 0..self.width {
            self.set(row, j, gf.mul(self.get(row, j), value));
        }
    }

    // compute _destination = destination + source * value_
    fn add_scaled_row(&mut self, source: usize, value: u8, destination: usize) {
        let gf = field::tables();
        for j in 0..self.width {
            let scaled = gf.mul(self.get(source, j), value);
            self.set(destination, j, gf.add(self.get(destination, j), scaled));
        }
    }

    /// Invert the matrix by Gaussian elimination.
    ///
    /// For each pivot column the first row at or below the diagonal with a
    /// nonzero entry is swapped into place. Any nonzero pivot is as good as
    /// any other in GF(2^8), there is no notion of numerical stability to
    /// optimize for.
    ///
    /// # Errors
    /// - [`TessellaError::NonSquareMatrix`] for a rectangular input
    /// - [`TessellaError::SingularMatrix`] when a pivot column has no
    ///   nonzero candidate row
    pub fn invert(&self) -> Result<Self, TessellaError> {
        if self.height != self.width {
            return Err(TessellaError::NonSquareMatrix(self.height, self.width));
        }

        let gf = field::tables();
        let mut matrix = self.clone();
        let mut inverse = Self::identity(self.height);

        for i in 0..matrix.height {
            let pivot_row = (i..matrix.height)
                .find(|&r| matrix.get(r, i) != 0)
                .ok_or(TessellaError::SingularMatrix(i))?;
            matrix.swap_rows(i, pivot_row);
            inverse.swap_rows(i, pivot_row);

            let pivot = gf.inv(matrix.get(i, i))?;
            matrix.scale_row(i, pivot);
            inverse.scale_row(i, pivot);

            for k in 0..matrix.height {
                if k != i {
                    // in characteristic 2, subtracting the scaled pivot row
                    // is the same as adding it
                    let factor = matrix.get(k, i);
                    matrix.add_scaled_row(i, factor, k);
                    inverse.add_scaled_row(i, factor, k);
                }
            }
        }

        Ok(inverse)
    }

    pub fn mul(&self, rhs: &Self) -> Result<Self, TessellaError> {
        if self.width != rhs.height {
            return Err(TessellaError::IncompatibleMatrixShapes {
                left: (self.height, self.width),
                right: (rhs.height, rhs.width),
            });
        }

        let gf = field::tables();
        let mut product = Self::zeroes(self.height, rhs.width);
        for i in 0..self.height {
            for j in 0..rhs.width {
                let mut acc = 0;
                for k in 0..self.width {
                    acc = gf.add(acc, gf.mul(self.get(i, k), rhs.get(k, j)));
                }
                product.set(i, j, acc);
            }
        }

        Ok(product)
    }

    /// The submatrix made of the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let mut matrix = Self::zeroes(rows.len(), self.width);
        for (i, &r) in rows.iter().enumerate() {
            for j in 0..self.width {
                matrix.set(i, j, self.get(r, j));
            }
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use crate::error::TessellaError;

    use super::Matrix;

    #[test]
    fn from_vec_vec() {
        let actual = Matrix::from_vec_vec(vec![
            vec![2, 0, 0],
            vec![0, 3, 0],
            vec![0, 0, 4],
            vec![2, 3, 4],
        ])
        .unwrap();
        let expected = Matrix {
            elements: vec![2, 0, 0, 0, 3, 0, 0, 0, 4, 2, 3, 4],
            height: 4,
            width: 3,
        };
        assert_eq!(actual, expected);

        let matrix = Matrix::from_vec_vec(vec![vec![0], vec![0, 0]]);
        assert!(matches!(
            matrix,
            Err(TessellaError::InvalidMatrixElements { .. })
        ));
    }

    #[test]
    fn identity() {
        let actual = Matrix::identity(3);
        let expected =
            Matrix::from_vec_vec(vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn multiplication() {
        let a = Matrix::from_vec_vec(vec![vec![9, 4, 3], vec![8, 5, 2], vec![7, 6, 1]]).unwrap();

        assert!(matches!(
            a.mul(&Matrix::from_vec_vec(vec![vec![1, 2]]).unwrap()),
            Err(TessellaError::IncompatibleMatrixShapes {
                left: (3, 3),
                right: (1, 2),
            })
        ));

        let identity = Matrix::identity(3);
        assert_eq!(a.mul(&identity).unwrap(), a);
        assert_eq!(identity.mul(&a).unwrap(), a);
    }

    #[test]
    fn inverse() {
        let matrix = Matrix::identity(3);
        let inverse = matrix.invert().unwrap();
        assert_eq!(Matrix::identity(3), inverse);

        let matrix =
            Matrix::from_vec_vec(vec![vec![2, 0, 0], vec![0, 3, 0], vec![0, 0, 4]]).unwrap();
        let inverse = matrix.invert().unwrap();
        assert_eq!(matrix.mul(&inverse).unwrap(), Matrix::identity(3));
        assert_eq!(inverse.mul(&matrix).unwrap(), Matrix::identity(3));

        let mut rng = rand::thread_rng();
        let n = 20;
        for _ in 0..10 {
            let matrix = Matrix::from_vec_vec(
                (0..n)
                    .map(|_| (0..n).map(|_| rng.gen()).collect())
                    .collect::<Vec<Vec<u8>>>(),
            )
            .unwrap();
            match matrix.invert() {
                Ok(inverse) => {
                    assert_eq!(matrix.mul(&inverse).unwrap(), Matrix::identity(n));
                    assert_eq!(inverse.mul(&matrix).unwrap(), Matrix::identity(n));
                }
                // a random matrix may legitimately be singular
                Err(TessellaError::SingularMatrix(..)) => {}
                Err(e) => panic!("unexpected inversion error: {e}"),
            }
        }
    }

    #[test]
    fn inverse_requires_row_swaps() {
        // zero on the diagonal, invertible only through pivoting
        let matrix =
            Matrix::from_vec_vec(vec![vec![0, 1, 0], vec![1, 0, 0], vec![0, 0, 1]]).unwrap();
        let inverse = matrix.invert().unwrap();
        assert_eq!(matrix.mul(&inverse).unwrap(), Matrix::identity(3));
    }

    #[test]
    fn inverse_of_non_square_fails() {
        let inverse = Matrix::from_vec_vec(vec![vec![1, 0, 0], vec![0, 1, 0]])
            .unwrap()
            .invert();
        assert_eq!(inverse, Err(TessellaError::NonSquareMatrix(2, 3)));
    }

    #[test]
    fn inverse_of_singular_fails() {
        let inverse = Matrix::from_vec_vec(vec![vec![0, 0, 0], vec![0, 3, 0], vec![0, 0, 4]])
            .unwrap()
            .invert();
        assert_eq!(inverse, Err(TessellaError::SingularMatrix(0)));

        // duplicate rows are singular too
        let inverse = Matrix::from_vec_vec(vec![vec![1, 2, 3], vec![1, 2, 3], vec![0, 0, 1]])
            .unwrap()
            .invert();
        assert!(matches!(inverse, Err(TessellaError::SingularMatrix(..))));
    }

    #[test]
    fn select_rows() {
        let matrix =
            Matrix::from_vec_vec(vec![vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8]]).unwrap();
        let selected = matrix.select_rows(&[3, 0]);
        assert_eq!(
            selected,
            Matrix::from_vec_vec(vec![vec![7, 8], vec![1, 2]]).unwrap()
        );
    }
}
