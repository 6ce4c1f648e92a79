use ac_core::Error;

/// Square row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    pub fn from_rows(n: usize, data: Vec<f64>) -> Result<Self, Error> {
        if data.len() != n * n {
            return Err(Error::SizeMismatch {
                expected: n * n,
                actual: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub(crate) fn add_at(&mut self, i: usize, j: usize, v: f64) {
        self.data[i * self.n + j] += v;
    }

    pub fn mul(&self, rhs: &DenseMatrix) -> Result<DenseMatrix, Error> {
        if rhs.n != self.n {
            return Err(Error::SizeMismatch {
                expected: self.n,
                actual: rhs.n,
            });
        }
        let n = self.n;
        let mut out = Self::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let a = self.data[i * n + k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    out.data[i * n + j] += a * rhs.data[k * n + j];
                }
            }
        }
        Ok(out)
    }

    /// `out = self * v`.
    pub fn mul_vec(&self, v: &[f64], out: &mut [f64]) {
        assert_eq!(v.len(), self.n, "vector length must match matrix size");
        assert_eq!(out.len(), self.n, "output length must match matrix size");
        for (i, o) in out.iter_mut().enumerate() {
            *o = dot(self.row(i), v);
        }
    }

    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    pub fn max_abs_diff(&self, other: &DenseMatrix) -> f64 {
        self.data
            .iter()
            .zip(&other.data)
            .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()))
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let n = self.n;
        for j in 0..n {
            self.data.swap(a * n + j, b * n + j);
        }
    }

    fn scale_row(&mut self, i: usize, s: f64) {
        let n = self.n;
        for v in &mut self.data[i * n..(i + 1) * n] {
            *v *= s;
        }
    }

    /// `row[dst] -= f * row[src]`.
    fn sub_row(&mut self, dst: usize, src: usize, f: f64) {
        let n = self.n;
        for j in 0..n {
            let v = self.data[src * n + j];
            self.data[dst * n + j] -= f * v;
        }
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Dense matrix inversion as a pluggable capability.
pub trait MatrixInverter {
    fn invert(&self, m: &DenseMatrix) -> Result<DenseMatrix, Error>;
}

/// Gauss-Jordan elimination with partial pivoting.
///
/// A pivot whose magnitude is at most `tolerance * max|m|` marks the matrix
/// as singular.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussJordan {
    pub tolerance: f64,
}

impl Default for GaussJordan {
    fn default() -> Self {
        Self { tolerance: 1e-12 }
    }
}

impl MatrixInverter for GaussJordan {
    fn invert(&self, m: &DenseMatrix) -> Result<DenseMatrix, Error> {
        let n = m.size();
        let mut a = m.clone();
        let mut inv = DenseMatrix::identity(n);
        if n == 0 {
            return Ok(inv);
        }

        let scale = a.max_abs();
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::SingularMatrix { column: 0 });
        }
        let tol = self.tolerance * scale;

        for col in 0..n {
            let Some((pivot_row, pivot_abs)) = (col..n)
                .map(|r| (r, a.get(r, col).abs()))
                .max_by(|x, y| x.1.total_cmp(&y.1))
            else {
                return Err(Error::SingularMatrix { column: col });
            };
            if !(pivot_abs > tol) {
                return Err(Error::SingularMatrix { column: col });
            }

            a.swap_rows(col, pivot_row);
            inv.swap_rows(col, pivot_row);

            let s = 1.0 / a.get(col, col);
            a.scale_row(col, s);
            inv.scale_row(col, s);

            for r in 0..n {
                if r == col {
                    continue;
                }
                let f = a.get(r, col);
                if f != 0.0 {
                    a.sub_row(r, col, f);
                    inv.sub_row(r, col, f);
                }
            }
        }

        Ok(inv)
    }
}
