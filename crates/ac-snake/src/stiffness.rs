use ac_core::Error;
use log::debug;

use crate::contour::MIN_POINTS;
use crate::matrix::{DenseMatrix, GaussJordan, MatrixInverter};
use crate::params::SnakeParams;

/// The five per-row values of the circulant stencil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilCoefficients {
    /// Main diagonal, `gamma*(2*alpha + 6*beta) + 1`.
    pub a: f64,
    /// `±1` diagonals, `gamma*(-alpha - 4*beta)`.
    pub b: f64,
    /// `±2` diagonals, `gamma*beta`.
    pub c: f64,
}

impl StencilCoefficients {
    pub fn new(params: &SnakeParams) -> Self {
        let SnakeParams { alpha, beta, gamma } = *params;
        Self {
            a: gamma * (2.0 * alpha + 6.0 * beta) + 1.0,
            b: gamma * (-alpha - 4.0 * beta),
            c: gamma * beta,
        }
    }

    /// `(column offset, value)` pairs of one row.
    fn taps(&self) -> [(isize, f64); 5] {
        [
            (-2, self.c),
            (-1, self.b),
            (0, self.a),
            (1, self.b),
            (2, self.c),
        ]
    }
}

/// Internal-energy operator `I + gamma*K` of a closed contour.
///
/// `K` is the periodic discretization of `alpha*|x'|^2 + beta*|x''|^2`, a
/// circulant pentadiagonal matrix. For `n < 5` some stencil offsets coincide
/// modulo `n`; their values are summed, which keeps the matrix the exact
/// periodic operator.
#[derive(Debug, Clone)]
pub struct StiffnessOperator {
    params: SnakeParams,
    coeffs: StencilCoefficients,
    matrix: DenseMatrix,
}

impl StiffnessOperator {
    pub fn new(n: usize, params: &SnakeParams) -> Result<Self, Error> {
        if n < MIN_POINTS {
            return Err(Error::InvalidPointCount {
                min: MIN_POINTS,
                actual: n,
            });
        }
        params.validate()?;

        let coeffs = StencilCoefficients::new(params);
        let mut matrix = DenseMatrix::zeros(n);
        for i in 0..n {
            for (offset, v) in coeffs.taps() {
                let j = (i as isize + offset).rem_euclid(n as isize) as usize;
                matrix.add_at(i, j, v);
            }
        }

        debug!(
            "stiffness operator n={n} a={:.6} b={:.6} c={:.6}",
            coeffs.a, coeffs.b, coeffs.c
        );

        Ok(Self {
            params: *params,
            coeffs,
            matrix,
        })
    }

    pub fn len(&self) -> usize {
        self.matrix.size()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.size() == 0
    }

    pub fn params(&self) -> &SnakeParams {
        &self.params
    }

    pub fn coefficients(&self) -> StencilCoefficients {
        self.coeffs
    }

    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    pub fn invert(&self) -> Result<DenseMatrix, Error> {
        self.invert_with(&GaussJordan::default())
    }

    pub fn invert_with<I: MatrixInverter + ?Sized>(
        &self,
        inverter: &I,
    ) -> Result<DenseMatrix, Error> {
        let inv = inverter.invert(&self.matrix)?;
        if inv.size() != self.len() {
            return Err(Error::SizeMismatch {
                expected: self.len(),
                actual: inv.size(),
            });
        }
        debug!("inverted {n}x{n} stiffness operator", n = self.len());
        Ok(inv)
    }
}
