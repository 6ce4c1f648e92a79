//! Kass active contours evolved with a semi-implicit scheme.
//!
//! A closed contour of `n` points is smoothed by the pentadiagonal circulant
//! operator `I + gamma*K` (tension `alpha`, rigidity `beta`) and pulled by the
//! external force of an [`ac_field::ImageField`]. The operator is inverted
//! once per solver; each iteration is then two dense matrix-vector products.
//!
//! Point `i` is adjacent to `i-1` and `i+1` modulo `n`; the first point is
//! never repeated at the end.

mod contour;
mod force;
mod matrix;
mod params;
mod solver;
mod stiffness;

pub use contour::{Contour, MIN_POINTS};
pub use force::ForceSampler;
pub use matrix::{DenseMatrix, GaussJordan, MatrixInverter};
pub use params::{OutOfBoundsPolicy, SnakeConfig, SnakeParams, SubpixRefine};
pub use solver::{SnakeSolver, SolverState, evolve};
pub use stiffness::{StencilCoefficients, StiffnessOperator};
