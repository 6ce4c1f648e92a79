use ac_core::{Error, Point2d};
use ac_field::ImageField;
use log::{Level, debug, log_enabled, trace};

use crate::contour::Contour;
use crate::force::ForceSampler;
use crate::matrix::{DenseMatrix, GaussJordan, MatrixInverter};
use crate::params::SnakeConfig;
use crate::stiffness::StiffnessOperator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Operator built and inverted; no run in progress.
    Ready,
    Running,
    /// All requested iterations completed.
    Done,
}

/// Fixed-iteration implicit snake evolution.
///
/// Each iteration samples the external force at every point, then computes
/// `p_new = inv(I + gamma*K) * (p + gamma*f)` separately for the x and y
/// channels. The new point set replaces the contour as a whole. There is no
/// convergence test; the caller picks the iteration count.
#[derive(Debug, Clone)]
pub struct SnakeSolver<'f> {
    sampler: ForceSampler<'f>,
    inverse: DenseMatrix,
    gamma: f64,
    iterations: usize,
    state: SolverState,
    completed: usize,
    fx: Vec<f64>,
    fy: Vec<f64>,
}

impl<'f> SnakeSolver<'f> {
    /// Builds and inverts the stiffness operator for `n`-point contours.
    pub fn new(field: &'f ImageField, n: usize, cfg: &SnakeConfig) -> Result<Self, Error> {
        Self::with_inverter(field, n, cfg, &GaussJordan::default())
    }

    pub fn with_inverter<I: MatrixInverter + ?Sized>(
        field: &'f ImageField,
        n: usize,
        cfg: &SnakeConfig,
        inverter: &I,
    ) -> Result<Self, Error> {
        let op = StiffnessOperator::new(n, &cfg.params)?;
        let inverse = op.invert_with(inverter)?;

        Ok(Self {
            sampler: ForceSampler::from_config(field, cfg),
            inverse,
            gamma: cfg.params.gamma,
            iterations: cfg.iterations,
            state: SolverState::Ready,
            completed: 0,
            fx: vec![0.0; n],
            fy: vec![0.0; n],
        })
    }

    pub fn len(&self) -> usize {
        self.inverse.size()
    }

    pub fn is_empty(&self) -> bool {
        self.inverse.size() == 0
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Total iterations applied since construction.
    pub fn iterations_done(&self) -> usize {
        self.completed
    }

    pub fn inverse(&self) -> &DenseMatrix {
        &self.inverse
    }

    pub fn sampler(&self) -> &ForceSampler<'f> {
        &self.sampler
    }

    /// Runs the configured number of iterations.
    pub fn run(&mut self, contour: &mut Contour) -> Result<(), Error> {
        self.run_for(contour, self.iterations)
    }

    /// Runs `iterations` steps. On failure the contour keeps the last
    /// completed iteration and the solver returns to [`SolverState::Ready`].
    pub fn run_for(&mut self, contour: &mut Contour, iterations: usize) -> Result<(), Error> {
        self.run_inner(contour, iterations, |_| {})
    }

    /// Like [`SnakeSolver::run_for`], returning the initial contour followed
    /// by a snapshot after every iteration.
    pub fn run_recording(
        &mut self,
        contour: &mut Contour,
        iterations: usize,
    ) -> Result<Vec<Contour>, Error> {
        let mut history = Vec::with_capacity(iterations + 1);
        history.push(contour.clone());
        self.run_inner(contour, iterations, |c| history.push(c.clone()))?;
        Ok(history)
    }

    pub fn step(&mut self, contour: &mut Contour) -> Result<(), Error> {
        self.run_for(contour, 1)
    }

    /// One update with caller-supplied external forces instead of sampled
    /// ones.
    pub fn step_with_forces(
        &mut self,
        contour: &mut Contour,
        fex: &[f64],
        fey: &[f64],
    ) -> Result<(), Error> {
        self.check_len(contour.len())?;
        self.check_len(fex.len())?;
        self.check_len(fey.len())?;

        let next = implicit_update(&self.inverse, self.gamma, contour.points(), fex, fey);
        contour.replace_points(next);
        self.completed += 1;
        Ok(())
    }

    fn run_inner(
        &mut self,
        contour: &mut Contour,
        iterations: usize,
        mut on_iteration: impl FnMut(&Contour),
    ) -> Result<(), Error> {
        self.check_len(contour.len())?;

        self.state = SolverState::Running;
        debug!(
            "snake run: {iterations} iterations, n={}, gamma={}",
            contour.len(),
            self.gamma
        );

        for k in 0..iterations {
            if let Err(err) = self.iterate(contour, k) {
                self.state = SolverState::Ready;
                debug!("snake run stopped at iteration {k}: {err}");
                return Err(err);
            }
            on_iteration(contour);
        }

        self.state = SolverState::Done;
        debug!("snake run done, {} iterations in total", self.completed);
        Ok(())
    }

    fn iterate(&mut self, contour: &mut Contour, k: usize) -> Result<(), Error> {
        self.sampler
            .sample_contour(contour, &mut self.fx, &mut self.fy)?;

        let next = implicit_update(&self.inverse, self.gamma, contour.points(), &self.fx, &self.fy);
        if log_enabled!(Level::Trace) {
            let moved: f64 = contour
                .iter()
                .zip(&next)
                .map(|(a, b)| a.distance(*b))
                .sum();
            trace!("iteration {k}: mean displacement {:.4}", moved / next.len() as f64);
        }

        contour.replace_points(next);
        self.completed += 1;
        Ok(())
    }

    fn check_len(&self, actual: usize) -> Result<(), Error> {
        if actual != self.len() {
            return Err(Error::SizeMismatch {
                expected: self.len(),
                actual,
            });
        }
        Ok(())
    }
}

/// `inv * (p + gamma*f)` for both channels, into a fresh point buffer.
fn implicit_update(
    inverse: &DenseMatrix,
    gamma: f64,
    points: &[Point2d],
    fex: &[f64],
    fey: &[f64],
) -> Vec<Point2d> {
    let rhs_x: Vec<f64> = points
        .iter()
        .zip(fex)
        .map(|(p, f)| p.x + gamma * f)
        .collect();
    let rhs_y: Vec<f64> = points
        .iter()
        .zip(fey)
        .map(|(p, f)| p.y + gamma * f)
        .collect();

    let mut next = vec![Point2d::default(); points.len()];
    apply_rows(inverse, &rhs_x, &rhs_y, &mut next);
    next
}

#[cfg(feature = "rayon")]
fn apply_rows(inverse: &DenseMatrix, rhs_x: &[f64], rhs_y: &[f64], out: &mut [Point2d]) {
    use rayon::prelude::*;

    out.par_iter_mut().enumerate().for_each(|(i, p)| {
        let row = inverse.row(i);
        *p = Point2d::new(crate::matrix::dot(row, rhs_x), crate::matrix::dot(row, rhs_y));
    });
}

#[cfg(not(feature = "rayon"))]
fn apply_rows(inverse: &DenseMatrix, rhs_x: &[f64], rhs_y: &[f64], out: &mut [Point2d]) {
    for (i, p) in out.iter_mut().enumerate() {
        let row = inverse.row(i);
        *p = Point2d::new(crate::matrix::dot(row, rhs_x), crate::matrix::dot(row, rhs_y));
    }
}

/// Builds a solver for `contour` and runs `cfg.iterations` steps.
pub fn evolve(field: &ImageField, contour: &mut Contour, cfg: &SnakeConfig) -> Result<(), Error> {
    SnakeSolver::new(field, contour.len(), cfg)?.run(contour)
}
