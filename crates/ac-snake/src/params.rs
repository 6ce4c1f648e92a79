use ac_core::Error;

/// Internal-energy weights and the implicit step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnakeParams {
    /// Tension; penalizes stretching.
    pub alpha: f64,
    /// Rigidity; penalizes bending.
    pub beta: f64,
    /// Step (time) coefficient of the implicit update.
    pub gamma: f64,
}

impl SnakeParams {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "alpha",
                value: self.alpha,
            });
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "beta",
                value: self.beta,
            });
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(Error::InvalidParameter {
                name: "gamma",
                value: self.gamma,
            });
        }
        Ok(())
    }
}

impl Default for SnakeParams {
    fn default() -> Self {
        Self {
            alpha: 0.001,
            beta: 0.4,
            gamma: 100.0,
        }
    }
}

/// Sub-pixel refinement of the gradient-magnitude maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubpixRefine {
    None,
    #[default]
    Linear,
    Parabolic,
}

/// What to do when a contour point rounds to a pixel outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfBoundsPolicy {
    /// Report [`Error::SampleOutOfBounds`] and leave the contour untouched.
    #[default]
    Fail,
    /// Sample at the nearest in-bounds pixel.
    Clamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnakeConfig {
    pub params: SnakeParams,
    pub iterations: usize,
    pub subpix: SubpixRefine,
    pub out_of_bounds: OutOfBoundsPolicy,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            params: SnakeParams::default(),
            iterations: 50,
            subpix: SubpixRefine::Linear,
            out_of_bounds: OutOfBoundsPolicy::Fail,
        }
    }
}
