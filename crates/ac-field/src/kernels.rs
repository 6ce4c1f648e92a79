use ac_core::Error;

/// 1D Gaussian and first-derivative-of-Gaussian kernels.
///
/// Conventions:
/// - `radius = ceil(3*sigma)`, minimum 1.
/// - `g` is normalized such that `sum(g) ~= 1`.
/// - `dg[i] = -(x/sigma^2) * g[i]` (using normalized `g`), so convolving a
///   rising ramp yields a positive response.
#[derive(Debug, Clone)]
pub struct GaussianKernel1D {
    pub sigma: f64,
    pub radius: usize,
    pub g: Vec<f64>,
    pub dg: Vec<f64>,
}

impl GaussianKernel1D {
    pub fn new(sigma: f64) -> Result<Self, Error> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::InvalidScale { sigma });
        }

        let radius = ((3.0 * sigma).ceil() as usize).max(1);
        let sigma2 = sigma * sigma;

        let mut g: Vec<f64> = (0..2 * radius + 1)
            .map(|i| {
                let x = i as f64 - radius as f64;
                (-(x * x) / (2.0 * sigma2)).exp()
            })
            .collect();
        let sum_g: f64 = g.iter().sum();
        for gi in &mut g {
            *gi /= sum_g;
        }

        let dg = g
            .iter()
            .enumerate()
            .map(|(i, &gi)| {
                let x = i as f64 - radius as f64;
                -(x / sigma2) * gi
            })
            .collect();

        Ok(Self {
            sigma,
            radius,
            g,
            dg,
        })
    }

    pub fn len(&self) -> usize {
        self.g.len()
    }

    pub fn is_empty(&self) -> bool {
        self.g.is_empty()
    }
}
