use ac_core::{BorderMode, Error, Image, ImageView, Vec2d, to_f64};
use log::debug;

use crate::gradient::{gaussian_gradient, gradient_magnitude};
use crate::kernels::GaussianKernel1D;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Smoothing scale of the intensity gradient.
    pub sigma: f64,
    /// Scale of the gradient taken on the magnitude channel.
    pub force_sigma: f64,
    pub border: BorderMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            sigma: 30.0,
            force_sigma: 1.0,
            border: BorderMode::Clamp,
        }
    }
}

/// Immutable external-energy field over an image domain.
///
/// `magnitude` is the Gaussian-smoothed gradient magnitude of the intensity;
/// `force_x`/`force_y` are the two components of the gradient of that
/// magnitude, which point towards nearby edge ridges.
#[derive(Debug, Clone)]
pub struct ImageField {
    sigma: f64,
    intensity: Image<f64>,
    magnitude: Image<f64>,
    force_x: Image<f64>,
    force_y: Image<f64>,
}

impl ImageField {
    pub fn build<T: Copy + Into<f64>>(img: &ImageView<'_, T>, sigma: f64) -> Result<Self, Error> {
        Self::build_with(
            img,
            &FieldConfig {
                sigma,
                ..FieldConfig::default()
            },
        )
    }

    pub fn build_with<T: Copy + Into<f64>>(
        img: &ImageView<'_, T>,
        cfg: &FieldConfig,
    ) -> Result<Self, Error> {
        let smooth = GaussianKernel1D::new(cfg.sigma)?;
        let force = GaussianKernel1D::new(cfg.force_sigma)?;

        let intensity = to_f64(img);
        let (gx, gy) = gaussian_gradient(&intensity.as_view(), &smooth, cfg.border);
        let magnitude = gradient_magnitude(&gx, &gy);
        let (force_x, force_y) = gaussian_gradient(&magnitude.as_view(), &force, cfg.border);

        debug!(
            "built {}x{} force field (sigma={}, force_sigma={}, radius={})",
            intensity.width(),
            intensity.height(),
            cfg.sigma,
            cfg.force_sigma,
            smooth.radius
        );

        Ok(Self {
            sigma: cfg.sigma,
            intensity,
            magnitude,
            force_x,
            force_y,
        })
    }

    /// Wraps precomputed channels. All four must share the same dimensions.
    pub fn from_channels(
        intensity: Image<f64>,
        magnitude: Image<f64>,
        force_x: Image<f64>,
        force_y: Image<f64>,
    ) -> Result<Self, Error> {
        let expected = intensity.data().len();
        for ch in [&magnitude, &force_x, &force_y] {
            if ch.width() != intensity.width() || ch.height() != intensity.height() {
                return Err(Error::SizeMismatch {
                    expected,
                    actual: ch.data().len(),
                });
            }
        }

        Ok(Self {
            sigma: 0.0,
            intensity,
            magnitude,
            force_x,
            force_y,
        })
    }

    pub fn width(&self) -> usize {
        self.intensity.width()
    }

    pub fn height(&self) -> usize {
        self.intensity.height()
    }

    /// Smoothing scale; 0.0 for fields built from precomputed channels.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    pub fn intensity(&self, x: usize, y: usize) -> Option<f64> {
        self.intensity.get(x, y).copied()
    }

    pub fn magnitude(&self, x: usize, y: usize) -> Option<f64> {
        self.magnitude.get(x, y).copied()
    }

    pub fn force(&self, x: usize, y: usize) -> Option<Vec2d> {
        Some(Vec2d {
            x: *self.force_x.get(x, y)?,
            y: *self.force_y.get(x, y)?,
        })
    }

    pub fn magnitude_view(&self) -> ImageView<'_, f64> {
        self.magnitude.as_view()
    }

    pub fn force_x_view(&self) -> ImageView<'_, f64> {
        self.force_x.as_view()
    }

    pub fn force_y_view(&self) -> ImageView<'_, f64> {
        self.force_y.as_view()
    }
}

#[cfg(test)]
mod tests {
    use ac_core::{Error, Image};

    use super::{FieldConfig, ImageField};

    fn disk(w: usize, h: usize, cx: f64, cy: f64, r: f64) -> Image<u8> {
        Image::from_fn(w, h, |x, y| {
            let d = (x as f64 - cx).hypot(y as f64 - cy);
            if d <= r { 200 } else { 20 }
        })
    }

    #[test]
    fn rejects_non_positive_scales() {
        let img = disk(16, 16, 8.0, 8.0, 4.0);
        for sigma in [0.0, -1.0] {
            let err = ImageField::build(&img.as_view(), sigma).expect_err("sigma <= 0");
            assert_eq!(err, Error::InvalidScale { sigma });
            assert!(err.is_invalid_parameter());
        }

        let cfg = FieldConfig {
            sigma: 2.0,
            force_sigma: 0.0,
            ..FieldConfig::default()
        };
        assert!(ImageField::build_with(&img.as_view(), &cfg).is_err());
    }

    #[test]
    fn constant_image_has_no_force() {
        let img = Image::new_fill(24, 20, 77u8);
        let field = ImageField::build(&img.as_view(), 3.0).expect("valid field");

        assert_eq!(field.width(), 24);
        assert_eq!(field.height(), 20);
        assert_eq!(field.intensity(3, 4), Some(77.0));
        for y in 0..20 {
            for x in 0..24 {
                assert!(field.magnitude(x, y).expect("in bounds").abs() < 1e-9);
                let f = field.force(x, y).expect("in bounds");
                assert!(f.x.abs() < 1e-9 && f.y.abs() < 1e-9);
            }
        }
        assert!(field.force(24, 0).is_none());
    }

    #[test]
    fn force_points_towards_the_edge_ridge() {
        let img = disk(64, 64, 32.0, 32.0, 16.0);
        let field = ImageField::build(&img.as_view(), 2.0).expect("valid field");

        // Along the +x ray the ridge sits near x = 48.
        let inside = field.force(42, 32).expect("in bounds");
        let outside = field.force(54, 32).expect("in bounds");
        assert!(inside.x > 0.0, "inside force {inside:?}");
        assert!(outside.x < 0.0, "outside force {outside:?}");
        assert!(inside.y.abs() < 1e-6);

        let ridge = (36..60)
            .max_by(|&a, &b| {
                let ma = field.magnitude(a, 32).unwrap_or_default();
                let mb = field.magnitude(b, 32).unwrap_or_default();
                ma.total_cmp(&mb)
            })
            .expect("non-empty range");
        assert!((46..=49).contains(&ridge), "ridge at {ridge}");
    }

    #[test]
    fn from_channels_checks_dimensions() {
        let a = Image::new_fill(4, 3, 0.0);
        let b = Image::new_fill(3, 4, 0.0);
        let err = ImageField::from_channels(a.clone(), a.clone(), a.clone(), b).expect_err("dims");
        assert!(matches!(err, Error::SizeMismatch { .. }));

        let field = ImageField::from_channels(a.clone(), a.clone(), a.clone(), a).expect("dims");
        assert_eq!(field.sigma(), 0.0);
        assert!(field.contains(3, 2));
        assert!(!field.contains(4, 2));
        assert!(!field.contains(-1, 0));
    }
}
