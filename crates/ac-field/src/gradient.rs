use ac_core::{BorderMode, Image, ImageView};

use crate::conv::{convolve_cols, convolve_rows};
use crate::kernels::GaussianKernel1D;

/// Gaussian-derivative gradient `(gx, gy)` of `src` at the kernel's scale.
///
/// `gx` differentiates along rows and smooths along columns; `gy` the other
/// way round. Positive values point towards increasing intensity.
pub fn gaussian_gradient(
    src: &ImageView<'_, f64>,
    kernel: &GaussianKernel1D,
    border: BorderMode,
) -> (Image<f64>, Image<f64>) {
    let r = kernel.radius;
    let dx = convolve_rows(src, &kernel.dg, r, border);
    let sx = convolve_rows(src, &kernel.g, r, border);

    let gx = convolve_cols(&dx.as_view(), &kernel.g, r, border);
    let gy = convolve_cols(&sx.as_view(), &kernel.dg, r, border);
    (gx, gy)
}

pub fn gradient_magnitude(gx: &Image<f64>, gy: &Image<f64>) -> Image<f64> {
    assert_eq!(gx.width(), gy.width(), "gradient widths must match");
    assert_eq!(gx.height(), gy.height(), "gradient heights must match");

    Image::from_fn(gx.width(), gx.height(), |x, y| {
        let i = y * gx.width() + x;
        gx.data()[i].hypot(gy.data()[i])
    })
}

#[cfg(test)]
mod tests {
    use ac_core::{BorderMode, Image};

    use super::{gaussian_gradient, gradient_magnitude};
    use crate::kernels::GaussianKernel1D;

    #[test]
    fn ramp_gradient_is_its_slope() {
        // I(x, y) = 2x + 0.5y. The truncated kernel's discrete variance is
        // about 0.4% short of sigma^2, hence the loose tolerance.
        let img = Image::from_fn(32, 24, |x, y| 2.0 * x as f64 + 0.5 * y as f64);
        let k = GaussianKernel1D::new(1.0).expect("valid sigma");
        let (gx, gy) = gaussian_gradient(&img.as_view(), &k, BorderMode::Clamp);

        for y in 5..19 {
            for x in 5..27 {
                let i = y * 32 + x;
                assert!((gx.data()[i] - 2.0).abs() < 2e-2, "gx at ({x},{y})");
                assert!((gy.data()[i] - 0.5).abs() < 5e-3, "gy at ({x},{y})");
            }
        }
    }

    #[test]
    fn vertical_step_peaks_on_edge() {
        let img = Image::from_fn(40, 10, |x, _| if x >= 20 { 100.0 } else { 0.0 });
        let k = GaussianKernel1D::new(1.5).expect("valid sigma");
        let (gx, gy) = gaussian_gradient(&img.as_view(), &k, BorderMode::Clamp);
        let mag = gradient_magnitude(&gx, &gy);

        let row: Vec<f64> = (0..40).map(|x| mag.data()[5 * 40 + x]).collect();
        let peak = row
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .expect("non-empty row");
        assert!(peak == 19 || peak == 20, "peak at {peak}");
        assert!(gy.data().iter().all(|v| v.abs() < 1e-9));
        assert!(row[2] < 1e-6 && row[37] < 1e-6);
    }
}
