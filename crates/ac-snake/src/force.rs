//! External force lookup at contour points.
//!
//! A point is rounded to its pixel, moved to the strongest gradient-magnitude
//! pixel of the surrounding 3x3 block, refined to sub-pixel precision along
//! each axis, and the two force channels are interpolated bilinearly there.

use ac_core::{BorderMode, Error, Point2d, Vec2d, sample_bilinear};
use ac_field::ImageField;
use log::warn;

use crate::contour::Contour;
use crate::params::{OutOfBoundsPolicy, SnakeConfig, SubpixRefine};

#[derive(Debug, Clone, Copy)]
pub struct ForceSampler<'f> {
    field: &'f ImageField,
    subpix: SubpixRefine,
    policy: OutOfBoundsPolicy,
}

impl<'f> ForceSampler<'f> {
    pub fn new(field: &'f ImageField, subpix: SubpixRefine, policy: OutOfBoundsPolicy) -> Self {
        Self {
            field,
            subpix,
            policy,
        }
    }

    pub fn from_config(field: &'f ImageField, cfg: &SnakeConfig) -> Self {
        Self::new(field, cfg.subpix, cfg.out_of_bounds)
    }

    pub fn field(&self) -> &'f ImageField {
        self.field
    }

    pub fn sample(&self, p: Point2d) -> Result<Vec2d, Error> {
        self.sample_indexed(0, p)
    }

    /// Samples every contour point into the two force buffers.
    pub fn sample_contour(
        &self,
        contour: &Contour,
        fx: &mut [f64],
        fy: &mut [f64],
    ) -> Result<(), Error> {
        let n = contour.len();
        for buf in [&*fx, &*fy] {
            if buf.len() != n {
                return Err(Error::SizeMismatch {
                    expected: n,
                    actual: buf.len(),
                });
            }
        }

        self.sample_all(contour.points(), fx, fy)
    }

    #[cfg(feature = "rayon")]
    fn sample_all(&self, points: &[Point2d], fx: &mut [f64], fy: &mut [f64]) -> Result<(), Error> {
        use rayon::prelude::*;

        fx.par_iter_mut()
            .zip(fy.par_iter_mut())
            .zip(points.par_iter())
            .enumerate()
            .try_for_each(|(i, ((fx, fy), &p))| {
                let f = self.sample_indexed(i, p)?;
                *fx = f.x;
                *fy = f.y;
                Ok(())
            })
    }

    #[cfg(not(feature = "rayon"))]
    fn sample_all(&self, points: &[Point2d], fx: &mut [f64], fy: &mut [f64]) -> Result<(), Error> {
        for (i, &p) in points.iter().enumerate() {
            let f = self.sample_indexed(i, p)?;
            fx[i] = f.x;
            fy[i] = f.y;
        }
        Ok(())
    }

    fn sample_indexed(&self, index: usize, p: Point2d) -> Result<Vec2d, Error> {
        let (xi, yi) = self.pixel_of(index, p)?;
        let (px, py) = self.locate_peak(xi, yi);
        Ok(Vec2d {
            x: sample_bilinear(&self.field.force_x_view(), px, py, BorderMode::Clamp),
            y: sample_bilinear(&self.field.force_y_view(), px, py, BorderMode::Clamp),
        })
    }

    fn pixel_of(&self, index: usize, p: Point2d) -> Result<(usize, usize), Error> {
        let out_of_bounds = Error::SampleOutOfBounds {
            index,
            x: p.x,
            y: p.y,
        };
        let (w, h) = (self.field.width(), self.field.height());
        if !(p.x.is_finite() && p.y.is_finite()) || w == 0 || h == 0 {
            return Err(out_of_bounds);
        }

        let xi = p.x.round() as isize;
        let yi = p.y.round() as isize;
        if self.field.contains(xi, yi) {
            return Ok((xi as usize, yi as usize));
        }

        match self.policy {
            OutOfBoundsPolicy::Fail => Err(out_of_bounds),
            OutOfBoundsPolicy::Clamp => {
                warn!("clamping contour point {index} at ({}, {}) into the image", p.x, p.y);
                Ok((
                    xi.clamp(0, w as isize - 1) as usize,
                    yi.clamp(0, h as isize - 1) as usize,
                ))
            }
        }
    }

    /// Sub-pixel location of the magnitude maximum around `(xi, yi)`.
    fn locate_peak(&self, xi: usize, yi: usize) -> (f64, f64) {
        let mag = self.field.magnitude_view();
        let (w, h) = (mag.width(), mag.height());
        let at = |x: usize, y: usize| mag.row(y)[x];

        let (mut bx, mut by) = (xi, yi);
        let mut best = at(xi, yi);
        for ny in yi.saturating_sub(1)..=(yi + 1).min(h - 1) {
            for nx in xi.saturating_sub(1)..=(xi + 1).min(w - 1) {
                let v = at(nx, ny);
                if v > best {
                    best = v;
                    (bx, by) = (nx, ny);
                }
            }
        }

        let mut tx = 0.0;
        let mut ty = 0.0;
        if bx > 0 && bx + 1 < w {
            tx = refine(self.subpix, at(bx - 1, by), best, at(bx + 1, by));
        }
        if by > 0 && by + 1 < h {
            ty = refine(self.subpix, at(bx, by - 1), best, at(bx, by + 1));
        }

        (bx as f64 + tx, by as f64 + ty)
    }
}

/// Peak offset in `[-0.5, 0.5]` from the left/centre/right samples.
fn refine(method: SubpixRefine, l: f64, m: f64, r: f64) -> f64 {
    let t = match method {
        SubpixRefine::None => 0.0,
        SubpixRefine::Linear => {
            let d = m - l.min(r);
            if d > 0.0 { 0.5 * (r - l) / d } else { 0.0 }
        }
        SubpixRefine::Parabolic => {
            let denom = l - 2.0 * m + r;
            if denom < -1e-12 { 0.5 * (l - r) / denom } else { 0.0 }
        }
    };
    if t.is_finite() { t.clamp(-0.5, 0.5) } else { 0.0 }
}
