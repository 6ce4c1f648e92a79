//! External-energy field for active contours.
//!
//! The field is built once per image:
//! 1. Gaussian-derivative gradient of the intensity at scale `sigma`
//!    (separable kernels, `radius = ceil(3*sigma)`).
//! 2. Gradient magnitude.
//! 3. Gaussian-derivative gradient of the magnitude at `force_sigma`; these
//!    two channels are the force vectors a contour point feels.
//!
//! All convolutions share one [`ac_core::BorderMode`] (clamp by default).

pub mod conv;
pub mod gradient;
pub mod kernels;

mod field;

pub use field::{FieldConfig, ImageField};
pub use gradient::{gaussian_gradient, gradient_magnitude};
pub use kernels::GaussianKernel1D;
