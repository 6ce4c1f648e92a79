//! Umbrella crate for the `active-contour` workspace.
//!
//! Re-exports the raster primitives, the external-energy field and the
//! snake solver so hosts can depend on a single crate.

pub use ac_core::*;
pub use ac_field::{FieldConfig, GaussianKernel1D, ImageField, gaussian_gradient, gradient_magnitude};
pub use ac_snake::*;
