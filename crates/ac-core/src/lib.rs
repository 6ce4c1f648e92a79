//! Foundational primitives for active-contour segmentation.
//!
//! ## Coordinates
//! Integer coordinates refer to pixel centres. Contour points and force
//! samples use `f64` throughout; rasters handed in by the host may be any
//! scalar type convertible to `f64`.
//!
//! ## Border Modes
//! Convolution and sampling support clamp, constant fill, and reflect-101.
//! Reflect-101 mirrors around edge pixels without repeating edge elements.
//!
//! ## Errors
//! A single [`Error`] enum is shared by the whole workspace so that raster,
//! parameter, and solver failures surface through one type.

mod border;
mod error;
mod geom;
mod image;
mod sample;

pub use border::BorderMode;
pub use error::Error;
pub use geom::{Point2d, Vec2d};
pub use image::{Image, ImageView, luma_from_rgb8, to_f64};
pub use sample::{sample_at, sample_bilinear};
