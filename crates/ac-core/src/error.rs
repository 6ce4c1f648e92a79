use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    InvalidStride,
    InvalidParameter { name: &'static str, value: f64 },
    InvalidPointCount { min: usize, actual: usize },
    InvalidScale { sigma: f64 },
    SingularMatrix { column: usize },
    SampleOutOfBounds { index: usize, x: f64, y: f64 },
}

impl Error {
    /// True for errors caused by a rejected configuration value (parameters,
    /// point count, smoothing scale).
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::InvalidPointCount { .. } | Self::InvalidScale { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name} = {value}")
            }
            Self::InvalidPointCount { min, actual } => {
                write!(f, "contour needs at least {min} points, got {actual}")
            }
            Self::InvalidScale { sigma } => {
                write!(f, "smoothing scale must be > 0 and finite, got {sigma}")
            }
            Self::SingularMatrix { column } => {
                write!(f, "matrix is singular (no usable pivot in column {column})")
            }
            Self::SampleOutOfBounds { index, x, y } => {
                write!(f, "contour point {index} at ({x}, {y}) is outside the image")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn parameter_errors_are_grouped() {
        assert!(Error::InvalidScale { sigma: 0.0 }.is_invalid_parameter());
        assert!(Error::InvalidPointCount { min: 3, actual: 2 }.is_invalid_parameter());
        assert!(
            Error::InvalidParameter {
                name: "gamma",
                value: -1.0
            }
            .is_invalid_parameter()
        );
        assert!(!Error::SingularMatrix { column: 0 }.is_invalid_parameter());
        assert!(
            !Error::SampleOutOfBounds {
                index: 1,
                x: -3.0,
                y: 2.0
            }
            .is_invalid_parameter()
        );
    }

    #[test]
    fn display_names_the_offending_point() {
        let msg = Error::SampleOutOfBounds {
            index: 7,
            x: 250.5,
            y: 10.0,
        }
        .to_string();
        assert_eq!(msg, "contour point 7 at (250.5, 10) is outside the image");
    }
}
