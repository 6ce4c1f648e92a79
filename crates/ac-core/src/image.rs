use crate::Error;

/// Owned row-major raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = checked_area(width, height, data.len())?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel in row-major
    /// order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

/// Borrowed raster with element stride between row starts.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = if width == 0 || height == 0 {
            0
        } else {
            let rows = checked_area(stride, height - 1, data.len())?;
            rows.checked_add(width).ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?
        };

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Returns a pixel reference without bounds checks.
    ///
    /// # Safety
    /// Caller must guarantee `x < self.width()` and `y < self.height()`.
    pub unsafe fn get_unchecked(&self, x: usize, y: usize) -> &'a T {
        // SAFETY: Caller guarantees `x < width` and `y < height`; the
        // constructor checked that every such index is inside `data`.
        unsafe { self.data.get_unchecked(y * self.stride + x) }
    }
}

fn checked_area(width: usize, height: usize, actual: usize) -> Result<usize, Error> {
    width.checked_mul(height).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual,
    })
}

/// Widens any scalar raster to `f64`, dropping row padding.
pub fn to_f64<T: Copy + Into<f64>>(img: &ImageView<'_, T>) -> Image<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(img.width() * img.height());
    for y in 0..img.height() {
        out.extend(img.row(y).iter().map(|&px| -> f64 { px.into() }));
    }

    Image {
        width: img.width(),
        height: img.height(),
        data: out,
    }
}

/// Converts interleaved RGB8 samples to Rec.601 luma.
pub fn luma_from_rgb8(width: usize, height: usize, rgb: &[u8]) -> Result<Image<f64>, Error> {
    let expected = checked_area(width, height, rgb.len())?
        .checked_mul(3)
        .ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: rgb.len(),
        })?;
    if rgb.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: rgb.len(),
        });
    }

    let data = rgb
        .chunks_exact(3)
        .map(|px| 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64)
        .collect();

    Ok(Image {
        width,
        height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView, luma_from_rgb8, to_f64};
    use crate::Error;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 2, vec![0u8; 5]).expect_err("short buffer");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn from_fn_is_row_major() {
        let img = Image::from_fn(3, 2, |x, y| 10 * y + x);
        assert_eq!(img.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(img.get(2, 1), Some(&12));
        assert_eq!(img.get(3, 0), None);
    }

    #[test]
    fn padded_view_widens_without_padding() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = ImageView::from_slice(3, 2, 4, &data).expect("valid view");

        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(3, 1), None);

        let wide = to_f64(&view);
        assert_eq!(wide.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn view_rejects_narrow_stride() {
        let data = vec![0u8; 8];
        assert_eq!(
            ImageView::from_slice(4, 2, 3, &data).expect_err("stride < width"),
            Error::InvalidStride
        );
    }

    #[test]
    fn rgb_luma_weights() {
        let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 10, 10, 10];
        let luma = luma_from_rgb8(2, 2, &rgb).expect("valid rgb");
        let want = [0.299 * 255.0, 0.587 * 255.0, 0.114 * 255.0, 10.0];
        for (got, want) in luma.data().iter().zip(want) {
            assert!((got - want).abs() < 1e-9);
        }
        assert!(luma_from_rgb8(2, 2, &rgb[..9]).is_err());
    }
}
