use crate::border::BorderMode;
use crate::image::ImageView;

/// Bilinear interpolation with the floor-based 2x2 neighbourhood.
///
/// Returns the constant fill (or 0.0 for other modes) on an empty image.
pub fn sample_bilinear(img: &ImageView<'_, f64>, x: f64, y: f64, border: BorderMode) -> f64 {
    if img.width() == 0 || img.height() == 0 {
        return border.fill_value().unwrap_or(0.0);
    }

    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let dx = x - x0 as f64;
    let dy = y - y0 as f64;

    let p00 = sample_at(img, x0, y0, border);
    let p10 = sample_at(img, x0 + 1, y0, border);
    let p01 = sample_at(img, x0, y0 + 1, border);
    let p11 = sample_at(img, x0 + 1, y0 + 1, border);

    let top = p00 * (1.0 - dx) + p10 * dx;
    let bottom = p01 * (1.0 - dx) + p11 * dx;
    top * (1.0 - dy) + bottom * dy
}

/// Integer-index lookup through `border`.
pub fn sample_at(img: &ImageView<'_, f64>, x: isize, y: isize, border: BorderMode) -> f64 {
    match (
        border.resolve(x, img.width()),
        border.resolve(y, img.height()),
    ) {
        // SAFETY: `resolve` only returns indices in `[0, len)`.
        (Some(xi), Some(yi)) => unsafe { *img.get_unchecked(xi, yi) },
        _ => border.fill_value().unwrap_or(0.0),
    }
}
