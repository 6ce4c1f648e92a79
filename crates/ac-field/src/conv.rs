use ac_core::{BorderMode, Image, ImageView};

/// Full 1D convolution, `out[i] = sum_k signal[i + radius - k] * kernel[k]`.
pub fn convolve_f64(
    signal: &[f64],
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
    out: &mut [f64],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    let interior_start = radius.min(n);
    let interior_end = n.saturating_sub(radius).max(interior_start);

    for i in (0..interior_start).chain(interior_end..n) {
        out[i] = convolve_at_border(signal, kernel, radius, border, i);
    }

    // Interior: the whole kernel footprint is in range.
    for (i, out_i) in out
        .iter_mut()
        .enumerate()
        .take(interior_end)
        .skip(interior_start)
    {
        let window = &signal[i - radius..=i + radius];
        *out_i = window
            .iter()
            .zip(kernel.iter().rev())
            .map(|(s, k)| s * k)
            .sum();
    }
}

fn convolve_at_border(
    signal: &[f64],
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
    i: usize,
) -> f64 {
    let n = signal.len();
    let mut acc = 0.0;
    for (k, &kv) in kernel.iter().enumerate() {
        let idx = i as isize + radius as isize - k as isize;
        let v = match border.resolve(idx, n) {
            Some(j) => signal[j],
            None => border.fill_value().unwrap_or(0.0),
        };
        acc += v * kv;
    }
    acc
}

/// Convolves every row of `src` with `kernel`.
pub fn convolve_rows(
    src: &ImageView<'_, f64>,
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
) -> Image<f64> {
    let mut dst = Image::new_fill(src.width(), src.height(), 0.0);
    for y in 0..src.height() {
        convolve_f64(src.row(y), kernel, radius, border, dst.row_mut(y));
    }
    dst
}

/// Convolves every column of `src` with `kernel`, gathering each column into
/// a contiguous scratch buffer.
pub fn convolve_cols(
    src: &ImageView<'_, f64>,
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
) -> Image<f64> {
    let (w, h) = (src.width(), src.height());
    let mut dst = Image::new_fill(w, h, 0.0);
    let mut col = vec![0.0; h];
    let mut resp = vec![0.0; h];

    for x in 0..w {
        for (y, c) in col.iter_mut().enumerate() {
            *c = src.row(y)[x];
        }
        convolve_f64(&col, kernel, radius, border, &mut resp);
        let data = dst.data_mut();
        for (y, &r) in resp.iter().enumerate() {
            data[y * w + x] = r;
        }
    }
    dst
}
