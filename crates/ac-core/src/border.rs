/// Out-of-range index handling for convolution and sampling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BorderMode {
    #[default]
    Clamp,
    Constant(f64),
    Reflect101,
}

impl BorderMode {
    /// Maps a possibly out-of-range index into `[0, len)`.
    ///
    /// Returns `None` for `Constant` (the caller substitutes the fill value)
    /// and for empty axes.
    pub fn resolve(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }

        match self {
            Self::Constant(_) => None,
            Self::Clamp => Some(if i < 0 { 0 } else { len - 1 }),
            Self::Reflect101 => {
                if len == 1 {
                    return Some(0);
                }
                let period = (2 * len - 2) as isize;
                let r = i.rem_euclid(period) as usize;
                Some(if r < len { r } else { period as usize - r })
            }
        }
    }

    pub fn fill_value(&self) -> Option<f64> {
        match self {
            Self::Constant(v) => Some(*v),
            _ => None,
        }
    }
}
