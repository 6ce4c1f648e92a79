use core::ops::{Add, AddAssign, Mul, Sub};

/// Position in pixel-centre coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).norm()
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: 0.5 * (self.x + other.x),
            y: 0.5 * (self.y + other.y),
        }
    }

    pub fn to_vec(self) -> Vec2d {
        Vec2d {
            x: self.x,
            y: self.y,
        }
    }
}

impl Vec2d {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn norm_sq(self) -> f64 {
        self.dot(self)
    }

    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }
}

impl Add<Vec2d> for Point2d {
    type Output = Point2d;

    fn add(self, rhs: Vec2d) -> Self::Output {
        Point2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub<Point2d> for Point2d {
    type Output = Vec2d;

    fn sub(self, rhs: Point2d) -> Self::Output {
        Vec2d {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Add for Vec2d {
    type Output = Vec2d;

    fn add(self, rhs: Vec2d) -> Self::Output {
        Vec2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Vec2d {
    fn add_assign(&mut self, rhs: Vec2d) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2d {
    type Output = Vec2d;

    fn sub(self, rhs: Vec2d) -> Self::Output {
        Vec2d {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Vec2d {
    type Output = Vec2d;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec2d {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point2d, Vec2d};

    #[test]
    fn vec_ops() {
        let a = Vec2d::new(3.0, 4.0);
        let b = Vec2d::new(1.0, -2.0);

        assert_eq!(a + b, Vec2d::new(4.0, 2.0));
        assert_eq!(a - b, Vec2d::new(2.0, 6.0));
        assert_eq!(a * 2.0, Vec2d::new(6.0, 8.0));
        assert!((a.dot(b) + 5.0).abs() < 1e-12);
        assert!((a.norm() - 5.0).abs() < 1e-12);

        let mut acc = Vec2d::default();
        acc += a;
        acc += b;
        assert_eq!(acc, Vec2d::new(4.0, 2.0));
    }

    #[test]
    fn point_ops() {
        let p = Point2d::new(2.0, 3.0);
        let q = Point2d::new(6.0, 6.0);

        assert_eq!(p + Vec2d::new(0.5, -1.0), Point2d::new(2.5, 2.0));
        assert_eq!(q - p, Vec2d::new(4.0, 3.0));
        assert!((p.distance(q) - 5.0).abs() < 1e-12);
        assert_eq!(p.midpoint(q), Point2d::new(4.0, 4.5));
    }
}
