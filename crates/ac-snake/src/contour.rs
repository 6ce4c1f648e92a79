use core::f64::consts::TAU;

use ac_core::{Error, Point2d, Vec2d};

/// Smallest point count the pentadiagonal stencil is defined for.
pub const MIN_POINTS: usize = 3;

/// Closed contour as an ordered, cyclic point sequence.
///
/// Index `n` wraps to `0`. An explicit duplicate closing point is allowed but
/// never required; the evolution treats the sequence as cyclic either way.
/// The point count is fixed once the contour exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point2d>,
}

impl Contour {
    pub fn new(points: Vec<Point2d>) -> Result<Self, Error> {
        if points.len() < MIN_POINTS {
            return Err(Error::InvalidPointCount {
                min: MIN_POINTS,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// `n` points on an axis-aligned ellipse at angles `2*pi*k/n`.
    pub fn ellipse(center: Point2d, rx: f64, ry: f64, n: usize) -> Result<Self, Error> {
        let step = TAU / n as f64;
        Self::new(
            (0..n)
                .map(|k| ellipse_point(center, rx, ry, k as f64 * step))
                .collect(),
        )
    }

    pub fn circle(center: Point2d, radius: f64, n: usize) -> Result<Self, Error> {
        Self::ellipse(center, radius, radius, n)
    }

    /// Samples the ellipse at `k*step` for every `k >= 0` with `k*step < 2*pi`.
    ///
    /// A step of `0.1` yields 63 points.
    pub fn ellipse_stepped(center: Point2d, rx: f64, ry: f64, step: f64) -> Result<Self, Error> {
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::InvalidParameter {
                name: "step",
                value: step,
            });
        }
        let points = (0u32..)
            .map(|k| k as f64 * step)
            .take_while(|&angle| angle < TAU)
            .map(|angle| ellipse_point(center, rx, ry, angle))
            .collect();
        Self::new(points)
    }

    /// Circle whose diameter is the segment `p1 p2`.
    pub fn circle_through(p1: Point2d, p2: Point2d, n: usize) -> Result<Self, Error> {
        Self::circle(p1.midpoint(p2), 0.5 * p1.distance(p2), n)
    }

    /// One [`Contour::circle_through`] per picked point and its cyclic
    /// successor.
    pub fn from_picked_points(picked: &[Point2d], n: usize) -> Result<Vec<Self>, Error> {
        let m = picked.len();
        (0..m)
            .map(|i| Self::circle_through(picked[i], picked[(i + 1) % m], n))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point2d> {
        self.points.iter()
    }

    /// Point at a cyclic index.
    pub fn at(&self, i: isize) -> Point2d {
        self.points[i.rem_euclid(self.len() as isize) as usize]
    }

    pub fn is_explicitly_closed(&self) -> bool {
        self.points.first() == self.points.last()
    }

    pub fn centroid(&self) -> Point2d {
        let mut acc = Vec2d::default();
        for p in &self.points {
            acc += p.to_vec();
        }
        let inv = 1.0 / self.len() as f64;
        Point2d::new(acc.x * inv, acc.y * inv)
    }

    /// Discrete internal energy
    /// `sum_i alpha*|p[i+1]-p[i]|^2 + beta*|p[i+1]-2p[i]+p[i-1]|^2`.
    pub fn internal_energy(&self, alpha: f64, beta: f64) -> f64 {
        let n = self.len() as isize;
        (0..n)
            .map(|i| {
                let prev = self.at(i - 1);
                let cur = self.at(i);
                let next = self.at(i + 1);
                let d1 = next - cur;
                let d2 = (next - cur) - (cur - prev);
                alpha * d1.norm_sq() + beta * d2.norm_sq()
            })
            .sum()
    }

    /// Replaces all points at once; the count must not change.
    pub(crate) fn replace_points(&mut self, points: Vec<Point2d>) {
        debug_assert_eq!(points.len(), self.points.len());
        self.points = points;
    }
}

fn ellipse_point(center: Point2d, rx: f64, ry: f64, angle: f64) -> Point2d {
    Point2d::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
}

#[cfg(test)]
mod tests {
    use core::f64::consts::TAU;

    use ac_core::{Error, Point2d};

    use super::Contour;

    #[test]
    fn rejects_fewer_than_three_points() {
        let err = Contour::new(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0)])
            .expect_err("two points");
        assert_eq!(err, Error::InvalidPointCount { min: 3, actual: 2 });
        assert!(err.is_invalid_parameter());
        assert!(Contour::circle(Point2d::default(), 1.0, 2).is_err());
    }

    #[test]
    fn stepped_ellipse_matches_reference_sampling() {
        let c = Contour::ellipse_stepped(Point2d::new(120.0, 140.0), 50.0, 60.0, 0.1)
            .expect("valid contour");
        assert_eq!(c.len(), 63);
        assert_eq!(c.points()[0], Point2d::new(170.0, 140.0));
        let last = c.points()[62];
        assert!((last.x - (120.0 + 50.0 * 6.2f64.cos())).abs() < 1e-12);
        assert!((last.y - (140.0 + 60.0 * 6.2f64.sin())).abs() < 1e-12);
        assert!(!c.is_explicitly_closed());

        assert!(Contour::ellipse_stepped(Point2d::default(), 1.0, 1.0, 0.0).is_err());
        // Steps this coarse leave too few samples.
        assert!(Contour::ellipse_stepped(Point2d::default(), 1.0, 1.0, 4.0).is_err());
    }

    #[test]
    fn circle_lies_on_radius() {
        let center = Point2d::new(10.0, -4.0);
        let c = Contour::circle(center, 7.5, 40).expect("valid contour");
        assert_eq!(c.len(), 40);
        for p in c.iter() {
            assert!((p.distance(center) - 7.5).abs() < 1e-12);
        }
        let g = c.centroid();
        assert!(g.distance(center) < 1e-12);
    }

    #[test]
    fn picked_points_make_one_circle_per_pair() {
        let picked = [
            Point2d::new(0.0, 0.0),
            Point2d::new(10.0, 0.0),
            Point2d::new(10.0, 10.0),
        ];
        let contours = Contour::from_picked_points(&picked, 16).expect("valid contours");
        assert_eq!(contours.len(), 3);

        let first = &contours[0];
        assert!(first.centroid().distance(Point2d::new(5.0, 0.0)) < 1e-9);
        assert!((first.points()[0].distance(Point2d::new(5.0, 0.0)) - 5.0).abs() < 1e-12);

        // The last pair wraps around to the first picked point.
        let wrap = &contours[2];
        assert!(wrap.centroid().distance(Point2d::new(5.0, 5.0)) < 1e-9);

        assert!(Contour::from_picked_points(&[], 16).expect("empty").is_empty());
    }

    #[test]
    fn cyclic_indexing_and_closure() {
        let pts = vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(0.0, 0.0),
        ];
        let c = Contour::new(pts).expect("valid contour");
        assert!(c.is_explicitly_closed());
        assert_eq!(c.at(-1), Point2d::new(0.0, 0.0));
        assert_eq!(c.at(5), Point2d::new(1.0, 0.0));
    }

    #[test]
    fn internal_energy_of_regular_polygon() {
        // For a regular n-gon of radius r every edge has length
        // 2r*sin(pi/n) and every second difference 4r*sin^2(pi/n).
        let (n, r) = (12usize, 3.0);
        let c = Contour::circle(Point2d::default(), r, n).expect("valid contour");
        let s = (TAU / (2.0 * n as f64)).sin();
        let edge = 2.0 * r * s;
        let bend = 4.0 * r * s * s;

        let tension = c.internal_energy(1.0, 0.0);
        let rigidity = c.internal_energy(0.0, 1.0);
        assert!((tension - n as f64 * edge * edge).abs() < 1e-9);
        assert!((rigidity - n as f64 * bend * bend).abs() < 1e-9);

        let flat = Contour::new(vec![Point2d::new(2.0, 2.0); 5]).expect("valid contour");
        assert_eq!(flat.internal_energy(0.3, 0.7), 0.0);
    }
}
