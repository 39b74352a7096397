//! Small vector helpers shared by the mesh and subdivision code.
//!
//! Positions are `Point3<f64>` and directions are `Vector3<f64>`; nalgebra
//! already provides the arithmetic. What lives here are the operations that
//! need a guard: normalizing a vector that may be zero, and averaging a set
//! that may be empty.

use nalgebra::{Point3, Vector3};

/// Vectors shorter than this are treated as zero when normalizing.
///
/// For face normals the same bound is applied relative to the edge lengths,
/// see [`face_normal`].
pub const NORMAL_EPSILON: f64 = 1e-12;

/// Normalize `v`, or `None` if it is (numerically) the zero vector.
#[inline]
pub fn try_normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    v.try_normalize(NORMAL_EPSILON)
}

/// Unweighted average of a set of points.
pub fn centroid<'a, It>(points: It) -> Option<Point3<f64>>
where
    It: IntoIterator<Item = &'a Point3<f64>>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(Point3::from(sum / count as f64))
    }
}

/// Midpoint of the segment `a`-`b`.
#[inline]
pub fn midpoint(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::from((a.coords + b.coords) * 0.5)
}

/// Unnormalized normal of the corner `p0 -> p1 -> p2`: `(p1 - p0) x (p2 - p1)`.
#[inline]
pub fn winding_normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    (p1 - p0).cross(&(p2 - p1))
}

/// Unit normal of the corner `p0 -> p1 -> p2`, or `None` if the two edges
/// are (numerically) parallel or of zero length.
///
/// The zero test is scale-free: the cross product is compared against
/// `NORMAL_EPSILON * |p1 - p0| * |p2 - p1|`, i.e. against the sine of the
/// corner angle, so a tiny but well-shaped face still gets a normal.
pub fn face_normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Option<Vector3<f64>> {
    let scale = (p1 - p0).norm() * (p2 - p1).norm();
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    let n = winding_normal(p0, p1, p2);
    let len = n.norm();
    if len <= NORMAL_EPSILON * scale {
        None
    } else {
        Some(n / len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_normalize_zero() {
        assert!(try_normalize(&Vector3::zeros()).is_none());
        let n = try_normalize(&Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert!((n - Vector3::new(0.0, 0.6, 0.8)).norm() < 1e-12);
    }

    #[test]
    fn test_centroid() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let c = centroid(&pts).unwrap();
        assert!((c - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        assert!(centroid(&[] as &[Point3<f64>]).is_none());
    }

    #[test]
    fn test_winding_normal_ccw() {
        let n = winding_normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(1.0, 1.0, 0.0),
        );
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_face_normal_is_scale_free() {
        for scale in [1e-9, 1e-3, 1.0, 1e6] {
            let n = face_normal(
                &Point3::new(0.0, 0.0, 0.0),
                &Point3::new(scale, 0.0, 0.0),
                &Point3::new(scale, scale, 0.0),
            )
            .unwrap();
            assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12, "scale {}", scale);
        }
    }

    #[test]
    fn test_face_normal_degenerate() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1e-8, 0.0, 0.0);
        let c = Point3::new(2e-8, 0.0, 0.0);
        assert!(face_normal(&a, &b, &c).is_none());
        assert!(face_normal(&a, &a, &c).is_none());
    }
}
