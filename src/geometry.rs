use nalgebra::Point3;

use crate::types::Sphere;

/// Inflated sphere-sphere intersection test.
///
/// Two spheres collide when the gap between their surfaces is at most
/// `threshold_distance` (0 means true geometric touching or overlap). The
/// per-axis check rejects the common non-colliding case without a square
/// root.
#[inline]
#[must_use]
pub fn collides(a: &Sphere, b: &Sphere, threshold_distance: f64) -> bool {
    let rsum = a.r + b.r + threshold_distance;
    if (a.center.x - b.center.x).abs() > rsum {
        return false;
    }
    if (a.center.y - b.center.y).abs() > rsum {
        return false;
    }
    if (a.center.z - b.center.z).abs() > rsum {
        return false;
    }
    (b.center - a.center).norm_squared() <= rsum * rsum
}

/// Axis-aligned bounding box over sphere centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Bounding box of the centers of `spheres`, `None` for an empty slice.
    #[must_use]
    pub fn from_spheres(spheres: &[Sphere]) -> Option<Self> {
        let first = spheres.first()?;
        let mut bbox = Self {
            min: first.center,
            max: first.center,
        };
        for s in &spheres[1..] {
            bbox.min.x = bbox.min.x.min(s.center.x);
            bbox.min.y = bbox.min.y.min(s.center.y);
            bbox.min.z = bbox.min.z.min(s.center.z);
            bbox.max.x = bbox.max.x.max(s.center.x);
            bbox.max.y = bbox.max.y.max(s.center.y);
            bbox.max.z = bbox.max.z.max(s.center.z);
        }
        Some(bbox)
    }

    /// Grow the box by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point3::new(self.min.x - margin, self.min.y - margin, self.min.z - margin),
            max: Point3::new(self.max.x + margin, self.max.y + margin, self.max.z + margin),
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_spheres_collide_at_zero_threshold() {
        let a = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let b = Sphere::from_coords(2.0, 0.0, 0.0, 1.0);
        assert!(collides(&a, &b, 0.0));

        let c = Sphere::from_coords(2.1, 0.0, 0.0, 1.0);
        assert!(!collides(&a, &c, 0.0));
    }

    #[test]
    fn threshold_bridges_the_gap() {
        let a = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let b = Sphere::from_coords(2.5, 0.0, 0.0, 1.0);
        assert!(!collides(&a, &b, 0.0));
        assert!(collides(&a, &b, 0.5));
    }

    #[test]
    fn collision_is_symmetric() {
        let cases = [
            (
                Sphere::from_coords(0.0, 0.0, 0.0, 1.0),
                Sphere::from_coords(1.0, 1.0, 1.0, 0.5),
            ),
            (
                Sphere::from_coords(-3.0, 2.0, 7.0, 2.0),
                Sphere::from_coords(4.0, -1.0, 6.5, 0.1),
            ),
            (
                Sphere::from_coords(0.0, 0.0, 0.0, 0.0),
                Sphere::from_coords(0.0, 0.0, 0.0, 0.0),
            ),
        ];
        for threshold in [0.0, 0.5, 10.0] {
            for (a, b) in &cases {
                assert_eq!(collides(a, b, threshold), collides(b, a, threshold));
            }
        }
    }

    #[test]
    fn larger_threshold_never_loses_a_collision() {
        let a = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let b = Sphere::from_coords(3.0, 1.0, 0.0, 1.0);
        for t1 in [0.0, 0.5, 1.0, 2.0] {
            if collides(&a, &b, t1) {
                for t2 in [t1 + 0.1, t1 + 1.0, t1 + 100.0] {
                    assert!(collides(&a, &b, t2));
                }
            }
        }
    }

    #[test]
    fn diagonal_gap_passes_axis_check_but_not_distance() {
        // Per-axis differences are each below rsum but the Euclidean
        // distance is not.
        let a = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let b = Sphere::from_coords(1.9, 1.9, 1.9, 1.0);
        assert!(!collides(&a, &b, 0.0));
    }

    #[test]
    fn bbox_covers_all_centers() {
        let spheres = [
            Sphere::from_coords(1.0, 5.0, -2.0, 1.0),
            Sphere::from_coords(-3.0, 2.0, 4.0, 0.5),
            Sphere::from_coords(0.0, 9.0, 0.0, 2.0),
        ];
        let bbox = BoundingBox::from_spheres(&spheres).unwrap();
        assert_eq!(bbox.min, Point3::new(-3.0, 2.0, -2.0));
        assert_eq!(bbox.max, Point3::new(1.0, 9.0, 4.0));
        for s in &spheres {
            assert!(bbox.contains(&s.center));
        }
    }

    #[test]
    fn bbox_of_empty_slice_is_none() {
        assert!(BoundingBox::from_spheres(&[]).is_none());
    }

    #[test]
    fn expanded_bbox_grows_every_side() {
        let bbox = BoundingBox::from_spheres(&[Sphere::from_coords(0.0, 0.0, 0.0, 1.0)])
            .unwrap()
            .expanded(5.0);
        assert_eq!(bbox.min, Point3::new(-5.0, -5.0, -5.0));
        assert_eq!(bbox.max, Point3::new(5.0, 5.0, 5.0));
    }
}
