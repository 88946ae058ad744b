use crate::geometry::collides;
use crate::types::Sphere;

/// Spatial index over a vasculature cloud for first-hit collision queries.
///
/// Spheres at or above the big-radius threshold form a short list that is
/// scanned exhaustively. The rest are sorted by center x, so a query can
/// bisect to its x position and walk outward only while the x gap still
/// permits a collision. Each stored sphere keeps its index into the input
/// cloud, so results always refer to the caller's ordering.
pub struct SpheresSearcher {
    /// Sorted ascending by center x.
    small: Vec<(Sphere, usize)>,
    /// Input order. Expected to stay short relative to `small`.
    big: Vec<(Sphere, usize)>,
    big_radius_threshold: f64,
}

impl SpheresSearcher {
    #[must_use]
    pub fn new(spheres: &[Sphere], big_radius_threshold: f64) -> Self {
        let mut small = Vec::new();
        let mut big = Vec::new();
        for (i, s) in spheres.iter().enumerate() {
            if s.r < big_radius_threshold {
                small.push((*s, i));
            } else {
                big.push((*s, i));
            }
        }
        small.sort_by(|a, b| a.0.center.x.total_cmp(&b.0.center.x));
        Self {
            small,
            big,
            big_radius_threshold,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.small.len() + self.big.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.small.is_empty() && self.big.is_empty()
    }

    #[must_use]
    pub fn big_count(&self) -> usize {
        self.big.len()
    }

    /// Index of the first indexed sphere colliding with `query`, into the
    /// cloud the searcher was built from, or `None` when nothing collides.
    ///
    /// Big spheres are checked before the sorted walk. Every small sphere
    /// has radius below the big-radius threshold, so once the x gap reaches
    /// `big_radius_threshold + query.r + threshold_distance` the per-axis
    /// reject in [`collides`] is guaranteed to fire and the walk can stop.
    #[must_use]
    pub fn find_first_hit(&self, query: &Sphere, threshold_distance: f64) -> Option<usize> {
        for (s, idx) in &self.big {
            if collides(query, s, threshold_distance) {
                return Some(*idx);
            }
        }

        let max_x_gap = self.big_radius_threshold + query.r + threshold_distance;
        let base = self
            .small
            .partition_point(|(s, _)| s.center.x <= query.center.x);

        for (s, idx) in &self.small[base..] {
            if (s.center.x - query.center.x).abs() >= max_x_gap {
                break;
            }
            if collides(query, s, threshold_distance) {
                return Some(*idx);
            }
        }
        for (s, idx) in self.small[..base].iter().rev() {
            if (s.center.x - query.center.x).abs() >= max_x_gap {
                break;
            }
            if collides(query, s, threshold_distance) {
                return Some(*idx);
            }
        }
        None
    }
}
