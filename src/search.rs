use log::debug;
use nalgebra::Point3;

use crate::config::EngineConfig;
use crate::geometry::BoundingBox;
use crate::spheres_searcher::SpheresSearcher;
use crate::types::Sphere;

/// Reduce the vasculature to candidates near the placed neuron.
///
/// The neuron's bounding box is expanded by the baseline margin plus the
/// largest neuron radius and the collision threshold; each candidate is
/// then accepted against a further expansion by its own radius. A sphere
/// outside that bound cannot reach any neuron point, so the cut never
/// discards a true collision.
#[must_use]
pub fn cut_vascular(
    vascular: &[Sphere],
    placed_neuron: &[Sphere],
    config: &EngineConfig,
    threshold_distance: f64,
) -> Vec<Sphere> {
    let Some(bbox) = BoundingBox::from_spheres(placed_neuron) else {
        return Vec::new();
    };
    let max_neuron_r = placed_neuron.iter().fold(0.0_f64, |acc, s| acc.max(s.r));
    let base = bbox.expanded(config.bbox_margin + max_neuron_r + threshold_distance);

    let cut: Vec<Sphere> = vascular
        .iter()
        .filter(|v| base.expanded(v.r).contains(&v.center))
        .copied()
        .collect();
    debug!("cut vasculature {} -> {} candidates", vascular.len(), cut.len());
    cut
}

/// Centers of the vasculature spheres hit by the placed neuron, one per
/// colliding neuron point, in neuron-point order.
///
/// Each neuron point contributes at most one entry, the first hit the
/// index reports; overlap multiplicity is not counted.
#[must_use]
pub fn find_collisions(
    vascular_cut: &[Sphere],
    placed_neuron: &[Sphere],
    config: &EngineConfig,
    threshold_distance: f64,
) -> Vec<Point3<f64>> {
    let searcher = SpheresSearcher::new(vascular_cut, config.big_radius_threshold);
    let mut collisions = Vec::new();
    for n in placed_neuron {
        if let Some(idx) = searcher.find_first_hit(n, threshold_distance) {
            collisions.push(vascular_cut[idx].center);
        }
    }
    debug!(
        "{} of {} neuron points collide",
        collisions.len(),
        placed_neuron.len()
    );
    collisions
}
