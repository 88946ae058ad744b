use log::debug;

use crate::config::EngineConfig;
use crate::search::{cut_vascular, find_collisions};
use crate::transform::place;
use crate::types::{CollisionRecord, SphereCloud, Trial};

/// Run one placement trial end to end.
///
/// The neuron passes through axis swap, rotation, and translation, the
/// vasculature is cut to the neighborhood of the placed neuron, and the
/// collision search runs over the cut. The input clouds are never
/// modified; repeated trials against the same clouds are independent.
#[must_use]
pub fn run_trial(
    vascular: &SphereCloud,
    neuron: &SphereCloud,
    trial: &Trial,
    config: &EngineConfig,
) -> CollisionRecord {
    let placed = place(&neuron.spheres, &trial.placement);
    let cut = cut_vascular(&vascular.spheres, &placed, config, trial.threshold_distance);
    let collisions = find_collisions(&cut, &placed, config, trial.threshold_distance);
    debug!(
        "trial {} vs {}: {} collisions",
        trial.neuron_id,
        trial.vascular_id,
        collisions.len()
    );
    CollisionRecord {
        neuron_id: trial.neuron_id.clone(),
        vascular_id: trial.vascular_id.clone(),
        placement: trial.placement,
        collisions,
    }
}
