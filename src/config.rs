/// Tunable parameters for a batch run.
///
/// Defaults reproduce the calibrated production values; override through
/// the CLI or by constructing the struct directly in library use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Radius at or above which a vasculature sphere bypasses the sorted
    /// index and is checked exhaustively.
    pub big_radius_threshold: f64,
    /// Baseline expansion of the neuron bounding box when cutting the
    /// vasculature down to candidates.
    pub bbox_margin: f64,
    /// Worker threads used by the dispatcher.
    pub worker_count: usize,
    /// Surface gap at or below which two spheres count as colliding.
    pub threshold_distance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            big_radius_threshold: 3.0,
            bbox_margin: 5.0,
            worker_count: 20,
            threshold_distance: 0.0,
        }
    }
}
