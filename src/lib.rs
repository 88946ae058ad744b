//! Collision aggregation engine for neuron and vasculature sphere clouds.
//!
//! Given a vasculature sphere cloud and a neuron sphere cloud placed at a
//! candidate position and orientation, the engine reports which neuron
//! points touch the vasculature. Batches of placements run across a fixed
//! worker pool and append one result line per trial to an output sink.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector3;
//! use ncd_aggregator::{
//!     CloudRole, EngineConfig, Placement, Sphere, SphereCloud, Trial, run_trial,
//! };
//!
//! let vascular = SphereCloud::new(
//!     "vascular.csv",
//!     CloudRole::Vascular,
//!     vec![Sphere::from_coords(0.0, 0.0, 0.0, 2.0)],
//! );
//! let neuron = SphereCloud::new(
//!     "neuron.csv",
//!     CloudRole::Neuron,
//!     vec![Sphere::from_coords(0.0, 0.0, 0.0, 1.0)],
//! );
//! let trial = Trial {
//!     neuron_id: "neuron.csv".to_string(),
//!     vascular_id: "vascular.csv".to_string(),
//!     placement: Placement::new(Vector3::new(1.0, 0.0, 0.0), Vector3::zeros()),
//!     threshold_distance: 0.0,
//! };
//!
//! let record = run_trial(&vascular, &neuron, &trial, &EngineConfig::default());
//! assert_eq!(record.collision_count(), 1);
//! ```

pub mod aggregator;
pub mod config;
pub mod dispatcher;
pub mod geometry;
pub mod input;
pub mod search;
pub mod spheres_searcher;
pub mod transform;
pub mod types;

pub use aggregator::run_trial;
pub use config::EngineConfig;
pub use dispatcher::run_batch;
pub use types::{BatchSummary, CloudRole, CollisionRecord, Placement, Sphere, SphereCloud, Trial};
