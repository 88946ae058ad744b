use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// A point with a radius, the atomic geometric unit for both neuron and
/// vasculature data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f64>,
    pub r: f64,
}

impl Sphere {
    #[must_use]
    pub const fn new(center: Point3<f64>, r: f64) -> Self {
        Self { center, r }
    }

    #[must_use]
    pub const fn from_coords(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self {
            center: Point3::new(x, y, z),
            r,
        }
    }
}

/// Which side of the collision a sphere cloud represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudRole {
    Vascular,
    Neuron,
}

/// An ordered sphere set tagged with an identity.
///
/// Order is insertion order at load time. Any re-ordering (e.g. the
/// searcher's sort by x) is internal and maps back to these indices.
#[derive(Debug, Clone)]
pub struct SphereCloud {
    pub id: String,
    pub role: CloudRole,
    pub spheres: Vec<Sphere>,
}

impl SphereCloud {
    #[must_use]
    pub fn new(id: impl Into<String>, role: CloudRole, spheres: Vec<Sphere>) -> Self {
        Self {
            id: id.into(),
            role,
            spheres,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Largest radius in the cloud, 0 for an empty cloud.
    #[must_use]
    pub fn max_radius(&self) -> f64 {
        self.spheres.iter().fold(0.0, |acc, s| acc.max(s.r))
    }
}

/// One candidate position of the neuron relative to the vasculature:
/// a translation plus per-axis Euler angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub translation: Vector3<f64>,
    /// Rotation angles in degrees, one per axis.
    pub rotation: Vector3<f64>,
}

impl Placement {
    #[must_use]
    pub const fn new(translation: Vector3<f64>, rotation: Vector3<f64>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Vector3::zeros(),
        }
    }
}

/// One placement to be evaluated for collisions. Consumed exactly once.
#[derive(Debug, Clone)]
pub struct Trial {
    pub neuron_id: String,
    pub vascular_id: String,
    pub placement: Placement,
    pub threshold_distance: f64,
}

/// The serialized result of one trial.
///
/// `collisions` holds the center of the matched vasculature sphere for each
/// neuron point that collided, in neuron-point iteration order. Never mutated
/// after creation.
#[derive(Debug, Clone)]
pub struct CollisionRecord {
    pub neuron_id: String,
    pub vascular_id: String,
    pub placement: Placement,
    pub collisions: Vec<Point3<f64>>,
}

impl CollisionRecord {
    #[must_use]
    pub fn collision_count(&self) -> usize {
        self.collisions.len()
    }

    /// Format as one output line:
    /// `<neuron_id>,<vascular_id>,<tx ty tz>,<rx ry rz>,<count>,<x y z>|<x y z>|...`
    ///
    /// An empty collision list yields a trailing empty field.
    #[must_use]
    pub fn to_line(&self) -> String {
        let t = self.placement.translation;
        let r = self.placement.rotation;
        let coords: Vec<String> = self
            .collisions
            .iter()
            .map(|p| format!("{} {} {}", p.x, p.y, p.z))
            .collect();
        format!(
            "{},{},{} {} {},{} {} {},{},{}",
            self.neuron_id,
            self.vascular_id,
            t.x,
            t.y,
            t.z,
            r.x,
            r.y,
            r.z,
            self.collisions.len(),
            coords.join("|")
        )
    }
}

/// Totals for one dispatched batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Number of trials that ran to completion.
    pub trials: usize,
    /// Sum of collision counts over all records.
    pub total_collisions: usize,
    pub elapsed_ms: u128,
}
