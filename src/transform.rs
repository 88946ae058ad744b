use nalgebra::{Point3, Rotation3, Vector3};

use crate::types::{Placement, Sphere};

/// Exchange the x and y coordinates of a sphere center. Radius unchanged.
///
/// Neuron reconstructions and the vasculature scan use transposed first
/// axes; both sides pass through this swap before they can be compared.
#[inline]
#[must_use]
pub fn swap_axes(s: &Sphere) -> Sphere {
    Sphere::from_coords(s.center.y, s.center.x, s.center.z, s.r)
}

/// Combined rotation `Rx * Ry * Rz` from per-axis angles in degrees.
///
/// Applied to column vectors, so a point passes through the z rotation
/// first and the x rotation last.
#[must_use]
pub fn rotation_matrix(degrees: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), degrees.x.to_radians())
        * Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.y.to_radians())
        * Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.z.to_radians())
}

/// Rotate a point around the origin by per-axis angles in degrees.
#[inline]
#[must_use]
pub fn rotate(p: &Point3<f64>, degrees: &Vector3<f64>) -> Point3<f64> {
    rotation_matrix(degrees) * p
}

/// Undo [`rotate`] with the same angles.
#[inline]
#[must_use]
pub fn inverse_rotate(p: &Point3<f64>, degrees: &Vector3<f64>) -> Point3<f64> {
    rotation_matrix(degrees).inverse() * p
}

#[inline]
#[must_use]
pub fn translate(s: &Sphere, offset: &Vector3<f64>) -> Sphere {
    Sphere::new(s.center + offset, s.r)
}

/// Apply a placement to a neuron cloud: swap axes, rotate around the
/// origin, then translate. The rotation matrix is built once for the
/// whole cloud.
#[must_use]
pub fn place(spheres: &[Sphere], placement: &Placement) -> Vec<Sphere> {
    let rot = rotation_matrix(&placement.rotation);
    spheres
        .iter()
        .map(|s| {
            let swapped = swap_axes(s);
            Sphere::new(rot * swapped.center + placement.translation, swapped.r)
        })
        .collect()
}
