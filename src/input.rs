use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};
use nalgebra::Vector3;

use crate::transform::{swap_axes, translate};
use crate::types::{CloudRole, Placement, Sphere, SphereCloud};

fn invalid_data(label: &str, line_no: usize, msg: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{label}:{line_no}: {msg}"),
    )
}

fn parse_field(field: &str, label: &str, line_no: usize) -> io::Result<f64> {
    field
        .trim()
        .parse()
        .map_err(|_| invalid_data(label, line_no, &format!("non-numeric field '{}'", field.trim())))
}

/// Parse `x,y,z,r` sphere records. Blank lines are allowed; anything else
/// malformed is fatal.
pub fn parse_spheres<R: BufRead>(reader: R, label: &str) -> io::Result<Vec<Sphere>> {
    let mut spheres = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return Err(invalid_data(
                label,
                line_no,
                &format!("expected 4 fields, found {}", fields.len()),
            ));
        }
        let x = parse_field(fields[0], label, line_no)?;
        let y = parse_field(fields[1], label, line_no)?;
        let z = parse_field(fields[2], label, line_no)?;
        let r = parse_field(fields[3], label, line_no)?;
        spheres.push(Sphere::from_coords(x, y, z, r));
    }
    Ok(spheres)
}

/// Load a sphere cloud from a CSV file.
pub fn load_sphere_cloud(
    path: &Path,
    id: impl Into<String>,
    role: CloudRole,
) -> io::Result<SphereCloud> {
    let file = File::open(path)?;
    let spheres = parse_spheres(BufReader::new(file), &path.display().to_string())?;
    let cloud = SphereCloud::new(id, role, spheres);
    info!("loaded {} spheres from {}", cloud.len(), path.display());
    Ok(cloud)
}

/// Load the vasculature, optionally calibrating it into the neuron frame:
/// a fixed translation followed by the x/y axis swap, applied once here so
/// trials see the cloud ready to query.
pub fn load_vascular(path: &Path, calibration: Option<Vector3<f64>>) -> io::Result<SphereCloud> {
    let id = cloud_id(path);
    let mut cloud = load_sphere_cloud(path, id, CloudRole::Vascular)?;
    if let Some(offset) = calibration {
        for s in &mut cloud.spheres {
            *s = swap_axes(&translate(s, &offset));
        }
        debug!("calibrated vasculature by {offset:?} with axis swap");
    }
    Ok(cloud)
}

/// Cloud identity from a path: the file name, as the scan pipeline names
/// its exports.
#[must_use]
pub fn cloud_id(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Parse `tx,ty,tz,rx,ry,rz` placement records. Strict like sphere data.
pub fn parse_placements<R: BufRead>(reader: R, label: &str) -> io::Result<Vec<Placement>> {
    let mut placements = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 6 {
            return Err(invalid_data(
                label,
                line_no,
                &format!("expected 6 fields, found {}", fields.len()),
            ));
        }
        let mut values = [0.0; 6];
        for (v, f) in values.iter_mut().zip(fields.iter().copied()) {
            *v = parse_field(f, label, line_no)?;
        }
        placements.push(Placement::new(
            Vector3::new(values[0], values[1], values[2]),
            Vector3::new(values[3], values[4], values[5]),
        ));
    }
    Ok(placements)
}

pub fn load_placements(path: &Path) -> io::Result<Vec<Placement>> {
    let file = File::open(path)?;
    let placements = parse_placements(BufReader::new(file), &path.display().to_string())?;
    info!("loaded {} placements from {}", placements.len(), path.display());
    Ok(placements)
}

/// One kept line of a raw collision-scan output: the neuron it names and
/// the placement to re-aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResult {
    pub neuron_name: String,
    pub placement: Placement,
}

/// Parse raw scan output `neuron_name,x,y,z,rx,ry,rz,count,...`, keeping
/// lines whose collision count is at most `max_collisions`.
///
/// Lines with too few fields are silently skipped; this input is produced
/// by an external scanner and carries headers and partial lines. Numeric
/// fields on a kept line are still strict.
pub fn parse_raw_results<R: BufRead>(
    reader: R,
    label: &str,
    max_collisions: u64,
) -> io::Result<Vec<RawResult>> {
    let mut results = Vec::new();
    let mut skipped = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 8 {
            skipped += 1;
            continue;
        }
        let count: u64 = fields[7].trim().parse().map_err(|_| {
            invalid_data(
                label,
                line_no,
                &format!("non-integer collision count '{}'", fields[7].trim()),
            )
        })?;
        if count > max_collisions {
            continue;
        }
        let mut values = [0.0; 6];
        for (v, f) in values.iter_mut().zip(fields[1..7].iter().copied()) {
            *v = parse_field(f, label, line_no)?;
        }
        results.push(RawResult {
            neuron_name: fields[0].trim().to_string(),
            placement: Placement::new(
                Vector3::new(values[0], values[1], values[2]),
                Vector3::new(values[3], values[4], values[5]),
            ),
        });
    }
    debug!("{skipped} short lines skipped");
    Ok(results)
}

pub fn load_raw_results(path: &Path, max_collisions: u64) -> io::Result<Vec<RawResult>> {
    let file = File::open(path)?;
    let results = parse_raw_results(
        BufReader::new(file),
        &path.display().to_string(),
        max_collisions,
    )?;
    info!(
        "kept {} trials from raw results {}",
        results.len(),
        path.display()
    );
    Ok(results)
}

/// Resolve a raw-result neuron name inside the neuron directory. The name
/// may be the sphere export itself or the mesh name the scanner used, in
/// which case the `<stem>_balls.csv` export convention applies.
#[must_use]
pub fn resolve_neuron_path(dir: &Path, name: &str) -> PathBuf {
    let direct = dir.join(name);
    if direct.is_file() {
        return direct;
    }
    let stem = name.strip_suffix(".obj").unwrap_or(name);
    dir.join(format!("{stem}_balls.csv"))
}

/// Load every neuron named in `names`, one file read per distinct name.
pub fn load_neuron_library<'a, I>(dir: &Path, names: I) -> io::Result<HashMap<String, SphereCloud>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut library = HashMap::new();
    for name in names {
        if library.contains_key(name) {
            continue;
        }
        let path = resolve_neuron_path(dir, name);
        let cloud = load_sphere_cloud(&path, name, CloudRole::Neuron)?;
        library.insert(name.to_string(), cloud);
    }
    info!("loaded {} neurons from {}", library.len(), dir.display());
    Ok(library)
}
