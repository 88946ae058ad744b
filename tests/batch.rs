use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;

use nalgebra::Vector3;
use ncd_aggregator::{
    CloudRole, EngineConfig, Placement, Sphere, SphereCloud, Trial, run_batch,
};

fn vascular() -> SphereCloud {
    SphereCloud::new(
        "v",
        CloudRole::Vascular,
        vec![Sphere::from_coords(0.0, 0.0, 0.0, 2.0)],
    )
}

fn neuron_library() -> HashMap<String, SphereCloud> {
    let mut lib = HashMap::new();
    lib.insert(
        "n".to_string(),
        SphereCloud::new(
            "n",
            CloudRole::Neuron,
            vec![Sphere::from_coords(0.0, 0.0, 0.0, 1.0)],
        ),
    );
    lib
}

#[allow(clippy::cast_precision_loss)]
fn trials(count: usize) -> Vec<Trial> {
    (0..count)
        .map(|i| Trial {
            neuron_id: "n".to_string(),
            vascular_id: "v".to_string(),
            placement: Placement::new(Vector3::new(i as f64, 0.0, 0.0), Vector3::zeros()),
            threshold_distance: 0.0,
        })
        .collect()
}

fn translation_x(line: &str) -> f64 {
    line.split(',')
        .nth(2)
        .and_then(|t| t.split(' ').next())
        .and_then(|x| x.parse().ok())
        .unwrap_or_else(|| panic!("bad line: {line}"))
}

#[test]
fn every_trial_runs_exactly_once_for_any_worker_count() {
    let vascular = vascular();
    let neurons = neuron_library();
    let trials = trials(100);

    for workers in 1..=13 {
        let config = EngineConfig {
            worker_count: workers,
            ..EngineConfig::default()
        };
        let mut out = Vec::new();
        let summary = run_batch(&vascular, &neurons, &trials, &config, &mut out).unwrap();
        assert_eq!(summary.trials, trials.len(), "workers = {workers}");

        let text = String::from_utf8(out).unwrap();
        let mut xs: Vec<f64> = text.lines().map(translation_x).collect();
        xs.sort_by(f64::total_cmp);
        let expected: Vec<f64> = (0..100).map(f64::from).collect();
        assert_eq!(xs, expected, "workers = {workers}");
    }
}

#[test]
fn file_sink_receives_whole_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .unwrap();

    let summary = run_batch(
        &vascular(),
        &neuron_library(),
        &trials(200),
        &EngineConfig {
            worker_count: 8,
            ..EngineConfig::default()
        },
        &mut file,
    )
    .unwrap();
    file.flush().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 200);

    // Concurrent workers must never interleave within a line: each one
    // still splits into the six record fields with a numeric count.
    let mut counted = 0usize;
    for line in &lines {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 6, "mangled line: {line}");
        counted += fields[4].parse::<usize>().unwrap();
    }
    assert_eq!(counted, summary.total_collisions);
}

#[test]
fn batches_against_the_same_clouds_are_independent() {
    let vascular = vascular();
    let neurons = neuron_library();
    let trials = trials(10);
    let config = EngineConfig::default();

    let mut first = Vec::new();
    let mut second = Vec::new();
    let a = run_batch(&vascular, &neurons, &trials, &config, &mut first).unwrap();
    let b = run_batch(&vascular, &neurons, &trials, &config, &mut second).unwrap();
    assert_eq!(a.trials, b.trials);
    assert_eq!(a.total_collisions, b.total_collisions);

    let mut fl: Vec<String> = String::from_utf8(first).unwrap().lines().map(str::to_string).collect();
    let mut sl: Vec<String> = String::from_utf8(second).unwrap().lines().map(str::to_string).collect();
    fl.sort();
    sl.sort();
    assert_eq!(fl, sl);
}
