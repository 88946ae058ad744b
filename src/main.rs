//! CLI for running collision aggregation batches.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::info;
use nalgebra::Vector3;

use ncd_aggregator::input::{
    cloud_id, load_neuron_library, load_placements, load_raw_results, load_sphere_cloud,
    load_vascular,
};
use ncd_aggregator::{CloudRole, EngineConfig, Trial, run_batch};

#[derive(Parser)]
#[command(name = "ncd-aggregator")]
#[command(about = "Detect collisions between placed neurons and a vasculature sphere cloud")]
#[command(
    long_about = "Runs batches of placement trials: for each candidate position and \
    orientation of a neuron sphere cloud, finds the neuron points touching the \
    vasculature and appends one result line per trial.\n\n\
    Trials come either from a placement list applied to one neuron, or from raw \
    collision-scan output naming many neurons."
)]
struct Cli {
    /// Vasculature sphere cloud (x,y,z,r per line)
    #[arg(long)]
    vascular: PathBuf,

    /// Neuron sphere cloud used for every trial of a placement list
    #[arg(long, conflicts_with = "neuron_dir")]
    neuron: Option<PathBuf>,

    /// Directory of neuron sphere clouds for raw-result batches
    #[arg(long)]
    neuron_dir: Option<PathBuf>,

    /// Placement list (tx,ty,tz,rx,ry,rz per line), one trial per row
    #[arg(long, conflicts_with = "raw_results")]
    placements: Option<PathBuf>,

    /// Raw collision-scan output to re-aggregate
    #[arg(long)]
    raw_results: Option<PathBuf>,

    /// Keep raw trials with at most this many previously counted collisions
    #[arg(long, default_value_t = 0)]
    max_collisions: u64,

    /// Surface gap at or below which spheres count as colliding
    #[arg(long, default_value_t = 0.0)]
    threshold: f64,

    /// Append result lines to this file. Writes to stdout if not specified
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads for the batch
    #[arg(long, default_value_t = 20)]
    workers: usize,

    /// Radius at or above which a vasculature sphere is indexed as big
    #[arg(long, default_value_t = 3.0)]
    big_radius: f64,

    /// Baseline bounding-box margin for the vasculature cut
    #[arg(long, default_value_t = 5.0)]
    margin: f64,

    /// Calibrate the vasculature into the neuron frame: translate by X Y Z,
    /// then swap the x and y axes
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    calibrate_vascular: Option<Vec<f64>>,

    /// Write a JSON batch summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Increase verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Reduce verbosity to warnings only
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = EngineConfig {
        big_radius_threshold: cli.big_radius,
        bbox_margin: cli.margin,
        worker_count: cli.workers,
        threshold_distance: cli.threshold,
    };

    let calibration = cli
        .calibrate_vascular
        .as_ref()
        .map(|c| Vector3::new(c[0], c[1], c[2]));
    let vascular = load_vascular(&cli.vascular, calibration)?;
    let vascular_id = vascular.id.clone();

    let (neurons, trials) = match (&cli.placements, &cli.raw_results) {
        (Some(placements_path), None) => {
            let neuron_path = cli.neuron.as_ref().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "--placements requires --neuron")
            })?;
            let neuron = load_sphere_cloud(neuron_path, cloud_id(neuron_path), CloudRole::Neuron)?;
            let neuron_id = neuron.id.clone();
            let trials: Vec<Trial> = load_placements(placements_path)?
                .into_iter()
                .map(|placement| Trial {
                    neuron_id: neuron_id.clone(),
                    vascular_id: vascular_id.clone(),
                    placement,
                    threshold_distance: cli.threshold,
                })
                .collect();
            (HashMap::from([(neuron_id, neuron)]), trials)
        }
        (None, Some(raw_path)) => {
            let dir = cli.neuron_dir.as_ref().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "--raw-results requires --neuron-dir",
                )
            })?;
            let results = load_raw_results(raw_path, cli.max_collisions)?;
            let neurons =
                load_neuron_library(dir, results.iter().map(|r| r.neuron_name.as_str()))?;
            let trials: Vec<Trial> = results
                .into_iter()
                .map(|r| Trial {
                    neuron_id: r.neuron_name,
                    vascular_id: vascular_id.clone(),
                    placement: r.placement,
                    threshold_distance: cli.threshold,
                })
                .collect();
            (neurons, trials)
        }
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "exactly one of --placements or --raw-results is required",
            ));
        }
    };

    let mut sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(OpenOptions::new().create(true).append(true).open(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let summary = run_batch(&vascular, &neurons, &trials, &config, &mut sink)?;

    info!(
        "{} trials, {} collisions, {} ms",
        summary.trials, summary.total_collisions, summary.elapsed_ms
    );

    if let Some(path) = &cli.summary {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &summary)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_engine_defaults() {
        let cli = Cli::try_parse_from([
            "ncd-aggregator",
            "--vascular",
            "v.csv",
            "--neuron",
            "n.csv",
            "--placements",
            "p.csv",
        ])
        .unwrap();
        let defaults = EngineConfig::default();
        assert_eq!(cli.workers, defaults.worker_count);
        assert_eq!(cli.big_radius, defaults.big_radius_threshold);
        assert_eq!(cli.margin, defaults.bbox_margin);
        assert_eq!(cli.threshold, defaults.threshold_distance);
    }

    #[test]
    fn placement_and_raw_result_modes_conflict() {
        let parsed = Cli::try_parse_from([
            "ncd-aggregator",
            "--vascular",
            "v.csv",
            "--placements",
            "p.csv",
            "--raw-results",
            "r.csv",
        ]);
        assert!(parsed.is_err());
    }
}
