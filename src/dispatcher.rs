use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Instant;

use log::info;
use rayon::prelude::*;

use crate::aggregator::run_trial;
use crate::config::EngineConfig;
use crate::types::{BatchSummary, CollisionRecord, SphereCloud, Trial};

/// Run a batch of trials across a fixed-size worker pool.
///
/// Trials are consumed from a shared work-stealing queue, so a slow trial
/// never idles the rest of the pool. Finished records flow through a
/// channel to `sink`, which only this thread writes; every line lands
/// whole, one per completed trial, in completion order.
pub fn run_batch<W: Write>(
    vascular: &SphereCloud,
    neurons: &HashMap<String, SphereCloud>,
    trials: &[Trial],
    config: &EngineConfig,
    sink: &mut W,
) -> io::Result<BatchSummary> {
    for trial in trials {
        if !neurons.contains_key(&trial.neuron_id) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("trial references unknown neuron '{}'", trial.neuron_id),
            ));
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .build()
        .map_err(io::Error::other)?;
    info!(
        "dispatching {} trials across {} workers",
        trials.len(),
        config.worker_count
    );

    let started = Instant::now();
    let (tx, rx) = mpsc::channel::<CollisionRecord>();
    let mut summary = BatchSummary::default();

    let written: io::Result<()> = std::thread::scope(|scope| {
        scope.spawn(move || {
            pool.install(|| {
                trials.par_iter().for_each_with(tx, |tx, trial| {
                    let neuron = &neurons[&trial.neuron_id];
                    let record = run_trial(vascular, neuron, trial, config);
                    // Fails only if the writer side already stopped.
                    let _ = tx.send(record);
                });
            });
        });
        for record in rx {
            sink.write_all(record.to_line().as_bytes())?;
            sink.write_all(b"\n")?;
            summary.trials += 1;
            summary.total_collisions += record.collision_count();
        }
        Ok(())
    });
    written?;
    sink.flush()?;

    summary.elapsed_ms = started.elapsed().as_millis();
    info!(
        "batch finished: {} trials, {} collisions, {} ms",
        summary.trials, summary.total_collisions, summary.elapsed_ms
    );
    Ok(summary)
}
