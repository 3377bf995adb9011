//! Sweep execution: thread pool, worker-private model stacks, output.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Context, Result};
use ndarray::Array1;
use rayon::prelude::*;

use frix_core::SweepDescriptor;

use crate::config::JobFile;

/// Run the sweep described by a parameter file.
///
/// Every worker builds its own model stack by re-reading the same file, so
/// the numerically hot path shares nothing mutable. Results land in
/// disjoint slots addressed by sweep index; completion order is free.
pub fn run_sweep(params: &Path, threads: Option<usize>) -> Result<(SweepDescriptor, Array1<f64>)> {
    // fail fast: validate the file and the whole model stack up front
    let job = JobFile::load(params)
        .with_context(|| format!("invalid parameter file {}", params.display()))?;
    let sweep = job.sweep;

    let hardware = rayon::current_num_threads();
    let threads = threads.unwrap_or(hardware);
    if threads == 0 {
        bail!("at least one worker thread is required");
    }
    if threads > hardware {
        bail!(
            "requested {threads} threads but only {hardware} hardware threads are available; \
             aborting before any computation"
        );
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("failed to build worker pool")?;

    log::info!(
        "sweep of {} over {} points on {threads} thread(s)",
        sweep.kind(),
        sweep.len()
    );

    let total = sweep.len();
    let progress = AtomicUsize::new(0);
    let sweep_ref = &sweep;
    let results: std::result::Result<Vec<f64>, String> = pool.install(|| {
        (0..total)
            .into_par_iter()
            .map_init(
                // one private stack per worker, from a fresh read of the file
                || JobFile::load(params).map_err(|e| e.to_string()),
                |stack, index| {
                    let stack = stack.as_mut().map_err(|e| e.clone())?;
                    let value = sweep_ref.value(index);
                    sweep_ref.variable().apply(value, &mut stack.greens);
                    let force = stack
                        .friction
                        .calculate(&stack.greens, &stack.polarizability);
                    let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                    log::info!(
                        "step {index}: {} = {value:.6e} -> {force:.6e} ({done}/{total})",
                        sweep_ref.kind()
                    );
                    Ok(force)
                },
            )
            .collect()
    });
    let results = results.map_err(|e| anyhow::anyhow!(e))?;

    Ok((sweep, Array1::from_vec(results)))
}

/// Write the sweep results, one `step_value,computed_value` line per point
/// in ascending step order. Called only after the sweep has completed.
pub fn write_sweep_csv(path: &Path, sweep: &SweepDescriptor, results: &Array1<f64>) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = std::fs::File::create(path)?;
    for (value, result) in sweep.values().iter().zip(results.iter()) {
        writeln!(file, "{value},{result}")?;
    }
    Ok(())
}
