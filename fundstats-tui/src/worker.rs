//! Background worker thread — all recomputation runs here.
//!
//! Communication with the render loop is via `mpsc` channels. The worker
//! owns a private rayon::ThreadPool (not the global pool) and runs every
//! recomputation inside it.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use fundstats_pipeline::{DashboardUpdate, Pipeline, SelectionSnapshot};

/// Commands sent from the render loop to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Recompute(SelectionSnapshot),
    Shutdown,
}

/// Responses sent from the worker back to the render loop.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Updated {
        update: Box<DashboardUpdate>,
        /// Number of queued snapshots folded into this one.
        coalesced: usize,
        elapsed_ms: u128,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    pipeline: Pipeline,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("fundstats-worker".into())
        .spawn(move || {
            worker_loop(pipeline, rx, tx);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(pipeline: Pipeline, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    // Private pool: the metrics panel plus four charts is at most five tasks.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .thread_name(|i| format!("fundstats-pool-{i}"))
        .build()
        .expect("failed to build worker rayon pool");

    loop {
        let first = match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Recompute(snapshot)) => snapshot,
        };

        let batch = coalesce(first, rx.try_iter());
        let started = Instant::now();
        let update = pool.install(|| pipeline.recompute(&batch.snapshot));
        let response = WorkerResponse::Updated {
            update: Box::new(update),
            coalesced: batch.skipped,
            elapsed_ms: started.elapsed().as_millis(),
        };
        if tx.send(response).is_err() || batch.shutdown {
            break;
        }
    }
    log::debug!("worker: stopped");
}

/// The snapshot to compute after draining the queue.
#[derive(Debug, PartialEq)]
pub(crate) struct Batch {
    pub snapshot: SelectionSnapshot,
    pub skipped: usize,
    pub shutdown: bool,
}

/// Keep only the newest queued snapshot. Skipped snapshots widen its scope:
/// if any of them needed the charts, the survivor recomputes them too.
pub(crate) fn coalesce(
    first: SelectionSnapshot,
    queued: impl Iterator<Item = WorkerCommand>,
) -> Batch {
    let mut batch = Batch {
        snapshot: first,
        skipped: 0,
        shutdown: false,
    };
    for cmd in queued {
        match cmd {
            WorkerCommand::Recompute(next) => {
                let scope = batch.snapshot.scope.union(next.scope);
                batch.snapshot = SelectionSnapshot { scope, ..next };
                batch.skipped += 1;
            }
            WorkerCommand::Shutdown => {
                batch.shutdown = true;
                break;
            }
        }
    }
    if batch.skipped > 0 {
        log::debug!(
            "worker: coalesced {} snapshot(s) into gen {}",
            batch.skipped,
            batch.snapshot.generation
        );
    }
    batch
}
