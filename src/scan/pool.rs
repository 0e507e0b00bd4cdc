//! Producer/worker scan mode.
//!
//! # Threads
//!
//! 1. **Walker** (scoped std thread): runs the shared [`walk`] and pushes
//!    file paths into a bounded `async_channel` queue. Backpressure blocks
//!    the walker, never the workers.
//! 2. **Workers** (rayon pool, `workers` threads): pull paths and run
//!    [`process_file`] independently.
//! 3. **Caller thread**: receives every outcome and walk error over one
//!    mpsc channel and applies it to the [`Aggregator`]. It is the only
//!    place results are mutated, so no lock guards them.
//!
//! # Abort
//!
//! When the aggregator raises the [`AbortSignal`], the walker stops
//! dispatching and workers drain the queue without processing. Work already
//! running finishes and is still aggregated before the caller sees the
//! error.

use rayon::ThreadPoolBuilder;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use tracing::{debug, warn};

use super::{process_file, walk, AbortSignal, Aggregator, FileOutcome, ScanContext, ScanStats, WalkItem};
use crate::diagnostics::ErrorRecord;
use crate::error::ScanError;

/// Queue slots per worker.
const QUEUE_DEPTH_PER_WORKER: usize = 64;

enum Message {
    Outcome(FileOutcome),
    WalkError(ErrorRecord),
}

/// Run the concurrent scan; returns the walker's counters.
pub(super) fn run(
    ctx: &ScanContext,
    workers: usize,
    signal: &AbortSignal,
    agg: &mut Aggregator<'_>,
) -> Result<ScanStats, ScanError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("linkeddoc-scan-{i}"))
        .build()?;
    let threads = pool.current_num_threads();
    debug!(threads, "starting scan worker pool");

    let (work_tx, work_rx) = async_channel::bounded::<PathBuf>(threads * QUEUE_DEPTH_PER_WORKER);
    let (msg_tx, msg_rx) = mpsc::channel::<Message>();

    let walk_stats = thread::scope(|s| {
        let walker_tx = msg_tx.clone();
        let walker = s.spawn(move || {
            walk(ctx, signal, |item| match item {
                WalkItem::File(path) => work_tx.send_blocking(path).is_ok(),
                WalkItem::Error(record) => walker_tx.send(Message::WalkError(record)).is_ok(),
            })
            // work_tx drops here and closes the queue
        });

        let worker_tx = msg_tx;
        s.spawn(move || {
            pool.scope(|scope| {
                for _ in 0..threads {
                    let rx = work_rx.clone();
                    let tx = worker_tx.clone();
                    scope.spawn(move |_| {
                        while let Ok(path) = rx.recv_blocking() {
                            if signal.is_set() {
                                continue;
                            }
                            if tx.send(Message::Outcome(process_file(ctx, &path))).is_err() {
                                break;
                            }
                        }
                    });
                }
            });
        });

        // Ends once the walker and every worker have dropped their senders.
        for message in msg_rx {
            match message {
                Message::Outcome(outcome) => agg.outcome(outcome),
                Message::WalkError(record) => agg.error(record),
            }
            ctx.check_deadline(signal);
        }

        walker.join().unwrap_or_else(|_| {
            warn!("scan walker thread panicked");
            ScanStats::default()
        })
    });

    Ok(walk_stats)
}
