//! Background column-batch generation over a worker pool.
//!
//! Offloads CPU-intensive generation to background threads: one task
//! produces a full chunk of columns against a frozen generator, supports
//! per-chunk cancellation, and delivers results via bounded channels.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;
use strata_voxel::{CHUNK_SIZE, ChunkBlocks};

use crate::generator::Generator;

/// A request to generate one chunk of columns.
#[derive(Clone, Debug)]
pub struct BatchTask {
    /// Chunk coordinates; world x/z = chunk coordinate * `CHUNK_SIZE`.
    pub chunk_x: i32,
    pub chunk_z: i32,
    /// The frozen generator to sample. Freezing happens on first use if the
    /// caller has not generated anything yet.
    pub generator: Arc<Generator>,
    /// Lower values should be generated first; typically squared distance
    /// to the viewer. Informational — the queue does not reorder.
    pub priority: u64,
}

/// A completed chunk of columns.
pub struct GeneratedBatch {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub blocks: ChunkBlocks,
    /// Generation time in microseconds, for profiling.
    pub generation_time_us: u64,
}

struct PendingBatch {
    task: BatchTask,
    cancelled: Arc<AtomicBool>,
}

/// Manages asynchronous column-batch generation across a thread pool.
pub struct ColumnBatchGenerator {
    task_sender: Sender<PendingBatch>,
    /// Kept alive so the queue stays connected and `submit` reports a full
    /// queue rather than a disconnect, whatever the worker count.
    task_receiver: Receiver<PendingBatch>,
    result_receiver: Receiver<GeneratedBatch>,
    /// Cancellation flag per in-flight chunk, keyed by chunk coordinates.
    active: Arc<DashMap<(i32, i32), Arc<AtomicBool>>>,
    in_flight: Arc<AtomicU64>,
}

impl ColumnBatchGenerator {
    /// Creates a pool with `thread_count` workers, at most `max_concurrent`
    /// queued tasks, and a result channel of `result_capacity`.
    pub fn new(thread_count: usize, max_concurrent: usize, result_capacity: usize) -> Self {
        let (task_sender, task_receiver) = bounded::<PendingBatch>(max_concurrent);
        let (result_sender, result_receiver) = bounded::<GeneratedBatch>(result_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);

            std::thread::Builder::new()
                .name("column-gen-worker".into())
                .spawn(move || {
                    while let Ok(pending) = receiver.recv() {
                        if pending.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = std::time::Instant::now();
                        let blocks =
                            generate_batch_sync(&pending.task.generator, pending.task.chunk_x, pending.task.chunk_z);
                        let elapsed = start.elapsed().as_micros() as u64;

                        if !pending.cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(GeneratedBatch {
                                chunk_x: pending.task.chunk_x,
                                chunk_z: pending.task.chunk_z,
                                blocks,
                                generation_time_us: elapsed,
                            });
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("Failed to spawn column generation worker thread");
        }

        Self {
            task_sender,
            task_receiver,
            result_receiver,
            active: Arc::new(DashMap::new()),
            in_flight,
        }
    }

    /// Creates a pool sized from the CPU count, leaving headroom for the
    /// main thread.
    pub fn with_defaults() -> Self {
        let cpus = num_cpus::get().max(2);
        Self::new((cpus - 1).max(1), 64, 128)
    }

    /// Submits a chunk for background generation.
    ///
    /// Returns `Ok(())` if queued, or `Err(task)` if the queue is full.
    #[allow(clippy::result_large_err)]
    pub fn submit(&self, task: BatchTask) -> Result<(), BatchTask> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let key = (task.chunk_x, task.chunk_z);
        self.active.insert(key, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        let pending = PendingBatch {
            task: task.clone(),
            cancelled,
        };
        self.task_sender.try_send(pending).map_err(|_| {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            self.active.remove(&key);
            task
        })
    }

    /// Cancels a pending or in-progress chunk. Already-completed chunks are
    /// unaffected.
    pub fn cancel(&self, chunk_x: i32, chunk_z: i32) {
        if let Some((_, cancelled)) = self.active.remove(&(chunk_x, chunk_z)) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Drains all completed chunks from the result channel.
    pub fn drain_results(&self) -> Vec<GeneratedBatch> {
        let mut results = Vec::new();
        while let Ok(batch) = self.result_receiver.try_recv() {
            self.active.remove(&(batch.chunk_x, batch.chunk_z));
            results.push(batch);
        }
        results
    }

    /// Number of tasks currently queued or executing.
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Number of tasks waiting in the queue, not yet picked up by a worker.
    pub fn queued_count(&self) -> usize {
        self.task_receiver.len()
    }

    /// Returns `true` if a task for the chunk is currently pending.
    pub fn is_pending(&self, chunk_x: i32, chunk_z: i32) -> bool {
        self.active.contains_key(&(chunk_x, chunk_z))
    }
}

/// Generates one chunk of columns synchronously. This is the CPU-intensive
/// function that runs on worker threads.
pub fn generate_batch_sync(generator: &Generator, chunk_x: i32, chunk_z: i32) -> ChunkBlocks {
    let base_x = chunk_x * CHUNK_SIZE as i32;
    let base_z = chunk_z * CHUNK_SIZE as i32;

    let mut chunk = ChunkBlocks::new_air();
    for local_z in 0..CHUNK_SIZE {
        for local_x in 0..CHUNK_SIZE {
            let column =
                generator.generate_column(base_x + local_x as i32, base_z + local_z as i32);
            *chunk.column_mut(local_x, local_z) = column;
        }
    }
    chunk
}
