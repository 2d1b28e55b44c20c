//! # Import Queue
//!
//! A single background worker that runs imports off the submitting
//! thread. One job in flight at a time: the caller submits a captured
//! configuration plus a seed, then blocks on the result channel.
//!
//! Submitting after the worker has gone away is the caller's bug and is
//! reported as [`ImportError::ExecutionContextMissing`], never a panic.

use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use rand::rngs::StdRng;
use rand::SeedableRng;

use terravox_import::{run_import, ImportConfig, ImportError, ImportResult, VoxelSelection};
use terravox_registry::BlockRegistry;

/// One unit of work for the worker.
struct Job {
    config: ImportConfig,
    seed: u64,
}

/// Handle to the background import worker.
pub struct ImportQueue {
    jobs: Option<Sender<Job>>,
    results: Receiver<ImportResult<VoxelSelection>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl ImportQueue {
    /// Spawns the worker thread. The registry moves into the worker and
    /// serves every job it runs.
    #[must_use]
    pub fn start(registry: BlockRegistry) -> Self {
        let (job_tx, job_rx) = bounded::<Job>(1);
        let (result_tx, result_rx) = bounded(1);

        let worker = thread::spawn(move || {
            while let Ok(job) = job_rx.recv() {
                let mut rng = StdRng::seed_from_u64(job.seed);
                let result = run_import(&job.config, &registry, &registry, &mut rng);
                if result_tx.send(result).is_err() {
                    // Caller dropped the handle, stop
                    break;
                }
            }
        });

        Self {
            jobs: Some(job_tx),
            results: result_rx,
            worker: Some(worker),
        }
    }

    /// Submits one import job.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::ExecutionContextMissing`] when the worker
    /// is no longer running.
    pub fn submit(&self, config: ImportConfig, seed: u64) -> ImportResult<()> {
        let Some(jobs) = &self.jobs else {
            return Err(ImportError::ExecutionContextMissing);
        };
        jobs.send(Job { config, seed })
            .map_err(|_| ImportError::ExecutionContextMissing)
    }

    /// Blocks until the submitted job finishes.
    ///
    /// # Errors
    ///
    /// Returns the job's own error, or
    /// [`ImportError::ExecutionContextMissing`] when the worker died
    /// before producing a result.
    pub fn recv(&self) -> ImportResult<VoxelSelection> {
        self.results
            .recv()
            .map_err(|_| ImportError::ExecutionContextMissing)?
    }

    /// Stops the worker and waits for it to exit.
    pub fn shutdown(mut self) {
        self.jobs = None;
        if let Some(worker) = self.worker.take() {
            // A worker that panicked already surfaced its problem
            worker.join().ok();
        }
    }
}

impl Drop for ImportQueue {
    fn drop(&mut self) {
        self.jobs = None;
        if let Some(worker) = self.worker.take() {
            worker.join().ok();
        }
    }
}
