//! A bounded pool of long-lived worker threads draining a shared job queue.
//!
//! The queue capacity equals the worker count, so [`WorkerPool::submit`]
//! blocks once every worker is busy and the queue is full. That backpressure
//! keeps a producer from racing arbitrarily far ahead of the workers.
//!
//! # Usage
//!
//! ```
//! use pyratiles_core::queue::WorkerPool;
//! use std::sync::{Arc, atomic::{AtomicU32, Ordering}};
//!
//! let pool = WorkerPool::new(4);
//! let counter = Arc::new(AtomicU32::new(0));
//!
//! for _ in 0..16 {
//!     let counter = Arc::clone(&counter);
//!     pool.submit(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     });
//! }
//!
//! pool.wait();
//! assert_eq!(counter.load(Ordering::SeqCst), 16);
//! ```

use std::sync::{
	Arc, Condvar, Mutex,
	mpsc::{Receiver, SyncSender, sync_channel},
};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed-size pool of worker threads with a bounded job queue and a
/// barrier-style [`wait`](WorkerPool::wait).
///
/// The pool is a process-wide resource: workers live until the pool is
/// dropped and are reused across any number of submit/wait cycles.
pub struct WorkerPool {
	jobs: SyncSender<Job>,
	pending: Arc<(Mutex<usize>, Condvar)>,
	workers: usize,
}

impl WorkerPool {
	/// Spawns `workers` worker threads (at least one) sharing a job queue of
	/// the same capacity.
	pub fn new(workers: usize) -> WorkerPool {
		let workers = workers.max(1);
		let (jobs, receiver) = sync_channel::<Job>(workers);
		let receiver = Arc::new(Mutex::new(receiver));
		let pending = Arc::new((Mutex::new(0usize), Condvar::new()));

		for _ in 0..workers {
			let receiver = Arc::clone(&receiver);
			let pending = Arc::clone(&pending);
			thread::spawn(move || worker_loop(&receiver, &pending));
		}

		log::debug!("worker pool ready with {workers} workers");

		WorkerPool {
			jobs,
			pending,
			workers,
		}
	}

	/// Number of worker threads in the pool.
	pub fn workers(&self) -> usize {
		self.workers
	}

	/// Enqueues one unit of work, blocking while the queue is full.
	pub fn submit(&self, job: impl FnOnce() + Send + 'static) {
		{
			let (lock, _) = &*self.pending;
			*lock.lock().unwrap() += 1;
		}
		self
			.jobs
			.send(Box::new(job))
			.expect("worker pool has shut down");
	}

	/// Blocks until every submitted job has finished.
	pub fn wait(&self) {
		let (lock, signal) = &*self.pending;
		let mut pending = lock.lock().unwrap();
		while *pending > 0 {
			pending = signal.wait(pending).unwrap();
		}
	}
}

impl Default for WorkerPool {
	/// A pool sized at twice the number of logical CPUs; the tile workload
	/// mixes decoding work with file output, so it benefits from more workers
	/// than cores.
	fn default() -> Self {
		WorkerPool::new(num_cpus::get() * 2)
	}
}

fn worker_loop(receiver: &Mutex<Receiver<Job>>, pending: &(Mutex<usize>, Condvar)) {
	loop {
		let job = {
			let guard = receiver.lock().unwrap();
			guard.recv()
		};
		let Ok(job) = job else {
			return; // pool dropped, queue closed
		};

		job();

		let (lock, signal) = pending;
		*lock.lock().unwrap() -= 1;
		signal.notify_all();
	}
}
