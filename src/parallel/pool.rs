//! Rayon thread pool configuration for batch generation.
//!
//! Use [WorkerPool::install] to run parallel generation with a fixed number of threads,
//! or rely on Rayon's default (all CPU cores). Thread count never affects output.

use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

pub type PoolError = ThreadPoolBuildError;

/// Configures how many worker threads are used for parallel batch execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the global Rayon pool.
    pub workers: usize,
}

impl WorkerPool {
    /// Use all available CPU cores (Rayon default).
    pub fn default_workers() -> Self {
        Self::default()
    }

    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure on a pool with this worker count. With 0 workers the closure runs on
    /// the global Rayon pool; otherwise a temporary pool is built.
    pub fn install<F, R>(&self, f: F) -> Result<R, PoolError>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            Ok(f())
        } else {
            let pool = ThreadPoolBuilder::new().num_threads(self.workers).build()?;
            Ok(pool.install(f))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_runs_closure_with_explicit_workers() {
        let pool = WorkerPool::with_workers(2);
        let threads = pool.install(rayon::current_num_threads).unwrap();
        assert_eq!(threads, 2);
    }

    #[test]
    fn default_pool_runs_inline() {
        assert_eq!(WorkerPool::default_workers().install(|| 7).unwrap(), 7);
    }
}
