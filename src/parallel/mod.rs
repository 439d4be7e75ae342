pub mod batch;
pub mod pool;

pub use batch::{batch_ranges, batch_seed, generate_parallel};
pub use pool::{PoolError, WorkerPool};
