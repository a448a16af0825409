#[cfg(test)]
#[path = "../../tests/unit/utils/parallel_test.rs"]
mod parallel_test;

use rayon::prelude::*;
use rayon::{ThreadPool as RayonThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Represents a thread pool wrapper.
pub struct ThreadPool {
    inner: RayonThreadPool,
}

impl ThreadPool {
    /// Creates a new instance of `ThreadPool` with given amount of threads.
    pub fn new(num_threads: usize) -> Result<Self, String> {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map(|inner| Self { inner })
            .map_err(|err| format!("cannot build a thread pool: {err}"))
    }

    /// Executes given operation on thread pool.
    pub fn execute<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.inner.install(op)
    }
}

/// Specifies how data parallel work is scheduled.
#[derive(Clone, Default)]
pub enum Parallelism {
    /// Runs everything on the calling thread.
    Sequential,
    /// Uses rayon's global thread pool.
    #[default]
    Available,
    /// Uses a dedicated thread pool.
    Pool(Arc<ThreadPool>),
}

impl Parallelism {
    /// Creates a parallelism backed by a dedicated pool with given amount of threads.
    pub fn new_with_threads(num_threads: usize) -> Result<Self, String> {
        ThreadPool::new(num_threads).map(|pool| Self::Pool(Arc::new(pool)))
    }

    /// Performs mutable foreach according to the parallelism settings.
    pub fn for_each_mut<T, F>(&self, source: &mut [T], action: F)
    where
        T: Send + Sync,
        F: Fn(&mut T) + Send + Sync,
    {
        match self {
            Self::Sequential => source.iter_mut().for_each(action),
            Self::Available => parallel_foreach_mut(source, action),
            Self::Pool(pool) => pool.execute(|| parallel_foreach_mut(source, action)),
        }
    }
}

/// Performs mutable foreach in parallel.
pub fn parallel_foreach_mut<T, F>(source: &mut [T], action: F)
where
    T: Send + Sync,
    F: Fn(&mut T) + Send + Sync,
{
    source.par_iter_mut().for_each(action)
}
