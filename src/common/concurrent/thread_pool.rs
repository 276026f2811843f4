use once_cell::sync::Lazy;
use parking_lot::RwLock;
use scheduled_thread_pool::ScheduledThreadPool;
use std::{collections::HashMap, sync::Arc};

static REGISTRY: Lazy<ThreadPoolRegistry> = Lazy::new(ThreadPoolRegistry::default);

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum PoolName {
    Refresher,
    RemovalNotifier,
}

impl PoolName {
    fn thread_name_template(&self) -> &'static str {
        match self {
            PoolName::Refresher => "loading-cache-refresher-{}",
            PoolName::RemovalNotifier => "loading-cache-notifier-{}",
        }
    }

    fn num_threads(&self) -> usize {
        match self {
            // Reloads may block on I/O, so give them one thread per CPU.
            PoolName::Refresher => available_parallelism(),
            // Notifications for a cache are drained by one task at a time.
            PoolName::RemovalNotifier => available_parallelism().min(2),
        }
    }
}

pub(crate) struct ThreadPool {
    pub(crate) name: PoolName,
    pub(crate) pool: ScheduledThreadPool,
}

impl ThreadPool {
    fn new(name: PoolName) -> Self {
        let pool = ScheduledThreadPool::with_name(name.thread_name_template(), name.num_threads());
        Self { name, pool }
    }
}

pub(crate) struct ThreadPoolRegistry {
    pools: RwLock<HashMap<PoolName, Arc<ThreadPool>>>,
}

impl Default for ThreadPoolRegistry {
    fn default() -> Self {
        Self {
            pools: RwLock::new(HashMap::default()),
        }
    }
}

impl ThreadPoolRegistry {
    pub(crate) fn acquire_pool(name: PoolName) -> Arc<ThreadPool> {
        loop {
            {
                // Acquire a read lock and get the pool.
                let pools = REGISTRY.pools.read();
                if let Some(pool) = pools.get(&name) {
                    return Arc::clone(pool);
                }
            }
            {
                // Acquire the write lock, double check the pool still does not exist,
                // and insert a new pool.
                let mut pools = REGISTRY.pools.write();
                pools
                    .entry(name)
                    .or_insert_with(|| Arc::new(ThreadPool::new(name)));
            }
        }
    }

    pub(crate) fn release_pool(pool: &Arc<ThreadPool>) {
        if Arc::strong_count(pool) <= 2 {
            // No other client exists; only this Arc and the registry are
            // the owners. Let's remove and drop the one in the registry.
            let name = pool.name;
            let mut pools = REGISTRY.pools.write();
            if let Some(pool) = pools.get(&name) {
                if Arc::strong_count(pool) <= 2 {
                    pools.remove(&name);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn enabled_pools() -> Vec<PoolName> {
        let mut names: Vec<_> = REGISTRY.pools.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

fn available_parallelism() -> usize {
    use std::{num::NonZeroUsize, thread::available_parallelism};
    available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::{PoolName, ThreadPoolRegistry};

    use std::sync::{mpsc, Arc};

    #[test]
    fn acquire_and_release() {
        let pool1 = ThreadPoolRegistry::acquire_pool(PoolName::Refresher);
        let pool2 = ThreadPoolRegistry::acquire_pool(PoolName::Refresher);
        assert!(Arc::ptr_eq(&pool1, &pool2));
        assert!(ThreadPoolRegistry::enabled_pools().contains(&PoolName::Refresher));

        let (tx, rx) = mpsc::channel();
        pool1.pool.execute(move || tx.send(42).expect("Failed to send"));
        assert_eq!(rx.recv().expect("Failed to receive"), 42);

        ThreadPoolRegistry::release_pool(&pool2);
        std::mem::drop(pool2);
        ThreadPoolRegistry::release_pool(&pool1);
    }
}
