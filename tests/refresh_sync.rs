use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use loading_cache::{
    notification::{Configuration, DeliveryMode},
    sync::{LoadingCache, ReloadMode},
    BoxError, CacheLoader, RemovalCause,
};
use parking_lot::Mutex;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Returns the next value of a shared counter, both on load and on reload.
#[derive(Clone)]
struct Counter {
    next: Arc<AtomicUsize>,
    delay: Duration,
}

impl Counter {
    fn new(delay: Duration) -> Self {
        Self {
            next: Default::default(),
            delay,
        }
    }
}

impl CacheLoader<u32, usize> for Counter {
    fn load(&self, _key: &u32) -> Result<usize, BoxError> {
        thread::sleep(self.delay);
        Ok(self.next.fetch_add(1, Ordering::AcqRel))
    }
}

/// Loads the key, then adds one to the old value on every reload. Reloads fail
/// when the old value is odd.
#[derive(Clone, Default)]
struct Incrementing {
    reloads: Arc<AtomicUsize>,
}

impl CacheLoader<u32, u32> for Incrementing {
    fn load(&self, key: &u32) -> Result<u32, BoxError> {
        Ok(*key)
    }

    fn reload(&self, _key: &u32, old_value: &u32) -> Result<u32, BoxError> {
        self.reloads.fetch_add(1, Ordering::AcqRel);
        if old_value % 2 == 1 {
            Err("odd values are not reloaded".into())
        } else {
            Ok(old_value + 1)
        }
    }
}

fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

/// Checks that reads keep making progress while reloads race with
/// `invalidate_all`. Which of the racing writers ends up in the cache is covered
/// by the `LoadingCache` unit tests.
#[test]
fn keeps_refreshing_after_invalidate_all() {
    init_logger();

    const ITERATIONS: usize = 20;

    let cache = LoadingCache::builder()
        .refresh_after_write(Duration::from_millis(1))
        .build(Counter::new(Duration::from_millis(10)));

    // Keep a reader running so that reloads are in flight while the main
    // thread invalidates the cache.
    let reader = {
        let cache = cache.clone();
        let done = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = Arc::clone(&done);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Acquire) {
                let _ = cache.get(&0);
            }
        });
        (handle, done)
    };

    let mut values = Vec::with_capacity(ITERATIONS);
    for _ in 0..ITERATIONS {
        thread::sleep(Duration::from_millis(50));
        cache.invalidate_all();
        values.push(cache.get(&0).expect("the loader never fails"));
    }

    reader.1.store(true, Ordering::Release);
    reader.0.join().expect("reader thread panicked");

    let distinct: HashSet<_> = values.iter().copied().collect();
    assert_eq!(distinct.len(), ITERATIONS, "values: {values:?}");
    assert_eq!(cache.size(), 1);
}

#[test]
fn background_reload_serves_stale_value() {
    init_logger();

    let loader = Incrementing::default();
    let cache = LoadingCache::builder()
        .refresh_after_write(Duration::from_millis(50))
        .reload_mode(ReloadMode::Background)
        .build(loader.clone());

    assert_eq!(cache.get(&2).unwrap(), 2);
    thread::sleep(Duration::from_millis(60));

    // The read returns the stale value and schedules a reload.
    assert_eq!(cache.get(&2).unwrap(), 2);
    assert!(wait_until(Duration::from_secs(2), || {
        cache.get_if_present(&2) == Some(3)
    }));
    assert_eq!(loader.reloads.load(Ordering::Acquire), 1);
}

#[test]
fn background_reload_failure_keeps_value() {
    init_logger();

    let failures = Arc::new(Mutex::new(Vec::new()));
    let failures1 = Arc::clone(&failures);
    let loader = Incrementing::default();
    let cache = LoadingCache::builder()
        .refresh_after_write(Duration::from_millis(30))
        .expire_after_write(Duration::from_secs(60))
        .reload_mode(ReloadMode::Background)
        .reload_failure_listener(move |k: &u32, e| failures1.lock().push((*k, e.to_string())))
        .build(loader.clone());

    assert_eq!(cache.get(&1).unwrap(), 1);
    thread::sleep(Duration::from_millis(40));
    assert_eq!(cache.get(&1).unwrap(), 1);

    assert!(wait_until(Duration::from_secs(2), || !failures.lock().is_empty()));
    assert_eq!(cache.get_if_present(&1), Some(1));

    let failures = failures.lock();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 1);
    assert!(failures[0].1.contains("odd values are not reloaded"));
}

#[test]
fn reload_replaces_value_and_notifies() {
    init_logger();

    let events = Arc::new(Mutex::new(Vec::new()));
    let events1 = Arc::clone(&events);
    let cache = LoadingCache::builder()
        .refresh_after_write(Duration::from_millis(20))
        .removal_listener_with_conf(
            move |k: Arc<u32>, v: u32, cause| events1.lock().push((*k, v, cause)),
            Configuration::builder()
                .delivery_mode(DeliveryMode::Immediate)
                .build(),
        )
        .build(Incrementing::default());

    assert_eq!(cache.get(&4).unwrap(), 4);
    thread::sleep(Duration::from_millis(30));

    // Inline reload returns the new value.
    assert_eq!(cache.get(&4).unwrap(), 5);
    assert_eq!(*events.lock(), vec![(4, 4, RemovalCause::Replaced)]);
}
