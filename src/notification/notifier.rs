use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use crate::{
    common::concurrent::{
        constants::{
            MAX_NOTIFICATIONS_PER_TASK, NOTIFICATION_CHANNEL_CAPACITY, SEND_RETRY_INTERVAL_MICROS,
        },
        thread_pool::{PoolName, ThreadPool, ThreadPoolRegistry},
    },
    notification::{Configuration, DeliveryMode, RemovalCause, RemovalListener},
};

pub(crate) struct RemovedEntry<K, V> {
    key: Arc<K>,
    value: V,
    cause: RemovalCause,
}

impl<K, V> RemovedEntry<K, V> {
    pub(crate) fn new(key: Arc<K>, value: V, cause: RemovalCause) -> Self {
        Self { key, value, cause }
    }
}

pub(crate) enum RemovalNotifier<K, V> {
    Blocking(BlockingRemovalNotifier<K, V>),
    ThreadPool(ThreadPoolRemovalNotifier<K, V>),
}

impl<K, V> RemovalNotifier<K, V> {
    pub(crate) fn new(
        listener: RemovalListener<K, V>,
        conf: Configuration,
        cache_name: Option<String>,
    ) -> Self {
        let listener = GuardedListener::new(listener, cache_name);
        match conf.delivery_mode() {
            DeliveryMode::Immediate => Self::Blocking(BlockingRemovalNotifier { listener }),
            DeliveryMode::Queued => Self::ThreadPool(ThreadPoolRemovalNotifier::new(listener)),
        }
    }
}

impl<K, V> RemovalNotifier<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Delivers the notifications. Must not be called while holding a lock of the
    /// entry table.
    pub(crate) fn notify_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = RemovedEntry<K, V>>,
    {
        match self {
            RemovalNotifier::Blocking(notifier) => {
                for entry in entries {
                    notifier.listener.notify(entry);
                }
            }
            RemovalNotifier::ThreadPool(notifier) => {
                let entries = entries.into_iter().collect::<Vec<_>>();
                if !entries.is_empty() {
                    notifier.add_notifications(entries);
                }
            }
        }
    }
}

pub(crate) struct BlockingRemovalNotifier<K, V> {
    listener: GuardedListener<K, V>,
}

/// A listener that is disabled after it panics once.
struct GuardedListener<K, V> {
    listener: RemovalListener<K, V>,
    is_enabled: AtomicBool,
    #[cfg(feature = "logging")]
    cache_name: Option<String>,
}

impl<K, V> GuardedListener<K, V> {
    fn new(listener: RemovalListener<K, V>, _cache_name: Option<String>) -> Self {
        Self {
            listener,
            is_enabled: AtomicBool::new(true),
            #[cfg(feature = "logging")]
            cache_name: _cache_name,
        }
    }

    fn notify(&self, entry: RemovedEntry<K, V>) {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        if !self.is_enabled.load(Ordering::Acquire) {
            return;
        }

        let RemovedEntry { key, value, cause } = entry;
        let listener_clo = || (self.listener)(key, value, cause);

        // Safety: It is safe to assert unwind safety here because we will not
        // call the listener again if it has been panicked.
        let result = catch_unwind(AssertUnwindSafe(listener_clo));
        if let Err(_payload) = result {
            self.is_enabled.store(false, Ordering::Release);
            #[cfg(feature = "logging")]
            crate::common::log_panic(
                &*_payload,
                self.cache_name.as_deref(),
                "Disabled the removal listener",
            );
        }
    }
}

pub(crate) struct ThreadPoolRemovalNotifier<K, V> {
    snd: Sender<Vec<RemovedEntry<K, V>>>,
    state: Arc<NotifierState<K, V>>,
    thread_pool: Arc<ThreadPool>,
}

impl<K, V> Drop for ThreadPoolRemovalNotifier<K, V> {
    fn drop(&mut self) {
        let state = &self.state;
        // Disallow to create and run a notification task by now.
        state.shutdown();

        // Wait for the notification task to finish. (busy loop)
        while state.is_running() {
            std::thread::sleep(Duration::from_millis(1));
        }

        // Deliver what the task left in the channel on this thread.
        while let Ok(entries) = state.rcv.try_recv() {
            for entry in entries {
                state.listener.notify(entry);
            }
        }

        ThreadPoolRegistry::release_pool(&self.thread_pool);
    }
}

impl<K, V> ThreadPoolRemovalNotifier<K, V> {
    fn new(listener: GuardedListener<K, V>) -> Self {
        let (snd, rcv) = crossbeam_channel::bounded(NOTIFICATION_CHANNEL_CAPACITY);
        let thread_pool = ThreadPoolRegistry::acquire_pool(PoolName::RemovalNotifier);
        let state = NotifierState {
            task_lock: Default::default(),
            rcv,
            listener,
            is_running: Default::default(),
            is_shutting_down: Default::default(),
        };
        Self {
            snd,
            state: Arc::new(state),
            thread_pool,
        }
    }
}

impl<K, V> ThreadPoolRemovalNotifier<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn add_notifications(&self, entries: Vec<RemovedEntry<K, V>>) {
        let mut entries = entries;
        loop {
            match self.snd.try_send(entries) {
                Ok(()) => break,
                Err(TrySendError::Full(entries1)) => {
                    // Make sure somebody is draining the channel, then retry.
                    entries = entries1;
                    self.submit_task();
                    std::thread::sleep(Duration::from_micros(SEND_RETRY_INTERVAL_MICROS));
                }
                // The receiver lives in `self.state`, so the channel cannot be
                // disconnected while `self` is alive.
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
        self.submit_task();
    }

    fn submit_task(&self) {
        if !self.state.try_start() {
            // A task is already running. It will see the new notifications
            // before it stops.
            return;
        }

        let task = NotificationTask::new(&self.state);
        self.thread_pool.pool.execute(move || {
            task.execute();
        });
    }
}

struct NotificationTask<K, V> {
    state: Arc<NotifierState<K, V>>,
}

impl<K, V> NotificationTask<K, V> {
    fn new(state: &Arc<NotifierState<K, V>>) -> Self {
        Self {
            state: Arc::clone(state),
        }
    }

    fn execute(&self) {
        let state = &self.state;
        let task_lock = state.task_lock.lock();

        loop {
            let mut count = 0usize;
            while let Ok(entries) = state.rcv.try_recv() {
                // A received batch is always delivered in full. Batches still in
                // the channel at shutdown are delivered by `Drop`.
                for entry in entries {
                    state.listener.notify(entry);
                    count += 1;
                }

                if count > MAX_NOTIFICATIONS_PER_TASK || state.is_shutting_down() {
                    break;
                }
            }

            state.set_running(false);

            // Notifications may have been sent after the channel looked empty but
            // before `is_running` was cleared. Their senders saw a running task
            // and did not submit a new one, so keep draining if we can reclaim the
            // running flag.
            if state.rcv.is_empty() || state.is_shutting_down() || !state.try_start() {
                break;
            }
        }

        std::mem::drop(task_lock);
    }
}

struct NotifierState<K, V> {
    task_lock: Mutex<()>,
    rcv: Receiver<Vec<RemovedEntry<K, V>>>,
    listener: GuardedListener<K, V>,
    is_running: AtomicBool,
    is_shutting_down: AtomicBool,
}

impl<K, V> NotifierState<K, V> {
    fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Acquire)
    }

    /// Sets the running flag and returns `true` if it was not set.
    fn try_start(&self) -> bool {
        !self.is_shutting_down()
            && self
                .is_running
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
    }

    fn set_running(&self, value: bool) {
        self.is_running.store(value, Ordering::Release);
    }

    fn is_shutting_down(&self) -> bool {
        self.is_shutting_down.load(Ordering::Acquire)
    }

    fn shutdown(&self) {
        self.is_shutting_down.store(true, Ordering::Release);
    }
}
