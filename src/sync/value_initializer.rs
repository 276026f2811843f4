use parking_lot::RwLock;
use triomphe::Arc as TrioArc;

use crate::common::error::{BoxError, LoadError};

/// `None` while the value is being computed.
pub(crate) type WaiterValue<V> = Option<Result<V, LoadError>>;

/// The result cell of an in-flight load. The loading thread holds the write lock
/// until the result is set; other threads block on the read lock.
pub(crate) type Waiter<V> = TrioArc<RwLock<WaiterValue<V>>>;

/// The outcome of trying to claim the slot of a key for loading.
pub(crate) enum Claim<V> {
    /// A usable value was already in the table.
    Found(V),
    /// Another thread is loading the value.
    Wait(Waiter<V>),
    /// Our waiter was installed as the placeholder of the key.
    Inserted,
}

pub(crate) enum InitResult<V> {
    /// Our `init` closure computed the value.
    Initialized(V),
    /// Another thread computed the value while we were waiting.
    ReadExisting(V),
    /// The value was already cached.
    Found(V),
    InitErr(LoadError),
}

/// Computes a value for a key at most once at a time.
///
/// `claim` is called with a fresh waiter whose write lock is held. It either
/// returns a usable value, hands back the waiter of a load already in flight, or
/// installs our waiter as the placeholder of the key. In the last case `init` is
/// evaluated and `post_init` installs its result, or removes the placeholder on
/// failure, before waiting threads are released.
///
/// # Panics
///
/// Panics if the `init` closure panics. Threads waiting on this load receive
/// `LoadError::Panicked`.
pub(crate) fn try_init_or_read<V>(
    mut claim: impl FnMut(&Waiter<V>) -> Claim<V>,
    init: impl FnOnce() -> Result<V, BoxError>,
    post_init: impl FnOnce(&Waiter<V>, Result<&V, &LoadError>),
) -> InitResult<V>
where
    V: Clone,
{
    use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
    use InitResult::*;

    const MAX_RETRIES: usize = 200;
    let mut retries = 0;

    loop {
        let waiter = TrioArc::new(RwLock::new(None));
        let mut lock = waiter.write();

        match claim(&waiter) {
            Claim::Found(value) => return Found(value),
            Claim::Inserted => {
                // Catching panic is safe here as we do not try to evaluate the
                // closure again.
                match catch_unwind(AssertUnwindSafe(init)) {
                    Ok(Ok(value)) => {
                        post_init(&waiter, Ok(&value));
                        *lock = Some(Ok(value.clone()));
                        return Initialized(value);
                    }
                    Ok(Err(e)) => {
                        let err = LoadError::from_boxed(e);
                        post_init(&waiter, Err(&err));
                        *lock = Some(Err(err.clone()));
                        return InitErr(err);
                    }
                    Err(payload) => {
                        post_init(&waiter, Err(&LoadError::Panicked));
                        *lock = Some(Err(LoadError::Panicked));
                        std::mem::drop(lock);
                        resume_unwind(payload);
                    }
                } // The write lock will be unlocked here.
            }
            Claim::Wait(other) => {
                // Drop our write lock and wait for the loading thread to release
                // its own.
                std::mem::drop(lock);
                match &*other.read() {
                    Some(Ok(value)) => return ReadExisting(value.clone()),
                    Some(Err(e)) => return InitErr(e.clone()),
                    // The loading thread went away without setting a result.
                    None => {
                        retries += 1;
                        if retries >= MAX_RETRIES {
                            panic!(
                                "Too many retries. Tried to read the result of a load \
                                 but failed {retries} times"
                            );
                        }
                    }
                }
            }
        }
    }
}
