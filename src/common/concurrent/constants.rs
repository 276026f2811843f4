pub(crate) const DEFAULT_NUM_SEGMENTS: usize = 16;

// The size-bounded cache reduces the number of segments until each segment can
// hold at least this many entries.
pub(crate) const MIN_ENTRIES_PER_SEGMENT: u64 = 20;

pub(crate) const NOTIFICATION_CHANNEL_CAPACITY: usize = 1_024;
pub(crate) const MAX_NOTIFICATIONS_PER_TASK: usize = 5_000;
pub(crate) const SEND_RETRY_INTERVAL_MICROS: u64 = 50;
