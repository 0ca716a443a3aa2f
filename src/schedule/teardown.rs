use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable stop flag checked by [`crate::AnimationLoop`] before every tick.
///
/// Once requested, teardown cannot be undone; the loop finalizes its sink and returns.
#[derive(Clone, Debug, Default)]
pub struct TeardownHandle {
    flag: Arc<AtomicBool>,
}

impl TeardownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
