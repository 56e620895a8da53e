use std::time::Instant;

/// Monotonic time source. Never backed by wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
