use crate::library::clock::interface::Clock;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Every call to `now` returns the current reading and then advances by `step`.
pub struct ClockFake {
    current: Mutex<Instant>,
    step: Duration,
}

impl ClockFake {
    pub fn new(step: Duration) -> Self {
        Self {
            current: Mutex::new(Instant::now()),
            step,
        }
    }
}

impl Clock for ClockFake {
    fn now(&self) -> Instant {
        let mut current = match self.current.lock() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        let reading = *current;
        *current = reading + self.step;
        reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advances_by_step() {
        let clock = ClockFake::new(Duration::from_millis(42));
        let start = clock.now();
        let stop = clock.now();
        assert_eq!(stop - start, Duration::from_millis(42));
    }
}
