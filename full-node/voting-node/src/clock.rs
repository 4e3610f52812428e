use std::time::{SystemTime, UNIX_EPOCH};

type TimeSource = Box<dyn Fn() -> u64 + Send + Sync>;

/// Supplies call timestamps in seconds.
///
/// Readings never go backwards: if the source reports an earlier time than the
/// last reading, the last reading is returned again.
pub struct LedgerClock {
    source: TimeSource,
    last: u64,
}

impl LedgerClock {
    /// Clock backed by the system wall clock.
    pub fn system() -> Self {
        Self::from_fn(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default()
        })
    }

    /// Clock backed by an arbitrary source.
    pub fn from_fn(source: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
            last: 0,
        }
    }

    /// Raises the lowest reading the clock may return to `floor`.
    pub fn advance_to(&mut self, floor: u64) {
        self.last = self.last.max(floor);
    }

    /// Reads the clock.
    pub fn now(&mut self) -> u64 {
        let reading = (self.source)();
        if reading < self.last {
            tracing::warn!(reading, last = self.last, "Clock went backwards");
        } else {
            self.last = reading;
        }
        self.last
    }
}

impl std::fmt::Debug for LedgerClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClock")
            .field("last", &self.last)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn readings_never_go_backwards() {
        let time = Arc::new(AtomicU64::new(100));
        let source = time.clone();
        let mut clock = LedgerClock::from_fn(move || source.load(Ordering::SeqCst));

        assert_eq!(clock.now(), 100);
        time.store(90, Ordering::SeqCst);
        assert_eq!(clock.now(), 100);
        time.store(130, Ordering::SeqCst);
        assert_eq!(clock.now(), 130);
    }

    #[test]
    fn advanced_clock_holds_floor_until_source_catches_up() {
        let time = Arc::new(AtomicU64::new(100));
        let source = time.clone();
        let mut clock = LedgerClock::from_fn(move || source.load(Ordering::SeqCst));

        clock.advance_to(150);
        assert_eq!(clock.now(), 150);
        clock.advance_to(120);
        assert_eq!(clock.now(), 150);
        time.store(160, Ordering::SeqCst);
        assert_eq!(clock.now(), 160);
    }

    #[test]
    fn system_clock_is_past_epoch() {
        let mut clock = LedgerClock::system();
        assert!(clock.now() > 1_600_000_000);
    }
}
