use std::time::{Duration, Instant};

use crate::constants::MAX_CATCH_UP_TICKS;

/// Start/stop handle for a task repeating at a fixed period. The caller owns
/// the clock and asks how many ticks have come due.
#[derive(Clone, Debug)]
pub struct TickSchedule {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickSchedule {
    pub fn new(ticks_per_second: u32) -> Self {
        TickSchedule {
            period: Duration::from_secs(1) / ticks_per_second.max(1),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Number of ticks to run now. A backlog longer than
    /// `MAX_CATCH_UP_TICKS` is dropped instead of replayed.
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut ticks = 0;
        while due <= now && ticks < MAX_CATCH_UP_TICKS {
            ticks += 1;
            due += self.period;
        }
        if due <= now {
            due = now + self.period;
        }
        self.next_due = Some(due);
        ticks
    }
}
