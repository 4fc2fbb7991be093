//! Fixed-step tick scheduler.
//!
//! The host loop calls [`Scheduler::advance`] with the wall-clock time since
//! its last frame, then drains [`Scheduler::next_due`] once per tick owed.
//! There is no background timer, so once [`Scheduler::stop`] returns no
//! tick can fire until the scheduler is started again.

use super::constants::MAX_FRAME_DT_MS;

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    interval_ms: u64,
    accumulated_ms: u64,
    running: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking every `interval_ms`. Restarting clears any owed time.
    pub fn start(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms.max(1);
        self.accumulated_ms = 0;
        self.running = true;
    }

    /// Stop ticking and forget owed time.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated_ms = 0;
    }

    /// Change the interval. Time already owed is kept, so the new value
    /// governs the next tick onward.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms.max(1);
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record elapsed wall-clock time. Ignored while stopped.
    pub fn advance(&mut self, dt_ms: u64) {
        if !self.running {
            return;
        }
        self.accumulated_ms += dt_ms.min(MAX_FRAME_DT_MS);
    }

    /// Consume one tick's worth of owed time, if there is one.
    pub fn next_due(&mut self) -> bool {
        if !self.running || self.accumulated_ms < self.interval_ms {
            return false;
        }
        self.accumulated_ms -= self.interval_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler) -> u32 {
        let mut ticks = 0;
        while scheduler.next_due() {
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_idle_scheduler_never_fires() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(1_000);
        assert_eq!(drain(&mut scheduler), 0);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut scheduler = Scheduler::new();
        scheduler.start(100);
        scheduler.advance(250);
        assert_eq!(drain(&mut scheduler), 2);
        // 50ms carried over
        scheduler.advance(50);
        assert_eq!(drain(&mut scheduler), 1);
    }

    #[test]
    fn test_stop_discards_owed_ticks() {
        let mut scheduler = Scheduler::new();
        scheduler.start(100);
        scheduler.advance(400);
        assert!(scheduler.next_due());
        scheduler.stop();
        assert!(!scheduler.next_due());
        scheduler.advance(400);
        assert_eq!(drain(&mut scheduler), 0);
    }

    #[test]
    fn test_interval_change_applies_to_next_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.start(100);
        scheduler.advance(150);
        assert!(scheduler.next_due());
        scheduler.set_interval(40);
        // 50ms owed, 40ms interval: one tick, 10ms left
        assert_eq!(drain(&mut scheduler), 1);
        scheduler.advance(30);
        assert_eq!(drain(&mut scheduler), 1);
    }

    #[test]
    fn test_large_dt_clamped() {
        let mut scheduler = Scheduler::new();
        scheduler.start(100);
        scheduler.advance(60_000);
        assert_eq!(drain(&mut scheduler), (MAX_FRAME_DT_MS / 100) as u32);
    }

    #[test]
    fn test_zero_interval_treated_as_one() {
        let mut scheduler = Scheduler::new();
        scheduler.start(0);
        assert_eq!(scheduler.interval_ms(), 1);
    }
}
