//! Fixed-interval tick pacing.

use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Paces ticks at a fixed interval on the caller's thread.
///
/// The loop owns no state besides the tick counter and the next deadline,
/// so each fire runs to completion before the next can begin. Stopping
/// keeps the counter; starting again resumes numbering where it left off.
#[derive(Debug, Clone)]
pub struct AnimationLoop {
    interval: Duration,
    next_tick: u64,
    /// Deadline of the next tick, `None` while stopped.
    deadline: Option<Instant>,
}

impl AnimationLoop {
    /// A stopped loop whose first tick will be tick 1.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: 1,
            deadline: None,
        }
    }

    /// Arm the first tick one interval from `now`. No-op when running.
    pub fn start(&mut self, now: Instant) {
        if self.deadline.is_some() {
            return;
        }
        self.deadline = Some(now + self.interval);
        info!(
            interval_ms = self.interval.as_millis() as u64,
            next_tick = self.next_tick,
            "animation started"
        );
    }

    /// Stop firing. Safe to call any number of times, running or not.
    pub fn stop(&mut self) {
        if self.deadline.take().is_some() {
            info!(next_tick = self.next_tick, "animation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Number the next fire will pass to its callback.
    pub fn next_tick(&self) -> u64 {
        self.next_tick
    }

    /// Change the interval, re-arming from `now` if running.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.deadline.is_some() {
            self.deadline = Some(now + interval);
        }
        debug!(interval_ms = interval.as_millis() as u64, "animation interval changed");
    }

    /// Restart tick numbering at 1.
    pub fn reset(&mut self) {
        self.next_tick = 1;
    }

    /// Time left until the next tick is due, `None` while stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Run `tick_fn` for the current tick if it is due, then advance.
    ///
    /// At most one tick runs per call. Missed ticks are not replayed; the
    /// next deadline is measured from `now`. The counter advances even if
    /// `tick_fn` fails, and the error is passed through.
    pub fn fire_if_due<E>(
        &mut self,
        now: Instant,
        tick_fn: impl FnOnce(u64) -> Result<(), E>,
    ) -> Result<bool, E> {
        match self.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return Ok(false),
        }
        let tick = self.next_tick;
        let result = tick_fn(tick);
        self.next_tick += 1;
        self.deadline = Some(now + self.interval);
        result.map(|()| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    const INTERVAL: Duration = Duration::from_millis(50);

    fn fire(animation: &mut AnimationLoop, now: Instant) -> Option<u64> {
        let mut fired = None;
        animation
            .fire_if_due(now, |tick| {
                fired = Some(tick);
                Ok::<(), Infallible>(())
            })
            .unwrap();
        fired
    }

    #[test]
    fn test_stopped_loop_never_fires() {
        let mut animation = AnimationLoop::new(INTERVAL);
        let t0 = Instant::now();
        assert!(!animation.is_running());
        assert_eq!(animation.time_until_next(t0), None);
        assert_eq!(fire(&mut animation, t0 + INTERVAL * 10), None);
        assert_eq!(animation.next_tick(), 1);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut animation = AnimationLoop::new(INTERVAL);
        let t0 = Instant::now();
        animation.start(t0);

        assert_eq!(fire(&mut animation, t0), None);
        assert_eq!(animation.time_until_next(t0), Some(INTERVAL));
        assert_eq!(fire(&mut animation, t0 + INTERVAL), Some(1));
        assert_eq!(fire(&mut animation, t0 + INTERVAL), None);
        assert_eq!(fire(&mut animation, t0 + INTERVAL * 2), Some(2));
    }

    #[test]
    fn test_late_ticks_are_not_replayed() {
        let mut animation = AnimationLoop::new(INTERVAL);
        let t0 = Instant::now();
        animation.start(t0);

        let late = t0 + INTERVAL * 10;
        assert_eq!(fire(&mut animation, late), Some(1));
        assert_eq!(fire(&mut animation, late), None);
        assert_eq!(fire(&mut animation, late + INTERVAL), Some(2));
    }

    #[test]
    fn test_stop_is_idempotent_and_restart_resumes() {
        let mut animation = AnimationLoop::new(INTERVAL);
        animation.stop();

        let t0 = Instant::now();
        animation.start(t0);
        assert_eq!(fire(&mut animation, t0 + INTERVAL), Some(1));

        animation.stop();
        animation.stop();
        assert_eq!(fire(&mut animation, t0 + INTERVAL * 5), None);

        let t1 = t0 + INTERVAL * 6;
        animation.start(t1);
        animation.start(t1 + INTERVAL);
        assert_eq!(fire(&mut animation, t1 + INTERVAL), Some(2));
    }

    #[test]
    fn test_reset_and_interval_change() {
        let mut animation = AnimationLoop::new(INTERVAL);
        let t0 = Instant::now();
        animation.start(t0);
        fire(&mut animation, t0 + INTERVAL);
        animation.reset();
        assert_eq!(animation.next_tick(), 1);

        let slow = Duration::from_millis(200);
        animation.set_interval(slow, t0 + INTERVAL);
        assert_eq!(animation.time_until_next(t0 + INTERVAL), Some(slow));
        assert_eq!(fire(&mut animation, t0 + INTERVAL + slow), Some(1));
    }

    #[test]
    fn test_error_still_advances() {
        let mut animation = AnimationLoop::new(INTERVAL);
        let t0 = Instant::now();
        animation.start(t0);
        let result = animation.fire_if_due(t0 + INTERVAL, |_| Err("draw failed"));
        assert_eq!(result, Err("draw failed"));
        assert_eq!(animation.next_tick(), 2);
    }
}
