//! The autoplay timer, driven by explicit instants.
//!
//! The controller never sleeps. Hosts call [`AutoplayController::poll`]
//! with the current time (a tokio task in the runtime, the event loop in
//! the terminal preview) and advance the carousel when it returns `true`.

use std::time::{Duration, Instant};

use tracing::trace;

/// Default pause between interactions ending and autoplay resuming.
pub const DEFAULT_RESUME_GRACE: Duration = Duration::from_millis(3000);

/// Schedules autoplay ticks.
///
/// Autoplay runs only when it is enabled by configuration, there are more
/// slides than fit on screen, and no interaction has paused it.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use plaudit_carousel::AutoplayController;
///
/// let start = Instant::now();
/// let mut autoplay = AutoplayController::new(Duration::from_secs(5), true);
/// autoplay.set_eligible(true, start);
///
/// assert!(!autoplay.poll(start + Duration::from_secs(4)));
/// assert!(autoplay.poll(start + Duration::from_secs(5)));
///
/// autoplay.pause();
/// assert!(!autoplay.poll(start + Duration::from_secs(60)));
/// ```
#[derive(Debug, Clone)]
pub struct AutoplayController {
    delay: Duration,
    resume_grace: Duration,
    enabled: bool,
    eligible: bool,
    paused: bool,
    next_tick: Option<Instant>,
}

impl AutoplayController {
    /// Creates a stopped controller. It starts once marked eligible.
    #[must_use]
    pub const fn new(delay: Duration, enabled: bool) -> Self {
        Self {
            delay,
            resume_grace: DEFAULT_RESUME_GRACE,
            enabled,
            eligible: false,
            paused: false,
            next_tick: None,
        }
    }

    /// Replaces the resume grace period.
    #[must_use]
    pub const fn with_resume_grace(mut self, grace: Duration) -> Self {
        self.resume_grace = grace;
        self
    }

    /// The delay between ticks.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns `true` while ticks are scheduled.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Returns `true` if an interaction paused autoplay.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// When the next tick is due, if any.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Updates eligibility (`total > visible`) after a resize or data change.
    pub fn set_eligible(&mut self, eligible: bool, now: Instant) {
        self.eligible = eligible;
        if self.can_run() {
            if self.next_tick.is_none() {
                self.next_tick = Some(now + self.delay);
            }
        } else {
            self.next_tick = None;
        }
    }

    /// Stops ticking until [`resume_after`](Self::resume_after).
    pub fn pause(&mut self) {
        if !self.paused {
            trace!("autoplay paused");
        }
        self.paused = true;
        self.next_tick = None;
    }

    /// Resumes ticking after the grace period.
    pub fn resume_after(&mut self, now: Instant) {
        self.paused = false;
        self.next_tick = self
            .can_run()
            .then(|| now + self.resume_grace + self.delay);
    }

    /// Restarts the delay from `now`, e.g. after a manual navigation.
    pub fn restart(&mut self, now: Instant) {
        if self.can_run() {
            self.next_tick = Some(now + self.delay);
        }
    }

    /// Returns `true` if a tick is due at `now` and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(due) if due <= now => {
                self.next_tick = Some(now + self.delay);
                true
            }
            _ => false,
        }
    }

    const fn can_run(&self) -> bool {
        self.enabled && self.eligible && !self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(5);

    fn running(now: Instant) -> AutoplayController {
        let mut autoplay = AutoplayController::new(DELAY, true);
        autoplay.set_eligible(true, now);
        autoplay
    }

    #[test]
    fn disabled_never_ticks() {
        let now = Instant::now();
        let mut autoplay = AutoplayController::new(DELAY, false);
        autoplay.set_eligible(true, now);
        assert!(!autoplay.is_running());
        assert!(!autoplay.poll(now + DELAY * 10));
    }

    #[test]
    fn ineligible_stops_ticks() {
        let now = Instant::now();
        let mut autoplay = running(now);
        autoplay.set_eligible(false, now);
        assert!(!autoplay.poll(now + DELAY));
        autoplay.set_eligible(true, now + DELAY);
        assert_eq!(autoplay.next_deadline(), Some(now + DELAY * 2));
    }

    #[test]
    fn resume_waits_for_grace_then_delay() {
        let now = Instant::now();
        let mut autoplay = running(now);
        autoplay.pause();
        autoplay.resume_after(now);

        let first = now + DEFAULT_RESUME_GRACE + DELAY;
        assert!(!autoplay.poll(first - Duration::from_millis(1)));
        assert!(autoplay.poll(first));
        assert_eq!(autoplay.next_deadline(), Some(first + DELAY));
    }

    #[test]
    fn eligibility_change_does_not_unpause() {
        let now = Instant::now();
        let mut autoplay = running(now);
        autoplay.pause();
        autoplay.set_eligible(true, now);
        assert!(autoplay.is_paused());
        assert!(!autoplay.is_running());
    }

    #[test]
    fn restart_pushes_deadline() {
        let now = Instant::now();
        let mut autoplay = running(now);
        autoplay.restart(now + Duration::from_secs(3));
        assert_eq!(
            autoplay.next_deadline(),
            Some(now + Duration::from_secs(3) + DELAY)
        );
    }
}
