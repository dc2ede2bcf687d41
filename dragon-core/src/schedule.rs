//! Decides when the single render loop should run a pass.
//!
//! Two producers feed it: the periodic tick and input events. Both funnel
//! into [`RedrawScheduler::poll`], which the UI loop calls once per frame.
//! Times are seconds on the host clock.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawReason {
    Tick,
    Input,
}

#[derive(Debug)]
pub struct RedrawScheduler {
    interval: f64,
    last_render: Option<f64>,
    pending_input: bool,
}

impl RedrawScheduler {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last_render: None,
            pending_input: false,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Requests a pass on the next poll.
    pub fn request(&mut self) {
        self.pending_input = true;
    }

    /// Returns why a pass is due now, if one is, and marks it as taken.
    ///
    /// A pending input request wins over the tick. The very first poll
    /// always yields a tick.
    pub fn poll(&mut self, now: f64) -> Option<RedrawReason> {
        let reason = if self.pending_input {
            RedrawReason::Input
        } else {
            match self.last_render {
                Some(last) if now - last < self.interval => return None,
                _ => RedrawReason::Tick,
            }
        };

        self.pending_input = false;
        self.last_render = Some(now);
        Some(reason)
    }

    /// Seconds until the next tick is due, zero if a pass is already due.
    pub fn time_until_next(&self, now: f64) -> f64 {
        if self.pending_input {
            return 0.0;
        }
        match self.last_render {
            Some(last) => (last + self.interval - now).max(0.0),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_is_a_tick() {
        let mut s = RedrawScheduler::new(1.0);
        assert_eq!(s.poll(0.0), Some(RedrawReason::Tick));
        assert_eq!(s.poll(0.5), None);
    }

    #[test]
    fn ticks_follow_the_interval() {
        let mut s = RedrawScheduler::new(1.0);
        s.poll(0.0);
        assert_eq!(s.poll(0.99), None);
        assert_eq!(s.poll(1.0), Some(RedrawReason::Tick));
        assert_eq!(s.poll(1.5), None);
        assert!((s.time_until_next(1.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn input_redraws_immediately_and_restarts_the_tick() {
        let mut s = RedrawScheduler::new(1.0);
        s.poll(0.0);
        s.request();
        assert_eq!(s.time_until_next(0.2), 0.0);
        assert_eq!(s.poll(0.2), Some(RedrawReason::Input));
        assert_eq!(s.poll(1.1), None);
        assert_eq!(s.poll(1.2), Some(RedrawReason::Tick));
    }

    #[test]
    fn several_requests_collapse_into_one_pass() {
        let mut s = RedrawScheduler::new(1.0);
        s.poll(0.0);
        s.request();
        s.request();
        assert_eq!(s.poll(0.1), Some(RedrawReason::Input));
        assert_eq!(s.poll(0.2), None);
    }
}
