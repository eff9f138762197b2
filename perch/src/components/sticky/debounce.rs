use std::time::{Duration, Instant};

/// Leading and trailing edge debounce over explicit timestamps.
///
/// An event arriving after a quiet window fires at once (`record` returns
/// true). Events inside the window are collapsed into one trailing event that
/// `ready` reports after `window` has passed since the most recent of them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Debounce {
    window: Duration,
    last_event: Option<Instant>,
    trailing: bool,
}

impl Debounce {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            last_event: None,
            trailing: false,
        }
    }

    pub(crate) fn is_immediate(&self) -> bool {
        self.window.is_zero()
    }

    /// Note an event. Returns true when it opens a new burst and should be
    /// handled now.
    pub(crate) fn record(&mut self, at: Instant) -> bool {
        let leading = match self.last_event {
            Some(last) => at.saturating_duration_since(last) >= self.window,
            None => true,
        };
        self.last_event = Some(match self.last_event {
            Some(last) if last > at => last,
            _ => at,
        });
        self.trailing = !leading;
        leading
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.trailing
    }

    /// Returns true, and clears the trailing event, when the window has
    /// elapsed since the last recorded event.
    pub(crate) fn ready(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(last) if self.trailing && now.saturating_duration_since(last) >= self.window => {
                self.trailing = false;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.last_event = None;
        self.trailing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_fires_immediately() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(5));

        assert!(debounce.record(start));
        assert!(!debounce.is_pending());
        assert!(!debounce.ready(start + Duration::from_millis(20)));
    }

    #[test]
    fn test_burst_collapses_into_one_trailing_event() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(5));

        assert!(debounce.record(start));
        assert!(!debounce.record(start + Duration::from_millis(2)));
        assert!(!debounce.record(start + Duration::from_millis(4)));
        assert!(debounce.is_pending());

        assert!(!debounce.ready(start + Duration::from_millis(6)));
        assert!(debounce.ready(start + Duration::from_millis(9)));
        assert!(!debounce.ready(start + Duration::from_millis(20)));
    }

    #[test]
    fn test_event_after_quiet_window_supersedes_trailing() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(5));

        debounce.record(start);
        debounce.record(start + Duration::from_millis(1));
        assert!(debounce.record(start + Duration::from_millis(10)));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_nothing_recorded_is_never_ready() {
        let mut debounce = Debounce::new(Duration::from_millis(5));
        assert!(!debounce.is_pending());
        assert!(!debounce.ready(Instant::now()));
    }

    #[test]
    fn test_cancel_drops_pending_event() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(5));
        debounce.record(start);
        debounce.record(start + Duration::from_millis(1));
        debounce.cancel();
        assert!(!debounce.is_pending());
        assert!(!debounce.ready(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_zero_window_is_immediate() {
        assert!(Debounce::new(Duration::ZERO).is_immediate());
        assert!(!Debounce::new(Duration::from_millis(1)).is_immediate());
    }
}
